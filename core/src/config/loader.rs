//! Configuration file loaders
//!
//! Two formats are supported: a flat JSON object and a line-oriented env
//! file. Keys are normalized to the `zenith_` prefix so both spellings
//! (`model` and `zenith_model`) resolve to the same setting.

use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::path::Path;

const KEY_PREFIX: &str = "zenith_";

fn normalize_key(key: &str) -> String {
    let key = key.trim().to_lowercase();
    if key.starts_with(KEY_PREFIX) {
        key
    } else {
        format!("{KEY_PREFIX}{key}")
    }
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Load a flat JSON object of settings.
pub fn load_json_config(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&content)?;

    let object = parsed.as_object().ok_or(ConfigError::InvalidFormat)?;

    Ok(object
        .iter()
        .map(|(key, value)| (normalize_key(key), value_to_string(value)))
        .collect())
}

/// Load a line-oriented `key=value` file. Blank lines, comments and lines
/// without `=` are skipped.
pub fn load_env_config(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)?;

    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        map.insert(normalize_key(key), value.trim().to_string());
    }

    Ok(map)
}

/// Load a configuration file, dispatching on its extension.
pub fn load_config(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => load_json_config(path),
        "env" => load_env_config(path),
        _ => Err(ConfigError::UnsupportedExtension {
            extension: format!(".{extension}"),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_json_config_normalizes_keys() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("config.json");
        std::fs::write(
            &file,
            r#"{"openai_api_key": "sk-test", "zenith_model": "gpt-4o"}"#,
        )
        .unwrap();

        let map = load_json_config(&file).unwrap();
        assert_eq!(map.get("zenith_openai_api_key").unwrap(), "sk-test");
        assert_eq!(map.get("zenith_model").unwrap(), "gpt-4o");
    }

    #[test]
    fn test_json_config_rejects_non_object() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("config.json");
        std::fs::write(&file, "[1, 2, 3]").unwrap();

        assert!(load_json_config(&file).is_err());
    }

    #[test]
    fn test_env_config_skips_invalid_lines() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(".config.env");
        std::fs::write(
            &file,
            "# Zenith settings\n\nopenai_api_key=sk-test\nnot a valid line\nzenith_model=gpt-4\n",
        )
        .unwrap();

        let map = load_env_config(&file).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("zenith_openai_api_key").unwrap(), "sk-test");
        assert_eq!(map.get("zenith_model").unwrap(), "gpt-4");
    }

    #[test]
    fn test_load_config_dispatch() {
        let dir = tempdir().unwrap();

        let json = dir.path().join("config.json");
        std::fs::write(&json, r#"{"model": "gpt-4"}"#).unwrap();
        assert!(load_config(&json).is_ok());

        let env = dir.path().join(".config.env");
        std::fs::write(&env, "model=gpt-4\n").unwrap();
        assert!(load_config(&env).is_ok());
    }

    #[test]
    fn test_load_config_unsupported_extension() {
        let dir = tempdir().unwrap();
        let yaml = dir.path().join("config.yaml");
        std::fs::write(&yaml, "model: gpt-4\n").unwrap();

        let err = load_config(&yaml).unwrap_err();
        assert!(err
            .to_string()
            .contains("Unsupported Configuration File Extension: .yaml"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
