//! Configuration discovery for the CLI
//!
//! An explicit `--config` path wins. Otherwise `./.zenith/` is probed for
//! `config.json` and `.config.env`; exactly one of them must exist.

use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use zenith_core::ZenithConfig;

const CONFIG_DIR: &str = ".zenith";
const JSON_CONFIG: &str = "config.json";
const ENV_CONFIG: &str = ".config.env";

/// Find the configuration file to use, starting from `base_dir`.
pub fn discover_config_path(base_dir: &Path) -> anyhow::Result<PathBuf> {
    let config_dir = base_dir.join(CONFIG_DIR);
    let json_path = config_dir.join(JSON_CONFIG);
    let env_path = config_dir.join(ENV_CONFIG);

    match (json_path.is_file(), env_path.is_file()) {
        (true, true) => bail!(
            "Multiple Configuration Files Found In {CONFIG_DIR}/ - Keep Either {JSON_CONFIG} Or {ENV_CONFIG}"
        ),
        (true, false) => Ok(json_path),
        (false, true) => Ok(env_path),
        (false, false) => bail!(
            "Configuration File Not Found - Create {CONFIG_DIR}/{JSON_CONFIG} Or {CONFIG_DIR}/{ENV_CONFIG}, Or Pass --config"
        ),
    }
}

/// Resolve the configuration: explicit flag first, then discovery in the
/// current working directory.
pub fn resolve_config(flag: Option<&Path>) -> anyhow::Result<ZenithConfig> {
    let path = match flag {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("Failed To Determine Working Directory")?;
            discover_config_path(&cwd)?
        }
    };

    ZenithConfig::load(&path)
        .with_context(|| format!("Failed To Load Configuration From {}", path.display()))
}
