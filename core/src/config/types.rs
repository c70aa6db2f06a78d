//! Typed configuration

use crate::agent::DEFAULT_SYSTEM_MESSAGE;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_MODEL: &str = "gpt-4";

const KEY_API_KEY: &str = "zenith_openai_api_key";
const KEY_API_BASE: &str = "zenith_openai_api_base";
const KEY_MODEL: &str = "zenith_model";
const KEY_DESCRIPTION: &str = "zenith_description";
const KEY_SYSTEM_MESSAGE: &str = "zenith_system_message";

/// Resolved Zenith configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZenithConfig {
    /// API key for the OpenAI-compatible endpoint (required)
    pub api_key: String,

    /// Endpoint base URL; the provider default is used when absent
    pub api_base: Option<String>,

    /// Model name, defaults to `gpt-4`
    pub model: String,

    /// Agent description shown in diagnostics
    pub description: String,

    /// System message opening every conversation
    pub system_message: String,
}

impl ZenithConfig {
    /// Build a config from a normalized (prefixed-key) map.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let api_key = map
            .get(KEY_API_KEY)
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or_else(|| ConfigError::MissingField {
                field: KEY_API_KEY.to_string(),
            })?;

        Ok(Self {
            api_key,
            api_base: map.get(KEY_API_BASE).cloned(),
            model: map
                .get(KEY_MODEL)
                .cloned()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            description: map
                .get(KEY_DESCRIPTION)
                .cloned()
                .unwrap_or_else(|| DEFAULT_SYSTEM_MESSAGE.to_string()),
            system_message: map
                .get(KEY_SYSTEM_MESSAGE)
                .cloned()
                .unwrap_or_else(|| DEFAULT_SYSTEM_MESSAGE.to_string()),
        })
    }

    /// Load and resolve a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let map = crate::config::load_config(path)?;
        Self::from_map(&map)
    }
}
