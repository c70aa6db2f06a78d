//! Configuration loading and types

pub mod loader;
pub mod types;

pub use loader::{load_config, load_env_config, load_json_config};
pub use types::{ZenithConfig, DEFAULT_MODEL};
