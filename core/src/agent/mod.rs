//! Assistant agent

pub mod config;
pub mod core;

pub use config::{AgentConfig, DEFAULT_AGENT_NAME, DEFAULT_SYSTEM_MESSAGE};
pub use core::{AgentBuilder, AssistantAgent};
