//! # Zenith Core
//!
//! Core library for Zenith - a CLI-based AI coding agent.
//!
//! This library provides the building blocks for an agent that turns natural
//! language into code edits: a typed configuration layer, an OpenAI-compatible
//! LLM client, a tool system with a set of filesystem tools, and the agent
//! loop that ties them together.

// Core modules
pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod output;
pub mod tools;

// Re-export commonly used types
pub use agent::{AgentBuilder, AgentConfig, AssistantAgent};
pub use config::ZenithConfig;
pub use error::{Error, Result};
pub use llm::{LlmClient, OpenAiClient};
pub use output::{AgentOutput, NullOutput};

/// Current version of the zenith-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
