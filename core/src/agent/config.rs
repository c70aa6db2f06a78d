//! Agent configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_AGENT_NAME: &str = "Zenith";

pub const DEFAULT_SYSTEM_MESSAGE: &str = "You Are Zenith, A CLI-Based AI Coding Agent That \
    Transforms Natural Language Into Efficient, Production-Ready Code!";

const DEFAULT_MAX_STEPS: usize = 10;

/// Configuration for an assistant agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Display name of the agent
    pub name: String,

    /// Short description of what the agent does
    pub description: String,

    /// System message opening every conversation
    pub system_message: String,

    /// Maximum completion/tool rounds per user message
    pub max_steps: usize,

    /// Tool names the agent may call; empty means all registered tools
    pub tools: Vec<String>,

    /// Stream responses when the client supports it
    pub stream: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_AGENT_NAME.to_string(),
            description: DEFAULT_SYSTEM_MESSAGE.to_string(),
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            max_steps: DEFAULT_MAX_STEPS,
            tools: Vec::new(),
            stream: true,
        }
    }
}
