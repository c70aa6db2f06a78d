//! LLM client abstraction and providers

pub mod client;
pub mod message;
pub mod providers;

pub use client::{
    ChatOptions, FinishReason, FunctionDefinition, LlmClient, LlmResponse, LlmStream,
    LlmStreamChunk, ToolCallDelta, ToolDefinition, Usage,
};
pub use message::{Message, MessageRole};
pub use providers::OpenAiClient;
