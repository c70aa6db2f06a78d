//! Output sink the agent reports progress through

use crate::tools::{ToolCall, ToolResult};
use async_trait::async_trait;

/// Sink for agent events. The CLI implements a console-printing sink;
/// `NullOutput` discards everything.
#[async_trait]
pub trait AgentOutput: Send + Sync {
    /// New piece of streamed assistant text
    async fn on_text_delta(&self, delta: &str);

    /// A tool call is about to execute
    async fn on_tool_start(&self, call: &ToolCall);

    /// A tool call finished
    async fn on_tool_result(&self, result: &ToolResult);

    /// A non-fatal error occurred during the step
    async fn on_error(&self, message: &str);
}

/// Output sink that discards all events
pub struct NullOutput;

#[async_trait]
impl AgentOutput for NullOutput {
    async fn on_text_delta(&self, _delta: &str) {}

    async fn on_tool_start(&self, _call: &ToolCall) {}

    async fn on_tool_result(&self, _result: &ToolResult) {}

    async fn on_error(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_output_swallows_everything() {
        let output = NullOutput;
        tokio_test::block_on(async {
            output.on_text_delta("chunk").await;
            output
                .on_tool_start(&ToolCall::new("list_files", serde_json::json!({})))
                .await;
            output.on_tool_result(&ToolResult::success("id", "ok")).await;
            output.on_error("boom").await;
        });
    }
}
