//! Console output sink for agent events

use async_trait::async_trait;
use console::style;
use std::io::Write;
use zenith_core::tools::{ToolCall, ToolResult};
use zenith_core::AgentOutput;

/// Prints streamed text as it arrives and tool activity as dim side notes.
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentOutput for ConsoleOutput {
    async fn on_text_delta(&self, delta: &str) {
        print!("{delta}");
        let _ = std::io::stdout().flush();
    }

    async fn on_tool_start(&self, call: &ToolCall) {
        println!();
        println!(
            "{} {}",
            style("⚙").dim(),
            style(format!("{}({})", call.name, call.parameters)).dim()
        );
    }

    async fn on_tool_result(&self, result: &ToolResult) {
        let mark = if result.success {
            style("✓").green()
        } else {
            style("✗").red()
        };
        let duration = result
            .duration_ms
            .map(|ms| format!(" ({ms} ms)"))
            .unwrap_or_default();

        println!("{mark} {}{duration}", style(&result.tool_call_id).dim());
    }

    async fn on_error(&self, message: &str) {
        eprintln!("{}", style(message).red());
    }
}
