//! Content replacement tool

use crate::error::{Result, ToolError};
use crate::impl_tool_factory;
use crate::tools::utils::format_size;
use crate::tools::{Tool, ToolCall, ToolResult};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Outcome of a replacement.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaceContentResult {
    pub path: PathBuf,
    pub replacements: usize,
    pub size: String,
}

/// Replace every occurrence of `old_content` in the file with `new_content`.
pub fn replace_content(
    path: &Path,
    old_content: &str,
    new_content: &str,
) -> Result<ReplaceContentResult> {
    if !path.exists() {
        return Err(ToolError::ExecutionFailed {
            message: format!("File Not Found: {}", path.display()),
        }
        .into());
    }
    if !path.is_file() {
        return Err(ToolError::ExecutionFailed {
            message: format!("Path Is Not A File: {}", path.display()),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ToolError::ExecutionFailed {
        message: format!("Failed To Replace Content In File: {e}"),
    })?;

    let replacements = content.matches(old_content).count();
    if replacements == 0 {
        return Err(ToolError::ExecutionFailed {
            message: format!("Old Content Not Found In File: {}", path.display()),
        }
        .into());
    }

    let updated = content.replace(old_content, new_content);
    std::fs::write(path, &updated).map_err(|e| ToolError::ExecutionFailed {
        message: format!("Failed To Replace Content In File: {e}"),
    })?;

    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    Ok(ReplaceContentResult {
        path: resolved,
        replacements,
        size: format_size(updated.len() as u64),
    })
}

/// Tool wrapper exposing `replace_content` to the agent
pub struct ReplaceContentTool;

impl ReplaceContentTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReplaceContentTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ReplaceContentTool {
    fn name(&self) -> &str {
        "replace_content"
    }

    fn description(&self) -> &str {
        "Replace text in a file.\n\
         * Every occurrence of old_content is replaced with new_content\n\
         * Fails when old_content does not appear in the file"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File to modify."
                },
                "old_content": {
                    "type": "string",
                    "description": "Exact text to replace."
                },
                "new_content": {
                    "type": "string",
                    "description": "Replacement text."
                }
            },
            "required": ["path", "old_content", "new_content"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let path: String = call.get_parameter("path")?;
        let old_content: String = call.get_parameter("old_content")?;
        let new_content: String = call.get_parameter("new_content")?;

        let result = replace_content(Path::new(&path), &old_content, &new_content)?;
        let data = serde_json::to_value(&result)?;

        let content = format!(
            "Replaced {} occurrence(s) in '{}' ({})",
            result.replacements,
            result.path.display(),
            result.size
        );

        Ok(ToolResult::success(&call.id, content).with_data(data))
    }
}

impl_tool_factory!(
    ReplaceContentToolFactory,
    ReplaceContentTool,
    "replace_content",
    "Replace every occurrence of a text snippet in a file"
);
