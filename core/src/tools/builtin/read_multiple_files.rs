//! Batch file reading tool
//!
//! Reads a list of files with the same line-range semantics as `read_file`.
//! Failures are recorded per entry and never abort the batch.

use crate::error::Result;
use crate::impl_tool_factory;
use crate::tools::builtin::read_file::read_file;
use crate::tools::{Tool, ToolCall, ToolResult};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Per-path outcome in a batch read. `content` and the counters are only
/// meaningful when `success` is true.
#[derive(Debug, Clone, Serialize)]
pub struct FileReadEntry {
    pub path: PathBuf,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_line_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Read every path in `paths`, in input order.
pub fn read_multiple_files(
    paths: &[PathBuf],
    start_line: Option<usize>,
    end_line: Option<usize>,
) -> Vec<FileReadEntry> {
    paths
        .iter()
        .map(|path| match read_file(path, start_line, end_line) {
            Ok(read) => FileReadEntry {
                path: read.path,
                success: true,
                content: Some(read.content),
                line_count: Some(read.line_count),
                selected_line_count: Some(read.selected_line_count),
                size: Some(read.size),
                error: None,
            },
            Err(e) => FileReadEntry {
                path: path.clone(),
                success: false,
                content: None,
                line_count: None,
                selected_line_count: None,
                size: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

/// Tool wrapper exposing `read_multiple_files` to the agent
pub struct ReadMultipleFilesTool;

impl ReadMultipleFilesTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReadMultipleFilesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ReadMultipleFilesTool {
    fn name(&self) -> &str {
        "read_multiple_files"
    }

    fn description(&self) -> &str {
        "Read several UTF-8 text files in one call.\n\
         * Optional 1-based inclusive line range applied to every file\n\
         * Each file gets its own result entry; one unreadable file never fails the batch"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "paths": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Files to read, in order."
                },
                "start_line": {
                    "type": "integer",
                    "description": "First line to include (1-based)."
                },
                "end_line": {
                    "type": "integer",
                    "description": "Last line to include (1-based, inclusive)."
                }
            },
            "required": ["paths"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let paths: Vec<String> = call.get_parameter("paths")?;
        let paths: Vec<PathBuf> = paths.iter().map(|path| PathBuf::from(path)).collect();
        let start_line: Option<usize> = call.get_parameter("start_line").ok();
        let end_line: Option<usize> = call.get_parameter("end_line").ok();

        let entries = read_multiple_files(&paths, start_line, end_line);
        let data = serde_json::to_value(&entries)?;

        let ok = entries.iter().filter(|entry| entry.success).count();
        let content = format!(
            "Read {ok} of {} file(s):\n{}",
            entries.len(),
            serde_json::to_string_pretty(&data)?
        );

        Ok(ToolResult::success(&call.id, content).with_data(data))
    }
}

impl_tool_factory!(
    ReadMultipleFilesToolFactory,
    ReadMultipleFilesTool,
    "read_multiple_files",
    "Read several text files in one call"
);
