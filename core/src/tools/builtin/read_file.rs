//! File reading tool with optional line ranges

use crate::error::{Result, ToolError};
use crate::impl_tool_factory;
use crate::tools::utils::format_size;
use crate::tools::{Tool, ToolCall, ToolResult};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Outcome of a single file read.
#[derive(Debug, Clone, Serialize)]
pub struct ReadFileResult {
    pub path: PathBuf,
    pub content: String,
    pub line_count: usize,
    pub selected_line_count: usize,
    pub encoding: String,
    pub size: String,
}

fn invalid_range(start: usize, end: Option<usize>) -> crate::error::Error {
    let end = end.map_or("end".to_string(), |end| end.to_string());
    ToolError::InvalidParameters {
        message: format!("Invalid Line Range: {start}-{end}"),
    }
    .into()
}

/// Split `content` into lines, each keeping its own trailing newline. A range
/// that stops short of the last line therefore keeps the newline of its final
/// selected line, while a range reaching the end reproduces the file tail
/// byte for byte.
fn split_keepends(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (idx, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            lines.push(&content[start..=idx]);
            start = idx + 1;
        }
    }
    if start < content.len() {
        lines.push(&content[start..]);
    }
    lines
}

/// Read `path`, optionally restricted to a 1-based inclusive line range.
pub fn read_file(
    path: &Path,
    start_line: Option<usize>,
    end_line: Option<usize>,
) -> Result<ReadFileResult> {
    if let (Some(start), Some(end)) = (start_line, end_line) {
        if start > end {
            return Err(invalid_range(start, Some(end)));
        }
    }
    if start_line == Some(0) || end_line == Some(0) {
        return Err(invalid_range(start_line.unwrap_or(0), end_line));
    }

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

    let resolved = std::fs::canonicalize(path)?;

    let bytes = std::fs::read(&resolved).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => ToolError::ExecutionFailed {
            message: format!("Permission Denied: {}", resolved.display()),
        },
        _ => ToolError::ExecutionFailed {
            message: format!("Failed To Read File: {e}"),
        },
    })?;
    let size = format_size(bytes.len() as u64);

    let content = String::from_utf8(bytes).map_err(|_| ToolError::ExecutionFailed {
        message: format!(
            "Failed To Decode File With Encoding 'utf-8': {}",
            resolved.display()
        ),
    })?;

    let lines = split_keepends(&content);
    let line_count = lines.len();

    let (selected, selected_count) = match (start_line, end_line) {
        (None, None) => (content.clone(), line_count),
        (start, end) => {
            let start = start.unwrap_or(1);
            let end = end.unwrap_or(line_count);
            if start > line_count {
                return Err(invalid_range(start, end_line));
            }
            let end = end.min(line_count);
            let slice = &lines[start - 1..end];
            (slice.concat(), slice.len())
        }
    };

    Ok(ReadFileResult {
        path: resolved,
        content: selected,
        line_count,
        selected_line_count: selected_count,
        encoding: "utf-8".to_string(),
        size,
    })
}

/// Tool wrapper exposing `read_file` to the agent
pub struct ReadFileTool;

impl ReadFileTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReadFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read a UTF-8 text file, optionally restricted to a line range.\n\
         * start_line and end_line are 1-based and inclusive\n\
         * Returns the content plus the file's total line count and size"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File to read."
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
            "required": ["path"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let path: String = call.get_parameter("path")?;
        let start_line: Option<usize> = call.get_parameter("start_line").ok();
        let end_line: Option<usize> = call.get_parameter("end_line").ok();

        let result = read_file(Path::new(&path), start_line, end_line)?;
        let data = serde_json::to_value(&result)?;

        let content = format!(
            "Read {} line(s) from '{}' ({}):\n{}",
            result.selected_line_count,
            result.path.display(),
            result.size,
            result.content
        );

        Ok(ToolResult::success(&call.id, content).with_data(data))
    }
}

impl_tool_factory!(
    ReadFileToolFactory,
    ReadFileTool,
    "read_file",
    "Read a text file, optionally restricted to a line range"
);

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_whole_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("sample.txt");
        std::fs::write(&file, "Line 1\nLine 2\nLine 3\nLine 4\nLine 5").unwrap();

        let result = read_file(&file, None, None).unwrap();
        assert_eq!(result.content, "Line 1\nLine 2\nLine 3\nLine 4\nLine 5");
        assert_eq!(result.line_count, 5);
        assert_eq!(result.selected_line_count, 5);
        assert_eq!(result.encoding, "utf-8");
        assert!(result.path.is_absolute());
    }

    #[test]
    fn test_read_line_range_keeps_trailing_newline() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("sample.txt");
        std::fs::write(&file, "Line 1\nLine 2\nLine 3\nLine 4\nLine 5").unwrap();

        let result = read_file(&file, Some(2), Some(4)).unwrap();
        assert_eq!(result.content, "Line 2\nLine 3\nLine 4\n");
        assert_eq!(result.selected_line_count, 3);
        assert_eq!(result.line_count, 5);
    }

    #[test]
    fn test_read_open_ended_range_reproduces_tail() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("sample.txt");
        std::fs::write(&file, "Line 1\nLine 2\nLine 3\nLine 4\nLine 5").unwrap();

        let result = read_file(&file, Some(3), None).unwrap();
        assert_eq!(result.content, "Line 3\nLine 4\nLine 5");
        assert_eq!(result.selected_line_count, 3);
    }

    #[test]
    fn test_read_invalid_ranges() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("sample.txt");
        std::fs::write(&file, "Line 1\nLine 2\n").unwrap();

        let err = read_file(&file, Some(4), Some(2)).unwrap_err();
        assert!(err.to_string().contains("Invalid Line Range"));

        let err = read_file(&file, Some(0), Some(1)).unwrap_err();
        assert!(err.to_string().contains("Invalid Line Range"));

        let err = read_file(&file, Some(10), None).unwrap_err();
        assert!(err.to_string().contains("Invalid Line Range"));
    }

    #[test]
    fn test_read_end_past_eof_is_clamped() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("sample.txt");
        std::fs::write(&file, "Line 1\nLine 2\nLine 3").unwrap();

        let result = read_file(&file, Some(2), Some(100)).unwrap();
        assert_eq!(result.content, "Line 2\nLine 3");
        assert_eq!(result.selected_line_count, 2);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_file(&dir.path().join("nope.txt"), None, None).unwrap_err();
        assert!(err.to_string().contains("File Not Found"));
    }

    #[test]
    fn test_read_directory() {
        let dir = tempdir().unwrap();
        let err = read_file(dir.path(), None, None).unwrap_err();
        assert!(err.to_string().contains("Path Is Not A File"));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("binary.bin");
        std::fs::write(&file, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = read_file(&file, None, None).unwrap_err();
        assert!(err
            .to_string()
            .contains("Failed To Decode File With Encoding"));
    }

    #[tokio::test]
    async fn test_tool_wrapper_returns_structured_result() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("sample.txt");
        std::fs::write(&file, "Hello\nWorld\n").unwrap();

        let tool = ReadFileTool::new();
        let call = ToolCall::new(
            "read_file",
            json!({"path": file.to_string_lossy(), "start_line": 1, "end_line": 1}),
        );

        let result = tool.execute(call).await.unwrap();
        assert!(result.success);

        let data = result.data.unwrap();
        assert_eq!(data["content"], "Hello\n");
        assert_eq!(data["line_count"], 2);
        assert_eq!(data["selected_line_count"], 1);
        assert_eq!(data["encoding"], "utf-8");
    }
}
