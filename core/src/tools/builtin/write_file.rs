//! File writing tool

use crate::error::{Result, ToolError};
use crate::impl_tool_factory;
use crate::tools::utils::format_size;
use crate::tools::{Tool, ToolCall, ToolResult};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Outcome of a write.
#[derive(Debug, Clone, Serialize)]
pub struct WriteFileResult {
    pub path: PathBuf,
    pub size: String,
    pub append: bool,
    pub encoding: String,
}

/// Write (or append) `content` to `path`. The parent directory must exist
/// unless `create_parents` is set.
pub fn write_file(
    path: &Path,
    content: &str,
    append: bool,
    create_parents: bool,
) -> Result<WriteFileResult> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if create_parents {
                std::fs::create_dir_all(parent)?;
            } else {
                return Err(ToolError::ExecutionFailed {
                    message: format!("Parent Directory Not Found: {}", parent.display()),
                }
                .into());
            }
        }
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(|e| map_write_error(e, path))?;

    file.write_all(content.as_bytes())
        .map_err(|e| map_write_error(e, path))?;

    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    Ok(WriteFileResult {
        path: resolved,
        size: format_size(size),
        append,
        encoding: "utf-8".to_string(),
    })
}

fn map_write_error(e: std::io::Error, path: &Path) -> crate::error::Error {
    match e.kind() {
        ErrorKind::PermissionDenied => ToolError::ExecutionFailed {
            message: format!("Permission Denied: {}", path.display()),
        },
        _ => ToolError::ExecutionFailed {
            message: format!("Failed To Write File: {e}"),
        },
    }
    .into()
}

/// Tool wrapper exposing `write_file` to the agent
pub struct WriteFileTool;

impl WriteFileTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WriteFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write UTF-8 text to a file.\n\
         * Overwrites by default; set append to add to the end instead\n\
         * The parent directory must exist unless create_parents is set"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File to write."
                },
                "content": {
                    "type": "string",
                    "description": "Text to write."
                },
                "append": {
                    "type": "boolean",
                    "description": "Append instead of overwriting (default: false)."
                },
                "create_parents": {
                    "type": "boolean",
                    "description": "Create missing parent directories (default: false)."
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let path: String = call.get_parameter("path")?;
        let content: String = call.get_parameter("content")?;
        let append = call.get_parameter_or("append", false);
        let create_parents = call.get_parameter_or("create_parents", false);

        let result = write_file(Path::new(&path), &content, append, create_parents)?;
        let data = serde_json::to_value(&result)?;

        let verb = if append { "Appended to" } else { "Wrote" };
        let content = format!("{verb} '{}' ({})", result.path.display(), result.size);

        Ok(ToolResult::success(&call.id, content).with_data(data))
    }
}

impl_tool_factory!(
    WriteFileToolFactory,
    WriteFileTool,
    "write_file",
    "Write or append text to a file"
);

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("out.txt");

        let result = write_file(&file, "Hello, World!", false, false).unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "Hello, World!");
        assert!(!result.append);
        assert_eq!(result.encoding, "utf-8");
    }

    #[test]
    fn test_write_overwrites_by_default() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("out.txt");
        std::fs::write(&file, "old content that is longer").unwrap();

        write_file(&file, "new", false, false).unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "new");
    }

    #[test]
    fn test_write_append() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("out.txt");
        std::fs::write(&file, "first\n").unwrap();

        let result = write_file(&file, "second\n", true, false).unwrap();
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "first\nsecond\n"
        );
        assert!(result.append);
    }

    #[test]
    fn test_write_missing_parent() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("missing/out.txt");

        let err = write_file(&file, "data", false, false).unwrap_err();
        assert!(err.to_string().contains("Parent Directory Not Found"));
    }

    #[test]
    fn test_write_create_parents() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a/b/out.txt");

        write_file(&file, "data", false, true).unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "data");
    }

    #[tokio::test]
    async fn test_tool_wrapper_writes_and_reports() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("out.txt");

        let tool = WriteFileTool::new();
        let call = ToolCall::new(
            "write_file",
            json!({"path": file.to_string_lossy(), "content": "payload"}),
        );

        let result = tool.execute(call).await.unwrap();
        assert!(result.success);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "payload");

        let data = result.data.unwrap();
        assert_eq!(data["append"], false);
        assert_eq!(data["encoding"], "utf-8");
    }
}
