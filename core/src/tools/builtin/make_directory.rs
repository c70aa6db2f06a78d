//! Directory creation tool

use crate::error::{Result, ToolError};
use crate::impl_tool_factory;
use crate::tools::{Tool, ToolCall, ToolResult};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Outcome of a directory creation.
#[derive(Debug, Clone, Serialize)]
pub struct MakeDirectoryResult {
    pub path: PathBuf,
    pub message: String,
}

/// Create `path` as a directory. With `parents`, missing ancestors are
/// created too. An existing directory is only an error when `exist_ok` is
/// false.
pub fn make_directory(path: &Path, parents: bool, exist_ok: bool) -> Result<MakeDirectoryResult> {
    if path.is_dir() {
        if !exist_ok {
            return Err(ToolError::ExecutionFailed {
                message: format!("Directory Already Exists: {}", path.display()),
            }
            .into());
        }
    } else {
        let created = if parents {
            std::fs::create_dir_all(path)
        } else {
            std::fs::create_dir(path)
        };
        created.map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => ToolError::ExecutionFailed {
                message: format!("Permission Denied: {}", path.display()),
            },
            ErrorKind::AlreadyExists => ToolError::ExecutionFailed {
                message: format!("Directory Already Exists: {}", path.display()),
            },
            _ => ToolError::ExecutionFailed {
                message: format!("Failed To Create Directory: {e}"),
            },
        })?;
    }

    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    Ok(MakeDirectoryResult {
        path: resolved,
        message: "Directory Created Successfully".to_string(),
    })
}

/// Tool wrapper exposing `make_directory` to the agent
pub struct MakeDirectoryTool;

impl MakeDirectoryTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MakeDirectoryTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for MakeDirectoryTool {
    fn name(&self) -> &str {
        "make_directory"
    }

    fn description(&self) -> &str {
        "Create a directory.\n\
         * Missing parent directories are created by default (parents=true)\n\
         * An existing directory is accepted by default (exist_ok=true)"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Directory to create."
                },
                "parents": {
                    "type": "boolean",
                    "description": "Create missing parent directories (default: true)."
                },
                "exist_ok": {
                    "type": "boolean",
                    "description": "Succeed when the directory already exists (default: true)."
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let path: String = call.get_parameter("path")?;
        let parents = call.get_parameter_or("parents", true);
        let exist_ok = call.get_parameter_or("exist_ok", true);

        let result = make_directory(Path::new(&path), parents, exist_ok)?;
        let data = serde_json::to_value(&result)?;

        let content = format!("{}: {}", result.message, result.path.display());
        Ok(ToolResult::success(&call.id, content).with_data(data))
    }
}

impl_tool_factory!(
    MakeDirectoryToolFactory,
    MakeDirectoryTool,
    "make_directory",
    "Create a directory, with optional parent creation"
);

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("fresh");

        let result = make_directory(&target, true, true).unwrap();
        assert!(target.is_dir());
        assert_eq!(result.message, "Directory Created Successfully");
    }

    #[test]
    fn test_creates_nested_parents() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a/b/c");

        make_directory(&target, true, true).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn test_missing_parent_without_parents_flag() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing/child");

        let err = make_directory(&target, false, true).unwrap_err();
        assert!(err.to_string().contains("Failed To Create Directory"));
    }

    #[test]
    fn test_existing_directory_with_exist_ok() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("existing");
        std::fs::create_dir(&target).unwrap();

        let result = make_directory(&target, true, true).unwrap();
        assert_eq!(result.message, "Directory Created Successfully");
    }

    #[test]
    fn test_existing_directory_without_exist_ok() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("existing");
        std::fs::create_dir(&target).unwrap();

        let err = make_directory(&target, true, false).unwrap_err();
        assert!(err.to_string().contains("Directory Already Exists"));
    }

    #[tokio::test]
    async fn test_tool_wrapper_defaults() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("x/y");

        let tool = MakeDirectoryTool::new();
        let call = ToolCall::new("make_directory", json!({"path": target.to_string_lossy()}));

        let result = tool.execute(call).await.unwrap();
        assert!(result.success);
        assert!(target.is_dir());
        assert_eq!(
            result.data.unwrap()["message"],
            "Directory Created Successfully"
        );
    }
}
