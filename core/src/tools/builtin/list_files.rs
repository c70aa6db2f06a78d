//! Directory tree listing tool
//!
//! Builds a recursive node tree for a directory, skipping hidden entries
//! (except `.gitignore` itself) and anything excluded by the project's
//! `.gitignore`. A directory whose listing fails is marked with an error and
//! an empty child list; the rest of the walk is unaffected.

use crate::error::{Result, ToolError};
use crate::impl_tool_factory;
use crate::tools::utils::{
    create_node, find_project_root, is_ignored, load_gitignore_patterns, relative_for_matching,
    FileNode, NodeKind,
};
use crate::tools::{Tool, ToolCall, ToolResult};
use async_trait::async_trait;
use regex::Regex;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Build the tree for `path`, or the current working directory when `None`.
///
/// Fails when the path does not exist or is not a directory; every other
/// filesystem error mid-walk is absorbed at the directory it occurred in.
pub fn list_files(path: Option<&Path>) -> Result<FileNode> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !path.exists() {
        return Err(ToolError::InvalidParameters {
            message: format!("Folder Path Does Not Exist: {}", path.display()),
        }
        .into());
    }
    if !path.is_dir() {
        return Err(ToolError::InvalidParameters {
            message: format!("Path Is Not A Directory: {}", path.display()),
        }
        .into());
    }

    let project_root = find_project_root(&path);
    let patterns = load_gitignore_patterns(&project_root);

    let mut root = create_node(&path)?;
    build_tree(&mut root, &project_root, &patterns);
    Ok(root)
}

/// Recursively populate `node.children`, consulting the ignore patterns at
/// every entry. Visits entries in directory-listing order.
pub fn build_tree(node: &mut FileNode, project_root: &Path, patterns: &[Regex]) {
    if node.kind != NodeKind::Directory {
        return;
    }

    let entries = match std::fs::read_dir(&node.path) {
        Ok(entries) => entries,
        Err(_) => {
            // Unreadable directory: keep an empty child list and mark the
            // node, siblings continue undisturbed.
            node.children = Some(Vec::new());
            node.error = Some("Permission Denied".to_string());
            return;
        }
    };

    let mut children = Vec::new();

    for entry in entries.flatten() {
        let entry_path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        // Hidden entries are skipped, but the .gitignore file is always shown.
        if name.starts_with('.') && name != ".gitignore" {
            continue;
        }

        if let Some(rel) = relative_for_matching(&entry_path, project_root) {
            if is_ignored(&rel, patterns) {
                continue;
            }
        }

        let mut child = match create_node(&entry_path) {
            Ok(child) => child,
            Err(_) => continue,
        };

        if child.kind == NodeKind::Directory {
            build_tree(&mut child, project_root, patterns);
        }

        children.push(child);
    }

    node.children = Some(children);
}

/// Tool wrapper exposing `list_files` to the agent
pub struct ListFilesTool;

impl ListFilesTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ListFilesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List the contents of a directory as a recursive tree.\n\
         * Each node carries name, absolute path, type, size, timestamps and permissions\n\
         * Hidden entries are skipped (the .gitignore file itself is always shown)\n\
         * Entries excluded by the project's .gitignore are omitted\n\
         * Unreadable subdirectories are marked with an error instead of aborting the scan"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Directory to list (default: current working directory)."
                }
            },
            "required": []
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let path: Option<String> = call.get_parameter("path").ok();
        let path = path.map(PathBuf::from);

        let tree = list_files(path.as_deref())?;
        let data = serde_json::to_value(&tree)?;

        let child_count = tree.children.as_ref().map(Vec::len).unwrap_or(0);
        let content = format!(
            "Listed directory '{}' ({} top-level entries):\n{}",
            tree.path.display(),
            child_count,
            serde_json::to_string_pretty(&data)?
        );

        Ok(ToolResult::success(&call.id, content).with_data(data))
    }
}

impl_tool_factory!(
    ListFilesToolFactory,
    ListFilesTool,
    "list_files",
    "List directory contents as a gitignore-aware recursive tree"
);
