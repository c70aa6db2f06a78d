//! Filename search tool
//!
//! Depth-first search for files whose name contains a pattern, honoring the
//! project's `.gitignore` and the same hidden-entry rules as the tree
//! listing. Unreadable directories are skipped silently; the search never
//! aborts mid-walk.

use crate::error::{Result, ToolError};
use crate::impl_tool_factory;
use crate::tools::utils::{
    create_match, find_project_root, is_ignored, load_gitignore_patterns, relative_for_matching,
    SearchMatch,
};
use crate::tools::{Tool, ToolCall, ToolResult};
use async_trait::async_trait;
use regex::Regex;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Options controlling a filename search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Match file names case-sensitively.
    pub case_sensitive: bool,
    /// Restrict matches to these extensions (without the leading dot).
    pub file_types: Option<Vec<String>>,
    /// Descend into hidden entries as well.
    pub include_hidden: bool,
    /// Honor the project's `.gitignore`.
    pub respect_gitignore: bool,
    /// Stop after this many matches.
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            file_types: None,
            include_hidden: false,
            respect_gitignore: true,
            max_results: 100,
        }
    }
}

/// Search `directory` (or the current working directory) for files whose
/// name contains `pattern`.
pub fn search_files(
    pattern: &str,
    directory: Option<&Path>,
    options: &SearchOptions,
) -> Result<Vec<SearchMatch>> {
    let directory = match directory {
        Some(directory) => directory.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !directory.exists() {
        return Err(ToolError::InvalidParameters {
            message: format!("Directory Does Not Exist: {}", directory.display()),
        }
        .into());
    }
    if !directory.is_dir() {
        return Err(ToolError::InvalidParameters {
            message: format!("Path Is Not A Directory: {}", directory.display()),
        }
        .into());
    }

    let patterns = if options.respect_gitignore {
        let project_root = find_project_root(&directory);
        Some((load_gitignore_patterns(&project_root), project_root))
    } else {
        None
    };

    let needle = if options.case_sensitive {
        pattern.to_string()
    } else {
        pattern.to_lowercase()
    };

    let mut matches = Vec::new();
    walk(&directory, &needle, options, patterns.as_ref(), &mut matches);
    Ok(matches)
}

fn walk(
    dir: &Path,
    needle: &str,
    options: &SearchOptions,
    ignore: Option<&(Vec<Regex>, PathBuf)>,
    matches: &mut Vec<SearchMatch>,
) {
    // An unreadable directory yields nothing from this subtree.
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        if matches.len() >= options.max_results {
            return;
        }

        let entry_path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if !options.include_hidden && name.starts_with('.') {
            continue;
        }

        if let Some((patterns, project_root)) = ignore {
            if let Some(rel) = relative_for_matching(&entry_path, project_root) {
                if is_ignored(&rel, patterns) {
                    continue;
                }
            }
        }

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(_) => continue,
        };

        if file_type.is_dir() {
            walk(&entry_path, needle, options, ignore, matches);
            continue;
        }

        let haystack = if options.case_sensitive {
            name.clone()
        } else {
            name.to_lowercase()
        };
        if !haystack.contains(needle) {
            continue;
        }

        if let Some(ref extensions) = options.file_types {
            let extension = entry_path
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !extensions
                .iter()
                .any(|wanted| wanted.eq_ignore_ascii_case(&extension))
            {
                continue;
            }
        }

        if let Ok(found) = create_match(&entry_path) {
            matches.push(found);
        }
    }
}

/// Tool wrapper exposing `search_files` to the agent
pub struct SearchFilesTool;

impl SearchFilesTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SearchFilesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for SearchFilesTool {
    fn name(&self) -> &str {
        "search_files"
    }

    fn description(&self) -> &str {
        "Search a directory tree for files whose name contains a pattern.\n\
         * Substring match on the file name, case-insensitive by default\n\
         * Optional extension filter (file_types, without the leading dot)\n\
         * Hidden entries are skipped unless include_hidden is set\n\
         * Entries excluded by the project's .gitignore are skipped unless respect_gitignore is false\n\
         * Stops after max_results matches (default 100)"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Substring to look for in file names."
                },
                "directory": {
                    "type": "string",
                    "description": "Directory to search (default: current working directory)."
                },
                "case_sensitive": {
                    "type": "boolean",
                    "description": "Match case-sensitively (default: false)."
                },
                "file_types": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Only report files with these extensions, without the leading dot."
                },
                "include_hidden": {
                    "type": "boolean",
                    "description": "Also search hidden files and directories (default: false)."
                },
                "respect_gitignore": {
                    "type": "boolean",
                    "description": "Skip entries excluded by .gitignore (default: true)."
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of matches to return (default: 100)."
                }
            },
            "required": ["pattern"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let pattern: String = call.get_parameter("pattern")?;
        let directory: Option<String> = call.get_parameter("directory").ok();
        let directory = directory.map(PathBuf::from);

        let defaults = SearchOptions::default();
        let options = SearchOptions {
            case_sensitive: call.get_parameter_or("case_sensitive", defaults.case_sensitive),
            file_types: call.get_parameter("file_types").ok(),
            include_hidden: call.get_parameter_or("include_hidden", defaults.include_hidden),
            respect_gitignore: call
                .get_parameter_or("respect_gitignore", defaults.respect_gitignore),
            max_results: call.get_parameter_or("max_results", defaults.max_results),
        };

        let matches = search_files(&pattern, directory.as_deref(), &options)?;
        let data = serde_json::to_value(&matches)?;

        let content = if matches.is_empty() {
            format!("No files matching '{pattern}' were found")
        } else {
            let mut lines = vec![format!(
                "Found {} file(s) matching '{pattern}':",
                matches.len()
            )];
            for found in &matches {
                lines.push(format!("  {} ({})", found.path.display(), found.size_human));
            }
            lines.join("\n")
        };

        Ok(ToolResult::success(&call.id, content).with_data(data))
    }
}

impl_tool_factory!(
    SearchFilesToolFactory,
    SearchFilesTool,
    "search_files",
    "Search a directory tree for files by name"
);
