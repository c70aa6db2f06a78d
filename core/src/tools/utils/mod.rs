//! Shared helpers for the filesystem tools

pub mod gitignore;
pub mod metadata;

pub use gitignore::{
    find_project_root, gitignore_to_regex, is_ignored, load_gitignore_patterns,
    relative_for_matching,
};
pub use metadata::{
    create_match, create_node, format_mode, format_size, format_timestamp, FileNode, NodeKind,
    SearchMatch,
};
