//! Filesystem entry metadata records shared by the scanning tools

use serde::Serialize;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;

/// Kind of a filesystem entry in a scan result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// One node of the tree produced by `list_files`.
///
/// `children` is `Some` if and only if the node is a directory; files always
/// carry `None`. A directory whose listing failed keeps an empty `children`
/// vector and a `"Permission Denied"` marker in `error`.
#[derive(Debug, Clone, Serialize)]
pub struct FileNode {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub size: u64,
    pub size_human: String,
    pub modified_time: String,
    pub access_time: String,
    pub permissions: String,
    pub children: Option<Vec<FileNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One match produced by `search_files`: the same metadata as a `FileNode`
/// leaf, without children.
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub size_human: String,
    pub modified_time: String,
    pub access_time: String,
    pub permissions: String,
}

/// Format a byte count as a human-readable string with two decimals.
pub fn format_size(size: u64) -> String {
    let mut value = size as f64;

    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }

    format!("{value:.2} PB")
}

/// Render a POSIX-style permission string (e.g. `-rw-r--r--`) from a raw
/// `st_mode` value.
pub fn format_mode(mode: u32) -> String {
    const S_IFMT: u32 = 0o170000;
    const S_IFDIR: u32 = 0o040000;
    const S_IFLNK: u32 = 0o120000;

    let kind = match mode & S_IFMT {
        S_IFDIR => 'd',
        S_IFLNK => 'l',
        _ => '-',
    };

    let mut out = String::with_capacity(10);
    out.push(kind);

    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }

    out
}

/// Format a filesystem timestamp in local time, `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(time: SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn permissions_of(metadata: &Metadata) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        format_mode(metadata.mode())
    }
    #[cfg(not(unix))]
    {
        let kind = if metadata.is_dir() { 0o040000 } else { 0 };
        let bits = if metadata.permissions().readonly() {
            0o444
        } else {
            0o644
        };
        format_mode(kind | bits)
    }
}

/// Build a result node for a single filesystem entry. Directories start with
/// an empty child list; files carry `children == None`.
pub fn create_node(path: &Path) -> Result<FileNode> {
    let metadata = std::fs::metadata(path)?;
    let kind = if metadata.is_dir() {
        NodeKind::Directory
    } else {
        NodeKind::File
    };

    Ok(FileNode {
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned()),
        path: path.to_path_buf(),
        kind,
        size: metadata.len(),
        size_human: format_size(metadata.len()),
        modified_time: metadata
            .modified()
            .map(format_timestamp)
            .unwrap_or_default(),
        access_time: metadata
            .accessed()
            .map(format_timestamp)
            .unwrap_or_default(),
        permissions: permissions_of(&metadata),
        children: match kind {
            NodeKind::Directory => Some(Vec::new()),
            NodeKind::File => None,
        },
        error: None,
    })
}

/// Build a search match record for a file entry.
pub fn create_match(path: &Path) -> Result<SearchMatch> {
    let metadata = std::fs::metadata(path)?;

    Ok(SearchMatch {
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned()),
        path: path.to_path_buf(),
        size: metadata.len(),
        size_human: format_size(metadata.len()),
        modified_time: metadata
            .modified()
            .map(format_timestamp)
            .unwrap_or_default(),
        access_time: metadata
            .accessed()
            .map(format_timestamp)
            .unwrap_or_default(),
        permissions: permissions_of(&metadata),
    })
}
