//! Gitignore-style pattern engine shared by the directory scanning tools
//!
//! Patterns are compiled line-by-line into regular expressions that match the
//! entry itself or anything nested beneath it. This is a deliberate
//! simplification of full gitignore semantics: negation (`!pattern`) is
//! treated as a positive pattern and there are no precedence rules across
//! pattern sources.

use regex::Regex;
use std::path::{Path, PathBuf};

/// Translate a single `.gitignore` line into a regex source string.
///
/// The produced pattern has the form `^<literal>$|^<literal>/.*$` so that it
/// matches both the entry itself and every path under it. Wildcards are
/// translated as follows: `**/` spans segments (`.*/`), `*` stays within one
/// segment (`[^/]*`), and `?` matches exactly one non-separator character.
/// Everything else is escaped literally.
pub fn gitignore_to_regex(pattern: &str) -> String {
    let mut pattern = pattern.trim();

    // Negation is not honored as re-inclusion; strip it and match positively.
    pattern = pattern.strip_prefix('!').unwrap_or(pattern);

    // Directory patterns (`dir/`) use the same dual literal/recursive form.
    pattern = pattern.strip_suffix('/').unwrap_or(pattern);

    let mut translated = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        translated.push_str(".*/");
                    } else {
                        translated.push_str(".*");
                    }
                } else {
                    translated.push_str("[^/]*");
                }
            }
            '?' => translated.push_str("[^/]"),
            '.' | '^' | '$' | '|' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '\\' => {
                translated.push('\\');
                translated.push(c);
            }
            other => translated.push(other),
        }
    }

    format!("^{translated}$|^{translated}/.*$")
}

/// Load and compile the ignore patterns from `<root>/.gitignore`.
///
/// Blank lines and `#` comments are skipped. A missing file is not an error;
/// it simply yields zero patterns. Lines that fail to compile are dropped
/// with a debug log rather than aborting the scan.
pub fn load_gitignore_patterns(project_root: &Path) -> Vec<Regex> {
    let gitignore = project_root.join(".gitignore");

    let content = match std::fs::read_to_string(&gitignore) {
        Ok(content) => content,
        Err(_) => return Vec::new(),
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let source = gitignore_to_regex(line);
            match Regex::new(&source) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::debug!("skipping unparseable gitignore line {line:?}: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Walk upward from `start` (inclusive) until a directory containing a `.git`
/// marker is found. If the filesystem root is reached without one, the
/// starting directory is returned unchanged.
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut current = start;

    loop {
        if current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return start.to_path_buf(),
        }
    }
}

/// Report whether `rel_path` (relative to the project root) is excluded by
/// any compiled pattern. Backslashes are normalized to forward slashes so
/// Windows-style paths match too.
pub fn is_ignored(rel_path: &str, patterns: &[Regex]) -> bool {
    let normalized = rel_path.replace('\\', "/");
    patterns.iter().any(|pattern| pattern.is_match(&normalized))
}

/// Normalize a path to its root-relative, forward-slash form for matching.
/// Paths outside the project root are never considered ignored.
pub fn relative_for_matching(path: &Path, project_root: &Path) -> Option<String> {
    path.strip_prefix(project_root)
        .ok()
        .map(|rel| rel.to_string_lossy().replace('\\', "/"))
}
