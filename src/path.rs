//! Path helpers for the virtual filesystem.
//!
//! Paths are `/`-separated and always relative to the filesystem root,
//! whether or not they start with a slash.

use crate::error::{GitFsError, Result};

/// Characters that may never appear in a path.
pub const INVALID_PATH_CHARS: &str = "\0";

/// Splits a path into normalised components.
///
/// Empty and `.` components are dropped and `..` pops the previous one.
/// An empty result is the root.
pub fn components(path: &str) -> Result<Vec<&str>> {
    if path.chars().any(|c| INVALID_PATH_CHARS.contains(c)) {
        return Err(GitFsError::InvalidPath(path.replace('\0', "\\0")));
    }

    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.pop().is_none() {
                    return Err(GitFsError::IllegalBackReference(path.to_string()));
                }
            }
            _ => parts.push(part),
        }
    }
    Ok(parts)
}

/// Normalises a path to its root-relative form without leading or trailing slashes.
pub fn normalize(path: &str) -> Result<String> {
    Ok(components(path)?.join("/"))
}

/// Joins a directory path and a child name.
pub fn join(base: &str, name: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        format!("/{}", name)
    } else {
        format!("{}/{}", base, name)
    }
}

/// Splits a path into `(head, tail)` at the last slash.
pub fn split(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}
