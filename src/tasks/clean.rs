use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{GitFsError, Result};
use crate::path;

/// Expand a clean pattern into the existing paths it names.
///
/// Only the last component may contain `*`, which matches any run of
/// characters (`*.egg-info`, `src/*.egg-info`). Missing directories expand
/// to nothing.
pub fn expand(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let (dir, last) = path::split(pattern);
    let base = root.join(dir);

    if !last.contains('*') {
        let path = base.join(last);
        return Ok(if fs::symlink_metadata(&path).is_ok() {
            vec![path]
        } else {
            Vec::new()
        });
    }

    let escaped = regex::escape(last);
    let re = Regex::new(&format!("^{}$", escaped.replace(r"\*", ".*")))
        .map_err(|e| GitFsError::config(format!("Invalid clean pattern '{}': {}", pattern, e)))?;

    let entries = match fs::read_dir(&base) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut matches: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| re.is_match(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();
    matches.sort();
    Ok(matches)
}

/// Remove a file or directory tree.
pub fn remove_path(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Try to remove everything the patterns name, logging failures but not failing
///
/// # Returns
/// The paths that were removed.
pub fn clean_permissive(root: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    for pattern in patterns {
        let paths = match expand(root, pattern) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("clean: skipping '{}': {}", pattern, e);
                continue;
            }
        };
        for path in paths {
            match remove_path(&path) {
                Ok(()) => {
                    info!("removed {}", path.display());
                    removed.push(path);
                }
                Err(e) => warn!("clean: could not remove {}: {}", path.display(), e),
            }
        }
    }
    removed
}
