//! Read-only filesystem over a git repository
//!
//! [`GitFs`] maps paths onto git objects: trees are directories, blobs are
//! files, and the top level groups `head`, `tags`, `branches`, `remotes`
//! and `objects` into virtual directories. See [`node`] for the layout.
//!
//! ```rust,no_run
//! # use gitfs::fs::GitFs;
//! # fn example() -> gitfs::Result<()> {
//! let git_fs = GitFs::open(".")?;
//! for name in git_fs.listdir("/head")? {
//!     println!("{}", name);
//! }
//! let license = git_fs.readtext("/head/LICENSE")?;
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod info;
pub mod node;

pub use file::GitFile;
pub use info::{Info, Meta, Permissions, ResourceType};
pub use node::{Node, RefKind};

use git2::Repository;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{GitFsError, Result};
use crate::path;

/// Git filesystem
pub struct GitFs {
    repo_path: PathBuf,
    repo: Repository,
}

impl GitFs {
    /// Opens the repository at `repo_path`.
    ///
    /// Unlike discovery, parent directories are not searched.
    pub fn open<P: AsRef<Path>>(repo_path: P) -> Result<Self> {
        let repo_path = repo_path.as_ref().to_path_buf();
        let repo = Repository::open(&repo_path)?;
        debug!("opened repository at {}", repo_path.display());
        Ok(GitFs { repo_path, repo })
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Resolves a path to its node, descending one component at a time.
    pub fn resolve(&self, path: &str) -> Result<Node> {
        let parts = path::components(path)?;
        let mut node = Node::Root;
        for part in &parts {
            node = node
                .child(&self.repo, part)?
                .ok_or_else(|| GitFsError::not_found(parts.join("/")))?;
        }
        debug!("resolved '{}' to {:?}", path, node);
        Ok(node)
    }

    /// Check if a path maps to a resource.
    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok()
    }

    pub fn isdir(&self, path: &str) -> bool {
        self.resolve(path).map(|n| n.is_dir()).unwrap_or(false)
    }

    pub fn isfile(&self, path: &str) -> bool {
        self.resolve(path).map(|n| !n.is_dir()).unwrap_or(false)
    }

    /// Get information about a resource.
    ///
    /// # Errors
    /// * `ResourceNotFound` - If `path` does not exist
    pub fn getinfo(&self, path: &str) -> Result<Info> {
        self.resolve(path)?.info(&self.repo)
    }

    /// Get meta information for a namespace.
    ///
    /// Only the `standard` namespace is defined; any other yields `None`.
    pub fn getmeta(&self, namespace: &str) -> Option<Meta> {
        match namespace {
            "standard" => Some(Meta::standard()),
            _ => None,
        }
    }

    /// Get the names of the resources in a directory.
    ///
    /// # Errors
    /// * `DirectoryExpected` - If `path` is a file
    /// * `ResourceNotFound` - If `path` does not exist
    pub fn listdir(&self, path: &str) -> Result<Vec<String>> {
        Ok(self
            .children(path)?
            .into_iter()
            .map(|node| node.name().to_string())
            .collect())
    }

    /// Get resource info for the contents of a directory.
    ///
    /// `page` is a `(start, end)` index range selecting a slice of the
    /// listing; out-of-range bounds are clamped.
    ///
    /// # Errors
    /// * `DirectoryExpected` - If `path` is a file
    /// * `ResourceNotFound` - If `path` does not exist
    pub fn scandir(&self, path: &str, page: Option<(usize, usize)>) -> Result<Vec<Info>> {
        let mut nodes = self.children(path)?;
        if let Some((start, end)) = page {
            let end = end.min(nodes.len());
            let start = start.min(end);
            nodes = nodes.drain(start..end).collect();
        }
        nodes.iter().map(|node| node.info(&self.repo)).collect()
    }

    fn children(&self, path: &str) -> Result<Vec<Node>> {
        self.resolve(path)?
            .children(&self.repo)?
            .ok_or_else(|| GitFsError::DirectoryExpected(path.to_string()))
    }

    /// Open a file for binary reading.
    ///
    /// # Errors
    /// * `FileExpected` - If `path` is a directory
    /// * `ResourceNotFound` - If `path` does not exist
    pub fn openbin(&self, path: &str) -> Result<GitFile> {
        self.resolve(path)?
            .open(&self.repo)?
            .ok_or_else(|| GitFsError::FileExpected(path.to_string()))
    }

    pub fn readbytes(&self, path: &str) -> Result<Vec<u8>> {
        Ok(self.openbin(path)?.into_bytes())
    }

    pub fn readtext(&self, path: &str) -> Result<String> {
        String::from_utf8(self.readbytes(path)?)
            .map_err(|e| GitFsError::Encoding(format!("{}: {}", path, e)))
    }

    /// Every file below `path`, depth first, as absolute paths.
    pub fn walk(&self, path: &str) -> Result<Vec<String>> {
        let root = format!("/{}", path::normalize(path)?);
        let mut files = Vec::new();
        self.walk_into(&root, &mut files)?;
        Ok(files)
    }

    fn walk_into(&self, dir: &str, files: &mut Vec<String>) -> Result<()> {
        for node in self.children(dir)? {
            let child = path::join(dir, node.name());
            if node.is_dir() {
                self.walk_into(&child, files)?;
            } else {
                files.push(child);
            }
        }
        Ok(())
    }

    pub fn makedir(&self, path: &str) -> Result<()> {
        Err(GitFsError::read_only(path))
    }

    pub fn remove(&self, path: &str) -> Result<()> {
        Err(GitFsError::read_only(path))
    }

    pub fn removedir(&self, path: &str) -> Result<()> {
        Err(GitFsError::read_only(path))
    }

    pub fn setinfo(&self, path: &str) -> Result<()> {
        Err(GitFsError::read_only(path))
    }

    pub fn writebytes(&self, path: &str, _contents: &[u8]) -> Result<()> {
        Err(GitFsError::read_only(path))
    }

    pub fn writetext(&self, path: &str, _contents: &str) -> Result<()> {
        Err(GitFsError::read_only(path))
    }
}

impl fmt::Display for GitFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<gitfs '{}'>", self.repo_path.display())
    }
}

impl fmt::Debug for GitFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GitFs({})", self.repo_path.display())
    }
}
