//! Resource nodes of the git filesystem.
//!
//! ```text
//! /
//! ├── head/                     tree of HEAD's commit
//! ├── tags/<tag>/               tree of the commit a tag points to
//! ├── branches/<branch>/        tree of a local branch tip
//! ├── remotes/<remote>/<ref>/   tree of a remote-tracking ref
//! └── objects/                  placeholder, always empty
//! ```
//!
//! Ref names containing `/` are nested: `refs/heads/feature/login` is
//! `branches/feature/login/`.
//!
//! Nodes hold object ids rather than borrowed git2 objects, so a node can
//! outlive the lookup that produced it.

use git2::{ErrorCode, ObjectType, Oid, Repository};
use std::collections::BTreeMap;
use tracing::debug;

use super::file::GitFile;
use super::info::Info;
use crate::error::Result;

/// Names of the root's children, in listing order.
pub const ROOT_CHILDREN: [&str; 5] = ["head", "tags", "branches", "remotes", "objects"];

/// Which group of references a [`Node::Refs`] directory lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefKind {
    Tags,
    Branches,
    Remote(String),
}

impl RefKind {
    fn prefix(&self) -> String {
        match self {
            RefKind::Tags => "refs/tags/".to_string(),
            RefKind::Branches => "refs/heads/".to_string(),
            RefKind::Remote(remote) => format!("refs/remotes/{}/", remote),
        }
    }
}

/// A resolved path in the filesystem
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Root,
    Tree { name: String, oid: Oid },
    Blob { name: String, oid: Oid, mode: u32 },
    /// Refs of `kind` whose name starts with `namespace` (empty or ending in `/`)
    Refs {
        name: String,
        kind: RefKind,
        namespace: String,
    },
    Remotes,
    Objects,
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Root => "/",
            Node::Tree { name, .. } | Node::Blob { name, .. } | Node::Refs { name, .. } => name,
            Node::Remotes => "remotes",
            Node::Objects => "objects",
        }
    }

    pub fn is_dir(&self) -> bool {
        !matches!(self, Node::Blob { .. })
    }

    /// Looks up a direct child by name.
    ///
    /// Returns `Ok(None)` when the child does not exist or this node cannot
    /// have children.
    pub fn child(&self, repo: &Repository, name: &str) -> Result<Option<Node>> {
        match self {
            Node::Root => root_child(repo, name),
            Node::Tree { oid, .. } => {
                let tree = repo.find_tree(*oid)?;
                Ok(tree.get_name(name).and_then(|entry| {
                    entry_node(name, entry.id(), entry.kind(), entry.filemode())
                }))
            }
            Node::Refs {
                kind, namespace, ..
            } => Ok(ref_entries(repo, kind, namespace)?
                .into_iter()
                .find(|node| node.name() == name)),
            Node::Remotes => {
                let found = remote_names(repo)?.into_iter().any(|r| r == name);
                Ok(found.then(|| Node::Refs {
                    name: name.to_string(),
                    kind: RefKind::Remote(name.to_string()),
                    namespace: String::new(),
                }))
            }
            Node::Blob { .. } | Node::Objects => Ok(None),
        }
    }

    /// Lists the children of a directory node.
    ///
    /// Returns `Ok(None)` for files. Trees list sub-trees before blobs.
    pub fn children(&self, repo: &Repository) -> Result<Option<Vec<Node>>> {
        let nodes = match self {
            Node::Root => {
                let mut nodes = Vec::with_capacity(ROOT_CHILDREN.len());
                for name in ROOT_CHILDREN {
                    if let Some(node) = root_child(repo, name)? {
                        nodes.push(node);
                    }
                }
                nodes
            }
            Node::Tree { oid, .. } => {
                let tree = repo.find_tree(*oid)?;
                let mut trees = Vec::new();
                let mut blobs = Vec::new();
                for entry in tree.iter() {
                    let Some(name) = entry.name() else {
                        continue;
                    };
                    match entry_node(name, entry.id(), entry.kind(), entry.filemode()) {
                        Some(node @ Node::Tree { .. }) => trees.push(node),
                        Some(node) => blobs.push(node),
                        None => {}
                    }
                }
                trees.extend(blobs);
                trees
            }
            Node::Refs {
                kind, namespace, ..
            } => ref_entries(repo, kind, namespace)?,
            Node::Remotes => remote_names(repo)?
                .into_iter()
                .map(|name| Node::Refs {
                    kind: RefKind::Remote(name.clone()),
                    name,
                    namespace: String::new(),
                })
                .collect(),
            Node::Objects => Vec::new(),
            Node::Blob { .. } => return Ok(None),
        };
        Ok(Some(nodes))
    }

    pub fn info(&self, repo: &Repository) -> Result<Info> {
        match self {
            Node::Tree { name, oid } => Ok(Info::directory(name.as_str(), object_size(repo, *oid)?)),
            Node::Blob { name, oid, mode } => {
                Ok(Info::file(name.as_str(), object_size(repo, *oid)?, *mode))
            }
            _ => Ok(Info::directory(self.name(), 0)),
        }
    }

    /// Opens a blob for reading; `Ok(None)` for directories.
    pub fn open(&self, repo: &Repository) -> Result<Option<GitFile>> {
        match self {
            Node::Blob { name, oid, .. } => {
                let blob = repo.find_blob(*oid)?;
                Ok(Some(GitFile::new(name.as_str(), blob.content().to_vec())))
            }
            _ => Ok(None),
        }
    }
}

fn root_child(repo: &Repository, name: &str) -> Result<Option<Node>> {
    let node = match name {
        "head" => match head_tree(repo)? {
            Some(oid) => Node::Tree {
                name: "head".to_string(),
                oid,
            },
            None => return Ok(None),
        },
        "tags" => Node::Refs {
            name: "tags".to_string(),
            kind: RefKind::Tags,
            namespace: String::new(),
        },
        "branches" => Node::Refs {
            name: "branches".to_string(),
            kind: RefKind::Branches,
            namespace: String::new(),
        },
        "remotes" => Node::Remotes,
        "objects" => Node::Objects,
        _ => return Ok(None),
    };
    Ok(Some(node))
}

fn head_tree(repo: &Repository) -> Result<Option<Oid>> {
    match repo.head() {
        Ok(reference) => Ok(Some(reference.peel_to_tree()?.id())),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            debug!("HEAD is unborn, /head is absent");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn entry_node(name: &str, oid: Oid, kind: Option<ObjectType>, filemode: i32) -> Option<Node> {
    match kind {
        Some(ObjectType::Tree) => Some(Node::Tree {
            name: name.to_string(),
            oid,
        }),
        Some(ObjectType::Blob) => Some(Node::Blob {
            name: name.to_string(),
            oid,
            mode: filemode as u32,
        }),
        // Submodule commits have no content in this repository.
        _ => None,
    }
}

/// Entries of one ref directory, sorted by name.
///
/// A ref directly in the namespace becomes the tree it peels to; deeper refs
/// are grouped under a nested [`Node::Refs`] named after their next
/// component. References that do not peel to a tree are skipped.
fn ref_entries(repo: &Repository, kind: &RefKind, namespace: &str) -> Result<Vec<Node>> {
    let prefix = format!("{}{}", kind.prefix(), namespace);
    let mut entries = BTreeMap::new();
    for reference in repo.references()? {
        let reference = reference?;
        let Some(full_name) = reference.name() else {
            continue;
        };
        let Some(rest) = full_name.strip_prefix(&prefix) else {
            continue;
        };
        match rest.split_once('/') {
            Some((dir, _)) => {
                entries.entry(dir.to_string()).or_insert_with(|| Node::Refs {
                    name: dir.to_string(),
                    kind: kind.clone(),
                    namespace: format!("{}{}/", namespace, dir),
                });
            }
            None => match reference.peel_to_tree() {
                Ok(tree) => {
                    entries.insert(
                        rest.to_string(),
                        Node::Tree {
                            name: rest.to_string(),
                            oid: tree.id(),
                        },
                    );
                }
                Err(e) => debug!("skipping {}: {}", full_name, e),
            },
        }
    }
    Ok(entries.into_values().collect())
}

fn remote_names(repo: &Repository) -> Result<Vec<String>> {
    let remotes = repo.remotes()?;
    Ok(remotes.iter().flatten().map(|s| s.to_string()).collect())
}

fn object_size(repo: &Repository, oid: Oid) -> Result<u64> {
    let (size, _) = repo.odb()?.read_header(oid)?;
    Ok(size as u64)
}
