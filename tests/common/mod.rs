#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

pub const LICENSE: &[u8] = b"MIT License\n\nCopyright (c) gitfs contributors\n";
pub const FILE_MODE: i32 = 0o100644;
pub const EXEC_MODE: i32 = 0o100755;
pub const TREE_MODE: i32 = 0o040000;

/// A throwaway repository with two commits, tags, a branch and remotes.
///
/// ```text
/// first commit   LICENSE, run.sh, fs/__init__.py, fs/gitfs/gitfs.py
///                tags: v1.0.0 (lightweight), branch: develop,
///                refs/remotes/origin/main
/// second commit  adds CHANGELOG.md; tag v1.1.0 (annotated),
///                branch: feature/develop, HEAD
/// ```
/// `refs/tags/blob-tag` points at a blob and has no tree.
pub struct Fixture {
    pub dir: TempDir,
    pub first: Oid,
    pub second: Oid,
}

impl Fixture {
    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn url(&self) -> String {
        format!("git://{}", self.dir.path().display())
    }
}

fn tree(repo: &Repository, entries: &[(&str, Oid, i32)]) -> Oid {
    let mut builder = repo.treebuilder(None).expect("Could not create treebuilder");
    for (name, oid, mode) in entries {
        builder
            .insert(*name, *oid, *mode)
            .expect("Could not insert tree entry");
    }
    builder.write().expect("Could not write tree")
}

fn blob(repo: &Repository, data: &[u8]) -> Oid {
    repo.blob(data).expect("Could not write blob")
}

pub fn setup_test_repo() -> Fixture {
    let dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(dir.path()).expect("Could not init git repo");
    let sig = Signature::now("Test User", "test@example.com").expect("Could not create sig");

    let gitfs_py = blob(&repo, b"class GitFS:\n    pass\n");
    let init_py = blob(&repo, b"");
    let license = blob(&repo, LICENSE);
    let run_sh = blob(&repo, b"#!/bin/sh\necho run\n");

    let gitfs_dir = tree(&repo, &[("gitfs.py", gitfs_py, FILE_MODE)]);
    let fs_dir = tree(
        &repo,
        &[
            ("__init__.py", init_py, FILE_MODE),
            ("gitfs", gitfs_dir, TREE_MODE),
        ],
    );
    let first_entries = [
        ("LICENSE", license, FILE_MODE),
        ("fs", fs_dir, TREE_MODE),
        ("run.sh", run_sh, EXEC_MODE),
    ];
    let first_tree = repo
        .find_tree(tree(&repo, &first_entries))
        .expect("Could not find tree");

    let first = repo
        .commit(Some("HEAD"), &sig, &sig, "Initial commit", &first_tree, &[])
        .expect("Could not create commit");

    let changelog = blob(&repo, b"# Changelog\n");
    let mut second_entries = first_entries.to_vec();
    second_entries.push(("CHANGELOG.md", changelog, FILE_MODE));
    let second_tree = repo
        .find_tree(tree(&repo, &second_entries))
        .expect("Could not find tree");

    let first_commit = repo.find_commit(first).expect("Could not find commit");
    let second = repo
        .commit(
            Some("HEAD"),
            &sig,
            &sig,
            "feat: add changelog",
            &second_tree,
            &[&first_commit],
        )
        .expect("Could not create commit");

    repo.tag_lightweight("v1.0.0", first_commit.as_object(), false)
        .expect("Could not create tag");
    let second_object = repo.find_object(second, None).expect("Could not find object");
    repo.tag("v1.1.0", &second_object, &sig, "release 1.1.0", false)
        .expect("Could not create annotated tag");
    repo.reference("refs/tags/blob-tag", license, false, "blob tag")
        .expect("Could not create blob tag");

    repo.branch("develop", &first_commit, false)
        .expect("Could not create branch");
    repo.reference("refs/heads/feature/develop", second, false, "nested branch")
        .expect("Could not create nested branch");

    repo.remote("origin", "https://example.com/gitfs.git")
        .expect("Could not add remote");
    repo.remote("upstream", "https://example.com/upstream.git")
        .expect("Could not add remote");
    repo.reference("refs/remotes/origin/main", first, false, "remote ref")
        .expect("Could not create remote ref");

    Fixture { dir, first, second }
}
