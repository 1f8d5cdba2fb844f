// tests/cli_test.rs
mod common;

use common::{setup_test_repo, LICENSE};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn gitfs(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gitfs"))
        .args(args)
        .current_dir(cwd)
        .env_remove("GITFS_LOG")
        .output()
        .expect("Failed to execute gitfs")
}

#[test]
fn test_gitfs_help() {
    let dir = TempDir::new().unwrap();
    let output = gitfs(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("gitfs"));
    assert!(stdout.contains("read-only filesystem"));
}

#[test]
fn test_task_help_prints_one_line_per_task() {
    let dir = TempDir::new().unwrap();
    let output = gitfs(dir.path(), &["task", "help"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 8);
    for name in ["help", "coverage", "test", "lint", "black", "tag", "clean", "venv"] {
        assert!(
            lines.iter().any(|line| line.starts_with(name)),
            "missing task {}",
            name
        );
    }
}

#[test]
fn test_unknown_task_exits_2() {
    let dir = TempDir::new().unwrap();
    let output = gitfs(dir.path(), &["task", "deploy"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown task"));
}

#[test]
fn test_clean_exits_zero_without_targets() {
    let dir = TempDir::new().unwrap();
    let output = gitfs(dir.path(), &["task", "clean"]);
    assert_eq!(output.status.code(), Some(0));
}

fn write_broken_config(dir: &Path) {
    fs::write(dir.join("gitfs.toml"), "tasks = [").unwrap();
}

#[test]
fn test_help_ignores_broken_config() {
    let dir = TempDir::new().unwrap();
    write_broken_config(dir.path());

    let output = gitfs(dir.path(), &["task", "help"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), 8);
}

#[test]
fn test_clean_ignores_broken_config() {
    let dir = TempDir::new().unwrap();
    write_broken_config(dir.path());
    fs::create_dir_all(dir.path().join("build/lib")).unwrap();

    let output = gitfs(dir.path(), &["task", "clean"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(!dir.path().join("build").exists());
}

#[test]
fn test_other_tasks_reject_broken_config() {
    let dir = TempDir::new().unwrap();
    write_broken_config(dir.path());

    let output = gitfs(dir.path(), &["task", "lint"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error loading config"));
}

#[cfg(unix)]
#[test]
fn test_task_exit_code_is_process_exit_code() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("gitfs.toml"),
        r#"
[tasks]
test = [["sh", "-c", "exit 4"]]
"#,
    )
    .unwrap();

    let output = gitfs(dir.path(), &["task", "test"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_ls_and_cat() {
    let fixture = setup_test_repo();
    let repo = fixture.path().to_str().unwrap();

    let output = gitfs(fixture.path(), &["ls", repo, "/head"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.lines().any(|line| line == "fs/"));
    assert!(stdout.lines().any(|line| line == "LICENSE"));

    let output = gitfs(fixture.path(), &["cat", &fixture.url(), "/head/LICENSE"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, LICENSE);
}

#[test]
fn test_cat_directory_fails() {
    let fixture = setup_test_repo();
    let repo = fixture.path().to_str().unwrap();

    let output = gitfs(fixture.path(), &["cat", repo, "/head"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("File expected"));
}

#[test]
fn test_meta() {
    let fixture = setup_test_repo();
    let repo = fixture.path().to_str().unwrap();

    let output = gitfs(fixture.path(), &["meta", repo]);
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)
        .unwrap()
        .contains("read_only = true"));
}
