use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GitFsError, Result};

/// A single external command: program followed by its arguments.
pub type StepArgs = Vec<String>;

/// Represents the complete configuration for gitfs.
///
/// Contains the developer task table and logging options.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub tasks: TasksConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn step(args: &[&str]) -> StepArgs {
    args.iter().map(|s| s.to_string()).collect()
}

fn default_coverage_steps() -> Vec<StepArgs> {
    vec![
        step(&["coverage", "run", "--source=fs.gitfs", "-m", "pytest"]),
        step(&["coverage", "report", "-m"]),
    ]
}

fn default_test_steps() -> Vec<StepArgs> {
    vec![step(&["pytest"])]
}

fn default_lint_steps() -> Vec<StepArgs> {
    vec![step(&["flake8", "fs/gitfs"])]
}

fn default_black_steps() -> Vec<StepArgs> {
    vec![step(&["black", "fs/gitfs", "tests"])]
}

fn default_venv_steps() -> Vec<StepArgs> {
    vec![
        step(&["python3", "-m", "venv", "venv"]),
        step(&["venv/bin/pip", "install", "-r", "requirements.txt"]),
        step(&["venv/bin/pip", "install", "-r", "requirements-dev.txt"]),
    ]
}

/// Step table for the developer tasks.
///
/// Every external-command task is a list of steps run in order.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TasksConfig {
    #[serde(default = "default_coverage_steps")]
    pub coverage: Vec<StepArgs>,

    #[serde(default = "default_test_steps")]
    pub test: Vec<StepArgs>,

    #[serde(default = "default_lint_steps")]
    pub lint: Vec<StepArgs>,

    #[serde(default = "default_black_steps")]
    pub black: Vec<StepArgs>,

    #[serde(default = "default_venv_steps")]
    pub venv: Vec<StepArgs>,

    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub clean: CleanConfig,
}

impl Default for TasksConfig {
    fn default() -> Self {
        TasksConfig {
            coverage: default_coverage_steps(),
            test: default_test_steps(),
            lint: default_lint_steps(),
            black: default_black_steps(),
            venv: default_venv_steps(),
            tag: TagConfig::default(),
            clean: CleanConfig::default(),
        }
    }
}

fn default_version_file() -> PathBuf {
    PathBuf::from("fs/gitfs/VERSION")
}

fn default_tag_command() -> StepArgs {
    step(&["git", "tag"])
}

/// Configuration for the release tag task.
///
/// The tag name is appended as the last argument of `command`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    #[serde(default = "default_version_file")]
    pub version_file: PathBuf,

    #[serde(default = "default_tag_command")]
    pub command: StepArgs,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            version_file: default_version_file(),
            command: default_tag_command(),
        }
    }
}

fn default_clean_paths() -> Vec<String> {
    vec![
        "build".to_string(),
        "dist".to_string(),
        "*.egg-info".to_string(),
        "venv".to_string(),
        ".venv".to_string(),
    ]
}

/// Paths removed by the clean task, relative to the project root.
///
/// A `*` in the last path component matches any run of characters.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CleanConfig {
    #[serde(default = "default_clean_paths")]
    pub paths: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        CleanConfig {
            paths: default_clean_paths(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitfs.toml` in current directory
/// 3. `.gitfs.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitfs.toml").exists() {
        fs::read_to_string("./gitfs.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitfs.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses configuration from a TOML string.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| GitFsError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tag_config() {
        let config = Config::default();
        assert_eq!(
            config.tasks.tag.version_file,
            PathBuf::from("fs/gitfs/VERSION")
        );
        assert_eq!(config.tasks.tag.command, vec!["git", "tag"]);
    }

    #[test]
    fn test_default_venv_installs_two_manifests() {
        let config = Config::default();
        let installs: Vec<_> = config
            .tasks
            .venv
            .iter()
            .filter(|s| s.iter().any(|a| a == "-r"))
            .collect();
        assert_eq!(installs.len(), 2);
        assert!(installs[0].contains(&"requirements.txt".to_string()));
        assert!(installs[1].contains(&"requirements-dev.txt".to_string()));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
[tasks]
test = [["cargo", "test"]]
"#,
        )
        .unwrap();
        assert_eq!(config.tasks.test, vec![vec!["cargo", "test"]]);
        assert_eq!(config.tasks.lint, default_lint_steps());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_config("tasks = [").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
