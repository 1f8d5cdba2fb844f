use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{StepArgs, TasksConfig};
use crate::error::{GitFsError, Result};
use crate::tasks::{clean, FailurePolicy, Step, StepExecutor, Task, TaskOutcome};
use crate::ui;

/// Runs developer tasks from a project root
#[derive(Debug, Clone)]
pub struct TaskRunner {
    config: TasksConfig,
    root: PathBuf,
    dry_run: bool,
}

impl TaskRunner {
    pub fn new(config: TasksConfig, root: impl Into<PathBuf>) -> Self {
        TaskRunner {
            config,
            root: root.into(),
            dry_run: false,
        }
    }

    /// Print the steps instead of running them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// One line per declared task.
    pub fn help_lines() -> Vec<String> {
        Task::ALL
            .iter()
            .map(|task| format!("{:<10}{}", task.name(), task.description()))
            .collect()
    }

    /// External commands a task runs, in order.
    ///
    /// `help` and `clean` run in-process and have no steps. For `tag` the
    /// version file is read here, so a missing or empty file is an error.
    pub fn steps(&self, task: Task) -> Result<Vec<Step>> {
        let argvs: Vec<StepArgs> = match task {
            Task::Help | Task::Clean => return Ok(Vec::new()),
            Task::Coverage => self.config.coverage.clone(),
            Task::Test => self.config.test.clone(),
            Task::Lint => self.config.lint.clone(),
            Task::Black => self.config.black.clone(),
            Task::Venv => self.config.venv.clone(),
            Task::Tag => {
                let name = tag_name(&self.root.join(&self.config.tag.version_file))?;
                let mut argv = self.config.tag.command.clone();
                argv.push(name);
                vec![argv]
            }
        };

        argvs
            .iter()
            .map(|argv| {
                Step::from_argv(argv).ok_or_else(|| {
                    GitFsError::config(format!("Task '{}' has a step with no program", task))
                })
            })
            .collect()
    }

    /// Run a task to completion.
    ///
    /// # Returns
    /// * `Ok(TaskOutcome)` - With the exit code of the first failing step, or 0.
    ///   `clean` always reports 0.
    /// * `Err` - If the task could not be set up (bad config, unreadable version
    ///   file) or a process could not be started at all
    pub fn run(&self, task: Task) -> Result<TaskOutcome> {
        info!("running task {}", task);
        match task {
            Task::Help => {
                ui::display_task_list(&Self::help_lines());
                Ok(TaskOutcome {
                    task,
                    exit_code: 0,
                    steps_run: 0,
                })
            }
            Task::Clean => Ok(self.run_clean()),
            _ => self.run_steps(task, &self.steps(task)?),
        }
    }

    fn run_steps(&self, task: Task, steps: &[Step]) -> Result<TaskOutcome> {
        let mut steps_run = 0;
        for step in steps {
            ui::display_command(&step.to_string());
            if self.dry_run {
                continue;
            }

            steps_run += 1;
            let code = StepExecutor::execute(step, &self.root)?;
            if code != 0 {
                match task.policy() {
                    FailurePolicy::FailFast => {
                        warn!("task {} stopped: `{}` exited with {}", task, step, code);
                        return Ok(TaskOutcome {
                            task,
                            exit_code: code,
                            steps_run,
                        });
                    }
                    FailurePolicy::BestEffort => {
                        warn!("ignoring failure of `{}` (exit {})", step, code);
                    }
                }
            }
        }

        info!("task {} finished", task);
        Ok(TaskOutcome {
            task,
            exit_code: 0,
            steps_run,
        })
    }

    fn run_clean(&self) -> TaskOutcome {
        let patterns = &self.config.clean.paths;
        if self.dry_run {
            for pattern in patterns {
                ui::display_command(&format!("rm -rf {}", pattern));
            }
            return TaskOutcome {
                task: Task::Clean,
                exit_code: 0,
                steps_run: 0,
            };
        }

        let removed = clean::clean_permissive(&self.root, patterns);
        for path in &removed {
            ui::display_command(&format!("rm -rf {}", path.display()));
        }
        TaskOutcome {
            task: Task::Clean,
            exit_code: 0,
            steps_run: patterns.len(),
        }
    }
}

/// Release tag name: `v` followed by the contents of the version file.
///
/// Trailing line endings are dropped; any other whitespace is kept. A
/// version that is not valid semver is logged but still used.
pub fn tag_name(version_file: &Path) -> Result<String> {
    let version = fs::read_to_string(version_file).map_err(|e| {
        GitFsError::task(format!(
            "Cannot read version file {}: {}",
            version_file.display(),
            e
        ))
    })?;
    let version = version.trim_end_matches(['\n', '\r']);

    if version.is_empty() {
        return Err(GitFsError::task(format!(
            "Version file {} is empty",
            version_file.display()
        )));
    }

    if semver::Version::parse(version).is_err() {
        warn!("version '{}' is not a semantic version", version.escape_debug());
    }

    Ok(format!("v{}", version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_help_has_one_line_per_task() {
        let lines = TaskRunner::help_lines();
        assert_eq!(lines.len(), Task::ALL.len());
        for (line, task) in lines.iter().zip(Task::ALL) {
            assert!(line.starts_with(task.name()));
        }
    }

    #[test]
    fn test_tag_name_is_exact() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("VERSION");
        fs::write(&file, "1.2.3").unwrap();
        assert_eq!(tag_name(&file).unwrap(), "v1.2.3");
    }

    #[test]
    fn test_tag_name_drops_final_newline() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("VERSION");
        fs::write(&file, "0.4.0-rc1\n").unwrap();
        assert_eq!(tag_name(&file).unwrap(), "v0.4.0-rc1");
        fs::write(&file, "0.4.0\r\n").unwrap();
        assert_eq!(tag_name(&file).unwrap(), "v0.4.0");
    }

    #[test]
    fn test_tag_name_keeps_other_whitespace() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("VERSION");
        fs::write(&file, " 1.0.0\t\n").unwrap();
        assert_eq!(tag_name(&file).unwrap(), "v 1.0.0\t");
    }

    #[test]
    fn test_tag_name_empty_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("VERSION");
        for contents in ["", "\n", "\r\n"] {
            fs::write(&file, contents).unwrap();
            let err = tag_name(&file).unwrap_err();
            assert!(err.to_string().contains("is empty"));
        }
    }

    #[test]
    fn test_tag_name_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = tag_name(&dir.path().join("VERSION")).unwrap_err();
        assert!(err.to_string().contains("Cannot read version file"));
    }

    #[test]
    fn test_tag_step_appends_name() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("fs/gitfs")).unwrap();
        fs::write(dir.path().join("fs/gitfs/VERSION"), "2.0.0").unwrap();

        let runner = TaskRunner::new(TasksConfig::default(), dir.path());
        let steps = runner.steps(Task::Tag).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].to_string(), "git tag v2.0.0");
    }

    #[test]
    fn test_empty_step_is_config_error() {
        let mut config = TasksConfig::default();
        config.lint = vec![Vec::new()];
        let runner = TaskRunner::new(config, ".");
        let err = runner.steps(Task::Lint).unwrap_err();
        assert!(matches!(err, GitFsError::Config(_)));
    }

    #[test]
    fn test_dry_run_starts_nothing() {
        let mut config = TasksConfig::default();
        config.test = vec![vec!["gitfs-no-such-program-for-tests".to_string()]];
        let runner = TaskRunner::new(config, ".").dry_run(true);
        let outcome = runner.run(Task::Test).unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.steps_run, 0);
    }
}
