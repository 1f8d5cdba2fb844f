//! Developer workflow tasks
//!
//! Named, parameterless operations that each delegate to external tools:
//! - help: list the tasks
//! - coverage, test, lint, black: run the configured tool, propagating its exit code
//! - tag: create the release tag `v<version file contents>`
//! - clean: best-effort removal of build artifacts and environments
//! - venv: create the isolated environment and install both dependency manifests

pub mod clean;
pub mod executor;
pub mod runner;

pub use executor::StepExecutor;
pub use runner::{tag_name, TaskRunner};

use std::fmt;
use std::str::FromStr;

use crate::error::GitFsError;

/// The declared tasks, in help order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Help,
    Coverage,
    Test,
    Lint,
    Black,
    Tag,
    Clean,
    Venv,
}

/// What a failing step does to the rest of its task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing step and report its exit code
    FailFast,
    /// Log failures, keep going, and always succeed
    BestEffort,
}

impl Task {
    pub const ALL: [Task; 8] = [
        Task::Help,
        Task::Coverage,
        Task::Test,
        Task::Lint,
        Task::Black,
        Task::Tag,
        Task::Clean,
        Task::Venv,
    ];

    /// Get the task name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Task::Help => "help",
            Task::Coverage => "coverage",
            Task::Test => "test",
            Task::Lint => "lint",
            Task::Black => "black",
            Task::Tag => "tag",
            Task::Clean => "clean",
            Task::Venv => "venv",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Task::Help => "show this list of tasks",
            Task::Coverage => "run the test suite with coverage and print a report",
            Task::Test => "run the test suite",
            Task::Lint => "check the sources for style and static errors",
            Task::Black => "reformat the sources in place",
            Task::Tag => "tag the current commit as v<version>",
            Task::Clean => "remove build artifacts, egg-info and virtual environments",
            Task::Venv => "create the virtual environment and install dependencies",
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        match self {
            Task::Clean => FailurePolicy::BestEffort,
            _ => FailurePolicy::FailFast,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Task {
    type Err = GitFsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "format" {
            return Ok(Task::Black);
        }
        Task::ALL
            .iter()
            .find(|task| task.name() == s)
            .copied()
            .ok_or_else(|| GitFsError::task(format!("Unknown task '{}'", s)))
    }
}

/// One external command of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub program: String,
    pub args: Vec<String>,
}

impl Step {
    /// Builds a step from an argv list; `None` when the list is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Step {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of running a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub task: Task,
    /// Exit code of the failing step, or 0
    pub exit_code: i32,
    /// Number of steps that were started
    pub steps_run: usize,
}

impl TaskOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
