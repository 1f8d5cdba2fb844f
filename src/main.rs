use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;

use gitfs::config::{self, Config, LoggingConfig};
use gitfs::fs::GitFs;
use gitfs::logging;
use gitfs::opener;
use gitfs::tasks::{Task, TaskRunner};
use gitfs::ui;
use tracing::warn;

#[derive(clap::Parser)]
#[command(
    name = "gitfs",
    version,
    about = "Browse a git repository as a read-only filesystem"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List a directory
    Ls {
        #[arg(help = "Repository path or git:// URL")]
        repo: String,
        #[arg(default_value = "/")]
        path: String,
    },
    /// Write a file's contents to stdout
    Cat {
        #[arg(help = "Repository path or git:// URL")]
        repo: String,
        path: String,
    },
    /// Show information about a resource
    Info {
        #[arg(help = "Repository path or git:// URL")]
        repo: String,
        #[arg(default_value = "/")]
        path: String,
    },
    /// Show filesystem meta information
    Meta {
        #[arg(help = "Repository path or git:// URL")]
        repo: String,
        #[arg(short, long, default_value = "standard")]
        namespace: String,
    },
    /// List every file below a directory
    Tree {
        #[arg(help = "Repository path or git:// URL")]
        repo: String,
        #[arg(default_value = "/")]
        path: String,
    },
    /// Run a developer task (see `gitfs task help`)
    Task {
        name: String,
        #[arg(long, help = "Print the commands without running them")]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Tasks load their own configuration.
    if !matches!(args.command, Command::Task { .. }) {
        let config = match config::load_config(args.config.as_deref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                ui::display_error(&format!("Error loading config: {}", e));
                std::process::exit(1);
            }
        };
        logging::init_logging(&config.logging, args.verbose);
    }

    let result = match args.command {
        Command::Task { name, dry_run } => std::process::exit(run_task(
            args.config.as_deref(),
            args.verbose,
            &name,
            dry_run,
        )),
        Command::Ls { repo, path } => list(&repo, &path),
        Command::Cat { repo, path } => cat(&repo, &path),
        Command::Info { repo, path } => info(&repo, &path),
        Command::Meta { repo, namespace } => meta(&repo, &namespace),
        Command::Tree { repo, path } => tree(&repo, &path),
    };

    if let Err(e) = result {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

/// Runs a task and returns the process exit code.
///
/// `help` never reads the configuration, and `clean` falls back to the
/// defaults when it cannot be loaded.
fn run_task(config_path: Option<&str>, verbose: u8, name: &str, dry_run: bool) -> i32 {
    let task: Task = match name.parse() {
        Ok(task) => task,
        Err(e) => {
            ui::display_error(&e.to_string());
            ui::display_task_list(&TaskRunner::help_lines());
            return 2;
        }
    };

    let config = match task {
        Task::Help => Config::default(),
        _ => match config::load_config(config_path) {
            Ok(cfg) => cfg,
            Err(e) if task == Task::Clean => {
                logging::init_logging(&LoggingConfig::default(), verbose);
                warn!("{}; using the default clean targets", e);
                Config::default()
            }
            Err(e) => {
                ui::display_error(&format!("Error loading config: {}", e));
                return 1;
            }
        },
    };
    logging::init_logging(&config.logging, verbose);

    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            ui::display_error(&format!("Cannot determine working directory: {}", e));
            return 1;
        }
    };

    let runner = TaskRunner::new(config.tasks, root).dry_run(dry_run);
    let outcome = match runner.run(task) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::display_error(&format!("Task '{}' failed: {}", task, e));
            return 1;
        }
    };

    if task != Task::Help && outcome.success() {
        if dry_run {
            ui::display_status("Dry run: nothing was executed");
        } else {
            ui::display_success(&format!("Task {} finished", task));
        }
    }
    outcome.exit_code
}

fn open_repo(repo: &str) -> gitfs::Result<GitFs> {
    if repo.contains("://") {
        opener::open_fs(repo)
    } else {
        GitFs::open(repo)
    }
}

fn list(repo: &str, path: &str) -> Result<()> {
    let git_fs = open_repo(repo)?;
    ui::display_entries(&git_fs.scandir(path, None)?);
    Ok(())
}

fn cat(repo: &str, path: &str) -> Result<()> {
    let git_fs = open_repo(repo)?;
    let data = git_fs.readbytes(path)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&data)?;
    stdout.flush()?;
    Ok(())
}

fn info(repo: &str, path: &str) -> Result<()> {
    let git_fs = open_repo(repo)?;
    ui::display_info(path, &git_fs.getinfo(path)?);
    Ok(())
}

fn meta(repo: &str, namespace: &str) -> Result<()> {
    let git_fs = open_repo(repo)?;
    match git_fs.getmeta(namespace) {
        Some(meta) => print!("{}", toml::to_string(&meta)?),
        None => ui::display_status(&format!("No meta in namespace '{}'", namespace)),
    }
    Ok(())
}

fn tree(repo: &str, path: &str) -> Result<()> {
    let git_fs = open_repo(repo)?;
    for file in git_fs.walk(path)? {
        println!("{}", file);
    }
    Ok(())
}
