use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::{debug, warn};

use crate::error::Result;
use crate::tasks::Step;

/// Shell convention for "found but not executable".
pub const EXIT_NOT_EXECUTABLE: i32 = 126;
/// Shell convention for "command not found".
pub const EXIT_NOT_FOUND: i32 = 127;

/// Executes task steps as child processes
pub struct StepExecutor;

impl StepExecutor {
    /// Run one step in `cwd` and return its exit code.
    ///
    /// The child inherits stdin, stdout and stderr. No shell is involved:
    /// the program is looked up on `PATH` and receives its arguments verbatim.
    ///
    /// # Returns
    /// * `Ok(code)` - The process exit code; 127 if the program does not
    ///   exist, 126 if it cannot be executed
    /// * `Err` - If the process could not be started for any other reason
    pub fn execute(step: &Step, cwd: &Path) -> Result<i32> {
        debug!("spawning `{}` in {}", step, cwd.display());

        let status = match Command::new(&step.program)
            .args(&step.args)
            .current_dir(cwd)
            .status()
        {
            Ok(status) => status,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("{}: command not found", step.program);
                return Ok(EXIT_NOT_FOUND);
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                warn!("{}: permission denied", step.program);
                return Ok(EXIT_NOT_EXECUTABLE);
            }
            Err(e) => return Err(e.into()),
        };

        let code = exit_code(status);
        debug!("`{}` exited with {}", step, code);
        Ok(code)
    }
}

/// Converts an exit status to a process exit code.
///
/// A child killed by a signal reports `128 + signal` on unix, as shells do.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
