//! Running compiled command lines as child processes.

use std::process::{Command, Stdio};

use dirlaunch_core::{CommandLine, LaunchError};

/// Something that can run a command line to completion.
pub trait ProcessHost {
    /// Run `command` and wait for it. Non-zero exit is an error.
    fn run(&mut self, command: &CommandLine) -> Result<(), LaunchError>;
}

/// Runs commands as real child processes sharing this terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl ProcessHost for SystemHost {
    fn run(&mut self, command: &CommandLine) -> Result<(), LaunchError> {
        let program = command.program().ok_or(LaunchError::EmptyCommand)?;

        let status = Command::new(program)
            .args(command.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::Exit {
                program: program.to_string(),
                code: status.code(),
            })
        }
    }
}

/// How a launch succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The command ran as compiled.
    Completed,
    /// The compiled command failed; the short-flag form succeeded.
    CompletedWithShortFlags(CommandLine),
}

/// Launches command lines, retrying once with short-form flags on failure.
#[derive(Debug, Default)]
pub struct Launcher<H = SystemHost> {
    host: H,
}

impl<H: ProcessHost> Launcher<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run `command`. On failure, run its short-flag form exactly once.
    pub fn execute(&mut self, command: &CommandLine) -> Result<LaunchOutcome, LaunchError> {
        if command.is_empty() {
            return Err(LaunchError::EmptyCommand);
        }

        tracing::info!(%command, "launching");
        let first = match self.host.run(command) {
            Ok(()) => return Ok(LaunchOutcome::Completed),
            Err(err) => err,
        };

        let retry = command.with_short_flags();
        tracing::warn!(error = %first, %retry, "launch failed, retrying with short flags");

        match self.host.run(&retry) {
            Ok(()) => Ok(LaunchOutcome::CompletedWithShortFlags(retry)),
            Err(err) => {
                tracing::error!(error = %err, %command, "launch failed after retry");
                Err(LaunchError::RetryFailed {
                    first: Box::new(first),
                    retry: Box::new(err),
                })
            }
        }
    }
}
