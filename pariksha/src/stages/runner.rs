//! Capability for executing stage tasks.

use std::fmt;
use std::process::{Command, ExitStatus};

use log::info;

use super::task::StageTask;
use crate::error::Result;

/// Process-style termination status of a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminationStatus(Option<i32>);

impl TerminationStatus {
    /// Successful termination.
    pub const SUCCESS: Self = Self(Some(0));

    /// Termination with an exit code.
    pub const fn code(code: i32) -> Self {
        Self(Some(code))
    }

    /// Termination without an exit code (killed by a signal).
    pub const fn killed() -> Self {
        Self(None)
    }

    /// True for exit code zero.
    pub fn success(&self) -> bool {
        self.0 == Some(0)
    }

    /// Exit code, if the task exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        self.0
    }
}

impl From<ExitStatus> for TerminationStatus {
    fn from(status: ExitStatus) -> Self {
        Self(status.code())
    }
}

impl fmt::Display for TerminationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Executes one stage task to completion.
///
/// Implementations must be shareable across the score worker pool.
pub trait StageRunner: Send + Sync {
    /// Run the task and block until it terminates.
    ///
    /// `Err` means the task could not be launched at all.
    fn submit(&self, task: &StageTask) -> Result<TerminationStatus>;
}

/// Runs each task as a child process: `<interpreter> <script> --name=value ...`.
#[derive(Clone, Debug)]
pub struct ProcessRunner {
    interpreter: String,
}

impl ProcessRunner {
    /// Create a runner using the given interpreter (e.g. `python`).
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }
}

impl StageRunner for ProcessRunner {
    fn submit(&self, task: &StageTask) -> Result<TerminationStatus> {
        info!("Running: {}", task.command_line(&self.interpreter));
        let status = Command::new(&self.interpreter)
            .arg(&task.script)
            .args(task.args())
            .status()?;
        Ok(status.into())
    }
}
