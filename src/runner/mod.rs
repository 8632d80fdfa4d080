//! External command abstraction.
//!
//! Every interaction with the tablet goes through an external tool
//! (`xsetwacom`, `qdbus`). This module provides a trait-based abstraction over
//! real process execution and a recording mock, enabling testability without
//! a tablet or a desktop session.

pub mod mock;
mod real;

pub use real::SystemRunner;

use crate::error::Result;

/// Captured result of a finished external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status, `None` if the process was terminated by a signal.
    pub status: Option<i32>,
    /// Standard output decoded lossily as UTF-8.
    pub stdout: String,
    /// Standard error decoded lossily as UTF-8.
    pub stderr: String,
}

impl CommandOutput {
    /// Build a successful output with the given stdout.
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Build a failed output with the given status and stderr.
    #[must_use]
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Returns true if the command exited with status 0.
    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Core command execution trait.
///
/// Implementations block until the command has finished. There is no
/// timeout: a hanging command stalls the caller.
pub trait CommandRunner {
    /// Run `program` with `args` and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be started. A process
    /// that runs and exits nonzero is reported through [`CommandOutput`].
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        (**self).run(program, args)
    }
}
