//! Command runner backed by `std::process::Command`.

use std::process::{Command, Stdio};

use tracing::{debug, instrument, trace};

use super::{CommandOutput, CommandRunner};
use crate::error::{Result, TouchringError};

/// Runs commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip(self), level = "trace")]
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| TouchringError::CommandSpawn {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(
            program,
            ?args,
            status = ?result.status,
            "Command finished"
        );
        trace!(stdout = %result.stdout, stderr = %result.stderr, "Command output");

        Ok(result)
    }
}
