//! Mock command runner for unit testing.
//!
//! Records every invocation and answers with canned responses, so the
//! toggling logic can be exercised without `xsetwacom` or a desktop session.
//!
//! # Example
//!
//! ```rust
//! use touchring::runner::CommandRunner;
//! use touchring::runner::mock::{Invocation, MockRunner};
//!
//! let mock = MockRunner::new().respond("qdbus", "Krita\n");
//!
//! let out = mock.run("qdbus", &["org.kde.Wacom"]).unwrap();
//! assert_eq!(out.stdout, "Krita\n");
//!
//! mock.assert_invocations(&[Invocation::new("qdbus", &["org.kde.Wacom"])]);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::trace;

use super::{CommandOutput, CommandRunner};
use crate::error::{Result, TouchringError};

/// Recorded command invocation for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Build an invocation from string slices.
    #[must_use]
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

/// Canned reaction of the mock for a program.
#[derive(Debug, Clone)]
enum Response {
    Output(CommandOutput),
    SpawnFailure,
}

/// Mock runner that records invocations.
///
/// Programs without a configured response succeed with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: HashMap<String, Response>,
    log: Mutex<Vec<Invocation>>,
}

impl MockRunner {
    /// Create a mock where every command succeeds silently.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `program` with a successful run printing `stdout`.
    #[must_use]
    pub fn respond(self, program: &str, stdout: &str) -> Self {
        self.respond_with(program, CommandOutput::success(stdout))
    }

    /// Answer `program` with an arbitrary output.
    #[must_use]
    pub fn respond_with(mut self, program: &str, output: CommandOutput) -> Self {
        self.responses
            .insert(program.to_string(), Response::Output(output));
        self
    }

    /// Make `program` fail as if it were not installed.
    #[must_use]
    pub fn fail_spawn(mut self, program: &str) -> Self {
        self.responses
            .insert(program.to_string(), Response::SpawnFailure);
        self
    }

    /// All invocations recorded so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Invocations of a single program.
    pub fn invocations_of(&self, program: &str) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|i| i.program == program)
            .collect()
    }

    /// Assert the exact sequence of invocations.
    ///
    /// # Panics
    ///
    /// Panics if the recorded invocations differ from `expected`.
    pub fn assert_invocations(&self, expected: &[Invocation]) {
        assert_eq!(self.invocations(), expected, "unexpected command invocations");
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        trace!(program, ?args, "Mock: run");
        if let Ok(mut log) = self.log.lock() {
            log.push(Invocation::new(program, args));
        }

        match self.responses.get(program) {
            Some(Response::Output(output)) => Ok(output.clone()),
            Some(Response::SpawnFailure) => Err(TouchringError::CommandSpawn {
                program: program.to_string(),
                reason: "No such file or directory (mock)".to_string(),
            }),
            None => Ok(CommandOutput::success("")),
        }
    }
}
