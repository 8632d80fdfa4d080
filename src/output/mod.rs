//! Output mode abstraction for human, JSON, and quiet output.

use std::path::Path;

use crate::config::Settings;
use crate::discovery::DeviceMap;
use crate::error::TouchringError;
use crate::toggle::{StatusReport, ToggleReport};

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

/// Renders command results.
pub trait Output {
    /// A mode change (or the plan for one, in dry-run mode).
    fn toggled(&self, report: &ToggleReport);

    /// The current state.
    fn status(&self, report: &StatusReport);

    /// Discovered devices.
    fn devices(&self, devices: &DeviceMap);

    /// The validated profile table.
    fn config(&self, settings: &Settings);

    /// A configuration file was written.
    fn initialized(&self, path: &Path);

    /// A fatal error.
    fn error(&self, error: &TouchringError);
}

/// Output that prints nothing.
pub struct QuietOutput;

impl Output for QuietOutput {
    fn toggled(&self, _report: &ToggleReport) {}
    fn status(&self, _report: &StatusReport) {}
    fn devices(&self, _devices: &DeviceMap) {}
    fn config(&self, _settings: &Settings) {}
    fn initialized(&self, _path: &Path) {}
    fn error(&self, _error: &TouchringError) {}
}

/// Pick the output implementation.
///
/// Quiet wins over JSON.
pub fn select_output(quiet: bool, json: bool) -> Box<dyn Output> {
    if quiet {
        Box::new(QuietOutput)
    } else if json {
        Box::new(RobotOutput::new())
    } else {
        Box::new(HumanOutput::new())
    }
}
