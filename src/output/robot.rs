//! JSON output for scripts.

use std::path::Path;

use serde::Serialize;
use tracing::trace;

use super::Output;
use crate::config::Settings;
use crate::discovery::DeviceMap;
use crate::error::TouchringError;
use crate::toggle::{StatusReport, ToggleReport};

/// Pretty JSON on stdout, errors on stderr.
#[derive(Debug, Default)]
pub struct RobotOutput;

impl RobotOutput {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        let json = serde_json::to_string_pretty(data).expect("serialization failed");
        trace!(json_len = json.len(), "JSON serialized");
        println!("{json}");
    }
}

/// JSON body of a fatal error.
pub fn error_json(error: &TouchringError) -> serde_json::Value {
    serde_json::json!({
        "error": true,
        "message": error.to_string(),
        "suggestion": error.suggestion(),
        "config_error": error.is_config_error(),
        "exit_code": error.exit_code(),
    })
}

impl Output for RobotOutput {
    fn toggled(&self, report: &ToggleReport) {
        self.output_json(report);
    }

    fn status(&self, report: &StatusReport) {
        self.output_json(report);
    }

    fn devices(&self, devices: &DeviceMap) {
        self.output_json(devices);
    }

    fn config(&self, settings: &Settings) {
        self.output_json(&serde_json::json!({
            "source": settings.source.to_string(),
            "config": settings.to_config(),
        }));
    }

    fn initialized(&self, path: &Path) {
        self.output_json(&serde_json::json!({
            "success": true,
            "path": path.display().to_string(),
        }));
    }

    fn error(&self, error: &TouchringError) {
        let json = serde_json::to_string_pretty(&error_json(error)).expect("serialization failed");
        eprintln!("{json}");
    }
}
