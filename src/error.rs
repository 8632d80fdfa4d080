//! Error types for touchring operations.

use std::path::PathBuf;

use thiserror::Error;

/// Exit status used when no LED status file matches any candidate pattern.
///
/// Mirrors what `ls` returns for a path that cannot be accessed.
pub const LED_LOOKUP_EXIT_CODE: i32 = 2;

/// Primary error type for touchring operations.
#[derive(Error, Debug)]
pub enum TouchringError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Profile '{profile}' defines {count} modes, at most {max} are supported")]
    TooManyModes {
        profile: String,
        count: usize,
        max: usize,
    },

    #[error(
        "Profile '{profile}' has non-sequential modes {found:?}: modes must be numbered 0, 1, 2, ... without gaps"
    )]
    NonSequentialModes { profile: String, found: Vec<String> },

    // LED status file errors
    #[error("No LED status file found (tried: {})", .patterns.join(", "))]
    LedFileNotFound { patterns: Vec<String> },

    #[error("Could not open LED status file '{}': {source}", .path.display())]
    LedFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("LED status file '{}' does not hold a mode digit: {content:?}", .path.display())]
    LedFileParse { path: PathBuf, content: String },

    #[error("Could not write LED status file '{}': {source}", .path.display())]
    LedFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // External command errors
    #[error("Failed to run '{program}': {reason}")]
    CommandSpawn { program: String, reason: String },

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl TouchringError {
    /// Process exit status for this error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::LedFileNotFound { .. } => LED_LOOKUP_EXIT_CODE,
            _ => 1,
        }
    }

    /// Returns true if the error comes from the user's configuration.
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParse(_)
                | Self::ConfigInvalid(_)
                | Self::TooManyModes { .. }
                | Self::NonSequentialModes { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound { .. } => Some("Run: touchring init"),
            Self::TooManyModes { .. } => Some("Remove modes until the profile has at most 4"),
            Self::NonSequentialModes { .. } => {
                Some("Number the modes of each profile 0, 1, 2, 3 in order")
            }
            Self::LedFileNotFound { .. } => {
                Some("Ensure the tablet is connected, or pass --led-file explicitly")
            }
            Self::LedFileRead { .. } | Self::LedFileWrite { .. } => {
                Some("Check permissions on the wacom_led sysfs attribute (udev rule)")
            }
            _ => None,
        }
    }
}

/// Convenience type alias for Results using TouchringError.
pub type Result<T> = std::result::Result<T, TouchringError>;
