//! Structured logging setup.
//!
//! Logging is built as an explicit [`Dispatch`] that the caller scopes
//! around the work with [`tracing::dispatcher::with_default`], rather than
//! installed as a process-wide default. Verbosity comes from the command
//! line.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use tracing::Dispatch;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    EnvFilter,
};

/// Log verbosity, most verbose first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    /// Same as `error`; tracing has no separate critical level.
    Critical,
}

impl LogLevel {
    /// Filter directive for this crate at this level.
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Debug => "touchring=debug",
            Self::Info => "touchring=info",
            Self::Warning => "touchring=warn",
            Self::Error | Self::Critical => "touchring=error",
        }
    }
}

/// How log output is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub level: LogLevel,
    /// Disable all log output, ignoring `RUST_LOG`.
    pub quiet: bool,
    /// Emit JSON lines instead of text.
    pub json: bool,
}

impl LogOptions {
    fn filter(&self) -> EnvFilter {
        if self.quiet {
            return EnvFilter::new("off");
        }
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.directive()))
    }
}

/// Build the logging dispatcher.
///
/// # Environment Variables
///
/// * `RUST_LOG` - Override the level filter (e.g., "touchring=trace")
///
/// # Output Behavior
///
/// | Mode | TTY | Output |
/// |------|-----|--------|
/// | JSON | any | JSON lines to stderr |
/// | Text | yes | Colored output to stderr |
/// | Text | no | Compact plain output to stderr |
pub fn build_dispatch(options: LogOptions) -> Dispatch {
    let filter = options.filter();

    if options.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(io::stderr);

        Dispatch::new(tracing_subscriber::registry().with(filter).with(fmt_layer))
    } else if io::stderr().is_terminal() {
        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(io::stderr);

        Dispatch::new(tracing_subscriber::registry().with(filter).with(fmt_layer))
    } else {
        let fmt_layer = fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_span_events(FmtSpan::NONE)
            .compact()
            .with_writer(io::stderr);

        Dispatch::new(tracing_subscriber::registry().with(filter).with(fmt_layer))
    }
}
