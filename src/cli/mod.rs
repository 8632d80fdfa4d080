//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::{LogLevel, LogOptions};

/// Cycle the touchring of a Wacom tablet through the modes of the active
/// profile and keep the mode LED in sync.
///
/// Bind `touchring` to a tablet button: every press advances one mode.
#[derive(Parser, Debug)]
#[command(name = "touchring", about, long_about = None)]
#[command(disable_version_flag = true)]
#[allow(clippy::struct_excessive_bools)] // CLI flags naturally use multiple bools
pub struct Cli {
    /// Print the version and exit
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Log level
    #[arg(
        short = 'l',
        long = "loglevel",
        value_name = "LOG_LEVEL",
        default_value = "info",
        global = true,
        env = "TOUCHRING_LOGLEVEL"
    )]
    pub loglevel: LogLevel,

    /// Quiet mode (print nothing at all)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Profile table (TOML or YAML); defaults to ~/.config/touchring/profiles.toml
    #[arg(long, short = 'c', global = true, env = "TOUCHRING_CONFIG")]
    pub config: Option<PathBuf>,

    /// LED status file to use instead of searching sysfs
    #[arg(long, global = true, env = "TOUCHRING_LED_FILE")]
    pub led_file: Option<PathBuf>,

    /// Filesystem root searched for sysfs and procfs
    #[arg(long, global = true, hide = true, env = "TOUCHRING_SYSFS_ROOT")]
    pub sysfs_root: Option<PathBuf>,

    /// JSON output for scripts (logs become JSON lines on stderr)
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Show what would change without writing the LED or setting devices
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Logging configuration derived from the flags.
    pub const fn log_options(&self) -> LogOptions {
        LogOptions {
            level: self.loglevel,
            quiet: self.quiet,
            json: self.json,
        }
    }
}

/// Available commands. Without one, `toggle` runs.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Advance to the next mode (default)
    Toggle,

    /// Show the active profile, current mode and configured devices
    Status,

    /// List tablet devices reported by xsetwacom
    Devices,

    /// Validate the profile table and print it
    CheckConfig,

    /// Write the built-in profile table to the config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Destination (defaults to --config or ~/.config/touchring/profiles.toml)
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long, short = 'f')]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
