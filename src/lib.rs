//! touchring library - Wacom touchring mode cycling.
//!
//! This library exposes the core functionality of the `touchring` CLI for
//! use in tests and potentially other applications.
//!
//! # Modules
//!
//! - `config`: Profile table loading and validation
//! - `discovery`: Tablet device discovery via `xsetwacom`
//! - `led`: Mode LED status file lookup, read and write
//! - `profile`: Active desktop profile selection
//! - `toggle`: Mode advancing and device configuration
//! - `runner`: External command abstraction (real and mock)
//! - `error`: Error types with exit codes and hints
//! - `output`: Output mode abstraction (human/JSON/quiet)
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod led;
pub mod logging;
pub mod output;
pub mod profile;
pub mod runner;
pub mod toggle;

/// Crate version, printed by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
