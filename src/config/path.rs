//! Path resolution helpers for configuration files.
//!
//! Supports absolute paths, paths relative to the config file, and "~" home
//! directory expansion.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Result, TouchringError};

/// Directory name under the user's config directory.
pub const CONFIG_DIR_NAME: &str = "touchring";

/// File name of the profile table.
pub const CONFIG_FILE_NAME: &str = "profiles.toml";

/// Expand a leading `~` to the home directory.
///
/// Paths without a leading `~` are returned unchanged.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();
    if path_str == "~" || path_str.starts_with("~/") {
        let home = home_dir()?;
        let rest = path_str.strip_prefix("~/").unwrap_or("");
        let resolved = if rest.is_empty() { home } else { home.join(rest) };
        debug!(
            original = %path.display(),
            resolved = %resolved.display(),
            "Expanded home directory path"
        );
        return Ok(resolved);
    }
    Ok(path.to_path_buf())
}

/// Resolve a path found inside a config file.
///
/// Resolution rules:
/// 1. Paths starting with `~`: expanded to home directory
/// 2. Absolute paths: used as-is
/// 3. Relative paths: resolved relative to the config file's directory
pub fn resolve_path(path: &Path, config_dir: &Path) -> Result<PathBuf> {
    trace!(
        path = %path.display(),
        config_dir = %config_dir.display(),
        "Resolving path"
    );

    let expanded = expand_home(path)?;
    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let resolved = config_dir.join(&expanded);
    debug!(
        original = %path.display(),
        resolved = %resolved.display(),
        "Resolved relative path"
    );
    Ok(resolved)
}

/// Resolve the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        TouchringError::ConfigInvalid("Could not determine home directory".to_string())
    })
}

/// Default location of the profile table, `~/.config/touchring/profiles.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        TouchringError::ConfigInvalid("Could not determine config directory".to_string())
    })?;
    Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
