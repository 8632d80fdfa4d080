//! Loading and saving the profile table.
//!
//! The table is read from a TOML or YAML file. When no file exists at the
//! default location the built-in table is used, so the tool works out of the
//! box.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, trace};

use super::path::{default_config_path, expand_home, resolve_path};
use super::schema::{CommandConfig, ConfigFile, ProfileTable};
use crate::error::{Result, TouchringError};

/// Built-in profile table in TOML form.
pub const BUILTIN_CONFIG: &str = include_str!("builtin.toml");

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml).
    Yaml,
    /// TOML format (.toml).
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        trace!(extension = %ext, "Detecting config format from extension");
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    fn require(path: &Path) -> Result<Self> {
        Self::from_extension(path).ok_or_else(|| {
            TouchringError::ConfigParse(format!(
                "Unknown config format for '{}': expected .yaml, .yml, or .toml",
                path.display()
            ))
        })
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from a file on disk.
    File(PathBuf),
    /// Parsed from an in-memory string.
    Inline,
    /// The compiled-in default table.
    Builtin,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline => f.write_str("<inline>"),
            Self::Builtin => f.write_str("<built-in>"),
        }
    }
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub table: ProfileTable,
    pub commands: CommandConfig,
    pub led_file: Option<PathBuf>,
    pub source: ConfigSource,
}

impl Settings {
    /// Validate a parsed configuration file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the profile table or the command
    /// section is invalid.
    pub fn from_config(config: ConfigFile, source: ConfigSource) -> Result<Self> {
        if config.commands.xsetwacom.trim().is_empty() {
            return Err(TouchringError::ConfigInvalid(
                "commands.xsetwacom must not be empty".to_string(),
            ));
        }
        if config.commands.profile_query.is_empty() {
            return Err(TouchringError::ConfigInvalid(
                "commands.profile_query must name a program".to_string(),
            ));
        }

        let table = ProfileTable::from_entries(&config.profiles)?;

        Ok(Self {
            table,
            commands: config.commands,
            led_file: config.led_file,
            source,
        })
    }

    /// The on-disk representation of these settings.
    pub fn to_config(&self) -> ConfigFile {
        ConfigFile {
            led_file: self.led_file.clone(),
            commands: self.commands.clone(),
            profiles: self.table.to_entries(),
        }
    }
}

/// Parse configuration content without validating it.
pub fn parse_config_str(content: &str, format: ConfigFormat) -> Result<ConfigFile> {
    match format {
        ConfigFormat::Yaml if content.trim().is_empty() => Ok(ConfigFile::default()),
        ConfigFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| TouchringError::ConfigParse(format!("YAML: {e}"))),
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| TouchringError::ConfigParse(format!("TOML: {e}")))
        }
    }
}

/// Load and validate configuration from a string.
#[instrument(skip(content), fields(format = ?format, content_len = content.len()))]
pub fn load_config_from_str(content: &str, format: ConfigFormat) -> Result<Settings> {
    let config = parse_config_str(content, format)?;
    Settings::from_config(config, ConfigSource::Inline)
}

/// The compiled-in profile table.
pub fn builtin_settings() -> Result<Settings> {
    let config = parse_config_str(BUILTIN_CONFIG, ConfigFormat::Toml)?;
    Settings::from_config(config, ConfigSource::Builtin)
}

/// Load and validate a configuration file.
///
/// A relative `led_file` is resolved against the file's directory.
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, its format is
/// unknown, or its content fails to parse or validate.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    debug!("Loading configuration file");

    let format = ConfigFormat::require(path)?;
    debug!(format = ?format, "Detected config format");

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TouchringError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            TouchringError::Io(e)
        }
    })?;
    debug!(bytes = content.len(), "Read config file");

    let mut config = parse_config_str(&content, format)?;
    if let Some(led_file) = config.led_file.take() {
        let config_dir = path.parent().unwrap_or_else(|| Path::new("."));
        config.led_file = Some(resolve_path(&led_file, config_dir)?);
    }

    let settings = Settings::from_config(config, ConfigSource::File(path.to_path_buf()))?;
    debug!(
        profiles = settings.table.len(),
        led_file = ?settings.led_file,
        "Configuration loaded and validated"
    );
    Ok(settings)
}

/// Resolve the configuration to use for this run.
///
/// An explicit path must exist. Without one, the default location is used
/// if present, otherwise the built-in table.
pub fn resolve_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return load_config(expand_home(path)?);
    }

    match default_config_path() {
        Ok(path) if path.exists() => load_config(path),
        Ok(path) => {
            debug!(path = %path.display(), "No config file, using built-in profiles");
            builtin_settings()
        }
        Err(e) => {
            debug!(error = %e, "No config directory, using built-in profiles");
            builtin_settings()
        }
    }
}

/// Save a configuration file, creating parent directories.
///
/// The format is chosen from the file extension.
#[instrument(skip(config), fields(path = %path.as_ref().display()))]
pub fn save_config<P: AsRef<Path>>(config: &ConfigFile, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = ConfigFormat::require(path)?;

    let content = match format {
        ConfigFormat::Yaml => serde_yaml::to_string(config)
            .map_err(|e| TouchringError::ConfigParse(format!("YAML: {e}")))?,
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| TouchringError::ConfigParse(format!("TOML: {e}")))?,
    };

    write_creating_parents(path, &content)?;
    info!(bytes = content.len(), "Configuration saved");
    Ok(())
}

/// Write the built-in table to `path`.
///
/// TOML targets receive the commented built-in file verbatim.
///
/// # Errors
///
/// Fails if the file already exists and `force` is false.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(TouchringError::ConfigInvalid(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    match ConfigFormat::require(path)? {
        ConfigFormat::Toml => {
            write_creating_parents(path, BUILTIN_CONFIG)?;
            info!(path = %path.display(), "Wrote built-in profiles");
            Ok(())
        }
        ConfigFormat::Yaml => save_config(&builtin_settings()?.to_config(), path),
    }
}

fn write_creating_parents(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
