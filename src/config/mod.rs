//! Configuration module for touchring profiles.
//!
//! Handles loading, validating, and saving the profile table that maps
//! each profile's modes to `xsetwacom` actions.

mod loader;
mod path;
mod schema;

pub use loader::{
    builtin_settings, init_config, load_config, load_config_from_str, parse_config_str,
    resolve_settings, save_config, ConfigFormat, ConfigSource, Settings, BUILTIN_CONFIG,
};
pub use path::{default_config_path, expand_home, resolve_path};
pub use schema::{
    CommandConfig, ConfigFile, Direction, Mode, ModeEntry, Profile, ProfileEntry, ProfileTable,
    DEFAULT_DEVICE_CLASS, DEFAULT_PROFILE, MAX_MODES,
};
