//! Profile table types.
//!
//! [`ConfigFile`] mirrors the on-disk format one-to-one and is what serde
//! reads and writes. [`ProfileTable`] is the validated form handed to the
//! toggler: every profile has 1 to [`MAX_MODES`] modes numbered without gaps,
//! and every action key names a known ring [`Direction`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Result, TouchringError};

/// Number of LED-backed modes a touchring supports.
pub const MAX_MODES: usize = 4;

/// Profile used when the active desktop profile is unknown.
pub const DEFAULT_PROFILE: &str = "Default";

/// Device class a mode applies to when none is configured.
pub const DEFAULT_DEVICE_CLASS: &str = "PAD";

/// Rotation direction of a touchring.
///
/// Each direction corresponds to one `xsetwacom` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// First ring, counterclockwise (`AbsWheelUp`).
    RingCounterclockwise,
    /// First ring, clockwise (`AbsWheelDown`).
    RingClockwise,
    /// Second ring, counterclockwise (`AbsWheel2Up`).
    Ring2Counterclockwise,
    /// Second ring, clockwise (`AbsWheel2Down`).
    Ring2Clockwise,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Self; 4] = [
        Self::RingCounterclockwise,
        Self::RingClockwise,
        Self::Ring2Counterclockwise,
        Self::Ring2Clockwise,
    ];

    /// Identifier used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RingCounterclockwise => "ring-counterclockwise",
            Self::RingClockwise => "ring-clockwise",
            Self::Ring2Counterclockwise => "ring2-counterclockwise",
            Self::Ring2Clockwise => "ring2-clockwise",
        }
    }

    /// The `xsetwacom` parameter bound by this direction.
    pub const fn xsetwacom_param(self) -> &'static str {
        match self {
            Self::RingCounterclockwise => "AbsWheelUp",
            Self::RingClockwise => "AbsWheelDown",
            Self::Ring2Counterclockwise => "AbsWheel2Up",
            Self::Ring2Clockwise => "AbsWheel2Down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Direction {
    type Err = TouchringError;

    /// Accepts the configuration name or the raw `xsetwacom` parameter.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s) || d.xsetwacom_param().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                TouchringError::ConfigInvalid(format!(
                    "Unknown ring direction '{s}': expected one of {}",
                    Self::ALL.map(Self::name).join(", ")
                ))
            })
    }
}

// === On-disk format ===

/// Commands used to talk to the tablet and the desktop session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandConfig {
    /// Program used for `--list devices` and `--set`.
    #[serde(default = "default_xsetwacom")]
    pub xsetwacom: String,

    /// Command line printing the active tablet profile name.
    #[serde(default = "default_profile_query")]
    pub profile_query: Vec<String>,
}

fn default_xsetwacom() -> String {
    "xsetwacom".to_string()
}

fn default_profile_query() -> Vec<String> {
    ["qdbus", "org.kde.Wacom", "/Tablet", "org.kde.Wacom.getProfile"]
        .map(String::from)
        .to_vec()
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            xsetwacom: default_xsetwacom(),
            profile_query: default_profile_query(),
        }
    }
}

/// Complete configuration file.
///
/// # Example TOML
///
/// ```toml
/// led_file = "/sys/bus/hid/devices/0003:056A:0315.0001/wacom_led/status_led0_select"
///
/// [commands]
/// xsetwacom = "xsetwacom"
/// profile_query = ["qdbus", "org.kde.Wacom", "/Tablet", "org.kde.Wacom.getProfile"]
///
/// [profiles.Default.modes.0]
/// description = "Scroll"
/// device_type = "PAD"
/// actions = { ring-counterclockwise = "4", ring-clockwise = "5" }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    /// Explicit LED status file, bypassing sysfs lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub led_file: Option<PathBuf>,

    #[serde(default)]
    pub commands: CommandConfig,

    /// Profiles by name.
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
}

/// A profile as written on disk: modes keyed by their index.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfileEntry {
    #[serde(default)]
    pub modes: BTreeMap<String, ModeEntry>,
}

/// A mode as written on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModeEntry {
    #[serde(default)]
    pub description: String,

    #[serde(default = "default_device_type")]
    pub device_type: String,

    /// Direction name to `xsetwacom` action.
    #[serde(default)]
    pub actions: BTreeMap<String, String>,
}

fn default_device_type() -> String {
    DEFAULT_DEVICE_CLASS.to_string()
}

// === Validated form ===

/// A single touchring mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    pub index: usize,
    pub description: String,
    pub device_class: String,
    pub actions: BTreeMap<Direction, String>,
}

/// A named, ordered collection of modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    modes: Vec<Mode>,
}

impl Profile {
    /// Modes in index order.
    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// Number of modes, always in `1..=MAX_MODES`.
    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// Mode at `index`, if defined.
    pub fn mode(&self, index: usize) -> Option<&Mode> {
        self.modes.get(index)
    }

    fn from_entry(name: &str, entry: &ProfileEntry) -> Result<Self> {
        trace!(profile = name, modes = entry.modes.len(), "Validating profile");

        let count = entry.modes.len();
        if count == 0 {
            return Err(TouchringError::ConfigInvalid(format!(
                "Profile '{name}' defines no modes"
            )));
        }
        if count > MAX_MODES {
            return Err(TouchringError::TooManyModes {
                profile: name.to_string(),
                count,
                max: MAX_MODES,
            });
        }

        let non_sequential = || TouchringError::NonSequentialModes {
            profile: name.to_string(),
            found: entry.modes.keys().cloned().collect(),
        };

        let mut by_index = BTreeMap::new();
        for (key, mode) in &entry.modes {
            let index: usize = key.trim().parse().map_err(|_| non_sequential())?;
            if by_index.insert(index, (key, mode)).is_some() {
                return Err(non_sequential());
            }
        }
        if !by_index.keys().copied().eq(0..count) {
            return Err(non_sequential());
        }

        let modes = by_index
            .into_iter()
            .map(|(index, (key, mode))| Mode::from_entry(name, key, index, mode))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            modes,
        })
    }
}

impl Mode {
    fn from_entry(profile: &str, key: &str, index: usize, entry: &ModeEntry) -> Result<Self> {
        let device_class = entry.device_type.trim();
        if device_class.is_empty() {
            return Err(TouchringError::ConfigInvalid(format!(
                "Profile '{profile}' mode {key}: device_type must not be empty"
            )));
        }

        let mut actions = BTreeMap::new();
        for (direction, action) in &entry.actions {
            let direction: Direction = direction.parse().map_err(|e| {
                TouchringError::ConfigInvalid(format!("Profile '{profile}' mode {key}: {e}"))
            })?;
            if actions.insert(direction, action.clone()).is_some() {
                return Err(TouchringError::ConfigInvalid(format!(
                    "Profile '{profile}' mode {key}: direction '{direction}' is bound twice"
                )));
            }
        }

        Ok(Self {
            index,
            description: entry.description.clone(),
            device_class: device_class.to_string(),
            actions,
        })
    }

    fn to_entry(&self) -> ModeEntry {
        ModeEntry {
            description: self.description.clone(),
            device_type: self.device_class.clone(),
            actions: self
                .actions
                .iter()
                .map(|(d, a)| (d.name().to_string(), a.clone()))
                .collect(),
        }
    }
}

/// Validated, immutable profile table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTable {
    profiles: BTreeMap<String, Profile>,
}

impl ProfileTable {
    /// Validate profile entries.
    ///
    /// # Errors
    ///
    /// Fails if "Default" is missing, or if any profile has no modes, too
    /// many modes, non-sequential mode indices, or unknown directions.
    pub fn from_entries(entries: &BTreeMap<String, ProfileEntry>) -> Result<Self> {
        let mut profiles = BTreeMap::new();
        for (name, entry) in entries {
            profiles.insert(name.clone(), Profile::from_entry(name, entry)?);
        }

        if !profiles.contains_key(DEFAULT_PROFILE) {
            return Err(TouchringError::ConfigInvalid(format!(
                "No '{DEFAULT_PROFILE}' profile defined"
            )));
        }

        debug!(profiles = profiles.len(), "Profile table validated");
        Ok(Self { profiles })
    }

    /// Look up a profile by exact name.
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// The fallback profile.
    pub fn default_profile(&self) -> &Profile {
        // Presence is checked in from_entries.
        &self.profiles[DEFAULT_PROFILE]
    }

    /// Profiles in name order.
    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Convert back to the on-disk representation.
    pub fn to_entries(&self) -> BTreeMap<String, ProfileEntry> {
        self.profiles
            .iter()
            .map(|(name, profile)| {
                let modes = profile
                    .modes
                    .iter()
                    .map(|m| (m.index.to_string(), m.to_entry()))
                    .collect();
                (name.clone(), ProfileEntry { modes })
            })
            .collect()
    }
}
