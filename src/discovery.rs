//! Tablet device discovery via `xsetwacom --list devices`.
//!
//! The listing is free text, one device per line:
//!
//! ```text
//! Wacom Intuos Pro M Pen stylus    	id: 11	type: STYLUS
//! Wacom Intuos Pro M Pad pad       	id: 13	type: PAD
//! ```
//!
//! Each line is matched against `<name> id: <digits> type: <word>`. Lines
//! that do not match are skipped.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::runner::CommandRunner;

static DEVICE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.*?)\s+id:\s+(?P<id>\d+)\s+type:\s+(?P<class>\w+)")
        .expect("device line pattern is valid")
});

/// A tablet device as reported by `xsetwacom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub class: String,
}

/// Devices grouped by class, then keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeviceMap {
    classes: BTreeMap<String, BTreeMap<String, String>>,
}

impl DeviceMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device. A repeated identifier within a class replaces the name.
    pub fn insert(&mut self, class: &str, id: &str, name: &str) {
        self.classes
            .entry(class.to_string())
            .or_default()
            .insert(id.to_string(), name.to_string());
    }

    /// Devices of one class in identifier order; empty if the class is unknown.
    pub fn devices_of<'a>(&'a self, class: &'a str) -> impl Iterator<Item = Device> + 'a {
        self.classes
            .get(class)
            .into_iter()
            .flat_map(move |devices| {
                devices.iter().map(move |(id, name)| Device {
                    id: id.clone(),
                    name: name.clone(),
                    class: class.to_string(),
                })
            })
    }

    /// Every device, grouped by class.
    pub fn devices(&self) -> impl Iterator<Item = Device> + '_ {
        self.classes.keys().flat_map(|class| self.devices_of(class))
    }

    /// Known device classes.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Total number of devices.
    pub fn len(&self) -> usize {
        self.classes.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse `xsetwacom --list devices` output.
///
/// Parsing is pure: the same text always yields the same map.
pub fn parse_device_list(text: &str) -> DeviceMap {
    let mut map = DeviceMap::new();
    for line in text.lines() {
        let Some(caps) = DEVICE_LINE.captures(line) else {
            trace!(line, "Skipping unrecognized device line");
            continue;
        };
        let name = caps["name"].trim();
        let id = &caps["id"];
        let class = &caps["class"];
        trace!(name, id, class, "Parsed device");
        map.insert(class, id, name);
    }
    map
}

/// Query the attached tablet devices.
///
/// A failing or missing `xsetwacom` yields an empty map; applying a mode
/// then does nothing.
#[instrument(skip(runner))]
pub fn discover_devices(runner: &dyn CommandRunner, xsetwacom: &str) -> DeviceMap {
    let output = match runner.run(xsetwacom, &["--list", "devices"]) {
        Ok(output) if output.is_success() => output,
        Ok(output) => {
            debug!(
                status = ?output.status,
                stderr = %output.stderr.trim(),
                "Device listing failed"
            );
            return DeviceMap::new();
        }
        Err(e) => {
            debug!(error = %e, "Could not list devices");
            return DeviceMap::new();
        }
    };

    let map = parse_device_list(&output.stdout);
    debug!(devices = map.len(), classes = ?map.classes().collect::<Vec<_>>(), "Discovered devices");
    map
}
