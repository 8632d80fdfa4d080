//! Mode toggling.
//!
//! Each invocation advances the active profile's mode by one step, writes
//! the new index to the LED file, then binds every action of the new mode on
//! every device of the mode's device class. Writing the LED and the device
//! commands are best effort: a failure is recorded in the report and logged,
//! never fatal, and nothing is rolled back.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::{Mode, Profile, Settings};
use crate::discovery::{discover_devices, Device, DeviceMap};
use crate::error::Result;
use crate::led::LedFile;
use crate::profile::active_profile;
use crate::runner::CommandRunner;

/// Mode following `current` in a profile with `mode_count` modes.
///
/// `current` is first reduced modulo `mode_count`, so stale values from a
/// profile with more modes still land in range. The last mode wraps to 0.
pub const fn next_mode(current: usize, mode_count: usize) -> usize {
    if mode_count == 0 {
        return 0;
    }
    (current % mode_count + 1) % mode_count
}

/// One `xsetwacom --set` binding and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedCommand {
    pub device_id: String,
    pub device_name: String,
    pub param: String,
    pub action: String,
    /// False if the command could not run or exited nonzero.
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one toggle.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleReport {
    pub profile: String,
    pub previous_mode: usize,
    pub mode: usize,
    pub mode_count: usize,
    pub description: String,
    pub device_class: String,
    pub led_file: String,
    /// Why the LED file could not be updated; the devices are still set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub led_error: Option<String>,
    pub dry_run: bool,
    pub commands: Vec<AppliedCommand>,
}

impl ToggleReport {
    /// Number of device commands that failed.
    pub fn failures(&self) -> usize {
        self.commands.iter().filter(|c| !c.ok).count()
    }
}

/// Snapshot of the current state without changing it.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub profile: String,
    pub mode: usize,
    pub mode_count: usize,
    pub description: String,
    pub device_class: String,
    pub led_file: String,
    pub devices: Vec<Device>,
}

/// Drives a toggle against the configured commands.
pub struct Toggler<'a> {
    runner: &'a dyn CommandRunner,
    settings: &'a Settings,
    dry_run: bool,
}

impl<'a> Toggler<'a> {
    /// Create a toggler using `runner` for every external command.
    pub fn new(runner: &'a dyn CommandRunner, settings: &'a Settings) -> Self {
        Self {
            runner,
            settings,
            dry_run: false,
        }
    }

    /// Compute and report without writing the LED file or setting devices.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Read the stored mode, select the profile, discover devices and advance.
    ///
    /// # Errors
    ///
    /// Fails if the LED file cannot be read or parsed. Writing the LED file,
    /// device commands and the profile query are best effort.
    #[instrument(skip_all, fields(led = %led.path().display(), dry_run = self.dry_run))]
    pub fn toggle(&self, led: &LedFile) -> Result<ToggleReport> {
        let current = led.read_mode()?;
        let profile = active_profile(
            self.runner,
            &self.settings.commands.profile_query,
            &self.settings.table,
        );
        let devices = discover_devices(self.runner, &self.settings.commands.xsetwacom);
        Ok(self.advance(led, current, profile, &devices))
    }

    /// Advance from `current` within `profile` and apply the new mode.
    ///
    /// A failed LED write is recorded in [`ToggleReport::led_error`]; the
    /// devices are configured regardless.
    pub fn advance(
        &self,
        led: &LedFile,
        current: usize,
        profile: &Profile,
        devices: &DeviceMap,
    ) -> ToggleReport {
        let next = next_mode(current, profile.mode_count());
        // next_mode stays below mode_count, which is at least 1.
        let mode = &profile.modes()[next];

        let led_error = if self.dry_run {
            debug!(mode = next, "Dry run: LED file left unchanged");
            None
        } else {
            match led.write_mode(next) {
                Ok(()) => None,
                Err(e) => {
                    debug!(error = %e, "LED file not updated");
                    Some(e.to_string())
                }
            }
        };

        info!(
            profile = %profile.name,
            from = current,
            to = next,
            "Changing to mode '{}'",
            mode.description
        );

        let commands = self.apply_mode(mode, devices);
        let report = ToggleReport {
            profile: profile.name.clone(),
            previous_mode: current,
            mode: next,
            mode_count: profile.mode_count(),
            description: mode.description.clone(),
            device_class: mode.device_class.clone(),
            led_file: led.path().display().to_string(),
            led_error,
            dry_run: self.dry_run,
            commands,
        };

        if report.failures() > 0 {
            debug!(
                failed = report.failures(),
                total = report.commands.len(),
                "Some device settings were not applied"
            );
        }
        report
    }

    /// Bind every action of `mode` on every device of its class.
    ///
    /// Returns one entry per device and action. A class without devices
    /// yields no commands.
    pub fn apply_mode(&self, mode: &Mode, devices: &DeviceMap) -> Vec<AppliedCommand> {
        let mut applied = Vec::new();
        for device in devices.devices_of(&mode.device_class) {
            for (direction, action) in &mode.actions {
                applied.push(self.set_param(&device, direction.xsetwacom_param(), action));
            }
        }

        if applied.is_empty() {
            debug!(class = %mode.device_class, "No devices to configure");
        }
        applied
    }

    fn set_param(&self, device: &Device, param: &str, action: &str) -> AppliedCommand {
        let mut args = vec!["--set", device.id.as_str(), param];
        args.extend(action.split_whitespace());

        let outcome = if self.dry_run {
            debug!(device = %device.name, param, action, "Dry run: would set");
            Ok(())
        } else {
            match self.runner.run(&self.settings.commands.xsetwacom, &args) {
                Ok(output) if output.is_success() => Ok(()),
                Ok(output) => Err(format!(
                    "exit status {}: {}",
                    output
                        .status
                        .map_or_else(|| "signal".to_string(), |s| s.to_string()),
                    output.stderr.trim()
                )),
                Err(e) => Err(e.to_string()),
            }
        };

        match &outcome {
            Ok(()) => debug!(device = %device.name, param, action, "Applied"),
            Err(error) => debug!(device = %device.name, param, action, %error, "Setting failed"),
        }

        AppliedCommand {
            device_id: device.id.clone(),
            device_name: device.name.clone(),
            param: param.to_string(),
            action: action.to_string(),
            ok: outcome.is_ok(),
            error: outcome.err(),
        }
    }

    /// Describe the current state without advancing.
    ///
    /// # Errors
    ///
    /// Fails if the LED file cannot be read or parsed.
    pub fn status(&self, led: &LedFile) -> Result<StatusReport> {
        let stored = led.read_mode()?;
        let profile = active_profile(
            self.runner,
            &self.settings.commands.profile_query,
            &self.settings.table,
        );
        let devices = discover_devices(self.runner, &self.settings.commands.xsetwacom);

        let mode_index = stored % profile.mode_count();
        let mode = &profile.modes()[mode_index];

        Ok(StatusReport {
            profile: profile.name.clone(),
            mode: mode_index,
            mode_count: profile.mode_count(),
            description: mode.description.clone(),
            device_class: mode.device_class.clone(),
            led_file: led.path().display().to_string(),
            devices: devices.devices_of(&mode.device_class).collect(),
        })
    }
}
