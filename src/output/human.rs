//! Styled terminal output for people.

use std::path::Path;

use console::style;

use super::Output;
use crate::config::Settings;
use crate::discovery::DeviceMap;
use crate::error::TouchringError;
use crate::toggle::{StatusReport, ToggleReport};

/// Plain text with optional color on stdout, errors on stderr.
#[derive(Debug, Default)]
pub struct HumanOutput;

impl HumanOutput {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Output for HumanOutput {
    fn toggled(&self, report: &ToggleReport) {
        let prefix = if report.dry_run {
            style("[DRY RUN]").yellow().bold()
        } else {
            style("[OK]").green().bold()
        };
        println!(
            "{prefix} {} mode {}/{}: {}",
            style(&report.profile).cyan(),
            report.mode,
            report.mode_count,
            report.description
        );

        if let Some(error) = &report.led_error {
            println!("  {} LED not updated: {}", style("✗").red(), style(error).red());
        }
        if report.commands.is_empty() {
            println!(
                "  {}",
                style(format!("no {} devices to configure", report.device_class)).dim()
            );
        }
        for cmd in &report.commands {
            let mark = if cmd.ok {
                style("✓").green()
            } else {
                style("✗").red()
            };
            print!("  {mark} {} {} {}", cmd.device_name, cmd.param, cmd.action);
            match &cmd.error {
                Some(error) => println!(" ({})", style(error).red()),
                None => println!(),
            }
        }
    }

    fn status(&self, report: &StatusReport) {
        println!("{:<9} {}", style("Profile").bold(), style(&report.profile).cyan());
        println!(
            "{:<9} {}/{}: {}",
            style("Mode").bold(),
            report.mode,
            report.mode_count,
            report.description
        );
        println!("{:<9} {}", style("LED").bold(), report.led_file);
        if report.devices.is_empty() {
            println!(
                "{:<9} {}",
                style("Devices").bold(),
                style(format!("none of class {}", report.device_class)).dim()
            );
        } else {
            for (i, device) in report.devices.iter().enumerate() {
                let label = if i == 0 { "Devices" } else { "" };
                println!("{:<9} {} (id {})", style(label).bold(), device.name, device.id);
            }
        }
    }

    fn devices(&self, devices: &DeviceMap) {
        if devices.is_empty() {
            println!("{}", style("No tablet devices found").yellow());
            println!("Ensure the tablet is connected and xsetwacom is installed");
            return;
        }
        for device in devices.devices() {
            println!(
                "{:<8} {:>4}  {}",
                style(&device.class).green(),
                device.id,
                device.name
            );
        }
    }

    fn config(&self, settings: &Settings) {
        println!(
            "{} {} ({} profiles)",
            style("[OK]").green().bold(),
            settings.source,
            settings.table.len()
        );
        for profile in settings.table.profiles() {
            println!("{}", style(&profile.name).cyan().bold());
            for mode in profile.modes() {
                println!("  {} [{}] {}", mode.index, mode.device_class, mode.description);
                for (direction, action) in &mode.actions {
                    println!("      {direction:<24} {action}");
                }
            }
        }
    }

    fn initialized(&self, path: &Path) {
        println!("{} Wrote {}", style("[OK]").green().bold(), path.display());
    }

    fn error(&self, error: &TouchringError) {
        eprintln!("{}: {}", style("Error").red().bold(), error);
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {}", style("Hint").yellow(), suggestion);
        }
    }
}
