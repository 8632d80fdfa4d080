//! Integration tests for complete toggle runs.
//!
//! A mock runner stands in for `xsetwacom` and the profile query; the LED
//! file lives in a temp directory.

use std::fs;

use tempfile::TempDir;
use touchring::config::{load_config_from_str, ConfigFormat, Settings};
use touchring::discovery::parse_device_list;
use touchring::led::LedFile;
use touchring::runner::mock::{Invocation, MockRunner};
use touchring::runner::CommandOutput;
use touchring::toggle::Toggler;

const TWO_RING_TABLE: &str = r#"
[commands]
xsetwacom = "xsw"
profile_query = ["tablet-profile", "--active"]

[profiles.Default.modes.0]
actions = { ring-counterclockwise = "4", ring-clockwise = "5" }

[profiles.Painter.modes.0]
description = "Zoom"
actions = { ring-counterclockwise = "key ctrl plus", ring-clockwise = "key ctrl minus" }

[profiles.Painter.modes.1]
description = "Both rings"
actions = { AbsWheelUp = "key 4", AbsWheelDown = "key 6", AbsWheel2Up = "key bracketright", AbsWheel2Down = "key bracketleft" }

[profiles.Painter.modes.2]
description = "Stylus buttons"
device_type = "STYLUS"
actions = { ring-clockwise = "button 3" }
"#;

const DUAL_PAD_LISTING: &str = "\
Wacom Cintiq 24HD Pen stylus\tid: 9\ttype: STYLUS\n\
Wacom Cintiq 24HD Pad pad\tid: 10\ttype: PAD\n\
Wacom Intuos Pro M Pad pad\tid: 13\ttype: PAD\n";

fn settings() -> Settings {
    load_config_from_str(TWO_RING_TABLE, ConfigFormat::Toml).unwrap()
}

fn led_with(content: &str) -> (TempDir, LedFile) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("status_led0_select");
    fs::write(&path, content).unwrap();
    (dir, LedFile::new(path))
}

fn read_led(led: &LedFile) -> String {
    fs::read_to_string(led.path()).unwrap()
}

#[test]
fn configured_commands_are_used_in_order() {
    let settings = settings();
    let (_dir, led) = led_with("0");
    let mock = MockRunner::new()
        .respond("tablet-profile", "Painter\n")
        .respond("xsw", DUAL_PAD_LISTING);

    let report = Toggler::new(&mock, &settings).toggle(&led).unwrap();
    assert_eq!(report.profile, "Painter");
    assert_eq!(report.mode, 1);
    assert_eq!(read_led(&led), "1");

    mock.assert_invocations(&[
        Invocation::new("tablet-profile", &["--active"]),
        Invocation::new("xsw", &["--list", "devices"]),
        Invocation::new("xsw", &["--set", "10", "AbsWheelUp", "key", "4"]),
        Invocation::new("xsw", &["--set", "10", "AbsWheelDown", "key", "6"]),
        Invocation::new("xsw", &["--set", "10", "AbsWheel2Up", "key", "bracketright"]),
        Invocation::new("xsw", &["--set", "10", "AbsWheel2Down", "key", "bracketleft"]),
        Invocation::new("xsw", &["--set", "13", "AbsWheelUp", "key", "4"]),
        Invocation::new("xsw", &["--set", "13", "AbsWheelDown", "key", "6"]),
        Invocation::new("xsw", &["--set", "13", "AbsWheel2Up", "key", "bracketright"]),
        Invocation::new("xsw", &["--set", "13", "AbsWheel2Down", "key", "bracketleft"]),
    ]);
}

#[test]
fn mode_for_other_device_class() {
    let settings = settings();
    let (_dir, led) = led_with("1");
    let mock = MockRunner::new()
        .respond("tablet-profile", "Painter")
        .respond("xsw", DUAL_PAD_LISTING);

    let report = Toggler::new(&mock, &settings).toggle(&led).unwrap();
    assert_eq!(report.mode, 2);
    assert_eq!(report.device_class, "STYLUS");
    assert_eq!(report.commands.len(), 1);
    assert_eq!(report.commands[0].device_id, "9");
    assert_eq!(report.commands[0].param, "AbsWheelDown");
    assert_eq!(read_led(&led), "2");
}

#[test]
fn full_cycle_returns_to_start() {
    let settings = settings();
    let (_dir, led) = led_with("0");
    let mock = MockRunner::new().respond("tablet-profile", "Painter");
    let toggler = Toggler::new(&mock, &settings);

    let modes: Vec<usize> = (0..4).map(|_| toggler.toggle(&led).unwrap().mode).collect();
    assert_eq!(modes, [1, 2, 0, 1]);
}

#[test]
fn profile_query_failure_uses_default() {
    let settings = settings();
    let (_dir, led) = led_with("3");
    let mock = MockRunner::new()
        .respond_with("tablet-profile", CommandOutput::failure(1, "no session bus"))
        .respond("xsw", DUAL_PAD_LISTING);

    let report = Toggler::new(&mock, &settings).toggle(&led).unwrap();
    assert_eq!(report.profile, "Default");
    assert_eq!(report.mode, 0);
    assert_eq!(report.commands.len(), 4);
    assert_eq!(read_led(&led), "0");
}

#[test]
fn failed_settings_are_reported_not_fatal() {
    let settings = settings();
    let (_dir, led) = led_with("0");
    let failing = MockRunner::new().respond_with(
        "xsw",
        CommandOutput::failure(1, "Cannot find device '10'."),
    );
    let devices = parse_device_list(DUAL_PAD_LISTING);
    let profile = settings.table.default_profile();
    let report = Toggler::new(&failing, &settings)
        .advance(&led, 0, profile, &devices);

    assert_eq!(report.failures(), 4);
    assert!(
        report.commands[0]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("Cannot find device"))
    );
    assert_eq!(read_led(&led), "0");
}

#[test]
fn status_matches_toggle_result() {
    let settings = settings();
    let (_dir, led) = led_with("0");
    let mock = MockRunner::new()
        .respond("tablet-profile", "Painter")
        .respond("xsw", DUAL_PAD_LISTING);
    let toggler = Toggler::new(&mock, &settings);

    let toggled = toggler.toggle(&led).unwrap();
    let status = toggler.status(&led).unwrap();
    assert_eq!(status.profile, toggled.profile);
    assert_eq!(status.mode, toggled.mode);
    assert_eq!(status.description, "Both rings");
    assert_eq!(status.devices.len(), 2);
}
