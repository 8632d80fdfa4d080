//! Toggling through the binary.

use serde_json::json;

use crate::common::cli::CliRunner;
use crate::common::fixtures::FakeTablet;
use crate::common::init_test_logging;
use crate::common::logging::LogVerifier;

fn run_toggle(tablet: &FakeTablet, extra: &[&str]) -> crate::common::cli::CliResult {
    let config = tablet.config_path().display().to_string();
    let mut args = vec!["--config", config.as_str()];
    args.extend(extra);
    CliRunner::new().run(&args)
}

#[test]
fn krita_advances_to_rotate_mode() {
    init_test_logging();
    let tablet = FakeTablet::new("Krita", "0");

    run_toggle(&tablet, &[])
        .assert_success()
        .assert_stdout_contains("Krita Mode 1 - Rotate Right/Left");

    assert_eq!(tablet.led(), "1");
    assert_eq!(
        tablet.set_calls(),
        ["--set 13 AbsWheelUp key 4", "--set 13 AbsWheelDown key 6"]
    );
}

#[test]
fn krita_wraps_back_to_first_mode() {
    let tablet = FakeTablet::new("Krita", "1");

    run_toggle(&tablet, &["toggle"]).assert_success();

    assert_eq!(tablet.led(), "0");
    assert_eq!(
        tablet.set_calls(),
        ["--set 13 AbsWheelUp 4", "--set 13 AbsWheelDown 5"]
    );
}

#[test]
fn gimp_cycles_through_all_modes() {
    let tablet = FakeTablet::new("Gimp", "0");

    for expected in ["1", "2", "0"] {
        run_toggle(&tablet, &[]).assert_success();
        assert_eq!(tablet.led(), expected);
    }
    assert_eq!(tablet.set_calls().len(), 6);
    assert_eq!(tablet.set_calls()[0], "--set 13 AbsWheelUp key alt up");
    assert_eq!(tablet.set_calls()[3], "--set 13 AbsWheelDown key PgDn");
}

#[test]
fn unknown_profile_uses_default() {
    let tablet = FakeTablet::new("Inkscape", "0");

    run_toggle(&tablet, &[])
        .assert_success()
        .assert_stdout_contains("Default");

    assert_eq!(tablet.led(), "0");
    assert_eq!(
        tablet.set_calls(),
        ["--set 13 AbsWheelUp 4", "--set 13 AbsWheelDown 5"]
    );
}

#[test]
fn stored_mode_beyond_profile_is_reduced() {
    // Gimp left the LED at 2; Krita has two modes, so 2 acts as 0.
    let tablet = FakeTablet::new("Krita", "2");

    run_toggle(&tablet, &[]).assert_success();

    assert_eq!(tablet.led(), "1");
}

#[test]
fn dry_run_changes_nothing() {
    let tablet = FakeTablet::new("Krita", "0");

    run_toggle(&tablet, &["--dry-run"])
        .assert_success()
        .assert_stdout_contains("[DRY RUN]");

    assert_eq!(tablet.led(), "0");
    assert!(tablet.set_calls().is_empty());
}

#[test]
fn json_report_describes_the_change() {
    let tablet = FakeTablet::new("Gimp", "1");
    let config = tablet.config_path().display().to_string();

    let result = CliRunner::new().run_json(&["--config", &config]);
    result
        .assert_success()
        .assert_json_field("/profile", &json!("Gimp"))
        .assert_json_field("/previous_mode", &json!(1))
        .assert_json_field("/mode", &json!(2))
        .assert_json_field("/mode_count", &json!(3))
        .assert_json_field("/dry_run", &json!(false))
        .assert_json_array_len("/commands", 2)
        .assert_json_field("/commands/0/param", &json!("AbsWheelUp"))
        .assert_json_field("/commands/0/action", &json!("key PgUp"))
        .assert_json_field("/commands/1/device_id", &json!("13"))
        .assert_json_field("/commands/1/ok", &json!(true));
}

#[test]
fn info_log_announces_mode_change() {
    let tablet = FakeTablet::new("Krita", "0");

    let result = run_toggle(&tablet, &["--loglevel", "info"]);
    result.assert_success();

    LogVerifier::from_stderr(&result.stderr)
        .assert_info("Changing to mode 'Krita Mode 1 - Rotate Right/Left'")
        .assert_no_errors();
}

#[test]
fn error_loglevel_hides_mode_change() {
    let tablet = FakeTablet::new("Krita", "0");

    let result = run_toggle(&tablet, &["-l", "error"]);
    result.assert_success().assert_stderr_is_empty();
}

#[test]
fn quiet_prints_nothing() {
    let tablet = FakeTablet::new("Krita", "0");

    run_toggle(&tablet, &["-q"])
        .assert_success()
        .assert_stdout_is_empty()
        .assert_stderr_is_empty();

    assert_eq!(tablet.led(), "1");
}

#[test]
fn led_file_flag_overrides_config() {
    let tablet = FakeTablet::new("Krita", "0");
    let other = tablet.path().join("other_led");
    std::fs::write(&other, "1").unwrap();

    run_toggle(&tablet, &["--led-file", other.to_str().unwrap()]).assert_success();

    assert_eq!(std::fs::read_to_string(&other).unwrap(), "0");
    assert_eq!(tablet.led(), "0");
}

#[test]
fn missing_xsetwacom_still_advances_led() {
    let tablet = FakeTablet::new("Krita", "0");
    std::fs::remove_file(tablet.path().join("xsetwacom")).unwrap();

    run_toggle(&tablet, &[])
        .assert_success()
        .assert_stdout_contains("no PAD devices to configure");

    // Without device discovery the profile query still names Krita.
    assert_eq!(tablet.led(), "1");
}

#[test]
fn led_found_by_sysfs_search() {
    let tablet = FakeTablet::new("Krita", "0");
    tablet.search_sysfs();
    let led = tablet.add_sysfs_led("hid", "1");
    let root = tablet.sysfs_root().display().to_string();

    run_toggle(&tablet, &["--sysfs-root", &root]).assert_success();

    assert_eq!(std::fs::read_to_string(&led).unwrap(), "0");
    assert_eq!(tablet.led(), "0");
    assert_eq!(
        tablet.set_calls(),
        ["--set 13 AbsWheelUp 4", "--set 13 AbsWheelDown 5"]
    );
}
