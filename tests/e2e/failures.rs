//! Fatal errors and their exit codes.

use serde_json::json;

use crate::common::cli::CliRunner;
use crate::common::fixtures::FakeTablet;

fn config_arg(tablet: &FakeTablet) -> String {
    tablet.config_path().display().to_string()
}

#[test]
fn non_digit_led_fails_without_setting_devices() {
    let tablet = FakeTablet::new("Krita", "x");

    CliRunner::new()
        .run(&["--config", &config_arg(&tablet)])
        .assert_exit_code(1)
        .assert_stderr_contains("does not hold a mode digit");

    assert_eq!(tablet.led(), "x");
    assert!(tablet.set_calls().is_empty());
}

#[test]
fn empty_led_fails() {
    let tablet = FakeTablet::new("Krita", "");

    CliRunner::new()
        .run(&["--config", &config_arg(&tablet)])
        .assert_exit_code(1);
}

#[test]
fn led_lookup_failure_exits_two() {
    let tablet = FakeTablet::new("Krita", "0");
    tablet.search_sysfs();
    let root = tablet.sysfs_root().display().to_string();

    CliRunner::new()
        .run(&["--config", &config_arg(&tablet), "--sysfs-root", &root])
        .assert_exit_code(2)
        .assert_stderr_contains("No LED status file found")
        .assert_stderr_contains("--led-file");
    assert!(tablet.set_calls().is_empty());
}

#[test]
fn led_lookup_failure_json_reports_code_two() {
    let tablet = FakeTablet::new("Krita", "0");
    tablet.search_sysfs();
    let root = tablet.sysfs_root().display().to_string();

    let result = CliRunner::new()
        .with_env("TOUCHRING_SYSFS_ROOT", &root)
        .run_json(&["--config", &config_arg(&tablet), "status"]);
    result.assert_exit_code(2);
    assert_eq!(result.stderr_json()["exit_code"], json!(2));
}

#[test]
fn unreadable_led_path_fails() {
    let tablet = FakeTablet::new("Krita", "0");
    let missing = tablet.path().join("no_such_led");

    CliRunner::new()
        .run(&[
            "--config",
            &config_arg(&tablet),
            "--led-file",
            missing.to_str().unwrap(),
        ])
        .assert_exit_code(1)
        .assert_stderr_contains("Could not open LED status file");
    assert!(tablet.set_calls().is_empty());
}

#[test]
fn too_many_modes_rejected_before_touching_led() {
    let tablet = FakeTablet::new("Default", "0");
    let mut profiles = String::new();
    for i in 0..5 {
        profiles.push_str(&format!(
            "[profiles.Default.modes.{i}]\nactions = {{ ring-clockwise = \"{i}\" }}\n\n"
        ));
    }
    tablet.write_config(&profiles);

    CliRunner::new()
        .run(&["--config", &config_arg(&tablet)])
        .assert_exit_code(1)
        .assert_stderr_contains("at most 4");
    assert_eq!(tablet.led(), "0");
}

#[test]
fn gapped_modes_rejected() {
    let tablet = FakeTablet::new("Default", "0");
    tablet.write_config(
        "[profiles.Default.modes.0]\nactions = { ring-clockwise = \"5\" }\n\n\
         [profiles.Default.modes.2]\nactions = { ring-clockwise = \"6\" }\n",
    );

    CliRunner::new()
        .run(&["--config", &config_arg(&tablet), "check-config"])
        .assert_exit_code(1)
        .assert_stderr_contains("non-sequential");
}

#[test]
fn missing_explicit_config_is_an_error() {
    let tablet = FakeTablet::new("Default", "0");
    let missing = tablet.path().join("absent.toml");

    CliRunner::new()
        .run(&["--config", missing.to_str().unwrap()])
        .assert_exit_code(1)
        .assert_stderr_contains("Configuration file not found")
        .assert_stderr_contains("touchring init");
}

#[test]
fn json_errors_go_to_stderr() {
    let tablet = FakeTablet::new("Krita", "?");

    let result = CliRunner::new().run_json(&["--config", &config_arg(&tablet)]);
    result.assert_exit_code(1).assert_stdout_is_empty();

    let error = result.stderr_json();
    assert_eq!(error["error"], json!(true));
    assert_eq!(error["exit_code"], json!(1));
    assert!(
        error["message"]
            .as_str()
            .is_some_and(|m| m.contains("mode digit"))
    );
}

#[test]
fn quiet_suppresses_error_output() {
    let tablet = FakeTablet::new("Krita", "x");

    CliRunner::new()
        .run(&["-q", "--config", &config_arg(&tablet)])
        .assert_exit_code(1)
        .assert_stdout_is_empty()
        .assert_stderr_is_empty();
}

#[test]
fn bad_loglevel_is_a_usage_error() {
    let result = CliRunner::new().run(&["--loglevel", "verbose"]);
    assert_ne!(result.exit_code, 0);
    result.assert_stderr_contains("verbose");
}
