//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_zenflip"))
        .args(args)
        .env("ZENFLIP_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["config", "get", "pomo_cycles"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "4");

    let (out, _, code) = run_cli(dir.path(), &["config", "get", "theme_id"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "amoled");
}

#[test]
fn test_config_set_persists_and_clamps() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["config", "set", "pomo_cycles", "500"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "pomo_cycles = 99");

    let (out, _, _) = run_cli(dir.path(), &["config", "get", "pomo_cycles"]);
    assert_eq!(out.trim(), "99");
    assert!(dir.path().join("zenflip_settings.toml").exists());
}

#[test]
fn test_config_get_section_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["config", "get", "sound"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["tick_kind"], "digital");
    assert_eq!(parsed["tick_interval"], "1s");
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, err, code) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
    assert!(err.contains("unknown key"));

    let (_, err, code) = run_cli(dir.path(), &["config", "set", "nope", "1"]);
    assert_eq!(code, 1);
    assert!(err.starts_with("error:"));
}

#[test]
fn test_config_list_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "sound.tick_kind", "mech"]);

    let (out, _, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["sound"]["tick_kind"], "mech");

    let (_, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (out, _, _) = run_cli(dir.path(), &["config", "get", "sound.tick_kind"]);
    assert_eq!(out.trim(), "digital");
}

#[test]
fn test_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(out.trim().ends_with("zenflip_settings.toml"));
}

#[test]
fn test_now_timer_json() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "timer_duration_seconds", "3723"]);

    let (out, _, code) = run_cli(dir.path(), &["now", "--mode", "timer", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["mode"], "timer");
    assert_eq!(parsed["text"], "01:02:03");
    assert_eq!(parsed["status"], "Paused");
}

#[test]
fn test_now_pomodoro_label() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["now", "-m", "pomodoro"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "00:25:00  focus — cycle 1/4");
}

#[test]
fn test_now_rejects_unknown_mode() {
    let dir = tempfile::tempdir().unwrap();
    let (_, err, code) = run_cli(dir.path(), &["now", "--mode", "lunar"]);
    assert_ne!(code, 0);
    assert!(err.contains("unknown mode"));
}

#[test]
fn test_run_stops_after_ticks() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_zenflip"))
        .args(["run", "--mode", "stopwatch", "--start", "--ticks", "2"])
        .env("ZENFLIP_DATA_DIR", dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    drop(child.stdin.take());

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let last = stdout.lines().last().unwrap();
    assert!(last.starts_with("00:00:02"), "unexpected output: {stdout}");
}

#[test]
fn test_run_quits_on_q() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_zenflip"))
        .args(["run", "--mode", "timer", "--timer-minutes", "9000"])
        .env("ZENFLIP_DATA_DIR", dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"q\n").unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("99:59:00"), "unexpected output: {stdout}");

    let (out, _, _) = run_cli(dir.path(), &["config", "get", "timer_duration_seconds"]);
    assert_eq!(out.trim(), "359940");
}
