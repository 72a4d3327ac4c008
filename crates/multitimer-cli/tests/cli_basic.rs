//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against an isolated home
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "-p", "multitimer-cli", "--"])
        .args(args)
        .env("HOME", home)
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn help_lists_subcommands() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["--help"]);
    assert_eq!(code, 0);
    for subcommand in ["timer", "config", "watch", "completions"] {
        assert!(stdout.contains(subcommand), "missing {subcommand}: {stdout}");
    }
}

#[test]
fn timer_add_then_list_shows_the_timer() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["timer", "add", "tea", "--duration", "180", "--id", "tea-timer"],
    );
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("tea-timer"), "{stdout}");

    let (stdout, _, code) = run_cli(home.path(), &["timer", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("tea-timer"));
    assert!(stdout.contains("countdown"));
    assert!(stdout.contains("idle"));
}

#[test]
fn timer_status_reports_runtime_json() {
    let home = tempfile::tempdir().unwrap();
    let _ = run_cli(home.path(), &["timer", "add", "tea", "--id", "t1"]);
    let (stdout, _, code) = run_cli(home.path(), &["timer", "status", "t1"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["status"], "idle");
    assert_eq!(parsed["remainingMs"], 300_000);
}

#[test]
fn timer_start_then_pause_reports_paused() {
    let home = tempfile::tempdir().unwrap();
    let _ = run_cli(home.path(), &["timer", "add", "tea", "--id", "t1"]);
    let (_, stderr, code) = run_cli(home.path(), &["timer", "start", "t1"]);
    assert_eq!(code, 0, "{stderr}");
    let (_, stderr, code) = run_cli(home.path(), &["timer", "pause", "t1"]);
    assert_eq!(code, 0, "{stderr}");

    let (stdout, _, code) = run_cli(home.path(), &["timer", "status", "t1"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["status"], "paused");
}

#[test]
fn status_of_an_unknown_timer_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["timer", "status", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown timer"), "{stderr}");
}

#[test]
fn lap_on_a_stopwatch_prints_a_lap_event() {
    let home = tempfile::tempdir().unwrap();
    let _ = run_cli(
        home.path(),
        &["timer", "add", "run", "--stopwatch", "--id", "s1"],
    );
    let _ = run_cli(home.path(), &["timer", "start", "s1"]);
    let (stdout, _, code) = run_cli(home.path(), &["timer", "lap", "s1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains(r#""type": "lap""#), "{stdout}");
}

#[test]
fn clear_empties_the_store() {
    let home = tempfile::tempdir().unwrap();
    let _ = run_cli(home.path(), &["timer", "add", "a", "--id", "a"]);
    let _ = run_cli(home.path(), &["timer", "add", "b", "--id", "b"]);
    let (_, _, code) = run_cli(home.path(), &["timer", "clear"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(home.path(), &["timer", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no timers"), "{stdout}");
}

#[test]
fn config_set_then_get_roundtrip() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["config", "set", "engine.tick_interval_ms", "35"],
    );
    assert_eq!(code, 0, "{stderr}");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "engine.tick_interval_ms"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "35");
}

#[test]
fn config_get_of_an_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "engine.bogus"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"), "{stderr}");
}

#[test]
fn config_list_prints_json() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["engine"]["tick_interval_ms"].is_number());
    assert!(parsed["pomodoro"]["work_minutes"].is_number());
}

#[test]
fn completions_generate_for_bash() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("multitimer-cli"), "{stdout}");
}
