//! Basic CLI E2E tests.
//!
//! Tests run the `pushup` binary against a temporary data directory and
//! verify its output.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pushup"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_today_creates_first_record() {
    let dir = tempfile::tempdir().unwrap();
    let today = run_json(dir.path(), &["today", "--json"]);
    assert_eq!(today["count"], 10);
    assert_eq!(today["done"], false);
    assert!(dir.path().join("pushups.db").exists());
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_today_text_shows_origin() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(dir.path(), &["today"]);
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("target 10  pending"));
    assert!(stdout.contains("day 1 since "));
}

#[test]
fn test_complete_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let first = run_json(dir.path(), &["complete", "--json"]);
    let second = run_json(dir.path(), &["complete", "--json"]);
    assert_eq!(first, second);
    assert_eq!(first["done"], true);

    let streak = run_json(dir.path(), &["streak", "--json"]);
    assert_eq!(streak["current"], 1);
    assert_eq!(streak["longest"], 1);
}

#[test]
fn test_streak_defaults_to_zero() {
    let dir = tempfile::tempdir().unwrap();
    let streak = run_json(dir.path(), &["streak", "--json"]);
    assert_eq!(streak["current"], 0);
    assert_eq!(streak["lastDate"], "");

    let (stdout, _, code) = run_cli(dir.path(), &["streak"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no completions yet"));
}

#[test]
fn test_calendar_json_and_lenient_year() {
    let dir = tempfile::tempdir().unwrap();
    let record = run_json(dir.path(), &["complete", "--json"]);
    let date = record["date"].as_str().unwrap().to_string();
    let year: i32 = date[..4].parse().unwrap();

    let view = run_json(dir.path(), &["calendar", "--year", "not-a-year", "--json"]);
    assert_eq!(view["year"], year);
    assert_eq!(view["days"][&date]["done"], true);

    let other = run_json(dir.path(), &["calendar", "--year", &(year + 1).to_string(), "--json"]);
    assert!(other["days"].as_object().unwrap().is_empty());
}

#[test]
fn test_calendar_text() {
    let dir = tempfile::tempdir().unwrap();
    let _ = run_cli(dir.path(), &["complete"]);
    let (stdout, _, code) = run_cli(dir.path(), &["calendar"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("(current)"));
    assert!(stdout.contains('#'));
}

#[test]
fn test_progression_table() {
    let dir = tempfile::tempdir().unwrap();
    let table = run_json(dir.path(), &["progression", "--days", "9", "--json"]);
    let rows = table.as_array().unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[9]["target"], 28);
    assert_eq!(rows[9]["band"], "ramp");
}

#[test]
fn test_config_set_get_reset() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "set", "server.port", "9191"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ok"));

    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "server.port"]);
    assert_eq!(stdout.trim(), "9191");

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "server.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));

    let (_, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "server.port"]);
    assert_eq!(stdout.trim(), "8080");
}

#[test]
fn test_config_set_rejects_bad_value() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "server.port", "lots"]);
    assert_ne!(code, 0);
    assert!(stderr.starts_with("error:"));
}
