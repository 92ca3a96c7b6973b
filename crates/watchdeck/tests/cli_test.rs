//! Integration tests for the `watchdeck` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `watchdeck` binary with env isolation.
///
/// Clears all `WATCHDECK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn watchdeck_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("watchdeck");
    cmd.env("HOME", "/tmp/watchdeck-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/watchdeck-cli-test-nonexistent")
        .env_remove("WATCHDECK_API_URL")
        .env_remove("WATCHDECK_OUTPUT")
        .env_remove("WATCHDECK_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = watchdeck_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    watchdeck_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("ssl")
            .and(predicate::str::contains("uptime"))
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("dashboard")),
    );
}

#[test]
fn test_version_flag() {
    watchdeck_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("watchdeck"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    watchdeck_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    watchdeck_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = watchdeck_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = watchdeck_cmd()
        .args(["--output", "invalid", "ssl", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_unreachable_backend_fails_with_connection_error() {
    // Port 1 is never listening; the error should mention the backend.
    watchdeck_cmd()
        .args(["--api-url", "http://127.0.0.1:1", "ssl", "list"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("backend").or(predicate::str::contains("connect")),
        );
}

#[test]
fn test_invalid_api_url_is_a_usage_error() {
    let output = watchdeck_cmd()
        .args(["--api-url", "not a url", "devices", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_ssl_subcommands_exist() {
    watchdeck_cmd()
        .args(["ssl", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("latest"))
                .and(predicate::str::contains("expiring"))
                .and(predicate::str::contains("check")),
        );
}

#[test]
fn test_uptime_subcommands_exist() {
    watchdeck_cmd()
        .args(["uptime", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("history"))
                .and(predicate::str::contains("pause"))
                .and(predicate::str::contains("resume"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn test_analytics_realtime_requires_metric() {
    let output = watchdeck_cmd()
        .args(["analytics", "realtime", "prop-1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("--metric"),
        "Expected error about the required --metric flag:\n{text}"
    );
}

#[test]
fn test_dashboard_interval_flag_parses() {
    // Parsing succeeds; execution fails on the unreachable backend.
    watchdeck_cmd()
        .args([
            "--api-url",
            "http://127.0.0.1:1",
            "dashboard",
            "--interval",
            "5",
        ])
        .assert()
        .failure();
}

#[test]
fn test_dashboard_help_lists_watch_flag() {
    watchdeck_cmd()
        .args(["dashboard", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--watch").and(predicate::str::contains("--interval")));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    watchdeck_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("localhost:8001"));
}

#[test]
fn test_config_path_prints_a_path() {
    watchdeck_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
