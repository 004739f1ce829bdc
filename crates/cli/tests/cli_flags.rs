// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(deprecated)]

//! Argument validation through the real binary. Every case here fails (or
//! exits) before a target or browser is started.

use assert_cmd::Command;
use predicates::prelude::*;

fn walkthrough() -> Command {
    let mut cmd = Command::cargo_bin("walkthrough").unwrap();
    for var in [
        "WALKTHROUGH_URL",
        "WALKTHROUGH_SEED",
        "WALKTHROUGH_OUTPUT",
        "WALKTHROUGH_EPISODE",
        "WALKTHROUGH_CONFIG",
        "WALKTHROUGH_CHROME",
        "WALKTHROUGH_READY_TIMEOUT_SECS",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_short_seed_is_a_usage_error() {
    walkthrough()
        .args(["--url", "http://localhost:5000", "--seed", "tooshort"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "--seed must be exactly 55 characters (got 8).",
        ));
}

#[test]
fn test_seed_from_env_is_validated() {
    walkthrough()
        .env("WALKTHROUGH_SEED", "abc")
        .args(["--url", "http://localhost:5000"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("(got 3)"));
}

#[test]
fn test_unknown_episode_is_a_usage_error() {
    walkthrough()
        .args(["--url", "http://localhost:5000", "--episode", "9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Invalid episode '9'. Use 1-8, comma-separated, or 'all'.",
        ));
}

#[test]
fn test_bad_token_is_named() {
    walkthrough()
        .args(["--url", "http://localhost:5000", "--episode", "1,two"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid episode 'two'"));
}

#[test]
fn test_unparseable_ready_timeout_env_is_a_usage_error() {
    walkthrough()
        .env("WALKTHROUGH_READY_TIMEOUT_SECS", "soon")
        .args(["--url", "http://localhost:5000"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "WALKTHROUGH_READY_TIMEOUT_SECS must be a whole number (got 'soon')",
        ));
}

#[test]
fn test_list_prints_catalog() {
    walkthrough()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Episodes:\n"))
        .stdout(predicate::str::contains("Getting Started"))
        .stdout(predicate::str::contains("  8  Tools & Settings"));
}

#[test]
fn test_non_numeric_pace_is_rejected_by_parser() {
    walkthrough()
        .args(["--pace", "fast"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--pace"));
}

#[test]
fn test_missing_config_file() {
    walkthrough()
        .args(["--config", "/nonexistent/walkthrough.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_invalid_config_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("walkthrough.toml");
    std::fs::write(&path, "speed = 3\n").unwrap();

    walkthrough()
        .arg("--config")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to parse config file"));
}

#[test]
fn test_help_mentions_episodes() {
    walkthrough()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--episode"))
        .stdout(predicate::str::contains("--seed"));
}
