// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(deprecated)]

//! Argument handling of the merge binary. None of these reach ffmpeg.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn merge() -> Command {
    let mut cmd = Command::cargo_bin("walkthrough-merge").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_unknown_episode() {
    merge()
        .args(["--episode", "9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown episode 9. Available: 1-8"));
}

#[test]
fn test_inputs_required() {
    merge()
        .args(["--audio", "ep.mp3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "provide --episode or all of --audio, --scenes, --screenshots",
        ));
}

#[test]
fn test_missing_audio_is_an_error() {
    let dir = TempDir::new().unwrap();
    merge()
        .current_dir(dir.path())
        .args(["--episode", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "audio not found: narration/ep1_getting_started.mp3",
        ));
}

#[test]
fn test_missing_screenshots_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("ep.mp3"), b"").unwrap();
    std::fs::write(dir.path().join("ep.scenes"), b"00:00:00,000 overview\n").unwrap();

    merge()
        .current_dir(dir.path())
        .args(["--audio", "ep.mp3", "--scenes", "ep.scenes", "--screenshots", "shots"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("screenshots dir not found: shots"));
}

#[test]
fn test_bad_resolution() {
    merge()
        .args(["--episode", "1", "--resolution", "big"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid resolution 'big'"));
}
