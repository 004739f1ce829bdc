// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg(unix)]

//! Launching a real target process in front of a recording.

mod common;

use std::time::Duration;

use common::*;
use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;
use tempfile::TempDir;
use walkthrough::driver::fake::FakeDriver;
use walkthrough::error::RunError;
use walkthrough::readiness::ReadinessError;
use walkthrough::supervisor::{LaunchError, LaunchSpec, Target};

fn shell(script: String) -> Target {
    Target::Launch(LaunchSpec::new("sh", ["-c".to_string(), script]))
}

async fn wait_until_gone(pid: i32) {
    for _ in 0..50 {
        if kill(Pid::from_raw(pid), None) == Err(Errno::ESRCH) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("process {pid} is still alive");
}

#[tokio::test]
async fn test_silent_target_times_out_and_is_killed() {
    let dir = TempDir::new().unwrap();
    let pid_file = dir.path().join("target.pid");
    let target = shell(format!(
        "echo $$ > {}; echo booting; sleep 30",
        pid_file.display()
    ));
    let mut config = config(target, &dir.path().join("out"), Some("1"), None);
    config.ready_timeout = Duration::from_secs(1);
    let driver = FakeDriver::new();

    let err = run(&driver, &config).await.unwrap_err();

    assert!(
        matches!(
            err,
            RunError::Launch(LaunchError::Readiness(ReadinessError::Timeout { .. }))
        ),
        "{err:?}"
    );
    assert_eq!(err.exit_code(), 1);
    assert!(driver.calls().is_empty());
    assert!(!dir.path().join("out").join("01_getting_started").exists());

    let pid: i32 = std::fs::read_to_string(&pid_file)
        .unwrap()
        .trim()
        .parse()
        .unwrap();
    wait_until_gone(pid).await;
}

#[tokio::test]
async fn test_ready_marker_becomes_entry_url() {
    let dir = TempDir::new().unwrap();
    let pid_file = dir.path().join("target.pid");
    let target = shell(format!(
        "echo $$ > {}; echo 'Open in browser: http://127.0.0.1:5999/?token=t'; sleep 30",
        pid_file.display()
    ));
    let config = config(target, dir.path(), Some("7"), None);
    let driver = FakeDriver::new();

    run(&driver, &config).await.unwrap();

    assert!(driver.calls().iter().any(|c| matches!(
        c,
        walkthrough::driver::fake::DriverCall::Goto { url, .. }
            if url == "http://127.0.0.1:5999/?token=t"
    )));

    let pid: i32 = std::fs::read_to_string(&pid_file)
        .unwrap()
        .trim()
        .parse()
        .unwrap();
    wait_until_gone(pid).await;
}
