// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::catalog::Selection;
use crate::config::Seed;
use crate::driver::fake::{DriverCall, FakeDriver};
use crate::driver::Viewport;
use crate::error::exit_codes;
use crate::readiness::DEFAULT_READY_PATTERN;
use crate::supervisor::Target;
use crate::timing::TimingPolicy;
use std::path::Path;
use tempfile::TempDir;
use walkthrough_capture::CHAPTERS_LOG;

fn config(dir: &Path, selection: Option<Selection>, seed: Option<Seed>) -> RunConfig {
    RunConfig {
        target: Target::Url("http://localhost:5000/auth?token=abc".to_string()),
        output_dir: dir.to_path_buf(),
        seed,
        selection,
        timing: TimingPolicy::default(),
        ready_pattern: DEFAULT_READY_PATTERN.to_string(),
        ready_timeout: Duration::from_secs(1),
        headless: true,
        video: false,
        cursor: false,
        viewport: Viewport::default(),
        browser_executable: None,
    }
}

async fn run(driver: &FakeDriver, config: &RunConfig) -> Result<RunReport, RunError> {
    let catalog = EpisodeCatalog::build();
    Orchestrator::new(config, &catalog, driver)
        .unwrap()
        .with_clock(ClockHandle::fake_at_epoch())
        .run()
        .await
}

#[test]
fn test_recording_line() {
    let catalog = EpisodeCatalog::build();
    assert_eq!(
        recording_line(None),
        "Recording: single monolith video (all chapters)"
    );
    let picked = catalog.parse_selection(Some("2,3")).unwrap();
    assert_eq!(
        recording_line(Some(picked.as_slice())),
        "Recording: 2 episode(s) — Ep2, Ep3"
    );
}

#[tokio::test]
async fn test_monolith_runs_every_chapter_in_one_session() {
    let dir = TempDir::new().unwrap();
    let driver = FakeDriver::new();

    let report = run(&driver, &config(dir.path(), None, None)).await.unwrap();

    assert_eq!(report.mode, Mode::Monolith);
    assert_eq!(driver.sessions_opened(), 1);
    assert_eq!(report.artifacts(), driver.screenshots().len());
    assert!(dir.path().join(CHAPTERS_LOG).exists());

    let log = std::fs::read_to_string(dir.path().join(CHAPTERS_LOG)).unwrap();
    let first = log.lines().next().unwrap();
    let last = log.lines().last().unwrap();
    assert!(first.contains("01_intro/home_empty"));
    assert!(last.contains("19_vault/"));
    assert_eq!(driver.calls()[0], DriverCall::Launch { headless: true });
    assert_eq!(driver.calls().last(), Some(&DriverCall::CloseBrowser));
}

#[tokio::test]
async fn test_episode_mode_isolates_sessions() {
    let dir = TempDir::new().unwrap();
    let driver = FakeDriver::new();
    let selection = Selection::parse("1,2", 8).unwrap();

    let report = run(&driver, &config(dir.path(), Some(selection), None))
        .await
        .unwrap();

    assert_eq!(report.mode, Mode::Episodes(vec![1, 2]));
    assert_eq!(report.completed.len(), 2);
    assert_eq!(driver.sessions_opened(), 2);
    for slug in ["01_getting_started", "02_sending_receiving"] {
        let out = dir.path().join(slug);
        assert!(out.join(CHAPTERS_LOG).exists(), "{slug} has no log");
        assert!(std::fs::read_dir(&out)
            .unwrap()
            .any(|e| e.unwrap().file_name().to_string_lossy().starts_with("000_")));
    }
    assert!(!dir.path().join(CHAPTERS_LOG).exists());
}

#[tokio::test]
async fn test_failed_episode_does_not_stop_the_next() {
    let dir = TempDir::new().unwrap();
    let driver = FakeDriver::new().fail_navigation_in_session(0);
    let selection = Selection::parse("1,2", 8).unwrap();

    let err = run(&driver, &config(dir.path(), Some(selection), None))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RunError::EpisodesFailed {
            failed: 1,
            total: 2
        }
    ));
    assert_eq!(err.exit_code(), exit_codes::ERROR);
    assert_eq!(driver.sessions_opened(), 2);
    assert!(dir
        .path()
        .join("02_sending_receiving")
        .join(CHAPTERS_LOG)
        .exists());
    assert!(!driver.calls_in_session(1).is_empty());
}

#[tokio::test]
async fn test_monolith_failure_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    let driver = FakeDriver::new().fail_navigation_in_session(0);

    let err = run(&driver, &config(dir.path(), None, None))
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::Session(_)));
    assert_eq!(driver.calls().last(), Some(&DriverCall::CloseBrowser));
}

#[tokio::test]
async fn test_browser_launch_failure() {
    let dir = TempDir::new().unwrap();
    let driver = FakeDriver::new().failing_launch();

    let err = run(&driver, &config(dir.path(), None, None))
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::Browser(_)));
    assert_eq!(err.exit_code(), exit_codes::ERROR);
    assert_eq!(driver.sessions_opened(), 0);
}

#[tokio::test]
async fn test_entry_url_is_opened_in_every_session() {
    let dir = TempDir::new().unwrap();
    let driver = FakeDriver::new();
    let seed = Seed::new("q".repeat(55)).unwrap();
    let selection = Selection::parse("2,3", 8).unwrap();

    run(&driver, &config(dir.path(), Some(selection), Some(seed)))
        .await
        .unwrap();

    let gotos: Vec<_> = driver
        .calls()
        .into_iter()
        .filter(|c| matches!(c, DriverCall::Goto { .. }))
        .collect();
    assert_eq!(gotos.len(), 2);
    for call in gotos {
        assert!(matches!(
            call,
            DriverCall::Goto { url, .. } if url == "http://localhost:5000/auth?token=abc"
        ));
    }
}
