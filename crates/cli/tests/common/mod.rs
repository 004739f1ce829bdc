// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for running the orchestrator against the fake driver.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use walkthrough::catalog::{EpisodeCatalog, Selection};
use walkthrough::config::{RunConfig, Seed};
use walkthrough::driver::fake::{DriverCall, FakeDriver};
use walkthrough::driver::Viewport;
use walkthrough::error::RunError;
use walkthrough::orchestrator::{Orchestrator, RunReport};
use walkthrough::readiness::DEFAULT_READY_PATTERN;
use walkthrough::supervisor::Target;
use walkthrough::time::ClockHandle;
use walkthrough::timing::TimingPolicy;

pub const ENTRY_URL: &str = "http://127.0.0.1:5050/?token=demo";

pub fn funded_seed() -> Seed {
    Seed::new("abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyzabc").unwrap()
}

/// A config that attaches to [`ENTRY_URL`] with default pacing and no video.
pub fn url_config(output: &Path, episodes: Option<&str>, seed: Option<Seed>) -> RunConfig {
    config(Target::Url(ENTRY_URL.to_string()), output, episodes, seed)
}

pub fn config(
    target: Target,
    output: &Path,
    episodes: Option<&str>,
    seed: Option<Seed>,
) -> RunConfig {
    RunConfig {
        target,
        output_dir: output.to_path_buf(),
        seed,
        selection: episodes.map(|spec| Selection::parse(spec, 8).unwrap()),
        timing: TimingPolicy::default(),
        ready_pattern: DEFAULT_READY_PATTERN.to_string(),
        ready_timeout: Duration::from_secs(10),
        headless: true,
        video: false,
        cursor: true,
        viewport: Viewport::default(),
        browser_executable: None,
    }
}

/// Run with a fake clock so pacing costs nothing.
pub async fn run(driver: &FakeDriver, config: &RunConfig) -> Result<RunReport, RunError> {
    let catalog = EpisodeCatalog::build();
    Orchestrator::new(config, &catalog, driver)
        .unwrap()
        .with_clock(ClockHandle::fake_at_epoch())
        .run()
        .await
}

/// File names of the screenshots taken in `session`, in order.
pub fn screenshot_names(driver: &FakeDriver, session: usize) -> Vec<String> {
    driver
        .calls_in_session(session)
        .into_iter()
        .filter_map(|c| match c {
            DriverCall::Screenshot { path, .. } => {
                Some(path.file_name().unwrap().to_string_lossy().into_owned())
            }
            _ => None,
        })
        .collect()
}

/// Calls in `session` made before its first screenshot.
pub fn calls_before_first_capture(driver: &FakeDriver, session: usize) -> Vec<DriverCall> {
    driver
        .calls_in_session(session)
        .into_iter()
        .take_while(|c| !matches!(c, DriverCall::Screenshot { .. }))
        .collect()
}

pub fn clicked(calls: &[DriverCall], needle: &str) -> bool {
    calls
        .iter()
        .any(|c| matches!(c, DriverCall::Click { locator, .. } if locator.contains(needle)))
}

/// One parsed `chapters.log` line.
#[derive(Debug)]
pub struct LogLine {
    pub seconds: u64,
    pub label: String,
    pub file: String,
}

pub fn read_chapters_log(dir: &Path) -> Vec<LogLine> {
    let text = std::fs::read_to_string(dir.join("chapters.log")).unwrap();
    text.lines()
        .map(|line| {
            let (stamp, rest) = line.split_once("] ").unwrap();
            let (mins, secs) = stamp.trim_start_matches('[').split_once(':').unwrap();
            let (label, file) = rest.split_once(" → ").unwrap();
            LogLine {
                seconds: mins.parse::<u64>().unwrap() * 60 + secs.parse::<u64>().unwrap(),
                label: label.trim_end().to_string(),
                file: file.to_string(),
            }
        })
        .collect()
}

pub fn episode_dir(output: &Path, slug: &str) -> PathBuf {
    output.join(slug)
}
