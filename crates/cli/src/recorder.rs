// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run context and artifact capture.
//!
//! A [`RunContext`] belongs to exactly one isolated session. It owns the
//! output directory, the artifact counter, the elapsed-time origin and the
//! artifact log; all of them start fresh when the context is created.

use crate::driver::Page;
use crate::error::SessionError;
use crate::time::{Clock, ClockHandle};
use crate::timing::Pacer;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkthrough_capture::{format_elapsed, ArtifactLog, LogEntry, CHAPTERS_LOG, JOURNAL_FILE};

/// File name for the artifact at `index`: `{index:03}_{chapter}_{artifact}.png`.
pub fn artifact_file_name(index: u32, chapter: &str, artifact: &str) -> String {
    format!("{index:03}_{chapter}_{artifact}.png")
}

/// State of one recording.
#[derive(Debug)]
pub struct RunContext {
    output_dir: PathBuf,
    index: u32,
    clock: ClockHandle,
    started: Duration,
    log: ArtifactLog,
}

impl RunContext {
    /// Create the output directory and start a fresh context in it.
    pub fn create(output_dir: impl Into<PathBuf>, clock: ClockHandle) -> Result<Self, SessionError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| SessionError::output(&output_dir, e))?;
        let journal = output_dir.join(JOURNAL_FILE);
        let log = ArtifactLog::with_journal(&journal).map_err(|e| SessionError::output(&journal, e))?;
        let started = clock.now();
        Ok(Self {
            output_dir,
            index: 0,
            clock,
            started,
            log,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Index the next capture will use; equals the number of captures so far.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn log(&self) -> &ArtifactLog {
        &self.log
    }

    /// Time since the context was created
    pub fn elapsed(&self) -> Duration {
        self.clock.since(self.started)
    }

    /// Take a screenshot and log it. Returns the artifact's file name.
    pub async fn capture(
        &mut self,
        page: &dyn Page,
        chapter: &str,
        artifact: &str,
    ) -> Result<String, SessionError> {
        let file_name = artifact_file_name(self.index, chapter, artifact);
        page.screenshot(&self.output_dir.join(&file_name)).await?;

        let elapsed = self.elapsed();
        let label = format!("{chapter}/{artifact}");
        let entry = self
            .log
            .record(LogEntry::new(elapsed, label, file_name.clone()));
        tracing::info!(
            "  [{:03}] [{}] {}",
            self.index,
            format_elapsed(entry.elapsed),
            entry.label
        );
        self.index += 1;
        Ok(file_name)
    }

    /// [`RunContext::capture`], then hold for `hold` or the scene hold.
    pub async fn capture_and_hold(
        &mut self,
        page: &dyn Page,
        pacer: &Pacer,
        chapter: &str,
        artifact: &str,
        hold: Option<Duration>,
    ) -> Result<String, SessionError> {
        let file_name = self.capture(page, chapter, artifact).await?;
        pacer.hold_for(hold).await;
        Ok(file_name)
    }

    /// Write `chapters.log` and return its path.
    pub fn flush(&self) -> Result<PathBuf, SessionError> {
        let path = self.output_dir.join(CHAPTERS_LOG);
        self.log
            .write_chapters_log(&path)
            .map_err(|e| SessionError::output(&path, e))?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "recorder_tests.rs"]
mod tests;
