// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A single captured artifact and its `chapters.log` line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Column width the chapter label is padded to in `chapters.log`.
pub const LABEL_WIDTH: usize = 30;

/// One captured artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Time since the owning run context started.
    #[serde(with = "crate::duration_serde")]
    pub elapsed: Duration,

    /// Label shown in the index, usually `chapter/artifact`.
    pub label: String,

    /// File name relative to the run's output directory.
    pub file_name: String,
}

impl LogEntry {
    pub fn new(elapsed: Duration, label: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            elapsed,
            label: label.into(),
            file_name: file_name.into(),
        }
    }

    /// Render as `[mm:ss] label                          → file`.
    ///
    /// Labels longer than [`LABEL_WIDTH`] are kept whole.
    pub fn format_line(&self) -> String {
        format!(
            "[{}] {:<width$} → {}",
            format_elapsed(self.elapsed),
            self.label,
            self.file_name,
            width = LABEL_WIDTH
        )
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_line())
    }
}

/// Format a duration as `mm:ss`.
///
/// Minutes are total minutes, so a run past the hour reads `61:05`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
