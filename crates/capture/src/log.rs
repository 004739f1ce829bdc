// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only artifact log.

use crate::entry::LogEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Name of the human-readable chapter index.
pub const CHAPTERS_LOG: &str = "chapters.log";

/// Name of the JSONL journal written alongside the screenshots.
pub const JOURNAL_FILE: &str = "captures.jsonl";

/// Journal line written for every recorded entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub index: usize,
    #[serde(flatten)]
    pub entry: LogEntry,
    pub captured_at: DateTime<Utc>,
}

/// Ordered log of captured artifacts.
///
/// Entries keep insertion order and their elapsed times never decrease: an
/// entry stamped earlier than its predecessor is clamped to the predecessor's
/// time.
#[derive(Debug, Default)]
pub struct ArtifactLog {
    entries: Vec<LogEntry>,
    journal: Option<BufWriter<File>>,
}

impl ArtifactLog {
    /// Create an in-memory log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that also appends each entry to a JSONL journal
    pub fn with_journal(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            entries: Vec::new(),
            journal: Some(BufWriter::new(file)),
        })
    }

    /// Append an entry and return it as stored.
    pub fn record(&mut self, mut entry: LogEntry) -> &LogEntry {
        if let Some(prev) = self.entries.last() {
            entry.elapsed = entry.elapsed.max(prev.elapsed);
        }
        let index = self.entries.len();

        // Journal failures never interrupt a run
        if let Some(ref mut writer) = self.journal {
            let record = JournalRecord {
                index,
                entry: entry.clone(),
                captured_at: Utc::now(),
            };
            if let Ok(json) = serde_json::to_string(&record) {
                let _ = writeln!(writer, "{}", json);
                let _ = writer.flush();
            }
        }

        self.entries.push(entry);
        &self.entries[index]
    }

    /// All entries in capture order
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Elapsed time of the most recent entry, zero when empty
    pub fn latest_elapsed(&self) -> Duration {
        self.last().map(|e| e.elapsed).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the chapter index, one line per entry.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.format_line());
            out.push('\n');
        }
        out
    }

    /// Write the chapter index to `path`, replacing any previous file.
    pub fn write_chapters_log(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.render())
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
