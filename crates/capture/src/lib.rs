// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact log for walkthrough recordings.
//!
//! Every screenshot taken during a run is appended to an [`ArtifactLog`] as a
//! [`LogEntry`]. The log renders to the `chapters.log` index that narration
//! tooling consumes, and can mirror each entry to a JSONL journal as it is
//! recorded so an aborted run still leaves a trace on disk.

mod duration_serde;
mod entry;
mod log;

pub use entry::{format_elapsed, LogEntry, LABEL_WIDTH};
pub use log::{ArtifactLog, JournalRecord, CHAPTERS_LOG, JOURNAL_FILE};
