// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unattended walkthrough recorder.
//!
//! Drives the wallet web app through a fixed script of chapters and records
//! numbered screenshots, a `chapters.log` index and optionally video. The
//! script is grouped into episodes that can be recorded one isolated
//! session at a time, or all chapters can be recorded as one monolith.
//!
//! The layers, leaf first:
//!
//! - [`timing`] and [`time`]: pacing delays and the clock they sleep on
//! - [`recorder`]: the per-session [`recorder::RunContext`] that names and logs captures
//! - [`readiness`] and [`supervisor`]: launching the wallet and waiting for its URL
//! - [`driver`]: the browser abstraction, a Chromium implementation and a fake
//! - [`step`], [`chapters`] and [`catalog`]: the script itself
//! - [`runner`] and [`orchestrator`]: session lifecycle and mode dispatch

pub mod catalog;
pub mod chapters;
pub mod cli;
pub mod config;
pub mod driver;
pub mod env;
pub mod error;
pub mod orchestrator;
pub mod output_diagnostic;
pub mod readiness;
pub mod recorder;
pub mod runner;
pub mod step;
pub mod supervisor;
pub mod time;
pub mod timing;

/// Re-exported artifact log types from the walkthrough-capture crate.
pub mod capture {
    pub use walkthrough_capture::{format_elapsed, ArtifactLog, LogEntry, CHAPTERS_LOG, JOURNAL_FILE};
}
