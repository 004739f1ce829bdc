// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! Variables that map onto CLI flags are read by clap (`WALKTHROUGH_URL`,
//! `WALKTHROUGH_SEED`, ...). The rest are defined here. Use these accessors
//! instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::path::PathBuf;
use thiserror::Error;

/// `WALKTHROUGH_CHROME` — Chromium executable to launch instead of the one on `PATH`.
pub fn chrome() -> Option<PathBuf> {
    std::env::var(names::WALKTHROUGH_CHROME)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// A numeric variable that is set but does not parse.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{name} must be a whole number (got '{value}')")]
pub struct InvalidVar {
    pub name: &'static str,
    pub value: String,
}

/// `WALKTHROUGH_READY_TIMEOUT_SECS` — Readiness timeout for a launched wallet.
pub fn ready_timeout_secs() -> Result<Option<u64>, InvalidVar> {
    var_u64(names::WALKTHROUGH_READY_TIMEOUT_SECS)
}

/// Unset or empty is `None`; anything else must parse.
fn var_u64(name: &'static str) -> Result<Option<u64>, InvalidVar> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| InvalidVar { name, value }),
        _ => Ok(None),
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
