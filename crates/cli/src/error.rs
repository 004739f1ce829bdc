// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run-level errors and process exit codes.

use crate::config::ConfigError;
use crate::driver::DriverError;
use crate::runner::RunnerError;
use crate::supervisor::LaunchError;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
pub mod exit_codes {
    /// Every requested episode completed
    pub const SUCCESS: i32 = 0;
    /// Target, browser, or session failure
    pub const ERROR: i32 = 1;
    /// Invalid configuration; nothing was run
    pub const USAGE: i32 = 2;
}

/// Failure inside one isolated session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}

/// Fatal error for a whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("browser: {0}")]
    Browser(#[from] DriverError),

    #[error(transparent)]
    Session(#[from] RunnerError),

    #[error("{failed} of {total} episode(s) failed")]
    EpisodesFailed { failed: usize, total: usize },
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => exit_codes::USAGE,
            _ => exit_codes::ERROR,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
