// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Waiting for a launched target to announce its URL.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufRead, Lines};

/// Marker printed by the wallet server once it is listening.
pub const DEFAULT_READY_PATTERN: &str = r"Open in browser:\s*(http\S+)";

static READY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(DEFAULT_READY_PATTERN).expect("ready pattern is invalid")
});

/// How long to wait for the marker before giving up.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from [`ReadinessReader::read`].
#[derive(Debug, Error)]
pub enum ReadinessError {
    #[error("target did not report a URL within {}s", .timeout.as_secs())]
    Timeout { timeout: Duration },

    #[error("target output closed before it reported a URL")]
    Closed,

    #[error("failed to read target output: {0}")]
    Io(#[from] std::io::Error),
}

/// Consumes an output stream line by line until the ready marker appears.
#[derive(Clone, Debug)]
pub struct ReadinessReader {
    pattern: Regex,
    timeout: Duration,
}

impl ReadinessReader {
    /// `pattern` must capture the URL in its first group, or match only the URL.
    pub fn new(pattern: &str, timeout: Duration) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL announced by `line`, if it carries the marker.
    pub fn match_line(&self, line: &str) -> Option<String> {
        let caps = self.pattern.captures(line)?;
        let url = caps.get(1).or_else(|| caps.get(0))?;
        Some(url.as_str().to_string())
    }

    /// Read until the first matching line. Every line read is echoed.
    pub async fn read<R>(&self, lines: &mut Lines<R>) -> Result<String, ReadinessError>
    where
        R: AsyncBufRead + Unpin,
    {
        let scan = async {
            while let Some(line) = lines.next_line().await? {
                tracing::info!("  [wallet] {line}");
                if let Some(url) = self.match_line(&line) {
                    return Ok(url);
                }
            }
            Err(ReadinessError::Closed)
        };
        match tokio::time::timeout(self.timeout, scan).await {
            Ok(result) => result,
            Err(_) => Err(ReadinessError::Timeout {
                timeout: self.timeout,
            }),
        }
    }
}

impl Default for ReadinessReader {
    fn default() -> Self {
        Self {
            pattern: READY_REGEX.clone(),
            timeout: DEFAULT_READY_TIMEOUT,
        }
    }
}

#[cfg(test)]
#[path = "readiness_tests.rs"]
mod tests;
