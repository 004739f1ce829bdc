// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run configuration.
//!
//! Values are merged from the command line (which already folds in the
//! `WALKTHROUGH_*` environment variables), an optional TOML file and the
//! built-in defaults, in that order of precedence. The result is a validated
//! [`RunConfig`] that the orchestrator consumes as-is.

use crate::catalog::{EpisodeCatalog, Selection, SelectionError};
use crate::cli::Cli;
use crate::driver::Viewport;
use crate::env;
use crate::readiness::{ReadinessReader, DEFAULT_READY_PATTERN, DEFAULT_READY_TIMEOUT};
use crate::supervisor::{LaunchSpec, Target};
use crate::timing::TimingPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Required length of a seed.
pub const SEED_LEN: usize = 55;

/// Default output directory
pub const DEFAULT_OUTPUT: &str = "output";

/// Wallet project launched when neither a target nor a URL is given
pub const DEFAULT_TARGET: &str = "Qubic.Net.Wallet";

/// Configuration errors. Nothing has been launched when one is raised.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--seed must be exactly 55 characters (got {len}).")]
    SeedLength { len: usize },

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid ready pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Env(#[from] env::InvalidVar),
}

/// A funded seed. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(String);

impl Seed {
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let len = value.chars().count();
        if len != SEED_LEN {
            return Err(ConfigError::SeedLength { len });
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

/// Contents of a `--config` TOML file.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Running wallet to attach to
    #[serde(default)]
    pub url: Option<String>,

    /// Wallet project or executable to launch
    #[serde(default)]
    pub target: Option<PathBuf>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub timing: TimingFile,

    #[serde(default)]
    pub ready: ReadyFile,

    /// Explicit launch command, replacing the one derived from `target`
    #[serde(default)]
    pub launch: Option<LaunchFile>,

    #[serde(default)]
    pub browser: BrowserFile,
}

/// `[timing]` table, in milliseconds.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TimingFile {
    pub pace_ms: Option<u64>,
    pub hold_ms: Option<u64>,
    pub hold_tab_ms: Option<u64>,
    pub chapter_gap_ms: Option<u64>,
}

/// `[ready]` table.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReadyFile {
    /// Regex whose first group captures the URL
    pub pattern: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// `[launch]` table.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LaunchFile {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

/// `[browser]` table.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BrowserFile {
    pub headless: Option<bool>,
    pub executable: Option<PathBuf>,
    pub video: Option<bool>,
    pub cursor: Option<bool>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Validated settings for one run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub target: Target,
    pub output_dir: PathBuf,
    pub seed: Option<Seed>,
    /// `None` records a single monolith; `Some` runs episodes in isolation
    pub selection: Option<Selection>,
    pub timing: TimingPolicy,
    pub ready_pattern: String,
    pub ready_timeout: Duration,
    pub headless: bool,
    pub video: bool,
    pub cursor: bool,
    pub viewport: Viewport,
    pub browser_executable: Option<PathBuf>,
}

impl RunConfig {
    /// Merge `cli`, `file` and the defaults, validating as it goes.
    pub fn resolve(
        cli: &Cli,
        file: FileConfig,
        catalog: &EpisodeCatalog,
    ) -> Result<Self, ConfigError> {
        let seed = cli.seed.as_deref().map(Seed::new).transpose()?;
        let selection = cli
            .episode
            .as_deref()
            .map(|spec| Selection::parse(spec, catalog.len()))
            .transpose()?;

        let ready_pattern = file
            .ready
            .pattern
            .unwrap_or_else(|| DEFAULT_READY_PATTERN.to_string());
        // Fail on a bad pattern now rather than after the target is spawned
        regex::Regex::new(&ready_pattern)?;
        let ready_timeout = match cli.ready_timeout {
            Some(secs) => Some(secs),
            None => env::ready_timeout_secs()?,
        };
        let ready_timeout = ready_timeout
            .or(file.ready.timeout_secs)
            .map_or(DEFAULT_READY_TIMEOUT, Duration::from_secs);

        let target = match cli.url.clone().or(file.url) {
            Some(url) => Target::Url(url),
            None => match file.launch {
                Some(launch) if cli.target.is_none() => {
                    let mut spec = LaunchSpec::new(launch.program, launch.args);
                    spec.env.extend(launch.env);
                    spec.cwd = launch.cwd;
                    Target::Launch(spec)
                }
                _ => {
                    let path = cli
                        .target
                        .clone()
                        .or(file.target)
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET));
                    Target::Launch(LaunchSpec::for_project(&absolute(&path)))
                }
            },
        };

        let timing = TimingPolicy::from_millis(
            cli.pace
                .or(file.timing.pace_ms)
                .unwrap_or(TimingPolicy::DEFAULT_PACE_MS),
            cli.hold
                .or(file.timing.hold_ms)
                .unwrap_or(TimingPolicy::DEFAULT_HOLD_MS),
            cli.hold_tab
                .or(file.timing.hold_tab_ms)
                .unwrap_or(TimingPolicy::DEFAULT_HOLD_TAB_MS),
            cli.chapter_gap
                .or(file.timing.chapter_gap_ms)
                .unwrap_or(TimingPolicy::DEFAULT_CHAPTER_GAP_MS),
        );

        let default_viewport = Viewport::default();
        let browser = file.browser;
        Ok(Self {
            target,
            output_dir: cli
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            seed,
            selection,
            timing,
            ready_pattern,
            ready_timeout,
            headless: cli.headless || browser.headless.unwrap_or(false),
            video: !cli.no_video && browser.video.unwrap_or(true),
            cursor: !cli.no_cursor && browser.cursor.unwrap_or(true),
            viewport: Viewport {
                width: browser.width.unwrap_or(default_viewport.width),
                height: browser.height.unwrap_or(default_viewport.height),
            },
            browser_executable: env::chrome().or(browser.executable),
        })
    }

    /// Whether a funded seed drives live transactions.
    pub fn is_live(&self) -> bool {
        self.seed.is_some()
    }

    pub fn readiness_reader(&self) -> Result<ReadinessReader, ConfigError> {
        Ok(ReadinessReader::new(&self.ready_pattern, self.ready_timeout)?)
    }
}

/// `path` made absolute against the working directory, when possible.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
