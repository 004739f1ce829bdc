// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `.scenes` timing files.
//!
//! One scene per line, `HH:MM:SS,mmm  scene_name`. Blank lines and lines
//! starting with `#` are ignored. A scene name is either an artifact name
//! (`overview`) or `chapter/artifact` (`12_msvault/tab_register`).

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenesError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid timestamp '{value}'")]
    Timestamp { line: usize, value: String },
}

/// A scene and the moment it starts in the narration.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub name: String,
    pub start: Duration,
}

impl Scene {
    pub fn new(name: impl Into<String>, start: Duration) -> Self {
        Self {
            name: name.into(),
            start,
        }
    }
}

/// Read and parse a `.scenes` file.
pub fn load(path: &Path) -> Result<Vec<Scene>, ScenesError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScenesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Parse `.scenes` text. Lines without a name are ignored.
pub fn parse(text: &str) -> Result<Vec<Scene>, ScenesError> {
    let mut scenes = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((stamp, name)) = line.split_once(char::is_whitespace) else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let start = parse_timestamp(stamp).ok_or_else(|| ScenesError::Timestamp {
            line: i + 1,
            value: stamp.to_string(),
        })?;
        scenes.push(Scene::new(name, start));
    }
    Ok(scenes)
}

/// Parse an SRT-style `HH:MM:SS,mmm` timestamp. A `.` separator is accepted too.
pub fn parse_timestamp(stamp: &str) -> Option<Duration> {
    let mut parts = stamp.trim().split(':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.replace(',', ".").parse().ok()?;
    if parts.next().is_some() || !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let whole = hours.checked_mul(3600)?.checked_add(minutes.checked_mul(60)?)?;
    Duration::from_secs(whole).checked_add(Duration::try_from_secs_f64(seconds).ok()?)
}

#[cfg(test)]
#[path = "scenes_tests.rs"]
mod tests;
