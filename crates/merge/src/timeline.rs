// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scene-to-screenshot matching and the ffmpeg concat manifest.

use crate::scenes::Scene;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Shortest time a scene stays on screen.
pub const MIN_SCENE: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("no scenes to merge")]
    NoScenes,

    #[error("no screenshots in {} matched any scene", .dir.display())]
    NoMatches { dir: PathBuf },
}

/// One scene placed on the timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub scene: String,
    pub start: Duration,
    pub duration: Duration,
    /// `None` when no screenshot matched
    pub screenshot: Option<PathBuf>,
}

/// A shown screenshot and how long it stays up.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub screenshot: PathBuf,
    pub duration: Duration,
}

#[derive(Clone, Debug)]
pub struct Timeline {
    slots: Vec<Slot>,
    frames: Vec<Frame>,
}

impl Timeline {
    /// Place `scenes` against the screenshots in `dir`.
    ///
    /// A scene lasts until the next one starts; the last lasts until the end
    /// of the audio. Scenes without a screenshot extend the frame before them,
    /// or the first frame when nothing precedes them.
    pub fn build(scenes: &[Scene], audio: Duration, dir: &Path) -> Result<Self, TimelineError> {
        if scenes.is_empty() {
            return Err(TimelineError::NoScenes);
        }

        let slots: Vec<Slot> = scenes
            .iter()
            .enumerate()
            .map(|(i, scene)| {
                let end = scenes.get(i + 1).map_or(audio, |next| next.start);
                Slot {
                    scene: scene.name.clone(),
                    start: scene.start,
                    duration: end.saturating_sub(scene.start).max(MIN_SCENE),
                    screenshot: find_screenshot(dir, &scene.name),
                }
            })
            .collect();

        let mut frames: Vec<Frame> = Vec::new();
        let mut leading = Duration::ZERO;
        for slot in &slots {
            match &slot.screenshot {
                Some(path) => frames.push(Frame {
                    screenshot: path.clone(),
                    duration: slot.duration + std::mem::take(&mut leading),
                }),
                None => match frames.last_mut() {
                    Some(previous) => previous.duration += slot.duration,
                    None => leading += slot.duration,
                },
            }
        }
        if frames.is_empty() {
            return Err(TimelineError::NoMatches {
                dir: dir.to_path_buf(),
            });
        }

        Ok(Self { slots, frames })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn missing(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| s.screenshot.is_none())
    }

    /// Total time covered by the frames
    pub fn duration(&self) -> Duration {
        self.frames.iter().map(|f| f.duration).sum()
    }

    /// ffmpeg concat demuxer input. The last file is listed twice so its
    /// duration is honored.
    pub fn concat_manifest(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let _ = writeln!(out, "file '{}'", quote(&frame.screenshot));
            let _ = writeln!(out, "duration {:.3}", frame.duration.as_secs_f64());
        }
        if let Some(last) = self.frames.last() {
            let _ = writeln!(out, "file '{}'", quote(&last.screenshot));
        }
        out
    }
}

/// First screenshot in `dir`, by name, for `scene`.
///
/// `name` matches `*_name.png`; `chapter/name` matches `*_chapter_name.png`.
pub fn find_screenshot(dir: &Path, scene: &str) -> Option<PathBuf> {
    let file_glob = match scene.rsplit_once('/') {
        Some((chapter, name)) => format!("*_{chapter}_{name}.png"),
        None => format!("*_{scene}.png"),
    };
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        file_glob
    );
    let mut matches: Vec<PathBuf> = glob::glob(&pattern).ok()?.filter_map(Result::ok).collect();
    matches.sort();
    matches.into_iter().next()
}

/// Escape single quotes for a concat `file` directive.
fn quote(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;
