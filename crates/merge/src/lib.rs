// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Narration merge for walkthrough recordings.
//!
//! A narration track comes with a `.scenes` file that says when each scene
//! starts. Each scene is matched to a screenshot from a recorded episode and
//! the screenshots are played as a slideshow over the audio with `ffmpeg`.

pub mod ffmpeg;
pub mod scenes;
pub mod timeline;

use ffmpeg::{EncodeOptions, FfmpegError};
use scenes::ScenesError;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use timeline::{Timeline, TimelineError};
use walkthrough::catalog::EpisodeCatalog;

/// Narration files live here unless `--narration-dir` says otherwise.
pub const DEFAULT_NARRATION_DIR: &str = "narration";

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("unknown episode {number}. Available: 1-{max}")]
    UnknownEpisode { number: usize, max: usize },

    #[error("provide --episode or all of --audio, --scenes, --screenshots")]
    MissingInputs,

    #[error("{what} not found: {}", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error(transparent)]
    Scenes(#[from] ScenesError),

    #[error(transparent)]
    Timeline(#[from] TimelineError),

    #[error(transparent)]
    Ffmpeg(#[from] FfmpegError),

    #[error("failed to write concat manifest: {0}")]
    Manifest(#[source] std::io::Error),
}

impl MergeError {
    /// `true` when the arguments were wrong and nothing was attempted.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::UnknownEpisode { .. } | Self::MissingInputs)
    }
}

/// Paths a merge reads and writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeInputs {
    pub audio: PathBuf,
    pub scenes: PathBuf,
    pub screenshots: PathBuf,
    pub output: PathBuf,
}

/// Explicit paths, each overriding what `--episode` would derive.
#[derive(Clone, Debug, Default)]
pub struct InputArgs {
    pub episode: Option<usize>,
    pub audio: Option<PathBuf>,
    pub scenes: Option<PathBuf>,
    pub screenshots: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub narration_dir: PathBuf,
    pub screenshot_dir: PathBuf,
}

impl MergeInputs {
    /// Fill in paths from the episode catalog where none were given.
    ///
    /// For episode `n` with narration stem `stem` and slug `slug`:
    /// `<narration>/<stem>.mp3`, `<narration>/<stem>.scenes`,
    /// `<screenshots>/<slug>/`, and `<narration>/<stem>.mp4`.
    pub fn resolve(args: InputArgs, catalog: &EpisodeCatalog) -> Result<Self, MergeError> {
        let InputArgs {
            episode,
            mut audio,
            mut scenes,
            mut screenshots,
            mut output,
            narration_dir,
            screenshot_dir,
        } = args;

        if let Some(number) = episode {
            let episode = catalog.get(number).ok_or(MergeError::UnknownEpisode {
                number,
                max: catalog.len(),
            })?;
            let stem = narration_dir.join(episode.narration);
            audio.get_or_insert_with(|| stem.with_extension("mp3"));
            scenes.get_or_insert_with(|| stem.with_extension("scenes"));
            screenshots.get_or_insert_with(|| screenshot_dir.join(episode.slug));
            output.get_or_insert_with(|| stem.with_extension("mp4"));
        }

        match (audio, scenes, screenshots) {
            (Some(audio), Some(scenes), Some(screenshots)) => Ok(Self {
                audio,
                scenes,
                screenshots,
                output: output.unwrap_or_else(|| PathBuf::from("output.mp4")),
            }),
            _ => Err(MergeError::MissingInputs),
        }
    }

    /// Fail on the first input that does not exist.
    pub fn check(&self) -> Result<(), MergeError> {
        if !self.audio.exists() {
            return Err(not_found("audio", &self.audio));
        }
        if !self.scenes.exists() {
            return Err(not_found("scenes file", &self.scenes));
        }
        if !self.screenshots.is_dir() {
            return Err(not_found("screenshots dir", &self.screenshots));
        }
        Ok(())
    }

    /// The `.srt` next to the scenes file, if there is one.
    pub fn subtitles(&self) -> Option<PathBuf> {
        let srt = self.scenes.with_extension("srt");
        if srt.exists() {
            Some(srt)
        } else {
            tracing::warn!("SRT not found at {}, skipping subtitles", srt.display());
            None
        }
    }
}

fn not_found(what: &'static str, path: &Path) -> MergeError {
    MergeError::NotFound {
        what,
        path: path.to_path_buf(),
    }
}

/// Result of a successful merge.
#[derive(Debug)]
pub struct MergeSummary {
    pub output: PathBuf,
    pub frames: usize,
    pub missing: usize,
    pub bytes: u64,
}

/// Build the slideshow for `inputs` and encode it.
pub async fn merge(inputs: &MergeInputs, options: &EncodeOptions) -> Result<MergeSummary, MergeError> {
    inputs.check()?;
    ffmpeg::ensure_available().await?;

    let scenes = scenes::load(&inputs.scenes)?;
    let audio = ffmpeg::probe_duration(&inputs.audio).await?;
    tracing::info!("Audio duration: {:.1}s", audio.as_secs_f64());
    tracing::info!("Scenes: {}", scenes.len());
    tracing::info!("Screenshots dir: {}", inputs.screenshots.display());

    let timeline = Timeline::build(&scenes, audio, &inputs.screenshots)?;
    for slot in timeline.slots() {
        let shown = match slot.screenshot {
            Some(ref path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            None => "MISSING (holding previous)".to_string(),
        };
        tracing::info!(
            "  {:6.1}s  {:5.1}s  {} → {}",
            slot.start.as_secs_f64(),
            slot.duration.as_secs_f64(),
            slot.scene,
            shown
        );
    }
    let missing = timeline.missing().count();
    tracing::info!("{} scenes matched to screenshots", timeline.frames().len());

    let mut manifest = tempfile::Builder::new()
        .prefix("walkthrough-merge-")
        .suffix(".txt")
        .tempfile()
        .map_err(MergeError::Manifest)?;
    manifest
        .write_all(timeline.concat_manifest().as_bytes())
        .and_then(|()| manifest.flush())
        .map_err(MergeError::Manifest)?;

    tracing::info!("Running ffmpeg...");
    tracing::info!("  Output: {}", inputs.output.display());
    ffmpeg::encode(manifest.path(), &inputs.audio, &inputs.output, options).await?;

    let bytes = std::fs::metadata(&inputs.output).map(|m| m.len()).unwrap_or(0);
    Ok(MergeSummary {
        output: inputs.output.clone(),
        frames: timeline.frames().len(),
        missing,
        bytes,
    })
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
