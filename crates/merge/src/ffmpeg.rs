// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `ffmpeg` and `ffprobe` invocations.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Longest tail of ffmpeg's stderr kept in an error.
const STDERR_TAIL: usize = 2000;

const SUBTITLE_STYLE: &str = "FontSize=22,PrimaryColour=&HFFFFFF&,OutlineColour=&H000000&,Outline=2,Shadow=1,MarginV=40";

#[derive(Debug, Error)]
pub enum FfmpegError {
    #[error("{tool} not found on PATH (install ffmpeg)")]
    NotFound { tool: &'static str },

    #[error("failed to run {tool}: {source}")]
    Io {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read audio duration of {}: '{output}'", .path.display())]
    Duration { path: PathBuf, output: String },

    #[error("ffmpeg failed ({status}):\n{stderr}")]
    Failed { status: String, stderr: String },
}

impl FfmpegError {
    fn spawn(tool: &'static str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { tool }
        } else {
            Self::Io { tool, source }
        }
    }
}

/// Output frame size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid resolution '{s}', expected WIDTHxHEIGHT");
        let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

/// How the slideshow is encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    pub resolution: Resolution,
    pub fps: u32,
    /// SRT file burned into the picture
    pub subtitles: Option<PathBuf>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            fps: 1,
            subtitles: None,
        }
    }
}

/// The `-vf` chain: letterbox into the resolution, then optional subtitles.
pub fn video_filter(options: &EncodeOptions) -> String {
    let Resolution { width, height } = options.resolution;
    let mut filter = format!(
        "scale={width}:{height}:force_original_aspect_ratio=decrease,\
         pad={width}:{height}:(ow-iw)/2:(oh-ih)/2:color=black,"
    );
    if let Some(ref srt) = options.subtitles {
        filter.push_str(&format!(
            "subtitles='{}':force_style='{SUBTITLE_STYLE}',",
            escape_filter_path(srt)
        ));
    }
    filter.push_str("format=yuv420p");
    filter
}

/// Paths inside a filter graph use `/` and escape `:`.
fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .replace(':', "\\:")
}

/// Arguments for encoding `manifest` over `audio` into `output`.
pub fn encode_args(manifest: &Path, audio: &Path, output: &Path, options: &EncodeOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-f", "concat", "-safe", "0", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(manifest.into());
    args.push("-i".into());
    args.push(audio.into());
    args.push("-vf".into());
    args.push(video_filter(options).into());
    args.push("-r".into());
    args.push(options.fps.to_string().into());
    for arg in [
        "-c:v", "libx264", "-preset", "medium", "-crf", "23", "-c:a", "aac", "-b:a", "192k",
        "-shortest", "-movflags", "+faststart",
    ] {
        args.push(arg.into());
    }
    args.push(output.into());
    args
}

/// Fail unless `ffmpeg` can be run.
pub async fn ensure_available() -> Result<(), FfmpegError> {
    Command::new("ffmpeg")
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| FfmpegError::spawn("ffmpeg", e))?;
    Ok(())
}

/// Length of `audio` as reported by `ffprobe`.
pub async fn probe_duration(audio: &Path) -> Result<Duration, FfmpegError> {
    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-show_entries", "format=duration"])
        .args(["-of", "default=noprint_wrappers=1:nokey=1"])
        .arg(audio)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| FfmpegError::spawn("ffprobe", e))?;
    let text = String::from_utf8_lossy(&output.stdout);
    parse_duration(&text).ok_or_else(|| FfmpegError::Duration {
        path: audio.to_path_buf(),
        output: text.trim().to_string(),
    })
}

/// Parse ffprobe's bare `format=duration` output, in seconds.
pub fn parse_duration(output: &str) -> Option<Duration> {
    let secs: f64 = output.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}

/// Run the encode. ffmpeg's stderr is only surfaced on failure.
pub async fn encode(manifest: &Path, audio: &Path, output: &Path, options: &EncodeOptions) -> Result<(), FfmpegError> {
    let args = encode_args(manifest, audio, output, options);
    tracing::debug!(?args, "ffmpeg");
    let result = Command::new("ffmpeg")
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| FfmpegError::spawn("ffmpeg", e))?;
    if result.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&result.stderr);
    Err(FfmpegError::Failed {
        status: result.status.to_string(),
        stderr: tail(&stderr, STDERR_TAIL).to_string(),
    })
}

/// Last `max` bytes of `text`, on a char boundary.
fn tail(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut start = text.len() - max;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

#[cfg(test)]
#[path = "ffmpeg_tests.rs"]
mod tests;
