// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session video recorded as sampled frames.
//!
//! Frames are sampled while the session is open and each one is stamped with
//! the moment it was taken. A slow capture skips ticks, so on close every frame
//! is held on screen until the next one was taken and the video keeps real
//! time. Encoding into `session.mp4` needs `ffmpeg` on the path; otherwise the
//! numbered JPEG frames and their timing manifest are kept.

use super::DriverError;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Frames sampled per second, and the output frame rate.
pub const FRAME_RATE: u32 = 5;

/// ffmpeg concat manifest listing each frame and how long it is shown.
const MANIFEST_FILE: &str = "frames.txt";

/// Name of the encoded video inside the video directory.
pub const VIDEO_FILE: &str = "session.mp4";

pub(crate) struct VideoSink {
    dir: PathBuf,
    started: Instant,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Vec<Duration>>,
}

impl VideoSink {
    pub(crate) fn start(page: chromiumoxide::Page, dir: PathBuf) -> Result<Self, DriverError> {
        std::fs::create_dir_all(&dir)?;
        let (stop, mut stopped) = oneshot::channel();
        let frames_dir = dir.clone();
        let started = Instant::now();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(1000 / u64::from(FRAME_RATE)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // Offset of each written frame from the start of the session
            let mut taken = Vec::new();
            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        let params = ScreenshotParams::builder()
                            .format(CaptureScreenshotFormat::Jpeg)
                            .build();
                        let at = started.elapsed();
                        match page.screenshot(params).await {
                            Ok(bytes) => {
                                let path = frames_dir.join(frame_name(taken.len()));
                                if let Err(e) = tokio::fs::write(&path, bytes).await {
                                    tracing::warn!(error = %e, "failed to write video frame");
                                    break;
                                }
                                taken.push(at);
                            }
                            Err(e) => tracing::debug!(error = %e, "frame capture skipped"),
                        }
                    }
                }
            }
            taken
        });

        Ok(Self {
            dir,
            started,
            stop,
            task,
        })
    }

    /// Stop sampling and encode. Returns the video file if one was written.
    pub(crate) async fn finish(self) -> Result<Option<PathBuf>, DriverError> {
        let _ = self.stop.send(());
        let ended = self.started.elapsed();
        let taken = self
            .task
            .await
            .map_err(|e| DriverError::Protocol(format!("video sampler failed: {e}")))?;
        if taken.is_empty() {
            return Ok(None);
        }
        let manifest = concat_manifest(&frame_durations(&taken, ended));
        tokio::fs::write(self.dir.join(MANIFEST_FILE), manifest).await?;
        encode(&self.dir, taken.len()).await
    }
}

fn frame_name(index: usize) -> String {
    format!("frame_{index:06}.jpg")
}

/// How long each frame stays on screen, given when each was taken and when
/// recording stopped. The first frame also covers the lead-in before it, so
/// the durations sum to `ended`.
pub(crate) fn frame_durations(taken: &[Duration], ended: Duration) -> Vec<Duration> {
    let mut durations = Vec::with_capacity(taken.len());
    for (index, at) in taken.iter().enumerate() {
        let from = if index == 0 { Duration::ZERO } else { *at };
        let until = taken.get(index + 1).copied().unwrap_or(ended).max(from);
        durations.push(until - from);
    }
    durations
}

/// ffmpeg concat demuxer input for the numbered frames. The last frame is
/// listed twice so its duration is honored.
pub(crate) fn concat_manifest(durations: &[Duration]) -> String {
    let mut out = String::new();
    for (index, duration) in durations.iter().enumerate() {
        let _ = writeln!(out, "file '{}'", frame_name(index));
        let _ = writeln!(out, "duration {:.3}", duration.as_secs_f64());
    }
    if !durations.is_empty() {
        let _ = writeln!(out, "file '{}'", frame_name(durations.len() - 1));
    }
    out
}

async fn encode(dir: &Path, frames: usize) -> Result<Option<PathBuf>, DriverError> {
    let output = dir.join(VIDEO_FILE);
    let manifest = dir.join(MANIFEST_FILE);
    let status = tokio::process::Command::new("ffmpeg")
        .args(["-y", "-loglevel", "error", "-f", "concat", "-safe", "0", "-i"])
        .arg(&manifest)
        .arg("-vf")
        .arg(format!("fps={FRAME_RATE}"))
        .args(["-c:v", "libx264", "-pix_fmt", "yuv420p"])
        .arg(&output)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(status) if status.success() => {
            for index in 0..frames {
                let _ = tokio::fs::remove_file(dir.join(frame_name(index))).await;
            }
            let _ = tokio::fs::remove_file(&manifest).await;
            Ok(Some(output))
        }
        Ok(status) => {
            tracing::warn!(%status, dir = %dir.display(), "ffmpeg failed; keeping frames");
            Ok(None)
        }
        Err(e) => {
            tracing::warn!(error = %e, dir = %dir.display(), "ffmpeg unavailable; keeping frames");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "video_tests.rs"]
mod tests;
