// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runs chapters inside one isolated session.
//!
//! Every run moves through `Init → Setup → Chapters → Teardown → Done`.
//! Init opens a fresh browser context and a fresh [`RunContext`], so no
//! index, clock, log or DOM state crosses from one run into the next.
//! Teardown always runs once the session exists: the context is closed
//! (finalizing its video) and `chapters.log` is written even when a chapter
//! failed.

use crate::catalog::Episode;
use crate::chapters::setup;
use crate::config::Seed;
use crate::driver::{Browser, Page, SessionOptions, Viewport};
use crate::error::SessionError;
use crate::recorder::RunContext;
use crate::step::{Chapter, Scene};
use crate::time::ClockHandle;
use crate::timing::Pacer;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-run video directory.
pub const VIDEO_DIR: &str = "video";

/// Lifecycle phase of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Init,
    Setup,
    Chapters,
    Teardown,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Init => "init",
            Self::Setup => "setup",
            Self::Chapters => "chapters",
            Self::Teardown => "teardown",
            Self::Done => "done",
        })
    }
}

/// A session failure, tagged with the phase it happened in.
#[derive(Debug, Error)]
#[error("{phase} failed: {source}")]
pub struct RunnerError {
    pub phase: Phase,
    #[source]
    pub source: SessionError,
}

impl RunnerError {
    fn at(phase: Phase) -> impl FnOnce(SessionError) -> Self {
        move |source| Self { phase, source }
    }
}

/// Settings every run in a process shares.
#[derive(Clone, Debug)]
pub struct RunEnv {
    /// URL each fresh session opens first
    pub entry_url: String,
    pub pacer: Pacer,
    pub seed: Option<Seed>,
    pub video: bool,
    /// Inject the click-ripple overlay after navigation
    pub cursor: bool,
    pub viewport: Viewport,
}

/// What one completed run left on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpisodeSummary {
    pub output_dir: PathBuf,
    pub artifacts: usize,
    pub chapters_log: PathBuf,
    pub video: Option<PathBuf>,
}

/// Executes episodes, or the whole walkthrough, against one browser.
pub struct EpisodeRunner<'a> {
    browser: &'a dyn Browser,
    env: &'a RunEnv,
    clock: ClockHandle,
}

impl<'a> EpisodeRunner<'a> {
    pub fn new(browser: &'a dyn Browser, env: &'a RunEnv, clock: ClockHandle) -> Self {
        Self {
            browser,
            env,
            clock,
        }
    }

    /// Run one episode into `base_dir/<slug>`, applying its preconditions first.
    pub async fn run_episode(
        &self,
        episode: &Episode,
        base_dir: &Path,
    ) -> Result<EpisodeSummary, RunnerError> {
        let output_dir = base_dir.join(episode.slug);
        self.run(output_dir, Some(episode), &episode.chapters).await
    }

    /// Run `chapters` back to back in a single session with no setup.
    pub async fn run_monolith(
        &self,
        chapters: &[Chapter],
        output_dir: &Path,
    ) -> Result<EpisodeSummary, RunnerError> {
        self.run(output_dir.to_path_buf(), None, chapters).await
    }

    async fn run(
        &self,
        output_dir: PathBuf,
        episode: Option<&Episode>,
        chapters: &[Chapter],
    ) -> Result<EpisodeSummary, RunnerError> {
        tracing::debug!(phase = %Phase::Init, dir = %output_dir.display(), "opening session");
        let options = SessionOptions {
            viewport: self.env.viewport,
            dark_mode: true,
            video_dir: self.env.video.then(|| output_dir.join(VIDEO_DIR)),
        };
        let session = self
            .browser
            .new_session(&options)
            .await
            .map_err(|e| RunnerError::at(Phase::Init)(e.into()))?;

        let mut ctx = match RunContext::create(&output_dir, self.clock.clone()) {
            Ok(ctx) => ctx,
            Err(e) => {
                if let Err(close) = session.close().await {
                    tracing::warn!(error = %close, "failed to close session");
                }
                return Err(RunnerError::at(Phase::Init)(e));
            }
        };

        let outcome = self.drive(session.page(), &mut ctx, episode, chapters).await;

        tracing::debug!(phase = %Phase::Teardown, "closing session");
        let closed = session.close().await;
        let flushed = ctx.flush();

        if let Err(e) = outcome {
            if let Err(close) = closed {
                tracing::warn!(error = %close, "failed to close session");
            }
            if let Err(flush) = flushed {
                tracing::warn!(error = %flush, "failed to write chapters log");
            }
            return Err(e);
        }

        let video = closed.map_err(|e| RunnerError::at(Phase::Teardown)(e.into()))?;
        let chapters_log = flushed.map_err(RunnerError::at(Phase::Teardown))?;
        tracing::debug!(phase = %Phase::Done, artifacts = ctx.log().len(), "session finished");

        Ok(EpisodeSummary {
            output_dir,
            artifacts: ctx.log().len(),
            chapters_log,
            video,
        })
    }

    async fn drive(
        &self,
        page: &dyn Page,
        ctx: &mut RunContext,
        episode: Option<&Episode>,
        chapters: &[Chapter],
    ) -> Result<(), RunnerError> {
        let mut scene = Scene::new(page, ctx, &self.env.pacer, self.env.seed.as_ref());

        setup::open_entry(&scene, &self.env.entry_url, self.env.cursor)
            .await
            .map_err(RunnerError::at(Phase::Init))?;

        if let Some(episode) = episode {
            tracing::debug!(phase = %Phase::Setup, episode = episode.number, "preparing session");
            prepare(&scene, episode)
                .await
                .map_err(RunnerError::at(Phase::Setup))?;
        }

        tracing::debug!(phase = %Phase::Chapters, count = chapters.len(), "running chapters");
        for chapter in chapters {
            tracing::info!("  Chapter {}: {}", chapter.number, chapter.title);
            chapter
                .run(&mut scene)
                .await
                .map_err(RunnerError::at(Phase::Chapters))?;
        }
        Ok(())
    }
}

/// Bring a fresh session to the state the episode's first chapter expects.
async fn prepare(scene: &Scene<'_>, episode: &Episode) -> Result<(), SessionError> {
    if episode.needs_seed {
        setup::activate_seed(scene).await?;
    }
    if episode.needs_connect && !setup::connect_to_network(scene).await? {
        tracing::info!("  Connect not offered, continuing");
    }
    if let Some(start) = &episode.start_at {
        setup::open_start_page(scene, start).await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
