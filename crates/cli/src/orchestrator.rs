// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level run: target, browser, then monolith or episode mode.
//!
//! The target is acquired before anything else and torn down on every exit
//! path once acquired. Without an episode selection every chapter runs in one
//! session into the output directory (monolith mode). With a selection each
//! episode runs in its own session under `<output>/<slug>/`; a failing episode
//! is reported and the next one still runs.

use crate::catalog::{Episode, EpisodeCatalog};
use crate::config::{absolute, ConfigError, RunConfig};
use crate::driver::{Browser, Driver, LaunchOptions};
use crate::error::RunError;
use crate::output_diagnostic::print_episode_failure;
use crate::runner::{EpisodeRunner, EpisodeSummary, RunEnv, RunnerError, VIDEO_DIR};
use crate::supervisor::ProcessSupervisor;
use crate::time::ClockHandle;
use crate::timing::Pacer;
use std::path::PathBuf;
use std::time::Duration;

/// Per-action delay for headed runs, so the recording is easy to follow.
const HEADED_SLOW_MO: Duration = Duration::from_millis(50);

/// How the run was recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Monolith,
    /// Selected episode numbers, in run order
    Episodes(Vec<usize>),
}

/// An episode that failed while the run continued.
#[derive(Debug)]
pub struct EpisodeFailure {
    pub number: usize,
    pub name: &'static str,
    pub error: RunnerError,
}

/// Outcome of a run in which every episode was attempted.
#[derive(Debug)]
pub struct RunReport {
    pub mode: Mode,
    /// Absolute output directory
    pub output_dir: PathBuf,
    pub completed: Vec<EpisodeSummary>,
    pub failed: Vec<EpisodeFailure>,
}

impl RunReport {
    pub fn artifacts(&self) -> usize {
        self.completed.iter().map(|s| s.artifacts).sum()
    }

    /// `Ok` when nothing failed.
    pub fn into_result(self) -> Result<Self, RunError> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(RunError::EpisodesFailed {
                failed: self.failed.len(),
                total: self.failed.len() + self.completed.len(),
            })
        }
    }
}

pub struct Orchestrator<'a> {
    config: &'a RunConfig,
    catalog: &'a EpisodeCatalog,
    driver: &'a dyn Driver,
    supervisor: ProcessSupervisor,
    clock: ClockHandle,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        config: &'a RunConfig,
        catalog: &'a EpisodeCatalog,
        driver: &'a dyn Driver,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            config,
            catalog,
            driver,
            supervisor: ProcessSupervisor::new(config.readiness_reader()?),
            clock: ClockHandle::system(),
        })
    }

    /// Use `clock` for pacing and elapsed times
    pub fn with_clock(mut self, clock: ClockHandle) -> Self {
        self.clock = clock;
        self
    }

    /// Run to completion. The target is always released before returning.
    pub async fn run(&self) -> Result<RunReport, RunError> {
        let episodes = match &self.config.selection {
            Some(selection) => Some(self.catalog.select(selection)),
            None => None,
        };

        let mut target = self.supervisor.launch(&self.config.target).await?;
        let result = self.record(target.url(), episodes.as_deref()).await;
        target.teardown().await;
        result
    }

    async fn record(
        &self,
        entry_url: &str,
        episodes: Option<&[&Episode]>,
    ) -> Result<RunReport, RunError> {
        self.print_banner(episodes);

        let browser = self
            .driver
            .launch(&LaunchOptions {
                headless: self.config.headless,
                executable: self.config.browser_executable.clone(),
                slow_mo: if self.config.headless {
                    Duration::ZERO
                } else {
                    HEADED_SLOW_MO
                },
            })
            .await?;

        let env = RunEnv {
            entry_url: entry_url.to_string(),
            pacer: Pacer::new(self.config.timing, self.clock.clone()),
            seed: self.config.seed.clone(),
            video: self.config.video,
            cursor: self.config.cursor,
            viewport: self.config.viewport,
        };
        let output_dir = absolute(&self.config.output_dir);

        let report = match episodes {
            None => self.monolith(browser.as_ref(), &env, output_dir).await,
            Some(episodes) => Ok(self.episodes(browser.as_ref(), &env, output_dir, episodes).await),
        };

        if let Err(e) = browser.close().await {
            tracing::warn!(error = %e, "failed to close browser");
        }
        report?.into_result()
    }

    async fn monolith(
        &self,
        browser: &dyn Browser,
        env: &RunEnv,
        output_dir: PathBuf,
    ) -> Result<RunReport, RunError> {
        let runner = EpisodeRunner::new(browser, env, self.clock.clone());
        let summary = runner
            .run_monolith(self.catalog.chapters(), &output_dir)
            .await?;

        tracing::info!("");
        tracing::info!(
            "Done! {} screenshots saved to {}/",
            summary.artifacts,
            output_dir.display()
        );
        tracing::info!("Timing log: {}", summary.chapters_log.display());
        if self.config.video {
            tracing::info!("Video saved to {}/", output_dir.join(VIDEO_DIR).display());
        }

        Ok(RunReport {
            mode: Mode::Monolith,
            output_dir,
            completed: vec![summary],
            failed: Vec::new(),
        })
    }

    async fn episodes(
        &self,
        browser: &dyn Browser,
        env: &RunEnv,
        output_dir: PathBuf,
        episodes: &[&Episode],
    ) -> RunReport {
        let runner = EpisodeRunner::new(browser, env, self.clock.clone());
        let mut completed = Vec::new();
        let mut failed = Vec::new();

        for episode in episodes {
            tracing::info!("");
            tracing::info!("═══ Episode {}: {} ═══", episode.number, episode.name);
            match runner.run_episode(episode, &output_dir).await {
                Ok(summary) => {
                    tracing::info!(
                        "  Episode {} done — {} screenshots in {}/",
                        episode.number,
                        summary.artifacts,
                        summary.output_dir.display()
                    );
                    completed.push(summary);
                }
                Err(error) => {
                    print_episode_failure(episode.number, episode.name, &error);
                    failed.push(EpisodeFailure {
                        number: episode.number,
                        name: episode.name,
                        error,
                    });
                }
            }
        }

        tracing::info!("");
        tracing::info!("All done! Output saved to {}/", output_dir.display());

        RunReport {
            mode: Mode::Episodes(episodes.iter().map(|e| e.number).collect()),
            output_dir,
            completed,
            failed,
        }
    }

    fn print_banner(&self, episodes: Option<&[&Episode]>) {
        tracing::info!(
            "Mode: {}",
            if self.config.is_live() {
                "LIVE (funded seed)"
            } else {
                "DEMO (generated seed)"
            }
        );
        tracing::info!("Timing: {}", self.config.timing);
        tracing::info!("{}", recording_line(episodes));
    }
}

/// The `Recording:` banner line.
pub fn recording_line(episodes: Option<&[&Episode]>) -> String {
    match episodes {
        None => "Recording: single monolith video (all chapters)".to_string(),
        Some(episodes) => format!(
            "Recording: {} episode(s) — {}",
            episodes.len(),
            episodes
                .iter()
                .map(|e| format!("Ep{}", e.number))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
