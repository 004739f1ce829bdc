// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Chapters and the scene they act on.
//!
//! A [`Chapter`] is a tagged step function. Every step receives a [`Scene`]:
//! the page, the run context that numbers and logs captures, the pacer, and
//! the seed if one was supplied. Nothing else is shared between steps.

use crate::config::Seed;
use crate::driver::{self, Action, Locator, Page};
use crate::error::SessionError;
use crate::recorder::RunContext;
use crate::timing::Pacer;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Future returned by a step.
pub type StepFuture<'a> = Pin<Box<dyn Future<Output = Result<(), SessionError>> + Send + 'a>>;

/// Signature of a step.
pub type StepFn = for<'a, 'b> fn(&'a mut Scene<'b>) -> StepFuture<'a>;

/// One chapter of the walkthrough.
#[derive(Clone, Copy)]
pub struct Chapter {
    /// Position in the full walkthrough, from 1
    pub number: u32,
    /// Prefix of every artifact the chapter captures, e.g. `09_qx`
    pub label: &'static str,
    pub title: &'static str,
    pub step: StepFn,
}

impl Chapter {
    pub async fn run(&self, scene: &mut Scene<'_>) -> Result<(), SessionError> {
        tracing::debug!(chapter = self.label, "chapter start");
        (self.step)(scene).await
    }
}

impl fmt::Debug for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chapter")
            .field("number", &self.number)
            .field("label", &self.label)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Everything a step may touch.
pub struct Scene<'a> {
    page: &'a dyn Page,
    run: &'a mut RunContext,
    pacer: &'a Pacer,
    seed: Option<&'a Seed>,
}

impl<'a> Scene<'a> {
    pub fn new(
        page: &'a dyn Page,
        run: &'a mut RunContext,
        pacer: &'a Pacer,
        seed: Option<&'a Seed>,
    ) -> Self {
        Self {
            page,
            run,
            pacer,
            seed,
        }
    }

    pub fn page(&self) -> &'a dyn Page {
        self.page
    }

    pub fn run(&self) -> &RunContext {
        &*self.run
    }

    pub fn pacer(&self) -> &'a Pacer {
        self.pacer
    }

    pub fn seed(&self) -> Option<&'a Seed> {
        self.seed
    }

    /// A funded seed was supplied, so transactions are really sent.
    pub fn is_live(&self) -> bool {
        self.seed.is_some()
    }

    pub async fn capture(&mut self, chapter: &str, artifact: &str) -> Result<String, SessionError> {
        self.run.capture(self.page, chapter, artifact).await
    }

    /// Capture, then hold for `hold_ms` or the scene hold.
    pub async fn capture_and_hold(
        &mut self,
        chapter: &str,
        artifact: &str,
        hold_ms: Option<u64>,
    ) -> Result<String, SessionError> {
        self.run
            .capture_and_hold(
                self.page,
                self.pacer,
                chapter,
                artifact,
                hold_ms.map(Duration::from_millis),
            )
            .await
    }

    pub async fn pace(&self) {
        self.pacer.pace().await;
    }

    pub async fn hold_tab(&self) {
        self.pacer.hold_tab().await;
    }

    pub async fn chapter_break(&self) {
        self.pacer.chapter_gap().await;
    }

    /// Fixed delay that waits on the application rather than the viewer.
    pub async fn sleep_ms(&self, ms: u64) {
        self.pacer.sleep(Duration::from_millis(ms)).await;
    }

    pub async fn visible(&self, locator: &Locator) -> bool {
        driver::probe_visible(self.page, locator).await
    }

    pub async fn enabled(&self, locator: &Locator) -> bool {
        driver::probe_enabled(self.page, locator).await
    }

    /// Bounded wait; a timeout is reported as `false`.
    pub async fn wait_for(&self, locator: &Locator, timeout: Duration) -> bool {
        driver::probe_wait(self.page, locator, timeout).await
    }

    pub async fn count(&self, locator: &Locator) -> usize {
        self.page.count(locator).await.unwrap_or(0)
    }

    /// Text of the element, if it is present.
    pub async fn text_of(&self, locator: &Locator) -> Option<String> {
        self.page.text_content(locator).await.ok().flatten()
    }

    pub async fn click(&self, locator: &Locator) -> Result<(), SessionError> {
        Ok(self.page.click(locator).await?)
    }

    pub async fn fill(&self, locator: &Locator, value: &str) -> Result<(), SessionError> {
        Ok(self.page.fill(locator, value).await?)
    }

    pub async fn check(&self, locator: &Locator) -> Result<(), SessionError> {
        Ok(self.page.check(locator).await?)
    }

    pub async fn evaluate(&self, script: &str) -> Result<(), SessionError> {
        Ok(self.page.evaluate(script).await?)
    }

    pub async fn try_click(&self, locator: &Locator) -> Result<bool, SessionError> {
        Ok(driver::try_act(self.page, locator, Action::Click).await?)
    }

    pub async fn try_fill(&self, locator: &Locator, value: &str) -> Result<bool, SessionError> {
        Ok(driver::try_act(self.page, locator, Action::Fill(value)).await?)
    }

    pub async fn try_scroll(&self, locator: &Locator) -> Result<bool, SessionError> {
        Ok(driver::try_act(self.page, locator, Action::ScrollIntoView).await?)
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
