// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Browser driver abstraction.
//!
//! The walkthrough only talks to a browser through these traits:
//! a [`Driver`] launches a [`Browser`], a browser opens isolated
//! [`Session`]s, and each session exposes one [`Page`].

pub mod chromium;
pub mod fake;
mod locator;
mod video;

pub use locator::{Locator, Pick};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a driver.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("no element matches {0}")]
    NotFound(String),

    #[error("timed out after {}ms waiting for {what}", .timeout.as_millis())]
    Timeout { what: String, timeout: Duration },

    #[error("browser protocol error: {0}")]
    Protocol(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Options for launching the browser engine.
#[derive(Clone, Debug, Default)]
pub struct LaunchOptions {
    pub headless: bool,
    pub executable: Option<PathBuf>,
    /// Delay inserted before every page action
    pub slow_mo: Duration,
}

/// Options for one isolated session.
#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
    pub viewport: Viewport,
    pub dark_mode: bool,
    /// Directory that receives the session's video, if recording
    pub video_dir: Option<PathBuf>,
}

/// Launches browser engines.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn Browser>, DriverError>;
}

/// A running browser engine.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Open a fresh isolated context with a single page.
    async fn new_session(&self, options: &SessionOptions)
        -> Result<Box<dyn Session>, DriverError>;

    async fn close(self: Box<Self>) -> Result<(), DriverError>;
}

/// An isolated browsing context.
#[async_trait]
pub trait Session: Send + Sync {
    fn page(&self) -> &dyn Page;

    /// Close the context and finalize its video.
    ///
    /// Returns the video file when one was produced.
    async fn close(self: Box<Self>) -> Result<Option<PathBuf>, DriverError>;
}

/// The page of a session.
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigate and wait for the page to load
    async fn goto(&self, url: &str) -> Result<(), DriverError>;

    /// Wait until the current URL matches a glob pattern
    async fn wait_for_url(&self, pattern: &str, timeout: Duration) -> Result<(), DriverError>;

    /// Wait until a script expression evaluates truthy
    async fn wait_for_condition(&self, script: &str, timeout: Duration)
        -> Result<(), DriverError>;

    /// Wait until the located element is visible
    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError>;

    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError>;

    async fn is_enabled(&self, locator: &Locator) -> Result<bool, DriverError>;

    /// Number of elements matching the locator, ignoring its pick
    async fn count(&self, locator: &Locator) -> Result<usize, DriverError>;

    async fn click(&self, locator: &Locator) -> Result<(), DriverError>;

    /// Replace the value of an input
    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), DriverError>;

    /// Tick a checkbox
    async fn check(&self, locator: &Locator) -> Result<(), DriverError>;

    async fn scroll_into_view(&self, locator: &Locator) -> Result<(), DriverError>;

    /// Trimmed text of the located element
    async fn text_content(&self, locator: &Locator) -> Result<Option<String>, DriverError>;

    /// Run a script for its side effects
    async fn evaluate(&self, script: &str) -> Result<(), DriverError>;

    /// Write a viewport PNG to `path`
    async fn screenshot(&self, path: &Path) -> Result<(), DriverError>;
}

/// An action applied by [`try_act`].
#[derive(Clone, Copy, Debug)]
pub enum Action<'v> {
    Click,
    Fill(&'v str),
    ScrollIntoView,
}

/// Apply `action` to `locator` only if the element is visible.
///
/// Returns whether the action ran. A failing visibility probe counts as
/// absence; an error from the action itself is returned.
pub async fn try_act(
    page: &dyn Page,
    locator: &Locator,
    action: Action<'_>,
) -> Result<bool, DriverError> {
    if !probe_visible(page, locator).await {
        tracing::debug!(%locator, "not visible, skipping");
        return Ok(false);
    }
    match action {
        Action::Click => page.click(locator).await?,
        Action::Fill(value) => page.fill(locator, value).await?,
        Action::ScrollIntoView => page.scroll_into_view(locator).await?,
    }
    Ok(true)
}

/// Visibility probe that treats errors as "not visible".
pub async fn probe_visible(page: &dyn Page, locator: &Locator) -> bool {
    match page.is_visible(locator).await {
        Ok(visible) => visible,
        Err(e) => {
            tracing::debug!(%locator, error = %e, "visibility probe failed");
            false
        }
    }
}

/// Enabled probe that treats errors as "not enabled".
pub async fn probe_enabled(page: &dyn Page, locator: &Locator) -> bool {
    page.is_enabled(locator).await.unwrap_or(false)
}

/// Bounded wait for an element; a timeout is reported as `false`.
pub async fn probe_wait(page: &dyn Page, locator: &Locator, timeout: Duration) -> bool {
    match page.wait_for(locator, timeout).await {
        Ok(()) => true,
        Err(e) => {
            tracing::info!(%locator, error = %e, "continuing without element");
            false
        }
    }
}

/// Combine the outcome of a teardown step with the cleanup that followed it.
///
/// Cleanup has already run by the time this is called; the step's own error
/// wins, then the first cleanup error.
pub(crate) fn settle<T>(
    outcome: Result<T, DriverError>,
    cleanup: impl IntoIterator<Item = Result<(), DriverError>>,
) -> Result<T, DriverError> {
    let value = outcome?;
    for result in cleanup {
        result?;
    }
    Ok(value)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
