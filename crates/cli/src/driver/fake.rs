// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory driver for tests.
//!
//! Records every call and models the one piece of application state the
//! walkthrough depends on: whether a seed is active. The seed prompt and the
//! seed generation controls are shown until an `Unlock` or `Use This Seed`
//! button is clicked. That state is shared by every session.

use super::{
    Browser, Driver, DriverError, LaunchOptions, Locator, Page, Session, SessionOptions,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Text of the top-bar seed prompt.
pub const SEED_PROMPT: &str = "Enter 55-char seed";

/// Elements that exist only while no seed is active.
const SEED_SETUP: &[&str] = &[SEED_PROMPT, "Generate New Seed", "Use This Seed", "seedSavedCheck"];

/// Text returned by [`Page::text_content`].
pub const FAKE_TEXT: &str = "FAKEIDENTITYAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Elements reported by [`Page::count`] for a visible locator.
pub const FAKE_COUNT: usize = 2;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// A recorded driver call. Sessions are numbered from zero in opening order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverCall {
    Launch { headless: bool },
    OpenSession { session: usize, video_dir: Option<PathBuf> },
    Goto { session: usize, url: String },
    Click { session: usize, locator: String },
    Fill { session: usize, locator: String, value: String },
    Check { session: usize, locator: String },
    ScrollIntoView { session: usize, locator: String },
    Evaluate { session: usize },
    Screenshot { session: usize, path: PathBuf },
    CloseSession { session: usize },
    CloseBrowser,
}

impl DriverCall {
    pub fn session(&self) -> Option<usize> {
        match self {
            Self::Launch { .. } | Self::CloseBrowser => None,
            Self::OpenSession { session, .. }
            | Self::Goto { session, .. }
            | Self::Click { session, .. }
            | Self::Fill { session, .. }
            | Self::Check { session, .. }
            | Self::ScrollIntoView { session, .. }
            | Self::Evaluate { session }
            | Self::Screenshot { session, .. }
            | Self::CloseSession { session } => Some(*session),
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    calls: Vec<DriverCall>,
    sessions: usize,
    seed_active: bool,
    hidden: Vec<String>,
    failing_navigation: HashSet<usize>,
    fail_launch: bool,
}

impl FakeState {
    fn visible(&self, locator: &Locator) -> bool {
        if self.hidden.iter().any(|h| locator.mentions(h)) {
            return false;
        }
        if SEED_SETUP.iter().any(|s| locator.mentions(s)) {
            return !self.seed_active;
        }
        true
    }
}

/// Recording driver. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct FakeDriver {
    state: Arc<Mutex<FakeState>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every locator mentioning `needle` as absent
    pub fn hide(self, needle: impl Into<String>) -> Self {
        self.state.lock().hidden.push(needle.into());
        self
    }

    /// Make navigation fail in the given session
    pub fn fail_navigation_in_session(self, session: usize) -> Self {
        self.state.lock().failing_navigation.insert(session);
        self
    }

    /// Start with a seed already active
    pub fn with_seed_active(self) -> Self {
        self.state.lock().seed_active = true;
        self
    }

    /// Make [`Driver::launch`] fail
    pub fn failing_launch(self) -> Self {
        self.state.lock().fail_launch = true;
        self
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.state.lock().calls.clone()
    }

    pub fn calls_in_session(&self, session: usize) -> Vec<DriverCall> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| c.session() == Some(session))
            .cloned()
            .collect()
    }

    /// Screenshot paths in the order they were taken
    pub fn screenshots(&self) -> Vec<PathBuf> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                DriverCall::Screenshot { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.lock().sessions
    }

    pub fn is_seed_active(&self) -> bool {
        self.state.lock().seed_active
    }

    fn record(&self, call: DriverCall) {
        self.state.lock().calls.push(call);
    }
}

#[async_trait]
impl Driver for FakeDriver {
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn Browser>, DriverError> {
        if self.state.lock().fail_launch {
            return Err(DriverError::Launch("fake launch failure".to_string()));
        }
        self.record(DriverCall::Launch {
            headless: options.headless,
        });
        Ok(Box::new(FakeBrowser {
            driver: self.clone(),
        }))
    }
}

struct FakeBrowser {
    driver: FakeDriver,
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn new_session(
        &self,
        options: &SessionOptions,
    ) -> Result<Box<dyn Session>, DriverError> {
        let session = {
            let mut state = self.driver.state.lock();
            let session = state.sessions;
            state.sessions += 1;
            state.calls.push(DriverCall::OpenSession {
                session,
                video_dir: options.video_dir.clone(),
            });
            session
        };
        Ok(Box::new(FakeSession {
            page: FakePage {
                session,
                driver: self.driver.clone(),
            },
            video_dir: options.video_dir.clone(),
        }))
    }

    async fn close(self: Box<Self>) -> Result<(), DriverError> {
        self.driver.record(DriverCall::CloseBrowser);
        Ok(())
    }
}

struct FakeSession {
    page: FakePage,
    video_dir: Option<PathBuf>,
}

#[async_trait]
impl Session for FakeSession {
    fn page(&self) -> &dyn Page {
        &self.page
    }

    async fn close(self: Box<Self>) -> Result<Option<PathBuf>, DriverError> {
        self.page.driver.record(DriverCall::CloseSession {
            session: self.page.session,
        });
        match self.video_dir {
            Some(dir) => {
                tokio::fs::create_dir_all(&dir).await?;
                let path = dir.join(super::video::VIDEO_FILE);
                tokio::fs::write(&path, b"").await?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }
}

struct FakePage {
    session: usize,
    driver: FakeDriver,
}

impl FakePage {
    fn visible(&self, locator: &Locator) -> bool {
        self.driver.state.lock().visible(locator)
    }

    fn require(&self, locator: &Locator) -> Result<(), DriverError> {
        if self.visible(locator) {
            Ok(())
        } else {
            Err(DriverError::NotFound(locator.to_string()))
        }
    }
}

#[async_trait]
impl Page for FakePage {
    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        let mut state = self.driver.state.lock();
        state.calls.push(DriverCall::Goto {
            session: self.session,
            url: url.to_string(),
        });
        if state.failing_navigation.contains(&self.session) {
            return Err(DriverError::Navigation {
                url: url.to_string(),
                message: "net::ERR_CONNECTION_REFUSED".to_string(),
            });
        }
        Ok(())
    }

    async fn wait_for_url(&self, _pattern: &str, _timeout: Duration) -> Result<(), DriverError> {
        Ok(())
    }

    async fn wait_for_condition(
        &self,
        _script: &str,
        _timeout: Duration,
    ) -> Result<(), DriverError> {
        Ok(())
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        if self.visible(locator) {
            Ok(())
        } else {
            Err(DriverError::Timeout {
                what: locator.to_string(),
                timeout,
            })
        }
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError> {
        Ok(self.visible(locator))
    }

    async fn is_enabled(&self, locator: &Locator) -> Result<bool, DriverError> {
        Ok(self.visible(locator))
    }

    async fn count(&self, locator: &Locator) -> Result<usize, DriverError> {
        Ok(if self.visible(locator) { FAKE_COUNT } else { 0 })
    }

    async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
        self.require(locator)?;
        let mut state = self.driver.state.lock();
        state.calls.push(DriverCall::Click {
            session: self.session,
            locator: locator.to_string(),
        });
        if locator.mentions("Unlock") || locator.mentions("Use This Seed") {
            state.seed_active = true;
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), DriverError> {
        self.require(locator)?;
        self.driver.record(DriverCall::Fill {
            session: self.session,
            locator: locator.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn check(&self, locator: &Locator) -> Result<(), DriverError> {
        self.require(locator)?;
        self.driver.record(DriverCall::Check {
            session: self.session,
            locator: locator.to_string(),
        });
        Ok(())
    }

    async fn scroll_into_view(&self, locator: &Locator) -> Result<(), DriverError> {
        self.require(locator)?;
        self.driver.record(DriverCall::ScrollIntoView {
            session: self.session,
            locator: locator.to_string(),
        });
        Ok(())
    }

    async fn text_content(&self, locator: &Locator) -> Result<Option<String>, DriverError> {
        Ok(self.visible(locator).then(|| FAKE_TEXT.to_string()))
    }

    async fn evaluate(&self, _script: &str) -> Result<(), DriverError> {
        self.driver.record(DriverCall::Evaluate {
            session: self.session,
        });
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), DriverError> {
        self.driver.record(DriverCall::Screenshot {
            session: self.session,
            path: path.to_path_buf(),
        });
        tokio::fs::write(path, PNG_MAGIC).await?;
        Ok(())
    }
}
