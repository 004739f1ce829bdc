// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pacing delays shared by every step of a run.

use std::fmt;
use std::time::Duration;

use crate::time::{Clock, ClockHandle};

/// The four delays that pace a walkthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingPolicy {
    /// Pause after every UI action
    pub pace: Duration,
    /// Hold after a scene screenshot
    pub hold_scene: Duration,
    /// Hold after a tab screenshot
    pub hold_tab: Duration,
    /// Pause between chapters
    pub chapter_gap: Duration,
}

impl TimingPolicy {
    pub const DEFAULT_PACE_MS: u64 = 2500;
    pub const DEFAULT_HOLD_MS: u64 = 5000;
    pub const DEFAULT_HOLD_TAB_MS: u64 = 3000;
    pub const DEFAULT_CHAPTER_GAP_MS: u64 = 4000;

    pub fn from_millis(pace: u64, hold_scene: u64, hold_tab: u64, chapter_gap: u64) -> Self {
        Self {
            pace: Duration::from_millis(pace),
            hold_scene: Duration::from_millis(hold_scene),
            hold_tab: Duration::from_millis(hold_tab),
            chapter_gap: Duration::from_millis(chapter_gap),
        }
    }

    /// All delays zero, for fast runs.
    pub fn instant() -> Self {
        Self::from_millis(0, 0, 0, 0)
    }
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self::from_millis(
            Self::DEFAULT_PACE_MS,
            Self::DEFAULT_HOLD_MS,
            Self::DEFAULT_HOLD_TAB_MS,
            Self::DEFAULT_CHAPTER_GAP_MS,
        )
    }
}

impl fmt::Display for TimingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pace={}ms, hold={}ms, hold-tab={}ms, chapter-gap={}ms",
            self.pace.as_millis(),
            self.hold_scene.as_millis(),
            self.hold_tab.as_millis(),
            self.chapter_gap.as_millis()
        )
    }
}

/// A [`TimingPolicy`] bound to the clock that performs the sleeps.
#[derive(Clone, Debug)]
pub struct Pacer {
    policy: TimingPolicy,
    clock: ClockHandle,
}

impl Pacer {
    pub fn new(policy: TimingPolicy, clock: ClockHandle) -> Self {
        Self { policy, clock }
    }

    pub fn clock(&self) -> &ClockHandle {
        &self.clock
    }

    pub async fn pace(&self) {
        self.sleep(self.policy.pace).await;
    }

    pub async fn hold_tab(&self) {
        self.sleep(self.policy.hold_tab).await;
    }

    pub async fn chapter_gap(&self) {
        self.sleep(self.policy.chapter_gap).await;
    }

    /// Sleep for `hold`, or the scene hold when none is given.
    pub async fn hold_for(&self, hold: Option<Duration>) {
        self.sleep(hold.unwrap_or(self.policy.hold_scene)).await;
    }

    pub async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            self.clock.sleep(duration).await;
        }
    }
}

#[cfg(test)]
#[path = "timing_tests.rs"]
mod tests;
