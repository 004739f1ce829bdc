// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! First run: empty state, seed, network connection, dashboard.

use super::setup::{connect_to_network, enter_seed};
use super::{button, nav, wait_ready};
use crate::driver::Locator;
use crate::error::SessionError;
use crate::step::Scene;

pub(super) async fn intro(s: &mut Scene<'_>) -> Result<(), SessionError> {
    s.capture_and_hold("01_intro", "home_empty", None).await?;
    s.chapter_break().await;
    Ok(())
}

/// Live runs show generation briefly, then unlock the funded seed instead.
pub(super) async fn seed_setup(s: &mut Scene<'_>) -> Result<(), SessionError> {
    const CH: &str = "02_seed";
    let reveal = Locator::css("button[title='Reveal']");

    s.click(&button("Generate New Seed")).await?;
    s.pace().await;

    match s.seed() {
        Some(seed) => {
            s.capture_and_hold(CH, "generated", Some(3000)).await?;
            if s.try_click(&reveal).await? {
                s.pace().await;
                s.capture_and_hold(CH, "revealed", None).await?;
            }
            enter_seed(s, seed).await?;
            s.capture_and_hold(CH, "funded_active", Some(3000)).await?;
        }
        None => {
            s.capture_and_hold(CH, "generated", None).await?;
            if s.try_click(&reveal).await? {
                s.pace().await;
                s.capture_and_hold(CH, "revealed", None).await?;
            }
            s.check(&Locator::css("#seedSavedCheck")).await?;
            s.pace().await;
            s.capture_and_hold(CH, "confirmed", Some(3000)).await?;

            s.click(&button("Use This Seed")).await?;
            s.pace().await;
            wait_ready(s).await;
        }
    }

    s.chapter_break().await;
    Ok(())
}

pub(super) async fn connect(s: &mut Scene<'_>) -> Result<(), SessionError> {
    s.capture_and_hold("03_connect", "before", Some(2000)).await?;
    connect_to_network(s).await?;
    s.capture_and_hold("03_connect", "connected", None).await?;
    s.chapter_break().await;
    Ok(())
}

pub(super) async fn dashboard(s: &mut Scene<'_>) -> Result<(), SessionError> {
    nav(s, "").await?;
    if s.is_live() && s.try_click(&button("Load Balance")).await? {
        // Balance comes from an RPC round trip
        s.sleep_ms(3000).await;
        wait_ready(s).await;
    }
    s.capture_and_hold("04_dashboard", "overview", None).await?;
    s.chapter_break().await;
    Ok(())
}
