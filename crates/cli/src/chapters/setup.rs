// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Actions that bring a fresh session to the state an episode starts from.

use super::{button, click_tab, input_with_placeholder, nav, wait_ready, CURSOR_OVERLAY};
use crate::catalog::StartAt;
use crate::config::Seed;
use crate::driver::Locator;
use crate::error::SessionError;
use crate::step::Scene;
use std::time::Duration;

/// Placeholder text of the top-bar seed input.
pub const SEED_PROMPT: &str = "Enter 55-char seed";

const SEED_INPUT_TIMEOUT: Duration = Duration::from_secs(5);
const LANDING_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Open the entry URL and wait for the app to land on its home page.
///
/// Navigation failure is fatal for the session; the landing and readiness
/// waits are not.
pub async fn open_entry(scene: &Scene<'_>, url: &str, cursor: bool) -> Result<(), SessionError> {
    let page = scene.page();
    page.goto(url).await?;
    if let Err(e) = page.wait_for_url("**/", LANDING_TIMEOUT).await {
        tracing::debug!(error = %e, "entry URL did not redirect home");
    }
    wait_ready(scene).await;
    if cursor {
        scene.evaluate(CURSOR_OVERLAY).await?;
    }
    Ok(())
}

/// Make a seed active: unlock the supplied one, or generate a throwaway.
///
/// Returns `false` when a seed was already active.
pub async fn activate_seed(scene: &Scene<'_>) -> Result<bool, SessionError> {
    match scene.seed() {
        Some(seed) => enter_seed(scene, seed).await,
        None => generate_seed(scene).await,
    }
}

/// Type `seed` into the top bar and unlock it.
pub async fn enter_seed(scene: &Scene<'_>, seed: &Seed) -> Result<bool, SessionError> {
    let input = input_with_placeholder(SEED_PROMPT);
    if !scene.wait_for(&input, SEED_INPUT_TIMEOUT).await {
        tracing::info!("  seed already active");
        return Ok(false);
    }
    scene.fill(&input, seed.expose()).await?;
    scene.pace().await;
    scene.click(&button("Unlock")).await?;
    scene.pace().await;
    wait_ready(scene).await;
    Ok(true)
}

/// Generate a seed through the UI, confirm it was saved, and use it.
pub async fn generate_seed(scene: &Scene<'_>) -> Result<bool, SessionError> {
    if !scene.try_click(&button("Generate New Seed")).await? {
        tracing::info!("  seed already active");
        return Ok(false);
    }
    scene.sleep_ms(500).await;
    scene.check(&Locator::css("#seedSavedCheck")).await?;
    scene.sleep_ms(300).await;
    scene.click(&button("Use This Seed")).await?;
    scene.sleep_ms(500).await;
    wait_ready(scene).await;
    Ok(true)
}

/// Click Connect if it is offered and wait for the epoch badge.
pub async fn connect_to_network(scene: &Scene<'_>) -> Result<bool, SessionError> {
    if !scene.try_click(&button("Connect")).await? {
        return Ok(false);
    }
    scene
        .wait_for(&Locator::css("span.badge-qb-success.mono"), CONNECT_TIMEOUT)
        .await;
    scene.pace().await;
    Ok(true)
}

/// Navigate to the page (and tab) an episode's first chapter expects.
pub async fn open_start_page(scene: &Scene<'_>, start: &StartAt) -> Result<(), SessionError> {
    nav(scene, start.page).await?;
    if let Some(tab) = start.tab {
        click_tab(scene, tab).await?;
    }
    Ok(())
}
