// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The scripted chapters of the wallet walkthrough.
//!
//! Chapters are plain `async fn(&mut Scene<'_>)` bodies. Optional UI is
//! probed before it is touched; anything the walkthrough cannot do without
//! (navigation links, tabs) is clicked directly and fails the session if it
//! is missing.

use crate::driver::Locator;
use crate::error::SessionError;
use crate::step::{Chapter, Scene};
use std::time::Duration;

/// Wrap an `async fn(&mut Scene<'_>) -> Result<(), SessionError>` as a step.
macro_rules! step {
    ($body:path) => {{
        fn step<'a>(scene: &'a mut $crate::step::Scene<'_>) -> $crate::step::StepFuture<'a> {
            Box::pin($body(scene))
        }
        step as $crate::step::StepFn
    }};
}

mod governance;
mod history;
mod onboarding;
pub mod setup;
mod tools;
mod trading;
mod transfers;
mod vault;

/// Truthy once the app is not showing its error banner.
pub const READY_SCRIPT: &str =
    "document.querySelector('.blazor-error-ui')?.style.display !== 'block'";

/// How long [`wait_ready`] waits for [`READY_SCRIPT`].
pub const READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Draws a fading ring wherever the page is clicked, so clicks show up in video.
pub const CURSOR_OVERLAY: &str = r#"(() => {
    if (document.getElementById('pw-click-style')) return;

    document.addEventListener('click', e => {
        const ripple = document.createElement('div');
        Object.assign(ripple.style, {
            position: 'fixed', zIndex: '999998', pointerEvents: 'none',
            left: e.clientX + 'px', top: e.clientY + 'px',
            width: '0', height: '0', borderRadius: '50%',
            border: '2.5px solid rgba(255, 75, 75, 0.8)',
            transform: 'translate(-50%, -50%)',
            animation: 'pw-ripple 0.5s ease-out forwards'
        });
        document.body.appendChild(ripple);
        setTimeout(() => ripple.remove(), 600);
    }, true);

    const style = document.createElement('style');
    style.id = 'pw-click-style';
    style.textContent = `
        @keyframes pw-ripple {
            0%   { width: 0;    height: 0;    opacity: 1; border-width: 2.5px; }
            100% { width: 60px; height: 60px; opacity: 0; border-width: 1px; }
        }
    `;
    document.head.appendChild(style);
})()"#;

/// Placeholder destination used when nothing is really sent.
pub(crate) const DEMO_IDENTITY: &str =
    "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Every chapter of the walkthrough, in recording order.
pub fn all() -> Vec<Chapter> {
    vec![
        chapter(1, "01_intro", "Empty state", step!(onboarding::intro)),
        chapter(2, "02_seed", "Seed setup", step!(onboarding::seed_setup)),
        chapter(3, "03_connect", "Connect", step!(onboarding::connect)),
        chapter(4, "04_dashboard", "Dashboard", step!(onboarding::dashboard)),
        chapter(5, "05_send", "Send QU", step!(transfers::send)),
        chapter(6, "06_send_many", "Send to Many", step!(transfers::send_many)),
        chapter(7, "07_receive", "Receive", step!(transfers::receive)),
        chapter(8, "08_assets", "Assets", step!(trading::assets)),
        chapter(9, "09_qx", "QX trading", step!(trading::qx)),
        chapter(10, "10_qswap", "QSwap", step!(trading::qswap)),
        chapter(11, "11_qearn", "QEarn staking", step!(trading::qearn)),
        chapter(12, "12_msvault", "MSVault multi-sig", step!(trading::msvault)),
        chapter(13, "13_voting", "Voting", step!(governance::voting)),
        chapter(14, "14_sc_auctions", "SC auctions", step!(governance::sc_auctions)),
        chapter(15, "15_history", "Transaction history", step!(history::transactions)),
        chapter(16, "16_logs", "Log events", step!(history::log_events)),
        chapter(17, "17_sign_verify", "Sign and verify", step!(tools::sign_verify)),
        chapter(18, "18_settings", "Settings", step!(tools::settings)),
        chapter(19, "19_vault", "Encrypted vault", step!(vault::vault)),
    ]
}

fn chapter(
    number: u32,
    label: &'static str,
    title: &'static str,
    step: crate::step::StepFn,
) -> Chapter {
    Chapter {
        number,
        label,
        title,
        step,
    }
}

/// First button whose text contains `text`.
pub fn button(text: &str) -> Locator {
    Locator::css("button").has_text(text)
}

/// Sidebar link to `/{href}`.
pub fn nav_link(href: &str) -> Locator {
    Locator::css(format!("a.nav-link[href='/{href}']"))
}

/// Tab whose label contains `text`.
pub fn tab(text: &str) -> Locator {
    Locator::css("ul.nav-tabs a.nav-link").has_text(text)
}

/// Card header whose title contains `text`.
pub fn card_header(text: &str) -> Locator {
    Locator::css("div.card-header").has_text(text)
}

/// Input whose placeholder contains `text`.
pub fn input_with_placeholder(text: &str) -> Locator {
    Locator::css(format!("input[placeholder*='{text}']"))
}

/// Wait briefly for the app to settle. Never fails.
pub async fn wait_ready(scene: &Scene<'_>) {
    if let Err(e) = scene
        .page()
        .wait_for_condition(READY_SCRIPT, READY_TIMEOUT)
        .await
    {
        tracing::debug!(error = %e, "continuing without ready signal");
    }
    scene.sleep_ms(300).await;
}

/// Follow a sidebar link.
pub async fn nav(scene: &Scene<'_>, href: &str) -> Result<(), SessionError> {
    scene.click(&nav_link(href)).await?;
    scene.pace().await;
    wait_ready(scene).await;
    Ok(())
}

pub async fn click_tab(scene: &Scene<'_>, text: &str) -> Result<(), SessionError> {
    scene.click(&tab(text)).await?;
    scene.pace().await;
    Ok(())
}

/// Open a tab and capture it as `tab_<name>`.
pub async fn show_tab(scene: &mut Scene<'_>, chapter: &str, text: &str) -> Result<(), SessionError> {
    click_tab(scene, text).await?;
    scene.capture(chapter, &tab_artifact(text)).await?;
    scene.hold_tab().await;
    Ok(())
}

/// Artifact name for a tab: lowercase, spaces replaced by underscores.
pub fn tab_artifact(text: &str) -> String {
    format!("tab_{}", text.to_lowercase().replace(' ', "_"))
}

/// Navigate to a page, capture its overview, then walk its tabs.
pub(crate) async fn page_tour(
    scene: &mut Scene<'_>,
    href: &str,
    chapter: &str,
    tabs: &[&str],
) -> Result<(), SessionError> {
    nav(scene, href).await?;
    scene.capture_and_hold(chapter, "overview", None).await?;
    for text in tabs {
        show_tab(scene, chapter, text).await?;
    }
    scene.chapter_break().await;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
