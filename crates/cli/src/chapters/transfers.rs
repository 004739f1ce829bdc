// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sending and receiving QU.
//!
//! Live runs send 1 QU to the wallet's own identity; demo runs only fill
//! the forms.

use super::{button, nav, wait_ready, DEMO_IDENTITY};
use crate::driver::Locator;
use crate::error::SessionError;
use crate::step::Scene;

const IDENTITY_INPUT: &str =
    "input.mono[placeholder*='IDENTITY'], input.mono[placeholder*='identity']";

fn own_identity_text() -> Locator {
    Locator::css(".qb-seed-bar code")
}

/// The active identity, read from the seed bar once its badge is shown.
async fn own_identity(s: &Scene<'_>) -> Option<String> {
    if !s.visible(&Locator::css("span.badge-qb-cyan.mono")).await {
        return None;
    }
    s.text_of(&own_identity_text()).await
}

pub(super) async fn send(s: &mut Scene<'_>) -> Result<(), SessionError> {
    const CH: &str = "05_send";
    nav(s, "send").await?;
    s.capture_and_hold(CH, "empty_form", None).await?;

    let destination = Locator::css(IDENTITY_INPUT);
    let amount = Locator::css("input[type='number']");

    if s.is_live() {
        if let Some(identity) = own_identity(s).await {
            if s.try_fill(&destination, &identity).await? {
                s.pace().await;
            }
        }
        if s.try_fill(&amount, "1").await? {
            s.pace().await;
        }
        s.capture_and_hold(CH, "filled_live", None).await?;

        if s.try_click(&button("Preview Transaction")).await? {
            s.pace().await;
            wait_ready(s).await;
            s.capture_and_hold(CH, "preview", None).await?;
        }
        if s.try_click(&button("Sign & Broadcast")).await? {
            s.sleep_ms(3000).await;
            wait_ready(s).await;
            s.capture_and_hold(CH, "broadcast_success", None).await?;
        }
    } else {
        if s.try_fill(&destination, DEMO_IDENTITY).await? {
            s.pace().await;
        }
        if s.try_fill(&amount, "1000").await? {
            s.pace().await;
        }
        s.capture_and_hold(CH, "filled_form", None).await?;
    }

    s.chapter_break().await;
    Ok(())
}

pub(super) async fn send_many(s: &mut Scene<'_>) -> Result<(), SessionError> {
    const CH: &str = "06_send_many";
    nav(s, "send-many").await?;
    s.capture_and_hold(CH, "empty", None).await?;

    for _ in 0..2 {
        if s.try_click(&button("Add Recipient")).await? {
            s.sleep_ms(500).await;
        }
    }

    if s.is_live() {
        let identity = s.text_of(&own_identity_text()).await;
        let addresses = Locator::css(IDENTITY_INPUT);
        let amounts = Locator::css(
            "input[type='number'][placeholder*='Amount'], input[type='number'][min='0']",
        );
        let rows = s.count(&addresses).await.min(3);
        for row in 0..rows {
            if let Some(ref identity) = identity {
                s.fill(&addresses.clone().nth(row), identity).await?;
            }
            s.fill(&amounts.clone().nth(row), "1").await?;
            s.sleep_ms(300).await;
        }
        s.pace().await;
        s.capture_and_hold(CH, "filled_live", None).await?;

        let sign = button("Sign & Broadcast");
        if s.visible(&sign).await && s.enabled(&sign).await {
            s.click(&sign).await?;
            s.sleep_ms(3000).await;
            wait_ready(s).await;
            s.capture_and_hold(CH, "broadcast_success", None).await?;
        }
    } else {
        s.capture_and_hold(CH, "recipients_added", None).await?;

        if s.try_click(&button("Import from Text")).await? {
            s.pace().await;
            s.capture_and_hold(CH, "import_text", None).await?;
            s.try_click(&button("Cancel")).await?;
        }
    }

    s.chapter_break().await;
    Ok(())
}

pub(super) async fn receive(s: &mut Scene<'_>) -> Result<(), SessionError> {
    nav(s, "receive").await?;
    s.pace().await;
    s.capture_and_hold("07_receive", "qr_code", None).await?;
    s.chapter_break().await;
    Ok(())
}
