// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transaction history and log events.

use super::{button, nav, tab};
use crate::driver::Locator;
use crate::error::SessionError;
use crate::step::Scene;

pub(super) async fn transactions(s: &mut Scene<'_>) -> Result<(), SessionError> {
    const CH: &str = "15_history";
    nav(s, "history").await?;

    if s.is_live() {
        s.capture_and_hold(CH, "tracked_with_tx", None).await?;

        let status = Locator::css("span.badge")
            .has_text("Pending")
            .has_text("Confirmed");
        if s.visible(&status).await {
            s.capture_and_hold(CH, "tx_status", None).await?;
        }
        if s.try_click(&button("Details")).await? {
            s.pace().await;
            s.capture_and_hold(CH, "tx_expanded", None).await?;
        }
    } else {
        s.capture_and_hold(CH, "tracked", None).await?;
    }

    if s.try_click(&tab("All Transactions")).await? {
        s.pace().await;
        s.capture_and_hold(CH, "all_transactions", None).await?;
    }

    s.chapter_break().await;
    Ok(())
}

pub(super) async fn log_events(s: &mut Scene<'_>) -> Result<(), SessionError> {
    nav(s, "logs").await?;
    s.capture_and_hold("16_logs", "overview", None).await?;
    s.chapter_break().await;
    Ok(())
}
