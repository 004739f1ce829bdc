// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Message signing and the settings tabs.

use super::{button, nav, show_tab, wait_ready};
use crate::driver::Locator;
use crate::error::SessionError;
use crate::step::Scene;

const SAMPLE_MESSAGE: &str = "Hello, Qubic! This is a signed message.";

pub(super) async fn sign_verify(s: &mut Scene<'_>) -> Result<(), SessionError> {
    const CH: &str = "17_sign_verify";
    nav(s, "sign-verify").await?;
    s.capture_and_hold(CH, "empty", None).await?;

    if s.try_fill(&Locator::css("textarea"), SAMPLE_MESSAGE).await? {
        s.pace().await;
        s.capture_and_hold(CH, "message_entered", Some(3000)).await?;

        if s.try_click(&button("Sign")).await? {
            s.pace().await;
            wait_ready(s).await;
            s.capture_and_hold(CH, "signed", None).await?;
        }
    }

    s.chapter_break().await;
    Ok(())
}

pub(super) async fn settings(s: &mut Scene<'_>) -> Result<(), SessionError> {
    const CH: &str = "18_settings";
    nav(s, "settings").await?;
    s.capture_and_hold(CH, "general", None).await?;
    for tab in ["Connection", "Transactions", "Labels", "Data", "Vault"] {
        show_tab(s, CH, tab).await?;
    }
    s.chapter_break().await;
    Ok(())
}
