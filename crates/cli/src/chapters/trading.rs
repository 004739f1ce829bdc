// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Assets and the smart-contract pages: QX, QSwap, QEarn, MSVault.

use super::{nav, page_tour};
use crate::error::SessionError;
use crate::step::Scene;

pub(super) async fn assets(s: &mut Scene<'_>) -> Result<(), SessionError> {
    nav(s, "assets").await?;
    s.capture_and_hold("08_assets", "overview", None).await?;
    s.chapter_break().await;
    Ok(())
}

pub(super) async fn qx(s: &mut Scene<'_>) -> Result<(), SessionError> {
    page_tour(s, "qx", "09_qx", &["Issue", "Transfer", "Ask", "Bid", "Rights"]).await
}

pub(super) async fn qswap(s: &mut Scene<'_>) -> Result<(), SessionError> {
    page_tour(
        s,
        "qswap",
        "10_qswap",
        &["Issue", "Transfer", "Pool", "Liquidity", "Swap"],
    )
    .await
}

pub(super) async fn qearn(s: &mut Scene<'_>) -> Result<(), SessionError> {
    page_tour(s, "qearn", "11_qearn", &["Lock", "Query"]).await
}

pub(super) async fn msvault(s: &mut Scene<'_>) -> Result<(), SessionError> {
    page_tour(
        s,
        "msvault",
        "12_msvault",
        &["Register", "Deposit", "Release", "Assets", "Query"],
    )
    .await
}
