// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::page_tour;
use crate::error::SessionError;
use crate::step::Scene;

pub(super) async fn voting(s: &mut Scene<'_>) -> Result<(), SessionError> {
    page_tour(
        s,
        "voting",
        "13_voting",
        &["Browse", "Vote", "Results", "Create"],
    )
    .await
}

pub(super) async fn sc_auctions(s: &mut Scene<'_>) -> Result<(), SessionError> {
    page_tour(
        s,
        "sc-auctions",
        "14_sc_auctions",
        &["Browse", "Status", "Bid"],
    )
    .await
}
