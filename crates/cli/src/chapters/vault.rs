// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Encrypted vault: create it, add a second seed, fill the address book.
//!
//! Starts on the Settings > Vault tab. The vault file is written to the
//! system temp directory and removed when the chapter ends.

use super::setup::SEED_PROMPT;
use super::{button, card_header, input_with_placeholder, wait_ready, DEMO_IDENTITY};
use crate::driver::Locator;
use crate::error::SessionError;
use crate::step::Scene;
use std::path::PathBuf;

const CH: &str = "19_vault";

/// File name of the throwaway vault.
pub const VAULT_FILE: &str = "qubic-demo-vault.dat";

const DEMO_SEED: &str = "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyzabc";
const DEMO_PASSWORD: &str = "DemoPassword123!";
const SECOND_CONTACT: &str = "BAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub fn vault_path() -> PathBuf {
    std::env::temp_dir().join(VAULT_FILE)
}

pub(super) async fn vault(s: &mut Scene<'_>) -> Result<(), SessionError> {
    let path_input = input_with_placeholder("Path to save vault file");
    if !s.visible(&path_input).await {
        tracing::info!("  vault form not shown, skipping");
        return Ok(());
    }

    let result = create_and_fill(s, &path_input).await;
    remove_vault_file().await;
    result
}

async fn create_and_fill(s: &mut Scene<'_>, path_input: &Locator) -> Result<(), SessionError> {
    create_vault(s, path_input).await?;

    let entries = Locator::text("Vault Entries");
    if s.visible(&entries).await {
        s.capture_and_hold(CH, "one_entry", None).await?;
    }

    add_second_seed(s, &entries).await?;
    add_contacts(s).await?;

    let change_password = Locator::text("Change Vault Password");
    if s.try_scroll(&change_password).await? {
        s.pace().await;
        s.capture_and_hold(CH, "change_password", Some(3000)).await?;
    }
    Ok(())
}

async fn create_vault(s: &mut Scene<'_>, path_input: &Locator) -> Result<(), SessionError> {
    let path = vault_path();
    s.fill(path_input, &path.display().to_string()).await?;
    s.pace().await;

    let seed = s.seed().map_or(DEMO_SEED, |seed| seed.expose());
    s.try_fill(&input_with_placeholder(SEED_PROMPT), seed).await?;
    s.pace().await;

    let label = if s.is_live() { "Main Wallet" } else { "Demo Wallet" };
    s.try_fill(&input_with_placeholder("e.g. Main"), label).await?;
    s.pace().await;

    // The last two password fields are the new password and its confirmation
    let passwords = Locator::css("input[type='password']");
    let count = s.count(&passwords).await;
    if count >= 2 {
        s.fill(&passwords.clone().nth(count - 2), DEMO_PASSWORD).await?;
        s.sleep_ms(500).await;
        s.fill(&passwords.clone().nth(count - 1), DEMO_PASSWORD).await?;
    }
    s.pace().await;

    s.capture_and_hold(CH, "create_filled", None).await?;

    let create = button("Create Vault");
    if s.enabled(&create).await {
        s.click(&create).await?;
        s.pace().await;
        wait_ready(s).await;
        s.sleep_ms(2000).await;
        s.capture_and_hold(CH, "created", None).await?;
    }
    Ok(())
}

async fn add_second_seed(s: &mut Scene<'_>, entries: &Locator) -> Result<(), SessionError> {
    if !s.try_scroll(&card_header("Add Seed to Vault")).await? {
        return Ok(());
    }
    s.pace().await;

    if s.try_click(&button("Generate")).await? {
        s.pace().await;
    }
    if s.try_click(&Locator::css("button[title='Reveal']")).await? {
        s.pace().await;
    }
    s.try_fill(&input_with_placeholder("e.g. Trading"), "Trading")
        .await?;
    s.pace().await;

    s.capture_and_hold(CH, "add_second_seed", None).await?;

    let add_entry = button("Add Entry");
    if s.visible(&add_entry).await && s.enabled(&add_entry).await {
        s.click(&add_entry).await?;
        s.pace().await;
        wait_ready(s).await;
        s.sleep_ms(1000).await;
    }

    if s.try_scroll(entries).await? {
        s.pace().await;
    }
    s.capture_and_hold(CH, "two_entries", None).await?;
    Ok(())
}

async fn add_contacts(s: &mut Scene<'_>) -> Result<(), SessionError> {
    if !s.try_scroll(&card_header("Add Contact")).await? {
        return Ok(());
    }
    s.pace().await;

    let label = input_with_placeholder("e.g. Exchange");
    let address = input_with_placeholder("IDENTITY");

    if s.visible(&label).await && s.visible(&address).await {
        s.fill(&label, "Qearn Rewards").await?;
        s.pace().await;
        s.fill(&address, DEMO_IDENTITY).await?;
        s.pace().await;
        s.capture_and_hold(CH, "add_contact_filled", Some(3000)).await?;
        submit_contact(s).await?;

        s.try_fill(&label, "Team Treasury").await?;
        s.pace().await;
        s.try_fill(&address, SECOND_CONTACT).await?;
        s.pace().await;
        submit_contact(s).await?;
    }

    if s.try_scroll(&card_header("Address Book")).await? {
        s.pace().await;
        s.capture_and_hold(CH, "contacts_added", None).await?;
    }
    Ok(())
}

async fn submit_contact(s: &Scene<'_>) -> Result<(), SessionError> {
    if s.try_click(&button("Add Contact")).await? {
        s.pace().await;
        wait_ready(s).await;
        s.sleep_ms(500).await;
    }
    Ok(())
}

async fn remove_vault_file() {
    let path = vault_path();
    match tokio::fs::remove_file(&path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "removed demo vault"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove demo vault"),
    }
}
