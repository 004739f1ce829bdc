// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The episode catalog and episode selection.

use crate::chapters;
use crate::step::Chapter;
use thiserror::Error;

/// A selection token that is not an episode number.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Invalid episode '{token}'. Use 1-{max}, comma-separated, or 'all'.")]
pub struct SelectionError {
    pub token: String,
    pub max: usize,
}

/// Page (and tab) an episode's first chapter expects to start on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartAt {
    /// Sidebar link, without the leading slash
    pub page: &'static str,
    pub tab: Option<&'static str>,
}

/// A separately recorded part of the walkthrough.
#[derive(Clone, Debug)]
pub struct Episode {
    pub number: usize,
    pub name: &'static str,
    /// Output directory name
    pub slug: &'static str,
    /// Narration file stem used by the merge tool
    pub narration: &'static str,
    /// One-line description for `--list`
    pub summary: &'static str,
    pub needs_seed: bool,
    pub needs_connect: bool,
    pub start_at: Option<StartAt>,
    pub chapters: Vec<Chapter>,
}

/// Episode selection, validated against a catalog size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    All,
    /// Episode numbers in the order given; repeats are kept
    Episodes(Vec<usize>),
}

impl Selection {
    /// Parse `all` (any case) or a comma-separated list of numbers in `1..=max`.
    ///
    /// Empty tokens are dropped, so `""` and `" , "` select no episodes.
    pub fn parse(spec: &str, max: usize) -> Result<Self, SelectionError> {
        let spec = spec.trim();
        if spec.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let mut numbers = Vec::new();
        for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => numbers.push(n),
                _ => {
                    return Err(SelectionError {
                        token: token.to_string(),
                        max,
                    })
                }
            }
        }
        Ok(Self::Episodes(numbers))
    }
}

/// The fixed, ordered set of episodes. Numbers run 1..=N without gaps.
#[derive(Clone, Debug)]
pub struct EpisodeCatalog {
    episodes: Vec<Episode>,
    chapters: Vec<Chapter>,
}

impl EpisodeCatalog {
    /// The wallet walkthrough.
    pub fn build() -> Self {
        let all = chapters::all();
        let pick = |numbers: &[u32]| -> Vec<Chapter> {
            numbers
                .iter()
                .filter_map(|n| all.iter().find(|c| c.number == *n).copied())
                .collect()
        };

        let episodes = vec![
            Episode {
                number: 1,
                name: "Getting Started",
                slug: "01_getting_started",
                narration: "ep1_getting_started",
                summary: "Empty state, seed setup, connect, dashboard",
                needs_seed: false,
                needs_connect: false,
                start_at: None,
                chapters: pick(&[1, 2, 3, 4]),
            },
            Episode {
                number: 2,
                name: "Sending & Receiving",
                slug: "02_sending_receiving",
                narration: "ep2_sending_receiving",
                summary: "Send QU, Send to Many, Receive/QR",
                needs_seed: true,
                needs_connect: true,
                start_at: None,
                chapters: pick(&[5, 6, 7]),
            },
            Episode {
                number: 3,
                name: "Encrypted Vault",
                slug: "03_encrypted_vault",
                narration: "ep3_encrypted_vault",
                summary: "Create vault, manage seeds, address book",
                needs_seed: true,
                needs_connect: false,
                start_at: Some(StartAt {
                    page: "settings",
                    tab: Some("Vault"),
                }),
                chapters: pick(&[19]),
            },
            Episode {
                number: 4,
                name: "Assets & QX Trading",
                slug: "04_assets_qx",
                narration: "ep4_assets_qx",
                summary: "Asset portfolio, order book, Issue/Transfer/Ask/Bid",
                needs_seed: true,
                needs_connect: true,
                start_at: None,
                chapters: pick(&[8, 9]),
            },
            Episode {
                number: 5,
                name: "DeFi Suite",
                slug: "05_defi",
                narration: "ep5_defi",
                summary: "QSwap, QEarn staking, MSVault multi-sig",
                needs_seed: true,
                needs_connect: true,
                start_at: None,
                chapters: pick(&[10, 11, 12]),
            },
            Episode {
                number: 6,
                name: "Governance & Auctions",
                slug: "06_governance",
                narration: "ep6_governance",
                summary: "Voting, SC Auctions",
                needs_seed: true,
                needs_connect: true,
                start_at: None,
                chapters: pick(&[13, 14]),
            },
            Episode {
                number: 7,
                name: "History & Monitoring",
                slug: "07_history",
                narration: "ep7_history",
                summary: "Transaction history, log events",
                needs_seed: true,
                needs_connect: true,
                start_at: None,
                chapters: pick(&[15, 16]),
            },
            Episode {
                number: 8,
                name: "Tools & Settings",
                slug: "08_tools_settings",
                narration: "ep8_tools_settings",
                summary: "Sign/Verify, settings tabs",
                needs_seed: true,
                needs_connect: false,
                start_at: None,
                chapters: pick(&[17, 18]),
            },
        ];

        Self {
            episodes,
            chapters: all,
        }
    }

    /// A catalog of arbitrary episodes, numbered 1..=N in order.
    ///
    /// The full chapter sequence is every episode's chapters sorted by
    /// chapter number.
    pub fn from_episodes(mut episodes: Vec<Episode>) -> Self {
        for (i, episode) in episodes.iter_mut().enumerate() {
            episode.number = i + 1;
        }
        let mut chapters: Vec<Chapter> = episodes
            .iter()
            .flat_map(|e| e.chapters.iter().copied())
            .collect();
        chapters.sort_by_key(|c| c.number);
        chapters.dedup_by_key(|c| c.number);
        Self { episodes, chapters }
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Episode by 1-based number
    pub fn get(&self, number: usize) -> Option<&Episode> {
        number.checked_sub(1).and_then(|i| self.episodes.get(i))
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Every chapter in recording order, as the monolith runs them.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Episodes named by `selection`, in selection order.
    pub fn select(&self, selection: &Selection) -> Vec<&Episode> {
        match selection {
            Selection::All => self.episodes.iter().collect(),
            Selection::Episodes(numbers) => numbers.iter().filter_map(|n| self.get(*n)).collect(),
        }
    }

    /// The episode table printed by `--list`.
    pub fn listing(&self) -> String {
        let width = self.episodes.iter().map(|e| e.name.len()).max().unwrap_or(0);
        let mut out = String::from("Episodes:\n");
        for e in &self.episodes {
            out.push_str(&format!(
                "  {}  {:<width$} — {}\n",
                e.number,
                e.name,
                e.summary,
                width = width
            ));
        }
        out
    }

    /// Parse a selection string; `None` selects every episode.
    pub fn parse_selection(&self, spec: Option<&str>) -> Result<Vec<&Episode>, SelectionError> {
        match spec {
            None => Ok(self.episodes.iter().collect()),
            Some(spec) => Ok(self.select(&Selection::parse(spec, self.len())?)),
        }
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
