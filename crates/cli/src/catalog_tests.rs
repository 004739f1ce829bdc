// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use proptest::prelude::*;
use rstest::rstest;
use std::collections::HashSet;

fn numbers(episodes: &[&Episode]) -> Vec<usize> {
    episodes.iter().map(|e| e.number).collect()
}

#[test]
fn test_numbers_are_contiguous_from_one() {
    let catalog = EpisodeCatalog::build();
    let got: Vec<usize> = catalog.episodes().iter().map(|e| e.number).collect();
    assert_eq!(got, (1..=8).collect::<Vec<_>>());
}

#[test]
fn test_slugs_are_unique() {
    let catalog = EpisodeCatalog::build();
    let slugs: HashSet<&str> = catalog.episodes().iter().map(|e| e.slug).collect();
    assert_eq!(slugs.len(), catalog.len());
}

#[test]
fn test_every_chapter_belongs_to_exactly_one_episode() {
    let catalog = EpisodeCatalog::build();
    let mut seen: Vec<u32> = catalog
        .episodes()
        .iter()
        .flat_map(|e| e.chapters.iter().map(|c| c.number))
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, (1..=19).collect::<Vec<_>>());
}

#[test]
fn test_monolith_chapters_are_in_recording_order() {
    let catalog = EpisodeCatalog::build();
    let got: Vec<u32> = catalog.chapters().iter().map(|c| c.number).collect();
    assert_eq!(got, (1..=19).collect::<Vec<_>>());
}

#[test]
fn test_preconditions() {
    let catalog = EpisodeCatalog::build();
    let first = catalog.get(1).unwrap();
    assert!(!first.needs_seed);
    assert!(!first.needs_connect);

    let vault = catalog.get(3).unwrap();
    assert!(vault.needs_seed);
    assert!(!vault.needs_connect);
    assert_eq!(
        vault.start_at,
        Some(StartAt {
            page: "settings",
            tab: Some("Vault")
        })
    );
    assert_eq!(vault.chapters[0].label, "19_vault");
}

#[test]
fn test_get_out_of_range() {
    let catalog = EpisodeCatalog::build();
    assert!(catalog.get(0).is_none());
    assert!(catalog.get(9).is_none());
}

#[rstest]
#[case(None, vec![1, 2, 3, 4, 5, 6, 7, 8])]
#[case(Some("all"), vec![1, 2, 3, 4, 5, 6, 7, 8])]
#[case(Some("ALL"), vec![1, 2, 3, 4, 5, 6, 7, 8])]
#[case(Some(" All "), vec![1, 2, 3, 4, 5, 6, 7, 8])]
#[case(Some("1"), vec![1])]
#[case(Some("3,1"), vec![3, 1])]
#[case(Some(" 2 , 3 "), vec![2, 3])]
#[case(Some("2,,3,"), vec![2, 3])]
#[case(Some("4,4"), vec![4, 4])]
fn test_parse_selection(#[case] spec: Option<&str>, #[case] expected: Vec<usize>) {
    let catalog = EpisodeCatalog::build();
    let episodes = catalog.parse_selection(spec).unwrap();
    assert_eq!(numbers(&episodes), expected);
}

#[rstest]
#[case("0", "0")]
#[case("9", "9")]
#[case("x", "x")]
#[case("1,x,2", "x")]
#[case("1,-2", "-2")]
#[case("1.5", "1.5")]
fn test_parse_selection_rejects(#[case] spec: &str, #[case] token: &str) {
    let catalog = EpisodeCatalog::build();
    let err = catalog.parse_selection(Some(spec)).unwrap_err();
    assert_eq!(err.token, token);
    assert_eq!(err.max, 8);
}

#[rstest]
#[case("")]
#[case(",")]
#[case(" , ")]
#[case(" ,, ,")]
fn test_empty_tokens_select_nothing(#[case] spec: &str) {
    assert_eq!(Selection::parse(spec, 8).unwrap(), Selection::Episodes(vec![]));
    let catalog = EpisodeCatalog::build();
    assert!(catalog.parse_selection(Some(spec)).unwrap().is_empty());
}

#[test]
fn test_selection_error_message() {
    let err = Selection::parse("9", 8).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid episode '9'. Use 1-8, comma-separated, or 'all'."
    );
}

#[test]
fn test_listing() {
    let listing = EpisodeCatalog::build().listing();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[0], "Episodes:");
    assert_eq!(
        lines[1],
        "  1  Getting Started       — Empty state, seed setup, connect, dashboard"
    );
    assert_eq!(lines[6], "  6  Governance & Auctions — Voting, SC Auctions");
    assert_eq!(lines.len(), 9);
}

#[test]
fn test_select_all() {
    let catalog = EpisodeCatalog::build();
    assert_eq!(catalog.select(&Selection::All).len(), 8);
}

#[test]
fn test_from_episodes_renumbers() {
    let built = EpisodeCatalog::build();
    let picked = vec![built.get(7).unwrap().clone(), built.get(2).unwrap().clone()];
    let catalog = EpisodeCatalog::from_episodes(picked);

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(1).unwrap().slug, "07_history");
    assert_eq!(catalog.get(2).unwrap().number, 2);
    let chapters: Vec<u32> = catalog.chapters().iter().map(|c| c.number).collect();
    assert_eq!(chapters, vec![5, 6, 7, 15, 16]);
}

proptest! {
    #[test]
    fn prop_valid_lists_preserve_token_order(picks in prop::collection::vec(1usize..=8, 1..12)) {
        let catalog = EpisodeCatalog::build();
        let spec = picks.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        let episodes = catalog.parse_selection(Some(&spec)).unwrap();
        prop_assert_eq!(numbers(&episodes), picks);
    }

    #[test]
    fn prop_out_of_range_is_rejected(n in 9usize..10_000, prefix in prop::collection::vec(1usize..=8, 0..4)) {
        let mut tokens: Vec<String> = prefix.iter().map(ToString::to_string).collect();
        tokens.push(n.to_string());
        let err = Selection::parse(&tokens.join(","), 8).unwrap_err();
        prop_assert_eq!(err.token, n.to_string());
    }

    #[test]
    fn prop_non_numeric_is_rejected(word in "[a-z]{1,8}") {
        prop_assume!(word != "all");
        prop_assert!(Selection::parse(&word, 8).is_err());
    }
}
