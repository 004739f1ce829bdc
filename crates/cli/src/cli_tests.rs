// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use clap::CommandFactory;

#[test]
fn test_parse_defaults() {
    let cli = Cli::try_parse_from(["walkthrough"]).unwrap();
    assert_eq!(cli.target, None);
    assert_eq!(cli.episode, None);
    assert_eq!(cli.pace, None);
    assert!(!cli.headless);
    assert!(!cli.no_video);
    assert!(!cli.no_cursor);
    assert!(!cli.list);
}

#[test]
fn test_parse_target_and_url() {
    let cli = Cli::try_parse_from([
        "walkthrough",
        "../Qubic.Net.Wallet",
        "--url",
        "http://localhost:5060/?token=abc",
    ])
    .unwrap();
    assert_eq!(cli.target, Some(PathBuf::from("../Qubic.Net.Wallet")));
    assert_eq!(cli.url.as_deref(), Some("http://localhost:5060/?token=abc"));
}

#[test]
fn test_parse_timing_flags() {
    let cli = Cli::try_parse_from([
        "walkthrough",
        "--pace",
        "500",
        "--hold",
        "600",
        "--hold-tab",
        "700",
        "--chapter-gap",
        "0",
    ])
    .unwrap();
    assert_eq!(cli.pace, Some(500));
    assert_eq!(cli.hold, Some(600));
    assert_eq!(cli.hold_tab, Some(700));
    assert_eq!(cli.chapter_gap, Some(0));
}

#[test]
fn test_parse_switches() {
    let cli = Cli::try_parse_from([
        "walkthrough",
        "--headless",
        "--no-video",
        "--no-cursor",
        "--episode",
        "2,3",
        "-v",
    ])
    .unwrap();
    assert!(cli.headless);
    assert!(cli.no_video);
    assert!(cli.no_cursor);
    assert!(cli.verbose);
    assert_eq!(cli.episode.as_deref(), Some("2,3"));
}

#[test]
fn test_non_numeric_timing_is_a_usage_error() {
    let err = Cli::try_parse_from(["walkthrough", "--pace", "fast"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_command_is_well_formed() {
    Cli::command().debug_assert();
}
