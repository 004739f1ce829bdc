// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

#[rstest]
#[case(0, "00:00")]
#[case(999, "00:00")]
#[case(5_000, "00:05")]
#[case(65_400, "01:05")]
#[case(3_665_000, "61:05")]
fn test_format_elapsed(#[case] millis: u64, #[case] expected: &str) {
    assert_eq!(format_elapsed(Duration::from_millis(millis)), expected);
}

#[test]
fn test_format_line_pads_label() {
    let entry = LogEntry::new(
        Duration::from_secs(7),
        "01_intro/home_empty",
        "000_01_intro_home_empty.png",
    );
    assert_eq!(
        entry.format_line(),
        "[00:07] 01_intro/home_empty            → 000_01_intro_home_empty.png"
    );
}

#[test]
fn test_format_line_keeps_long_label() {
    let label = "19_vault/add_contact_filled_and_more_text";
    let entry = LogEntry::new(Duration::ZERO, label, "x.png");
    let line = entry.format_line();
    assert!(line.contains(&format!("{label} → x.png")));
}

#[test]
fn test_display_matches_format_line() {
    let entry = LogEntry::new(Duration::from_secs(61), "a/b", "000_a_b.png");
    assert_eq!(entry.to_string(), entry.format_line());
}

#[test]
fn test_serializes_elapsed_as_millis() {
    let entry = LogEntry::new(Duration::from_millis(1_500), "a/b", "f.png");
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["elapsed"], 1500);

    let back: LogEntry = serde_json::from_value(json).unwrap();
    assert_eq!(back, entry);
}
