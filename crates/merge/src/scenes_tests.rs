// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

#[rstest]
#[case("00:00:00,000", Duration::ZERO)]
#[case("00:00:04,250", Duration::from_millis(4250))]
#[case("00:01:02,500", Duration::from_millis(62_500))]
#[case("01:00:00,000", Duration::from_secs(3600))]
#[case("00:00:07.125", Duration::from_millis(7125))]
fn test_parse_timestamp(#[case] stamp: &str, #[case] expected: Duration) {
    assert_eq!(parse_timestamp(stamp), Some(expected));
}

#[rstest]
#[case("")]
#[case("00:00")]
#[case("00:00:00:00")]
#[case("aa:00:01,000")]
#[case("00:00:-1,000")]
#[case("00:00:NaN")]
#[case("00:00:1e30")]
#[case("99999999999999999999:00:00")]
#[case("18446744073709551615:00:00")]
fn test_parse_timestamp_rejects(#[case] stamp: &str) {
    assert_eq!(parse_timestamp(stamp), None);
}

#[test]
fn test_parse_skips_comments_and_blanks() {
    let text = "\
# Episode 1
00:00:00,000  home_empty

00:00:06,400  02_seed/generated
   # indented comment
00:00:12,000\tconnected
";
    let scenes = parse(text).unwrap();
    assert_eq!(
        scenes,
        vec![
            Scene::new("home_empty", Duration::ZERO),
            Scene::new("02_seed/generated", Duration::from_millis(6400)),
            Scene::new("connected", Duration::from_secs(12)),
        ]
    );
}

#[test]
fn test_parse_ignores_lines_without_name() {
    let scenes = parse("00:00:01,000\n00:00:02,000   \n00:00:03,000 overview").unwrap();
    assert_eq!(scenes, vec![Scene::new("overview", Duration::from_secs(3))]);
}

#[test]
fn test_parse_reports_bad_line() {
    let err = parse("00:00:00,000 a\n\nsoon b").unwrap_err();
    assert!(matches!(err, ScenesError::Timestamp { line: 3, ref value } if value == "soon"));
    assert_eq!(err.to_string(), "line 3: invalid timestamp 'soon'");
}

#[test]
fn test_parse_reports_oversized_seconds() {
    let err = parse("00:00:1e30 overview\n").unwrap_err();
    assert!(matches!(err, ScenesError::Timestamp { line: 1, ref value } if value == "00:00:1e30"));
}

#[test]
fn test_load_missing_file() {
    let err = load(Path::new("/nonexistent/ep1.scenes")).unwrap_err();
    assert!(matches!(err, ScenesError::Io { .. }));
}
