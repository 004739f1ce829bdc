// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use proptest::prelude::*;
use tempfile::TempDir;

fn shots(names: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in names {
        std::fs::write(dir.path().join(name), b"png").unwrap();
    }
    dir
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[test]
fn test_find_by_artifact_name() {
    let dir = shots(&["000_01_intro_home_empty.png", "001_02_seed_generated.png"]);
    let found = find_screenshot(dir.path(), "generated").unwrap();
    assert_eq!(found.file_name().unwrap(), "001_02_seed_generated.png");
}

#[test]
fn test_find_by_chapter_and_name() {
    let dir = shots(&["004_13_voting_tab_register.png", "009_12_msvault_tab_register.png"]);
    let found = find_screenshot(dir.path(), "12_msvault/tab_register").unwrap();
    assert_eq!(found.file_name().unwrap(), "009_12_msvault_tab_register.png");
}

#[test]
fn test_first_sorted_match_wins() {
    let dir = shots(&["007_13_voting_overview.png", "002_04_dashboard_overview.png"]);
    let found = find_screenshot(dir.path(), "overview").unwrap();
    assert_eq!(found.file_name().unwrap(), "002_04_dashboard_overview.png");
}

#[test]
fn test_find_missing() {
    let dir = shots(&["000_01_intro_home_empty.png"]);
    assert_eq!(find_screenshot(dir.path(), "connected"), None);
    assert_eq!(find_screenshot(dir.path(), "home_empty.png"), None);
}

#[test]
fn test_find_in_directory_with_glob_characters() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("run [1]");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join("000_01_intro_home_empty.png"), b"png").unwrap();
    assert!(find_screenshot(&dir, "home_empty").is_some());
}

#[test]
fn test_durations_run_to_next_scene_and_audio_end() {
    let dir = shots(&["000_a_one.png", "001_a_two.png", "002_a_three.png"]);
    let scenes = vec![
        Scene::new("one", secs(0.0)),
        Scene::new("two", secs(4.0)),
        Scene::new("three", secs(10.5)),
    ];

    let timeline = Timeline::build(&scenes, secs(20.0), dir.path()).unwrap();

    let durations: Vec<Duration> = timeline.frames().iter().map(|f| f.duration).collect();
    assert_eq!(durations, vec![secs(4.0), secs(6.5), secs(9.5)]);
    assert_eq!(timeline.duration(), secs(20.0));
}

#[test]
fn test_short_scenes_are_floored() {
    let dir = shots(&["000_a_one.png", "001_a_two.png"]);
    let scenes = vec![Scene::new("one", secs(3.0)), Scene::new("two", secs(3.1))];

    let timeline = Timeline::build(&scenes, secs(2.0), dir.path()).unwrap();

    assert_eq!(timeline.frames()[0].duration, MIN_SCENE);
    assert_eq!(timeline.frames()[1].duration, MIN_SCENE);
}

#[test]
fn test_missing_scene_extends_previous_frame() {
    let dir = shots(&["000_a_one.png", "002_a_three.png"]);
    let scenes = vec![
        Scene::new("one", secs(0.0)),
        Scene::new("two", secs(2.0)),
        Scene::new("three", secs(5.0)),
    ];

    let timeline = Timeline::build(&scenes, secs(8.0), dir.path()).unwrap();

    assert_eq!(timeline.frames().len(), 2);
    assert_eq!(timeline.frames()[0].duration, secs(5.0));
    let missing: Vec<&str> = timeline.missing().map(|s| s.scene.as_str()).collect();
    assert_eq!(missing, vec!["two"]);
}

#[test]
fn test_leading_missing_scene_extends_first_frame() {
    let dir = shots(&["001_a_two.png"]);
    let scenes = vec![Scene::new("one", secs(0.0)), Scene::new("two", secs(3.0))];

    let timeline = Timeline::build(&scenes, secs(7.0), dir.path()).unwrap();

    assert_eq!(timeline.frames()[0].duration, secs(7.0));
}

#[test]
fn test_no_scenes() {
    let dir = shots(&[]);
    let err = Timeline::build(&[], secs(1.0), dir.path()).unwrap_err();
    assert!(matches!(err, TimelineError::NoScenes));
}

#[test]
fn test_no_matches() {
    let dir = shots(&["000_a_one.png"]);
    let err = Timeline::build(&[Scene::new("zzz", Duration::ZERO)], secs(5.0), dir.path())
        .unwrap_err();
    assert!(matches!(err, TimelineError::NoMatches { .. }));
}

#[test]
fn test_manifest_repeats_last_file() {
    let dir = shots(&["000_a_one.png", "001_a_two.png"]);
    let scenes = vec![Scene::new("one", secs(0.0)), Scene::new("two", secs(1.25))];
    let timeline = Timeline::build(&scenes, secs(3.0), dir.path()).unwrap();

    let manifest = timeline.concat_manifest();
    let lines: Vec<&str> = manifest.lines().collect();

    let one = dir.path().join("000_a_one.png");
    let two = dir.path().join("001_a_two.png");
    assert_eq!(
        lines,
        vec![
            format!("file '{}'", one.display()),
            "duration 1.250".to_string(),
            format!("file '{}'", two.display()),
            "duration 1.750".to_string(),
            format!("file '{}'", two.display()),
        ]
    );
}

#[test]
fn test_manifest_escapes_quotes() {
    assert_eq!(quote(Path::new("/tmp/it's.png")), r"/tmp/it'\''s.png");
}

proptest! {
    #[test]
    fn prop_fully_matched_timeline_covers_audio(gaps in prop::collection::vec(500u64..5_000, 1..8), tail in 500u64..5_000) {
        let names: Vec<String> = (0..gaps.len()).map(|i| format!("{i:03}_c_s{i}.png")).collect();
        let dir = shots(&names.iter().map(String::as_str).collect::<Vec<_>>());

        let mut start = 0;
        let mut scenes = Vec::new();
        for (i, gap) in gaps.iter().enumerate() {
            scenes.push(Scene::new(format!("s{i}"), Duration::from_millis(start)));
            start += gap;
        }
        let audio = Duration::from_millis(start - gaps[gaps.len() - 1] + tail);

        let timeline = Timeline::build(&scenes, audio, dir.path()).unwrap();
        prop_assert_eq!(timeline.frames().len(), gaps.len());
        prop_assert_eq!(timeline.duration(), audio);
    }
}
