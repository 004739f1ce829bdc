// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn chrome_returns_none_when_unset() {
    std::env::remove_var(WALKTHROUGH_CHROME);
    assert_eq!(chrome(), None);
}

#[test]
#[serial]
fn chrome_returns_path_when_set() {
    std::env::set_var(WALKTHROUGH_CHROME, "/opt/chromium/chrome");
    let result = chrome();
    std::env::remove_var(WALKTHROUGH_CHROME);
    assert_eq!(result, Some(PathBuf::from("/opt/chromium/chrome")));
}

#[test]
#[serial]
fn chrome_ignores_empty_value() {
    std::env::set_var(WALKTHROUGH_CHROME, "");
    let result = chrome();
    std::env::remove_var(WALKTHROUGH_CHROME);
    assert_eq!(result, None);
}

#[test]
#[serial]
fn ready_timeout_returns_none_when_unset() {
    std::env::remove_var(WALKTHROUGH_READY_TIMEOUT_SECS);
    assert_eq!(ready_timeout_secs(), Ok(None));
}

#[test]
#[serial]
fn ready_timeout_parses_valid_u64() {
    std::env::set_var(WALKTHROUGH_READY_TIMEOUT_SECS, "90");
    let result = ready_timeout_secs();
    std::env::remove_var(WALKTHROUGH_READY_TIMEOUT_SECS);
    assert_eq!(result, Ok(Some(90)));
}

#[test]
#[serial]
fn ready_timeout_treats_empty_as_unset() {
    std::env::set_var(WALKTHROUGH_READY_TIMEOUT_SECS, " ");
    let result = ready_timeout_secs();
    std::env::remove_var(WALKTHROUGH_READY_TIMEOUT_SECS);
    assert_eq!(result, Ok(None));
}

#[test]
#[serial]
fn ready_timeout_rejects_garbage() {
    std::env::set_var(WALKTHROUGH_READY_TIMEOUT_SECS, "soon");
    let result = ready_timeout_secs();
    std::env::remove_var(WALKTHROUGH_READY_TIMEOUT_SECS);
    let err = result.unwrap_err();
    assert_eq!(err.value, "soon");
    assert_eq!(
        err.to_string(),
        "WALKTHROUGH_READY_TIMEOUT_SECS must be a whole number (got 'soon')"
    );
}

#[test]
fn names_match_variables() {
    assert_eq!(WALKTHROUGH_CHROME, "WALKTHROUGH_CHROME");
    assert_eq!(
        WALKTHROUGH_READY_TIMEOUT_SECS,
        "WALKTHROUGH_READY_TIMEOUT_SECS"
    );
}
