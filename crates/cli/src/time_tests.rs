// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn test_system_clock_starts_near_zero() {
    let clock = SystemClock::new();
    assert!(clock.now_millis() < 1_000);
}

#[tokio::test]
async fn test_system_clock_is_monotonic() {
    let clock = SystemClock::new();
    let before = clock.now();
    clock.sleep(Duration::from_millis(5)).await;
    assert!(clock.now() >= before + Duration::from_millis(5));
}

#[test]
fn test_fake_clock_new() {
    let clock = FakeClock::new(1000);
    assert_eq!(clock.now_millis(), 1000);
}

#[test]
fn test_fake_clock_advance() {
    let clock = FakeClock::new(1000);
    clock.advance(Duration::from_millis(500));
    clock.advance_ms(250);
    assert_eq!(clock.now_millis(), 1750);
}

#[test]
fn test_fake_clock_set() {
    let clock = FakeClock::new(1000);
    clock.set(5000);
    assert_eq!(clock.now_millis(), 5000);
}

#[tokio::test]
async fn test_fake_clock_sleep_auto_advances() {
    let clock = FakeClock::at_epoch();
    clock.sleep(Duration::from_secs(3)).await;
    assert_eq!(clock.now_millis(), 3000);
}

#[tokio::test]
async fn test_fake_clock_without_auto_advance() {
    let clock = FakeClock::at_epoch();
    let frozen = clock.without_auto_advance();
    assert!(!frozen.auto_advance());

    frozen.sleep(Duration::from_secs(3)).await;
    assert_eq!(clock.now_millis(), 0);

    // Shares the underlying time
    clock.advance_ms(10);
    assert_eq!(frozen.now_millis(), 10);
}

#[test]
fn test_since_saturates() {
    let clock = FakeClock::new(100);
    assert_eq!(clock.since(Duration::from_millis(40)), Duration::from_millis(60));
    assert_eq!(clock.since(Duration::from_millis(400)), Duration::ZERO);
}

#[test]
fn test_clock_handle_variants() {
    let handle = ClockHandle::fake_at_epoch();
    assert!(handle.is_fake());
    handle.as_fake().unwrap().advance_ms(42);
    assert_eq!(handle.now_millis(), 42);

    let system = ClockHandle::system();
    assert!(!system.is_fake());
    assert!(system.as_fake().is_none());
}
