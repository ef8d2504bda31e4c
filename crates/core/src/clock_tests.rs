// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_clock_advance_is_visible_through_clones() {
    let clock = FakeClock::new();
    let shared = clock.clone();
    let start = clock.now();

    shared.advance(Duration::from_secs(45));

    assert_eq!(clock.elapsed_since(start), Duration::from_secs(45));
}

#[test]
fn elapsed_since_future_instant_saturates() {
    let clock = FakeClock::new();
    let later = clock.now() + Duration::from_secs(5);
    assert_eq!(clock.elapsed_since(later), Duration::ZERO);
}

#[test]
fn system_clock_does_not_go_backwards() {
    let clock = SystemClock;
    let t1 = clock.now();
    let t2 = clock.now();
    assert!(t2 >= t1);
}
