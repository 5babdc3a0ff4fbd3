//! Integration tests for BlinkScheduler

mod common;
use common::*;

use lap_timer::{BlinkScheduler, BlinkState};

fn scheduler() -> BlinkScheduler<TestInstant> {
    BlinkScheduler::new(TestDuration(250), 3)
}

#[test]
fn new_scheduler_is_idle_and_visible() {
    let blink = scheduler();
    assert_eq!(blink.state(), BlinkState::Idle);
    assert!(!blink.is_active());
    assert!(blink.is_visible());
}

#[test]
fn full_sequence_visits_six_phases_then_settles() {
    // BEHAVIOR: count 3 -> phases 0..=5 over six intervals, then Idle
    let mut blink = scheduler();
    blink.restart(TestInstant(10_000));

    let mut visited = Vec::new();
    let mut visibility = Vec::new();
    let mut now = 10_000;
    while blink.is_active() {
        visited.push(blink.phase().unwrap());
        visibility.push(blink.is_visible());
        now += 251;
        blink.tick(TestInstant(now));
    }

    assert_eq!(visited, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(visibility, vec![true, false, true, false, true, false]);
    assert_eq!(now, 10_000 + 6 * 251);
    assert!(blink.is_visible());
}

#[test]
fn frequent_ticks_only_toggle_after_interval() {
    let mut blink = scheduler();
    blink.restart(TestInstant(0));

    for t in 1..=250 {
        blink.tick(TestInstant(t));
        assert_eq!(blink.phase(), Some(0), "tick at {}", t);
    }

    blink.tick(TestInstant(251));
    assert_eq!(
        blink.state(),
        BlinkState::Blinking {
            anchor: TestInstant(251),
            phase: 1
        }
    );
}

#[test]
fn late_tick_advances_a_single_phase() {
    // A stalled loop does not skip phases; it just toggles once
    let mut blink = scheduler();
    blink.restart(TestInstant(0));
    blink.tick(TestInstant(5_000));
    assert_eq!(blink.phase(), Some(1));
}

#[test]
fn idle_ticks_are_ignored() {
    let mut blink = scheduler();
    for t in [0, 300, 600, 10_000] {
        blink.tick(TestInstant(t));
        assert_eq!(blink.state(), BlinkState::Idle);
    }
}

#[test]
fn large_blink_count_runs_every_phase() {
    // BEHAVIOR: count 200 -> 400 phases, ending on a visible Idle
    let mut blink = BlinkScheduler::new(TestDuration(250), 200);
    blink.restart(TestInstant(0));

    let mut phases = 0u32;
    let mut last_phase = 0;
    let mut now = 0;
    while let Some(phase) = blink.phase() {
        phases += 1;
        last_phase = phase;
        now += 251;
        blink.tick(TestInstant(now));
    }

    assert_eq!(phases, 400);
    assert_eq!(last_phase, 399);
    assert!(blink.is_visible());
}
