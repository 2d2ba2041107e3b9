// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_timing` crate.

use understory_timing::TimerQueue;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Timer {
    Interval,
    Debounce,
}

#[test]
fn empty_queue_has_no_deadline() {
    let mut timers = TimerQueue::<Timer>::new();
    assert!(timers.is_empty());
    assert_eq!(timers.next_deadline(), None);
    assert_eq!(timers.pop_expired(u64::MAX), None);
}

#[test]
fn nothing_fires_before_its_deadline() {
    let mut timers = TimerQueue::new();
    timers.schedule(Timer::Debounce, 50);
    assert_eq!(timers.pop_expired(49), None);
    assert_eq!(timers.pop_expired(50), Some(Timer::Debounce));
    assert!(!timers.is_scheduled(&Timer::Debounce));
}

#[test]
fn repeating_timer_catches_up_after_late_wakeup() {
    let mut timers = TimerQueue::new();
    timers.schedule_repeating(Timer::Interval, 100, 100);

    // Host wakes up late at 350: ticks for 100, 200 and 300 are pending.
    assert_eq!(timers.pop_expired(350), Some(Timer::Interval));
    assert_eq!(timers.pop_expired(350), Some(Timer::Interval));
    assert_eq!(timers.pop_expired(350), Some(Timer::Interval));
    assert_eq!(timers.pop_expired(350), None);
    assert_eq!(timers.next_deadline(), Some(400));
}

#[test]
fn cancel_reports_whether_a_timer_was_pending() {
    let mut timers = TimerQueue::new();
    assert!(!timers.cancel(&Timer::Interval));
    timers.schedule_repeating(Timer::Interval, 10, 10);
    assert!(timers.cancel(&Timer::Interval));
    assert!(timers.is_empty());
}

#[test]
fn earliest_deadline_wins_across_keys() {
    let mut timers = TimerQueue::new();
    timers.schedule_repeating(Timer::Interval, 300, 300);
    timers.restart(Timer::Debounce, 0, 50);
    assert_eq!(timers.next_deadline(), Some(50));
    assert_eq!(timers.pop_expired(400), Some(Timer::Debounce));
    assert_eq!(timers.pop_expired(400), Some(Timer::Interval));
    assert_eq!(timers.pop_expired(400), None);
}

#[test]
fn clear_drops_everything() {
    let mut timers = TimerQueue::new();
    timers.schedule(Timer::Debounce, 1);
    timers.schedule(Timer::Interval, 2);
    timers.clear();
    assert_eq!(timers.len(), 0);
    assert_eq!(timers.pop_expired(10), None);
}
