// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives.
//!
//! UI components often need "call me back in N milliseconds" behavior
//! (autoplay intervals, debounced resize handling, long-press detection) but
//! should not own a clock or an event loop. This crate provides a small
//! [`TimerQueue`] that stores deadlines keyed by a caller-chosen type and lets
//! the host drive it:
//!
//! - The host reports the current time by calling [`TimerQueue::pop_expired`]
//!   whenever it wakes up.
//! - [`TimerQueue::next_deadline`] tells the host when it should wake up next.
//! - One-shot timers fire once; repeating timers are re-armed by their period.
//!
//! Time is expressed as `u64` milliseconds on a host-defined monotonic clock.
//! The queue never reads the time itself.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)]
//! enum Timer {
//!     Autoplay,
//!     Resize,
//! }
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule_repeating(Timer::Autoplay, 3_000, 3_000);
//!
//! // A burst of resize events only keeps the trailing edge.
//! timers.restart(Timer::Resize, 100, 50);
//! timers.restart(Timer::Resize, 120, 50);
//! assert_eq!(timers.deadline_of(&Timer::Resize), Some(170));
//!
//! assert_eq!(timers.pop_expired(170), Some(Timer::Resize));
//! assert_eq!(timers.pop_expired(170), None);
//!
//! assert_eq!(timers.pop_expired(3_000), Some(Timer::Autoplay));
//! // Repeating timers are re-armed.
//! assert_eq!(timers.next_deadline(), Some(6_000));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

#[derive(Clone, Debug)]
struct Entry<K> {
    key: K,
    deadline: u64,
    period: Option<u64>,
    seq: u64,
}

/// A queue of keyed deadlines driven by a host clock.
///
/// Each key has at most one pending deadline: scheduling an already scheduled
/// key replaces its deadline. Expired timers are returned earliest first;
/// timers sharing a deadline fire in the order they were scheduled.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    entries: Vec<Entry<K>>,
    seq: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            seq: 0,
        }
    }
}

impl<K: Copy + PartialEq> TimerQueue<K> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Schedules a one-shot timer for `key` at `deadline`.
    pub fn schedule(&mut self, key: K, deadline: u64) {
        self.insert(key, deadline, None);
    }

    /// Schedules a repeating timer for `key`, first firing at `first_deadline`
    /// and then every `period` milliseconds.
    ///
    /// A zero period is treated as a one-shot timer.
    pub fn schedule_repeating(&mut self, key: K, first_deadline: u64, period: u64) {
        let period = (period > 0).then_some(period);
        self.insert(key, first_deadline, period);
    }

    /// Restarts a debounce window: `key` fires `delay` milliseconds after `now`,
    /// discarding any earlier deadline for the same key.
    pub fn restart(&mut self, key: K, now: u64, delay: u64) {
        self.schedule(key, now.saturating_add(delay));
    }

    /// Cancels the timer for `key`, returning `true` if one was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.key != *key);
        before != self.entries.len()
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` if `key` has a pending deadline.
    #[must_use]
    pub fn is_scheduled(&self, key: &K) -> bool {
        self.entries.iter().any(|entry| entry.key == *key)
    }

    /// Returns the pending deadline for `key`, if any.
    #[must_use]
    pub fn deadline_of(&self, key: &K) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| entry.deadline)
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Pops the earliest timer whose deadline is at or before `now`.
    ///
    /// Repeating timers are re-armed one period after their previous deadline
    /// (not after `now`), so a host that wakes late sees the missed ticks on
    /// subsequent calls.
    pub fn pop_expired(&mut self, now: u64) -> Option<K> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))
            .map(|(index, _)| index)?;

        let key = self.entries[position].key;
        match self.entries[position].period {
            Some(period) => {
                self.seq += 1;
                let entry = &mut self.entries[position];
                entry.deadline = entry.deadline.saturating_add(period);
                entry.seq = self.seq;
            }
            None => {
                self.entries.swap_remove(position);
            }
        }
        Some(key)
    }

    fn insert(&mut self, key: K, deadline: u64, period: Option<u64>) {
        self.seq += 1;
        let seq = self.seq;
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.key == key) {
            entry.deadline = deadline;
            entry.period = period;
            entry.seq = seq;
            return;
        }
        self.entries.push(Entry {
            key,
            deadline,
            period,
            seq,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;

    #[test]
    fn scheduling_same_key_replaces_deadline() {
        let mut timers = TimerQueue::new();
        timers.schedule(1_u8, 100);
        timers.schedule(1_u8, 40);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.deadline_of(&1), Some(40));
    }

    #[test]
    fn zero_period_behaves_as_one_shot() {
        let mut timers = TimerQueue::new();
        timers.schedule_repeating(7_u8, 10, 0);
        assert_eq!(timers.pop_expired(10), Some(7));
        assert!(timers.is_empty());
    }

    #[test]
    fn ties_fire_in_schedule_order() {
        let mut timers = TimerQueue::new();
        timers.schedule('b', 5);
        timers.schedule('a', 5);
        assert_eq!(timers.pop_expired(5), Some('b'));
        assert_eq!(timers.pop_expired(5), Some('a'));
    }
}
