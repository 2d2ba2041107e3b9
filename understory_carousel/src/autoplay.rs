// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplay: a repeating timer that advances the carousel unless something
//! (hover, focus, a gesture, a hidden document, an explicit pause) holds it.
//!
//! Timing is delegated to [`understory_timing::TimerQueue`]; this module only
//! decides when the interval is armed and where each tick goes.

use understory_timing::TimerQueue;

use crate::settings::Settings;
use crate::signed;

/// Timers a carousel schedules on its queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CarouselTimer {
    /// The autoplay interval.
    Autoplay,
    /// Trailing edge of the resize debounce.
    Resize,
}

/// Quiet period after the last resize before the layout is re-evaluated.
pub const RESIZE_DEBOUNCE_MS: u64 = 50;

/// Which way a finite autoplay sweep is heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepDirection {
    /// Towards the last slide.
    #[default]
    Forward,
    /// Back towards the first slide.
    Backward,
}

/// Pause bookkeeping and sweep direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutoplayDriver {
    /// Explicitly paused (or autoplay disabled).
    pub paused: bool,
    /// Held by hover, a gesture, or a hidden document.
    pub interrupted: bool,
    /// Held because the carousel has focus.
    pub focussed: bool,
    /// Current sweep direction (finite carousels only).
    pub direction: SweepDirection,
}

impl AutoplayDriver {
    /// Creates a driver that is paused unless `settings.autoplay` is on.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            paused: !settings.autoplay,
            ..Self::default()
        }
    }

    /// Returns `true` if nothing holds the next tick.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.paused && !self.interrupted && !self.focussed
    }

    /// Clears every hold, as an explicit `play` does.
    pub fn resume(&mut self) {
        self.paused = false;
        self.focussed = false;
        self.interrupted = false;
    }

    /// Where the next tick should navigate, or `None` if it is held.
    ///
    /// Infinite carousels always step forward. Finite ones sweep back and
    /// forth, turning around one slide before either end.
    pub fn next_target(
        &mut self,
        current: usize,
        settings: &Settings,
        slide_count: usize,
    ) -> Option<isize> {
        if !self.is_running() {
            return None;
        }
        let current_i = signed(current);
        let scroll = signed(settings.slides_to_scroll.max(1));
        let mut target = current_i + scroll;

        if !settings.infinite {
            match self.direction {
                SweepDirection::Forward if current + 2 == slide_count => {
                    self.direction = SweepDirection::Backward;
                }
                SweepDirection::Forward => {}
                SweepDirection::Backward => {
                    target = current_i - scroll;
                    if current == 1 {
                        self.direction = SweepDirection::Forward;
                    }
                }
            }
        }
        Some(target)
    }

    /// (Re)arms the interval starting at `now`, if there is anything to scroll.
    pub fn arm(
        &self,
        timers: &mut TimerQueue<CarouselTimer>,
        now: u64,
        settings: &Settings,
        slide_count: usize,
    ) {
        timers.cancel(&CarouselTimer::Autoplay);
        if settings.autoplay && slide_count > settings.slides_to_show {
            let period = settings.autoplay_speed.max(1);
            timers.schedule_repeating(CarouselTimer::Autoplay, now.saturating_add(period), period);
        }
    }

    /// Stops the interval.
    pub fn disarm(timers: &mut TimerQueue<CarouselTimer>) {
        timers.cancel(&CarouselTimer::Autoplay);
    }
}

#[cfg(test)]
mod tests {
    use understory_timing::TimerQueue;

    use super::{AutoplayDriver, CarouselTimer, SweepDirection};
    use crate::settings::Settings;

    fn autoplay(infinite: bool) -> Settings {
        Settings {
            autoplay: true,
            infinite,
            ..Settings::default()
        }
    }

    #[test]
    fn holds_block_ticks() {
        let settings = autoplay(true);
        let mut driver = AutoplayDriver::new(&settings);
        assert_eq!(driver.next_target(0, &settings, 5), Some(1));

        driver.interrupted = true;
        assert_eq!(driver.next_target(0, &settings, 5), None);
        driver.resume();
        driver.focussed = true;
        assert_eq!(driver.next_target(0, &settings, 5), None);

        let off = AutoplayDriver::new(&Settings::default());
        assert!(!off.is_running());
    }

    #[test]
    fn finite_sweep_turns_around() {
        let settings = autoplay(false);
        let mut driver = AutoplayDriver::new(&settings);
        let mut current = 0;
        let mut visited = alloc::vec::Vec::new();
        for _ in 0..8 {
            let target = driver.next_target(current, &settings, 4).unwrap();
            current = usize::try_from(target).unwrap();
            visited.push(current);
        }
        assert_eq!(visited, [1, 2, 3, 2, 1, 0, 1, 2]);
        assert_eq!(driver.direction, SweepDirection::Forward);
    }

    #[test]
    fn arming_requires_something_to_scroll() {
        let settings = autoplay(true);
        let driver = AutoplayDriver::new(&settings);
        let mut timers = TimerQueue::new();

        driver.arm(&mut timers, 100, &settings, 1);
        assert!(!timers.is_scheduled(&CarouselTimer::Autoplay));

        driver.arm(&mut timers, 100, &settings, 3);
        assert_eq!(timers.deadline_of(&CarouselTimer::Autoplay), Some(3_100));

        AutoplayDriver::disarm(&mut timers);
        assert!(timers.is_empty());
    }
}
