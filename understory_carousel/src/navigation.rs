// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation state machine.
//!
//! A [`Navigator`] owns the current index and at most one in-flight
//! transition. Requests are first turned into a [`Plan`] without touching any
//! state; the carousel then carries the plan out (events, animator calls) and
//! reports back through [`Navigator::begin`] and [`Navigator::complete`].
//!
//! The current index only changes when a transition completes.
//! [`Navigator::position`] reports where the carousel is heading, which is what
//! relative moves are based on while a transition is still running.
//!
//! ```rust
//! use understory_carousel::Settings;
//! use understory_carousel::navigation::{Navigator, Plan};
//!
//! let settings = Settings::default();
//! let mut nav = Navigator::new(0);
//!
//! let plan = nav.plan(-1, true, &settings, 5, false);
//! assert_eq!(plan, Plan::Change { from: 0, to: 4, animate: true });
//!
//! let done = nav.begin(0, 4);
//! assert_eq!(nav.position(), 4);
//! assert_eq!(nav.current(), 0);
//!
//! nav.complete(done);
//! assert_eq!(nav.current(), 4);
//! ```

use crate::animator::Completion;
use crate::paging::dot_count;
use crate::settings::Settings;
use crate::signed;

/// What a navigation request should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plan {
    /// A transition is running and requests must wait for it.
    Ignored,
    /// Fading to the slide that is already shown.
    Unchanged,
    /// Out of range in a finite, fading carousel; nothing happens.
    Hold,
    /// Out of range in a finite carousel: bounce back to the current index.
    Reaffirm {
        /// Whether the bounce is animated.
        animate: bool,
    },
    /// Move to a new index.
    Change {
        /// Index being left.
        from: usize,
        /// Normalized destination.
        to: usize,
        /// Whether the move is animated.
        animate: bool,
    },
}

/// An in-flight transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Identifier matching the [`Completion`] token handed to the animator.
    pub id: u64,
    /// Index being left.
    pub from: usize,
    /// Index that becomes current on completion.
    pub to: usize,
}

/// Current index plus the animation guard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    pending: Option<Transition>,
    next_id: u64,
}

impl Navigator {
    /// Creates an idle navigator at `current`.
    #[must_use]
    pub fn new(current: usize) -> Self {
        Self {
            current,
            pending: None,
            next_id: 0,
        }
    }

    /// Index of the last completed transition.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Destination of the running transition, or the current index when idle.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pending.map_or(self.current, |pending| pending.to)
    }

    /// Returns `true` while a transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    /// The running transition, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Transition> {
        self.pending
    }

    /// Decides what a request for `target` should do.
    ///
    /// `animate` is `false` for requests that should jump. `linked` marks
    /// carousels that drive a peer (it changes how pages are counted).
    #[must_use]
    pub fn plan(
        &self,
        target: isize,
        animate: bool,
        settings: &Settings,
        slide_count: usize,
        linked: bool,
    ) -> Plan {
        if slide_count == 0 || (self.is_animating() && settings.wait_for_animate) {
            return Plan::Ignored;
        }
        let position = self.position();
        if settings.fade && signed(position) == target {
            return Plan::Unchanged;
        }

        let scrollable = slide_count > settings.slides_to_show;
        if !settings.infinite && out_of_bounds(target, settings, slide_count, linked) {
            return if settings.fade {
                Plan::Hold
            } else {
                Plan::Reaffirm {
                    animate: animate && scrollable,
                }
            };
        }

        Plan::Change {
            from: position,
            to: normalize(target, slide_count, settings.slides_to_scroll),
            animate: animate && (settings.fade || scrollable),
        }
    }

    /// Starts a transition, superseding any running one.
    pub fn begin(&mut self, from: usize, to: usize) -> Completion {
        self.next_id += 1;
        self.pending = Some(Transition {
            id: self.next_id,
            from,
            to,
        });
        Completion::new(self.next_id)
    }

    /// Finishes the running transition if `done` belongs to it.
    ///
    /// Returns `None` for stale or foreign tokens.
    pub fn complete(&mut self, done: Completion) -> Option<Transition> {
        let pending = self.pending.filter(|pending| pending.id == done.id())?;
        self.pending = None;
        self.current = pending.to;
        Some(pending)
    }

    /// Drops the running transition without completing it.
    pub fn abandon(&mut self) -> Option<Transition> {
        self.pending.take()
    }

    /// Jumps to `current`, dropping any running transition.
    pub fn reset(&mut self, current: usize) {
        self.pending = None;
        self.current = current;
    }
}

/// Whether a finite carousel must refuse to move to `target`.
#[must_use]
pub fn out_of_bounds(target: isize, settings: &Settings, slide_count: usize, linked: bool) -> bool {
    if target < 0 {
        return true;
    }
    let scroll = signed(settings.slides_to_scroll.max(1));
    let last = if settings.center_mode {
        signed(slide_count) - scroll
    } else {
        dot_count(settings, slide_count, linked).saturating_mul(scroll)
    };
    target > last
}

/// Folds a raw target into `0..slide_count`.
///
/// One loop past either end maps onto the equivalent real slide; when the
/// sequence does not divide evenly into pages the wrap lands on the last page
/// boundary going backwards and on `0` going forwards. Anything further away
/// wraps around as many times as needed.
#[must_use]
pub fn normalize(target: isize, slide_count: usize, slides_to_scroll: usize) -> usize {
    if slide_count == 0 {
        return 0;
    }
    let count = signed(slide_count);
    let scroll = slides_to_scroll.max(1);
    let uneven = !slide_count.is_multiple_of(scroll);

    let wrapped = if target < 0 {
        if uneven {
            count - signed(slide_count % scroll)
        } else {
            count + target
        }
    } else if target >= count {
        if uneven { 0 } else { target - count }
    } else {
        target
    };
    usize::try_from(wrapped.rem_euclid(count)).unwrap_or(0)
}
