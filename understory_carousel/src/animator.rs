// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between navigation and whatever actually moves pixels.
//!
//! The engine decides *where* the track goes and hands an [`Animator`] a
//! single-use [`Completion`] for every transition it starts. The animator
//! either returns the token immediately (the transition completed
//! synchronously) or keeps it and later passes it back through
//! [`Carousel::finish`](crate::Carousel::finish).
//!
//! ```rust
//! use understory_carousel::animator::{Animator, InstantAnimator};
//!
//! let mut animator = InstantAnimator::default();
//! animator.place_track(-200.0);
//! assert_eq!(animator.track_position(), Some(-200.0));
//! ```

/// Proof that a transition finished.
///
/// Tokens are not `Clone`: each transition can be completed at most once.
/// Tokens for transitions that were cancelled or superseded are ignored.
#[derive(Debug, PartialEq, Eq)]
pub struct Completion {
    id: u64,
}

impl Completion {
    pub(crate) fn new(id: u64) -> Self {
        Self { id }
    }

    /// Identifier of the transition this token completes.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A track movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackMotion {
    /// Target position along the layout axis, already mirrored for right-to-left tracks.
    pub offset: f64,
    /// Duration in milliseconds.
    pub duration_ms: u64,
}

/// A cross-fade between two real slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeMotion {
    /// Slide fading out.
    pub from: usize,
    /// Slide fading in.
    pub to: usize,
    /// Duration in milliseconds.
    pub duration_ms: u64,
}

/// Moves the track and fades slides on the engine's behalf.
pub trait Animator {
    /// Starts moving the track.
    ///
    /// Return `Some(done)` if the movement already finished; otherwise keep the
    /// token and pass it to [`Carousel::finish`](crate::Carousel::finish) later.
    fn animate_track(&mut self, motion: TrackMotion, done: Completion) -> Option<Completion>;

    /// Moves the track immediately, without a transition.
    fn place_track(&mut self, offset: f64);

    /// Starts a cross-fade. Same contract as [`Animator::animate_track`].
    fn animate_fade(&mut self, motion: FadeMotion, done: Completion) -> Option<Completion>;

    /// Shows `current` fully and hides the other slides, without a transition.
    fn place_fades(&mut self, current: usize);

    /// Resizes the list to fit `slide` (adaptive height).
    fn fit_height(&mut self, slide: usize, duration_ms: u64) {
        let _ = (slide, duration_ms);
    }

    /// Abandons the running transition; its token will never be honored.
    fn cancel(&mut self);
}

impl<A: Animator + ?Sized> Animator for &mut A {
    fn animate_track(&mut self, motion: TrackMotion, done: Completion) -> Option<Completion> {
        (**self).animate_track(motion, done)
    }

    fn place_track(&mut self, offset: f64) {
        (**self).place_track(offset);
    }

    fn animate_fade(&mut self, motion: FadeMotion, done: Completion) -> Option<Completion> {
        (**self).animate_fade(motion, done)
    }

    fn place_fades(&mut self, current: usize) {
        (**self).place_fades(current);
    }

    fn fit_height(&mut self, slide: usize, duration_ms: u64) {
        (**self).fit_height(slide, duration_ms);
    }

    fn cancel(&mut self) {
        (**self).cancel();
    }
}

/// An animator without transitions: every motion lands immediately.
///
/// Useful for headless hosts, tests, and users who prefer reduced motion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InstantAnimator {
    track: Option<f64>,
    visible: Option<usize>,
    height_of: Option<usize>,
}

impl InstantAnimator {
    /// Last track position, if the track was ever placed.
    #[must_use]
    pub fn track_position(&self) -> Option<f64> {
        self.track
    }

    /// Slide shown by the last fade, if any.
    #[must_use]
    pub fn visible_slide(&self) -> Option<usize> {
        self.visible
    }

    /// Slide the list height was last fitted to.
    #[must_use]
    pub fn height_slide(&self) -> Option<usize> {
        self.height_of
    }
}

impl Animator for InstantAnimator {
    fn animate_track(&mut self, motion: TrackMotion, done: Completion) -> Option<Completion> {
        self.track = Some(motion.offset);
        Some(done)
    }

    fn place_track(&mut self, offset: f64) {
        self.track = Some(offset);
    }

    fn animate_fade(&mut self, motion: FadeMotion, done: Completion) -> Option<Completion> {
        self.visible = Some(motion.to);
        Some(done)
    }

    fn place_fades(&mut self, current: usize) {
        self.visible = Some(current);
    }

    fn fit_height(&mut self, slide: usize, _duration_ms: u64) {
        self.height_of = Some(slide);
    }

    fn cancel(&mut self) {}
}
