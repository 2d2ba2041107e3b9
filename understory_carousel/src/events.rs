// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications emitted by a carousel.

use alloc::vec::Vec;

/// Direction of a recognized swipe, in the user's reading direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Content pulled towards the start; advances.
    Left,
    /// Content pulled towards the end; goes back.
    Right,
    /// Vertical swipe that advances.
    Down,
    /// Vertical swipe that goes back.
    Up,
    /// Mostly vertical movement on a horizontal carousel; ignored.
    Vertical,
}

/// Something observers may want to react to.
///
/// Events are fire-and-forget: the engine never inspects how they are handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CarouselEvent {
    /// The carousel finished its first initialization.
    Init,
    /// A transition from `from` to `to` is starting.
    BeforeChange {
        /// Index being left.
        from: usize,
        /// Index being shown.
        to: usize,
    },
    /// A transition finished and `index` is current.
    AfterChange {
        /// The new current index.
        index: usize,
    },
    /// The active breakpoint changed; `None` means the base settings apply again.
    Breakpoint(Option<u32>),
    /// A swipe was recognized.
    Swipe(SwipeDirection),
    /// A drag pushed against a finite end of the track.
    Edge(SwipeDirection),
    /// The track was snapped into position and dimensions were refreshed.
    SetPosition,
    /// Focus should move to this real slide.
    FocusSlide(usize),
    /// The carousel is being torn down, optionally because of a breakpoint.
    Unslick(Option<u32>),
    /// The carousel was destroyed.
    Destroy,
    /// The carousel was rebuilt after a structural or option change.
    ReInit,
}

/// Receiver of [`CarouselEvent`]s.
pub trait EventBus {
    /// Delivers one event.
    fn emit(&mut self, event: CarouselEvent);
}

impl EventBus for Vec<CarouselEvent> {
    fn emit(&mut self, event: CarouselEvent) {
        self.push(event);
    }
}

/// Discards every event.
impl EventBus for () {
    fn emit(&mut self, _event: CarouselEvent) {}
}

impl<E: EventBus + ?Sized> EventBus for &mut E {
    fn emit(&mut self, event: CarouselEvent) {
        (**self).emit(event);
    }
}
