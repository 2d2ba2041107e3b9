// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: a headless carousel engine.
//!
//! This crate implements the behavior of a classic slide carousel (looping
//! tracks with clone slides, paging, swipe and drag, autoplay, responsive
//! breakpoints, linked carousels) without touching any rendering layer. The
//! host supplies measurements and input, and receives track offsets through an
//! [`Animator`](animator::Animator) and notifications through an
//! [`EventBus`].
//!
//! The crate is split into pure building blocks and one controller:
//!
//! - [`settings`]: [`Settings`], partial [`SettingsOverlay`]s, and validation.
//! - [`geometry`]: slide widths and track offsets for a logical index.
//! - [`clones`]: the clone blocks that make an infinite track loop.
//! - [`paging`]: navigable indexes, dot counts, and relative steps.
//! - [`flags`]: per-slide active/current/center flags.
//! - [`navigation`]: the animation-guarded navigation state machine.
//! - [`gesture`]: swipe and drag interpretation.
//! - [`breakpoints`]: width thresholds mapped to settings overlays.
//! - [`autoplay`]: the autoplay interval and its pause reasons.
//! - [`sequence`]: the slide list and its structural edits.
//! - [`carousel`]: [`Carousel`], which wires all of the above together.
//! - [`group`]: instance identity and linked ("nav-for") carousels.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_carousel::animator::InstantAnimator;
//! use understory_carousel::geometry::Metrics;
//! use understory_carousel::{
//!     Breakpoint, Carousel, CarouselEvent, IdAllocator, Settings, SettingsOverlay,
//! };
//!
//! let settings = Settings {
//!     slides_to_show: 3,
//!     slides_to_scroll: 3,
//!     ..Settings::default()
//! };
//! let breakpoints = [Breakpoint::overlay(
//!     600,
//!     SettingsOverlay::default().slides_to_show(1).slides_to_scroll(1),
//! )];
//!
//! let mut ids = IdAllocator::new();
//! let mut carousel = Carousel::new(
//!     ids.allocate(),
//!     (0..10).collect::<Vec<u32>>(),
//!     settings,
//!     breakpoints,
//!     Metrics::new(900.0, 300.0),
//!     InstantAnimator::default(),
//!     Vec::<CarouselEvent>::new(),
//! )
//! .unwrap();
//!
//! // Ten slides, three per page: next visits 3, 6, 9, then wraps to 0.
//! for expected in [3, 6, 9, 0] {
//!     carousel.next();
//!     assert_eq!(carousel.current_index(), expected);
//! }
//!
//! // A narrow window switches to the breakpoint's settings after the
//! // resize debounce.
//! carousel.resize(Metrics::new(400.0, 300.0));
//! carousel.tick(50);
//! assert_eq!(carousel.active_breakpoint(), Some(600));
//! assert_eq!(carousel.settings().slides_to_show, 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std` feature.
//! - `libm`: forwards to Kurbo's `libm` feature for `no_std` builds.
//! - `serde`: `Serialize`/`Deserialize` for settings and breakpoints.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod animator;
pub mod autoplay;
pub mod breakpoints;
pub mod carousel;
pub mod clones;
pub mod events;
pub mod flags;
pub mod geometry;
pub mod gesture;
pub mod group;
pub mod navigation;
pub mod paging;
pub mod sequence;
pub mod settings;

pub use breakpoints::{Breakpoint, BreakpointSettings, BreakpointTable, RespondTo};
pub use carousel::{Carousel, Key};
pub use events::{CarouselEvent, EventBus, SwipeDirection};
pub use flags::SlideFlags;
pub use group::{CarouselGroup, CarouselId, IdAllocator, NavForRegistry, PeerMessage};
pub use paging::PagerState;
pub use settings::{Orientation, Settings, SettingsError, SettingsOverlay};

/// Converts a count or index to a signed index, saturating at `isize::MAX`.
pub(crate) fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}
