// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe and drag interpretation.
//!
//! ## Usage
//!
//! 1) Call [`GestureInterpreter::start`] when a pointer goes down on the list.
//! 2) Call [`GestureInterpreter::update`] on every move. The returned
//!    [`SwipeMove`] carries the preview offset for the track and whether the
//!    host should suppress native scrolling.
//! 3) Call [`GestureInterpreter::end`] when the pointer lifts, leaves, or is
//!    cancelled. The returned [`SwipeRelease`] says where to navigate.
//!
//! The interpreter only does arithmetic. [`Carousel`](crate::Carousel) wires
//! it to navigation, autoplay, and the animator.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_carousel::Settings;
//! use understory_carousel::gesture::{
//!     GestureContext, GestureInterpreter, PointerSample, ReleaseAction,
//! };
//!
//! let settings = Settings::default();
//! let ctx = GestureContext {
//!     settings: &settings,
//!     slide_count: 5,
//!     current: 0,
//!     current_offset: -500.0,
//!     dot_count: 4,
//!     animating: false,
//!     list_width: 500.0,
//!     list_height: 300.0,
//!     slide_step: 1,
//! };
//!
//! let mut gesture = GestureInterpreter::default();
//! gesture.start(PointerSample::touch(Point::new(400.0, 100.0)), &ctx);
//! let moved = gesture
//!     .update(PointerSample::touch(Point::new(250.0, 104.0)), &ctx)
//!     .unwrap();
//! assert!(moved.confirmed);
//! assert_eq!(moved.swipe_left, Some(-650.0));
//!
//! let release = gesture.end(&ctx);
//! assert!(matches!(release.action, ReleaseAction::Navigate { target: 1, .. }));
//! ```

use core::f64::consts::PI;

use kurbo::Point;

use crate::clones::CloneSet;
use crate::events::SwipeDirection;
use crate::geometry::SlideBox;
use crate::paging::check_navigable;
use crate::settings::Settings;
use crate::signed;

/// Swipes shorter than this (in pixels) still count as clicks.
pub const CLICK_SLOP: f64 = 10.0;

/// Movement (in pixels) that confirms a swipe or, vertically, a page scroll.
const SWIPE_CONFIRM: f64 = 4.0;

/// What produced a pointer sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PointerKind {
    /// Touch input.
    #[default]
    Touch,
    /// Mouse input; only honored when [`Settings::draggable`] is set.
    Mouse,
}

/// One pointer observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Pointer position.
    pub position: Point,
    /// Number of touches currently down (1 for a mouse).
    pub finger_count: usize,
    /// Input kind.
    pub kind: PointerKind,
}

impl PointerSample {
    /// A single-finger touch at `position`.
    #[must_use]
    pub fn touch(position: Point) -> Self {
        Self {
            position,
            finger_count: 1,
            kind: PointerKind::Touch,
        }
    }

    /// A mouse pointer at `position`.
    #[must_use]
    pub fn mouse(position: Point) -> Self {
        Self {
            position,
            finger_count: 1,
            kind: PointerKind::Mouse,
        }
    }

    /// Replaces the number of touches.
    #[must_use]
    pub fn with_fingers(mut self, finger_count: usize) -> Self {
        self.finger_count = finger_count;
        self
    }
}

/// Gesture phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Following a pointer that may become a swipe.
    Tracking,
    /// The user is scrolling the page; the gesture is ignored until it ends.
    Scrolling,
}

/// State of the gesture being tracked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchSample {
    /// Where the gesture began.
    pub start: Point,
    /// Latest pointer position.
    pub current: Point,
    /// Touches down at the last sample.
    pub finger_count: usize,
    /// Length of the swipe along the navigation axis, after edge friction.
    pub swipe_length: f64,
    /// Length a swipe must reach to navigate.
    pub min_swipe: f64,
    /// Whether the gesture is pushing against a finite end.
    pub edge_hit: bool,
}

/// Everything the interpreter needs to know about the carousel.
#[derive(Clone, Copy, Debug)]
pub struct GestureContext<'a> {
    /// Active settings.
    pub settings: &'a Settings,
    /// Number of real slides.
    pub slide_count: usize,
    /// Index the gesture is relative to.
    pub current: usize,
    /// Track offset of `current`, as computed by [`compute_offset`](crate::geometry::compute_offset).
    pub current_offset: f64,
    /// Result of [`dot_count`](crate::paging::dot_count) for the carousel.
    pub dot_count: isize,
    /// Whether a transition is running.
    pub animating: bool,
    /// List width.
    pub list_width: f64,
    /// List height.
    pub list_height: f64,
    /// Slides a recognized swipe moves by (see [`swipe_slide_count`]).
    pub slide_step: usize,
}

/// Result of a pointer move.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwipeMove {
    /// Offset the track would have under the finger; `None` clears the preview.
    pub swipe_left: Option<f64>,
    /// Whether `swipe_left` should be applied to the track now.
    pub render: bool,
    /// The movement is a swipe; the host should suppress native scrolling.
    pub confirmed: bool,
    /// The gesture turned into a page scroll.
    pub scrolling: bool,
}

/// What to do when a gesture ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseAction {
    /// Nothing happened.
    None,
    /// The gesture was a page scroll.
    Scrolled,
    /// Too short to navigate: settle back on the current slide.
    Reaffirm,
    /// Navigate to `target`.
    Navigate {
        /// Raw navigation target.
        target: isize,
        /// Recognized direction.
        direction: SwipeDirection,
    },
}

/// Result of ending a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwipeRelease {
    /// What to do.
    pub action: ReleaseAction,
    /// Set when the gesture pushed against a finite end.
    pub edge: Option<SwipeDirection>,
}

/// Turns pointer samples into previews and navigation requests.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureInterpreter {
    phase: GesturePhase,
    sample: Option<TouchSample>,
    swiping: bool,
    should_click: bool,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self {
            phase: GesturePhase::Idle,
            sample: None,
            swiping: false,
            should_click: true,
        }
    }
}

/// Whether `settings` let `kind` drive gestures at all.
#[must_use]
pub fn accepts(settings: &Settings, kind: PointerKind) -> bool {
    settings.swipe && (kind == PointerKind::Touch || settings.draggable)
}

impl GestureInterpreter {
    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// The gesture being tracked, if any.
    #[must_use]
    pub fn sample(&self) -> Option<&TouchSample> {
        self.sample.as_ref()
    }

    /// Whether a click following the last gesture should go through.
    #[must_use]
    pub fn should_click(&self) -> bool {
        self.should_click
    }

    /// Forgets any gesture in progress.
    pub fn reset(&mut self) {
        self.set_phase(GesturePhase::Idle);
        self.sample = None;
        self.swiping = false;
    }

    /// Begins tracking. Returns `false` (and forgets any sample) for
    /// multi-touch or when every slide already fits in the viewport.
    pub fn start(&mut self, pointer: PointerSample, ctx: &GestureContext<'_>) -> bool {
        if pointer.finger_count != 1 || ctx.slide_count <= ctx.settings.slides_to_show {
            self.reset();
            return false;
        }
        self.sample = Some(TouchSample {
            start: pointer.position,
            current: pointer.position,
            finger_count: pointer.finger_count,
            swipe_length: 0.0,
            min_swipe: min_swipe(ctx),
            edge_hit: false,
        });
        self.swiping = false;
        self.set_phase(GesturePhase::Tracking);
        true
    }

    /// Follows the pointer.
    ///
    /// Returns `None` when no gesture is being tracked, including after it
    /// turned into a page scroll.
    pub fn update(&mut self, pointer: PointerSample, ctx: &GestureContext<'_>) -> Option<SwipeMove> {
        if self.phase != GesturePhase::Tracking || pointer.finger_count != 1 {
            return None;
        }
        let sample = self.sample.as_mut()?;
        let settings = ctx.settings;

        sample.current = pointer.position;
        sample.finger_count = pointer.finger_count;
        let delta = sample.current - sample.start;
        let horizontal = libm::round(libm::fabs(delta.x));
        let vertical = libm::round(libm::fabs(delta.y));

        if !settings.vertical_swiping && !self.swiping && vertical > SWIPE_CONFIRM {
            self.set_phase(GesturePhase::Scrolling);
            return Some(SwipeMove {
                scrolling: true,
                ..SwipeMove::default()
            });
        }

        let mut length = if settings.vertical_swiping {
            vertical
        } else {
            horizontal
        };
        let direction = swipe_direction(sample.start, sample.current, settings);
        let confirmed = length > SWIPE_CONFIRM;
        if confirmed {
            self.swiping = true;
        }

        sample.edge_hit = false;
        if !settings.infinite
            && ((ctx.current == 0 && direction == SwipeDirection::Right)
                || (signed(ctx.current) >= ctx.dot_count && direction == SwipeDirection::Left))
        {
            length *= settings.edge_friction;
            sample.edge_hit = true;
        }
        sample.swipe_length = length;

        let sign = if settings.vertical_swiping {
            if sample.current.y > sample.start.y { 1.0 } else { -1.0 }
        } else {
            let reading = if settings.rtl { -1.0 } else { 1.0 };
            let pointer = if sample.current.x > sample.start.x { 1.0 } else { -1.0 };
            reading * pointer
        };
        let travel = if settings.is_vertical() && !settings.vertical_swiping && ctx.list_width > 0.0 {
            length * (ctx.list_height / ctx.list_width)
        } else {
            length
        };
        let preview = ctx.current_offset + travel * sign;

        if ctx.animating {
            return Some(SwipeMove {
                swipe_left: None,
                render: false,
                confirmed,
                scrolling: false,
            });
        }
        Some(SwipeMove {
            swipe_left: Some(preview),
            render: !settings.fade && settings.touch_move,
            confirmed,
            scrolling: false,
        })
    }

    /// Ends the gesture.
    pub fn end(&mut self, ctx: &GestureContext<'_>) -> SwipeRelease {
        let phase = self.phase;
        self.set_phase(GesturePhase::Idle);
        self.swiping = false;
        let sample = self.sample.take();

        if phase == GesturePhase::Scrolling {
            return SwipeRelease {
                action: ReleaseAction::Scrolled,
                edge: None,
            };
        }

        self.should_click = sample.is_none_or(|sample| sample.swipe_length <= CLICK_SLOP);
        let Some(sample) = sample else {
            return SwipeRelease {
                action: ReleaseAction::None,
                edge: None,
            };
        };

        let settings = ctx.settings;
        let direction = swipe_direction(sample.start, sample.current, settings);
        let edge = sample.edge_hit.then_some(direction);

        let action = if sample.swipe_length >= sample.min_swipe {
            let current = signed(ctx.current);
            let step = signed(ctx.slide_step);
            let raw = match direction {
                SwipeDirection::Left | SwipeDirection::Down => Some(current + step),
                SwipeDirection::Right | SwipeDirection::Up => Some(current - step),
                SwipeDirection::Vertical => None,
            };
            match raw {
                Some(target) => ReleaseAction::Navigate {
                    target: if settings.swipe_to_slide {
                        check_navigable(target, settings, ctx.slide_count)
                    } else {
                        target
                    },
                    direction,
                },
                None => ReleaseAction::None,
            }
        } else if sample.start.x != sample.current.x {
            ReleaseAction::Reaffirm
        } else {
            ReleaseAction::None
        };

        SwipeRelease { action, edge }
    }

    fn set_phase(&mut self, phase: GesturePhase) {
        if self.phase != phase {
            tracing::trace!(from = ?self.phase, to = ?phase, "gesture phase");
            self.phase = phase;
        }
    }
}

fn min_swipe(ctx: &GestureContext<'_>) -> f64 {
    let extent = if ctx.settings.vertical_swiping {
        ctx.list_height
    } else {
        ctx.list_width
    };
    extent / ctx.settings.touch_threshold
}

/// Classifies the movement from `start` to `current`.
///
/// Angles are measured on the vector from the current point back to the start.
#[must_use]
pub fn swipe_direction(start: Point, current: Point, settings: &Settings) -> SwipeDirection {
    let back = start - current;
    let mut angle = libm::round(libm::atan2(back.y, back.x) * 180.0 / PI);
    if angle < 0.0 {
        angle = 360.0 - libm::fabs(angle);
    }

    let (forward, backward) = if settings.rtl {
        (SwipeDirection::Right, SwipeDirection::Left)
    } else {
        (SwipeDirection::Left, SwipeDirection::Right)
    };
    if (0.0..=45.0).contains(&angle) || (315.0..=360.0).contains(&angle) {
        return forward;
    }
    if (135.0..=225.0).contains(&angle) {
        return backward;
    }
    if settings.vertical_swiping {
        return if (35.0..=135.0).contains(&angle) {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        };
    }
    SwipeDirection::Vertical
}

/// Slides a swipe moves by.
///
/// Without swipe-to-slide this is [`Settings::slides_to_scroll`]. With it,
/// the release offset is compared against the rendered slides and the swipe
/// moves to the first slide whose boundary it has not crossed, at least one
/// slide away from `current`.
#[must_use]
pub fn swipe_slide_count(
    settings: &Settings,
    swipe_left: Option<f64>,
    current: usize,
    boxes: &[SlideBox],
    clones: &CloneSet,
    list_width: f64,
) -> usize {
    if !settings.swipe_to_slide {
        return settings.slides_to_scroll;
    }
    let center_offset = if settings.center_mode {
        libm::floor(list_width / 2.0)
    } else {
        0.0
    };
    let swipe_target = -swipe_left.unwrap_or(0.0) + center_offset;

    boxes
        .iter()
        .enumerate()
        .find(|(_, slot)| {
            let leading = if settings.center_mode {
                slot.start
            } else {
                slot.start + slot.extent / 2.0
            };
            swipe_target < leading + slot.extent
        })
        .and_then(|(render, _)| clones.logical_at(render))
        .map_or(settings.slides_to_scroll, |logical| {
            (logical - signed(current)).unsigned_abs().max(1)
        })
}
