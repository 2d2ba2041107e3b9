// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration: [`Settings`], partial [`SettingsOverlay`]s, and validation.
//!
//! A [`Settings`] value is treated as immutable for the duration of an "epoch":
//! breakpoint changes and option updates replace it wholesale rather than
//! mutating it field by field. Overlays are always applied to the *base*
//! settings the carousel was created with, never to another overlay.
//!
//! ```rust
//! use understory_carousel::{Settings, SettingsOverlay};
//!
//! let base = Settings {
//!     slides_to_show: 4,
//!     ..Settings::default()
//! };
//! let tablet = SettingsOverlay::default().slides_to_show(2).dots(true);
//!
//! let merged = tablet.apply(&base);
//! assert_eq!(merged.slides_to_show, 2);
//! assert!(merged.dots);
//! assert!(merged.infinite);
//! ```

use alloc::boxed::Box;

use crate::breakpoints::RespondTo;

/// Axis along which slides are laid out and the track moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    /// Slides sit side by side; the track moves along X.
    #[default]
    Horizontal,
    /// Slides are stacked; the track moves along Y.
    Vertical,
}

/// Full carousel configuration.
///
/// The defaults show one slide at a time on an infinite track with 500 ms
/// transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Enables keyboard navigation and focus side effects.
    pub accessibility: bool,
    /// Resize the list to the current slide's height (single-slide horizontal only).
    pub adaptive_height: bool,
    /// Whether previous/next arrows are shown.
    pub arrows: bool,
    /// Advance automatically every [`Settings::autoplay_speed`] milliseconds.
    pub autoplay: bool,
    /// Autoplay interval in milliseconds.
    pub autoplay_speed: u64,
    /// Center the current slide in the viewport.
    pub center_mode: bool,
    /// Whether pagination dots are shown.
    pub dots: bool,
    /// Accept mouse drags as swipes.
    pub draggable: bool,
    /// Resistance applied to drags that push past a finite boundary (`0..=1`).
    pub edge_friction: f64,
    /// Cross-fade slides in place instead of moving the track.
    pub fade: bool,
    /// Navigate to a slide when it is clicked.
    pub focus_on_select: bool,
    /// Move focus to the current slide after each change.
    pub focus_on_change: bool,
    /// Loop past the ends using cloned slides.
    pub infinite: bool,
    /// Slide shown on first load.
    pub initial_slide: usize,
    /// Breakpoints apply "at or above" their threshold instead of "below".
    pub mobile_first: bool,
    /// Pause autoplay while the pointer is over the list.
    pub pause_on_hover: bool,
    /// Pause autoplay while the carousel has focus.
    pub pause_on_focus: bool,
    /// Pause autoplay while the pointer is over the dots.
    pub pause_on_dots_hover: bool,
    /// Which width breakpoints are evaluated against.
    pub respond_to: RespondTo,
    /// Right-to-left layout.
    pub rtl: bool,
    /// Number of slides visible at once.
    pub slides_to_show: usize,
    /// Number of slides advanced per step.
    pub slides_to_scroll: usize,
    /// Transition duration in milliseconds.
    pub speed: u64,
    /// Accept touch swipes.
    pub swipe: bool,
    /// Land on whichever slide the gesture released over instead of a fixed step.
    pub swipe_to_slide: bool,
    /// Move the track while a gesture is in progress.
    pub touch_move: bool,
    /// Fraction of the list extent a swipe must cover (`extent / touch_threshold`).
    pub touch_threshold: f64,
    /// Slides have their own measured widths.
    pub variable_width: bool,
    /// Layout axis.
    pub orientation: Orientation,
    /// Interpret vertical gestures as navigation.
    pub vertical_swiping: bool,
    /// Drop navigation requests that arrive while a transition is running.
    pub wait_for_animate: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accessibility: true,
            adaptive_height: false,
            arrows: true,
            autoplay: false,
            autoplay_speed: 3000,
            center_mode: false,
            dots: false,
            draggable: true,
            edge_friction: 0.35,
            fade: false,
            focus_on_select: false,
            focus_on_change: false,
            infinite: true,
            initial_slide: 0,
            mobile_first: false,
            pause_on_hover: true,
            pause_on_focus: true,
            pause_on_dots_hover: false,
            respond_to: RespondTo::Window,
            rtl: false,
            slides_to_show: 1,
            slides_to_scroll: 1,
            speed: 500,
            swipe: true,
            swipe_to_slide: false,
            touch_move: true,
            touch_threshold: 5.0,
            variable_width: false,
            orientation: Orientation::Horizontal,
            vertical_swiping: false,
            wait_for_animate: true,
        }
    }
}

impl Settings {
    /// Returns `true` for [`Orientation::Vertical`].
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.slides_to_show == 0 {
            return Err(SettingsError::ZeroSlidesToShow);
        }
        if self.slides_to_scroll == 0 {
            return Err(SettingsError::ZeroSlidesToScroll);
        }
        if !(self.touch_threshold.is_finite() && self.touch_threshold > 0.0) {
            return Err(SettingsError::TouchThreshold(self.touch_threshold));
        }
        if !(0.0..=1.0).contains(&self.edge_friction) {
            return Err(SettingsError::EdgeFriction(self.edge_friction));
        }
        Ok(())
    }

    /// Resolves option combinations the way the layout engine expects them.
    ///
    /// - Fading disables center mode.
    /// - Center mode and swipe-to-slide move one slide at a time.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.fade {
            self.center_mode = false;
        }
        if self.center_mode || self.swipe_to_slide {
            self.slides_to_scroll = 1;
        }
        self
    }
}

/// Invalid configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SettingsError {
    /// `slides_to_show` was zero.
    #[error("slides_to_show must be at least 1")]
    ZeroSlidesToShow,
    /// `slides_to_scroll` was zero.
    #[error("slides_to_scroll must be at least 1")]
    ZeroSlidesToScroll,
    /// `touch_threshold` was zero, negative, or not finite.
    #[error("touch_threshold must be finite and positive, got {0}")]
    TouchThreshold(f64),
    /// `edge_friction` was outside `0..=1`.
    #[error("edge_friction must lie in [0, 1], got {0}")]
    EdgeFriction(f64),
    /// A breakpoint overlay produced invalid settings when merged onto the base.
    #[error("breakpoint {threshold}: {source}")]
    Breakpoint {
        /// Threshold of the offending breakpoint.
        threshold: u32,
        /// What was wrong with the merged settings.
        source: Box<Self>,
    },
}

macro_rules! settings_overlay {
    ($($field:ident: $ty:ty,)*) => {
        /// A partial [`Settings`] update.
        ///
        /// Every field is optional; [`SettingsOverlay::apply`] copies the
        /// present fields onto a base and leaves the rest untouched. The
        /// builder methods share the field names.
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(default))]
        #[allow(missing_docs, reason = "Fields mirror the documented `Settings` fields")]
        pub struct SettingsOverlay {
            $(pub $field: Option<$ty>,)*
        }

        #[allow(missing_docs, reason = "Builder methods mirror the documented `Settings` fields")]
        impl SettingsOverlay {
            /// Returns `base` with every present field replaced.
            #[must_use]
            pub fn apply(&self, base: &Settings) -> Settings {
                let mut merged = *base;
                $(
                    if let Some(value) = self.$field {
                        merged.$field = value;
                    }
                )*
                merged
            }

            /// Returns `true` if no field is set.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }

            $(
                #[must_use]
                pub fn $field(mut self, value: $ty) -> Self {
                    self.$field = Some(value);
                    self
                }
            )*
        }
    };
}

settings_overlay! {
    accessibility: bool,
    adaptive_height: bool,
    arrows: bool,
    autoplay: bool,
    autoplay_speed: u64,
    center_mode: bool,
    dots: bool,
    draggable: bool,
    edge_friction: f64,
    fade: bool,
    focus_on_select: bool,
    focus_on_change: bool,
    infinite: bool,
    initial_slide: usize,
    mobile_first: bool,
    pause_on_hover: bool,
    pause_on_focus: bool,
    pause_on_dots_hover: bool,
    respond_to: RespondTo,
    rtl: bool,
    slides_to_show: usize,
    slides_to_scroll: usize,
    speed: u64,
    swipe: bool,
    swipe_to_slide: bool,
    touch_move: bool,
    touch_threshold: f64,
    variable_width: bool,
    orientation: Orientation,
    vertical_swiping: bool,
    wait_for_animate: bool,
}

#[cfg(test)]
mod tests {
    use super::{Orientation, Settings, SettingsError, SettingsOverlay};

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let zero_show = Settings {
            slides_to_show: 0,
            ..Settings::default()
        };
        assert_eq!(zero_show.validate(), Err(SettingsError::ZeroSlidesToShow));

        let zero_scroll = Settings {
            slides_to_scroll: 0,
            ..Settings::default()
        };
        assert_eq!(zero_scroll.validate(), Err(SettingsError::ZeroSlidesToScroll));

        let nan_threshold = Settings {
            touch_threshold: f64::NAN,
            ..Settings::default()
        };
        assert!(matches!(
            nan_threshold.validate(),
            Err(SettingsError::TouchThreshold(_))
        ));

        let slippery = Settings {
            edge_friction: 1.5,
            ..Settings::default()
        };
        assert_eq!(slippery.validate(), Err(SettingsError::EdgeFriction(1.5)));
    }

    #[test]
    fn normalized_resolves_mode_conflicts() {
        let faded = Settings {
            fade: true,
            center_mode: true,
            slides_to_scroll: 3,
            ..Settings::default()
        }
        .normalized();
        assert!(!faded.center_mode);
        assert_eq!(faded.slides_to_scroll, 3);

        let centered = Settings {
            center_mode: true,
            slides_to_scroll: 3,
            ..Settings::default()
        }
        .normalized();
        assert_eq!(centered.slides_to_scroll, 1);

        let swipe_to_slide = Settings {
            swipe_to_slide: true,
            slides_to_scroll: 2,
            ..Settings::default()
        }
        .normalized();
        assert_eq!(swipe_to_slide.slides_to_scroll, 1);
    }

    #[test]
    fn overlay_only_touches_present_fields() {
        let base = Settings {
            slides_to_show: 5,
            rtl: true,
            ..Settings::default()
        };
        let overlay = SettingsOverlay::default()
            .orientation(Orientation::Vertical)
            .slides_to_show(1);
        assert!(!overlay.is_empty());

        let merged = overlay.apply(&base);
        assert_eq!(merged.slides_to_show, 1);
        assert!(merged.is_vertical());
        assert!(merged.rtl);

        assert!(SettingsOverlay::default().is_empty());
        assert_eq!(SettingsOverlay::default().apply(&base), base);
    }
}
