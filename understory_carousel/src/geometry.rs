// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track geometry: how far the track must move so that a slide index is in view.
//!
//! All functions here are pure. They take the active [`Settings`], the number of
//! real slides, and the host's [`Metrics`], and never panic for any target, even
//! targets far outside the sequence (which legitimately occur while looping).
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_carousel::Settings;
//! use understory_carousel::geometry::{Metrics, compute_offset};
//!
//! let settings = Settings {
//!     slides_to_show: 3,
//!     ..Settings::default()
//! };
//! let metrics = Metrics::new(300.0, 200.0);
//!
//! // Infinite mode shifts the track past the three leading clones.
//! assert_eq!(compute_offset(0, &settings, 7, &metrics), -300.0);
//! // One full loop further is exactly seven slide widths away.
//! assert_eq!(compute_offset(7, &settings, 7, &metrics), -1000.0);
//! ```

use alloc::vec::Vec;

use crate::settings::Settings;
use crate::signed;

/// A rendered slide's span along the layout axis, relative to the track origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideBox {
    /// Leading edge.
    pub start: f64,
    /// Length along the axis (outer width for horizontal tracks).
    pub extent: f64,
}

impl SlideBox {
    /// Creates a box from its leading edge and extent.
    #[must_use]
    pub const fn new(start: f64, extent: f64) -> Self {
        Self { start, extent }
    }

    /// Trailing edge.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.extent
    }
}

/// Measurements pushed by the host.
///
/// The engine never measures anything itself. Hosts refresh these on resize
/// and whenever slide content changes size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metrics {
    /// Viewport width, used by [`RespondTo::Window`](crate::RespondTo::Window).
    pub window_width: f64,
    /// Width of the carousel's outer element, used by [`RespondTo::Slider`](crate::RespondTo::Slider).
    pub slider_width: f64,
    /// Content width of the list (the clipping viewport around the track).
    pub list_width: f64,
    /// Content height of the list.
    pub list_height: f64,
    /// Outer height of the first slide, the unit of vertical movement.
    pub slide_height: f64,
    /// Measured boxes of every rendered slide (clones included), in render order.
    ///
    /// Only consulted for variable-width layouts and swipe-to-slide detection.
    /// Leave empty to fall back to uniform slide widths.
    pub track: Vec<SlideBox>,
    /// Total measured length of the track.
    pub track_extent: f64,
}

impl Metrics {
    /// Creates metrics for a list of the given size.
    ///
    /// The window and slider widths default to the list width and the slide
    /// height to the list height.
    #[must_use]
    pub fn new(list_width: f64, list_height: f64) -> Self {
        Self {
            window_width: list_width,
            slider_width: list_width,
            list_width,
            list_height,
            slide_height: list_height,
            track: Vec::new(),
            track_extent: 0.0,
        }
    }

    /// Sets the viewport width.
    #[must_use]
    pub fn with_window_width(mut self, width: f64) -> Self {
        self.window_width = width;
        self
    }

    /// Sets the carousel element's width.
    #[must_use]
    pub fn with_slider_width(mut self, width: f64) -> Self {
        self.slider_width = width;
        self
    }

    /// Sets the outer height of the first slide.
    #[must_use]
    pub fn with_slide_height(mut self, height: f64) -> Self {
        self.slide_height = height;
        self
    }

    /// Sets the measured rendered slide boxes; the track extent becomes the
    /// furthest trailing edge.
    #[must_use]
    pub fn with_track(mut self, track: Vec<SlideBox>) -> Self {
        self.track_extent = track.iter().map(SlideBox::end).fold(0.0, f64::max);
        self.track = track;
        self
    }
}

/// Width of one slide slot.
///
/// Horizontal tracks divide the list evenly between the visible slides;
/// vertical tracks give every slide the full list width.
#[must_use]
pub fn slide_width(settings: &Settings, metrics: &Metrics) -> f64 {
    if settings.is_vertical() {
        libm::ceil(metrics.list_width)
    } else {
        libm::ceil(metrics.list_width / settings.slides_to_show.max(1) as f64)
    }
}

/// Offset of the track (along the layout axis) that brings `target` into view.
///
/// `target` is a logical index: `0..slide_count` are real slides, negative
/// values and values at or past `slide_count` address the clone blocks.
/// The result is in left-to-right coordinates; see [`track_offset`] for what
/// the animator receives.
#[must_use]
pub fn compute_offset(
    target: isize,
    settings: &Settings,
    slide_count: usize,
    metrics: &Metrics,
) -> f64 {
    let show = settings.slides_to_show.max(1);
    let scroll = settings.slides_to_scroll.max(1);
    let show_i = signed(show);
    let count_i = signed(slide_count);
    let looping = slide_count > show;
    let width = slide_width(settings, metrics);
    let height = metrics.slide_height;

    let mut slide_offset = 0.0;
    let mut vertical_offset = 0.0;

    if settings.infinite {
        if looping {
            slide_offset = -(width * show as f64);
            let coef = match (settings.is_vertical() && settings.center_mode, show) {
                (true, 2) => -1.5,
                (true, 1) => -2.0,
                _ => -1.0,
            };
            vertical_offset = height * show as f64 * coef;
        }

        let uneven = slide_count % scroll;
        if uneven != 0 && target.saturating_add(signed(scroll)) > count_i && looping {
            let shift = if target > count_i {
                show_i.saturating_sub(target.saturating_sub(count_i)) as f64
            } else {
                uneven as f64
            };
            slide_offset = -(shift * width);
            vertical_offset = -(shift * height);
        }
    } else if target.saturating_add(show_i) > count_i {
        let overflow = target.saturating_add(show_i).saturating_sub(count_i) as f64;
        slide_offset = overflow * width;
        vertical_offset = overflow * height;
    }

    if !looping {
        slide_offset = 0.0;
        vertical_offset = 0.0;
    }

    if settings.center_mode {
        let half = (show / 2) as f64;
        if !looping {
            slide_offset = width * show as f64 / 2.0 - width * slide_count as f64 / 2.0;
        } else if settings.infinite {
            slide_offset += width * half - width;
        } else {
            slide_offset = width * half;
        }
    }

    if settings.variable_width {
        return variable_width_offset(target, settings, slide_count, metrics);
    }

    if settings.is_vertical() {
        -(target as f64 * height) + vertical_offset
    } else {
        -(target as f64 * width) + slide_offset
    }
}

/// Reads the offset from the measured rendered slides.
fn variable_width_offset(
    target: isize,
    settings: &Settings,
    slide_count: usize,
    metrics: &Metrics,
) -> f64 {
    let show = signed(settings.slides_to_show.max(1));
    let direct = slide_count <= settings.slides_to_show || !settings.infinite;

    let leading_edge = |slot: Option<&SlideBox>| match slot {
        Some(slot) if settings.rtl => -(metrics.track_extent - slot.start - slot.extent),
        Some(slot) => -slot.start,
        None => 0.0,
    };

    if settings.center_mode {
        let render = if direct {
            target
        } else {
            target.saturating_add(show).saturating_add(1)
        };
        let slot = rendered_box(metrics, render);
        let extent = slot.map_or(0.0, |slot| slot.extent);
        leading_edge(slot) + (metrics.list_width - extent) / 2.0
    } else {
        let render = if direct {
            target
        } else {
            target.saturating_add(show)
        };
        leading_edge(rendered_box(metrics, render))
    }
}

fn rendered_box(metrics: &Metrics, render: isize) -> Option<&SlideBox> {
    usize::try_from(render)
        .ok()
        .and_then(|render| metrics.track.get(render))
}

/// Converts a computed offset into the position handed to the animator.
///
/// Right-to-left horizontal tracks move in the opposite direction.
#[must_use]
pub fn track_offset(offset: f64, settings: &Settings) -> f64 {
    if settings.rtl && !settings.is_vertical() {
        -offset
    } else {
        offset
    }
}

/// Boxes of `render_len` rendered slides: the measured ones when the host
/// supplied them, otherwise uniform slots of [`slide_width`].
#[must_use]
pub fn rendered_boxes(settings: &Settings, metrics: &Metrics, render_len: usize) -> Vec<SlideBox> {
    if !metrics.track.is_empty() {
        return metrics.track.clone();
    }
    let width = slide_width(settings, metrics);
    (0..render_len)
        .map(|index| SlideBox::new(index as f64 * width, width))
        .collect()
}
