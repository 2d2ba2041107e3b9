// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Responsive breakpoints.
//!
//! A [`BreakpointTable`] maps width thresholds to settings overlays (or to
//! [`BreakpointSettings::Unslick`], which tears the carousel down below or above
//! that width). Overlays are always merged onto the carousel's base settings,
//! so switching between two breakpoints never accumulates state.
//!
//! Desktop-first tables (the default) apply an entry when the measured width
//! is *below* its threshold; mobile-first tables apply it when the width is
//! *above*. Thresholds are unique and kept sorted (descending for
//! desktop-first, ascending for mobile-first), so the entry that wins is always
//! the one whose threshold is nearest to the measured width.
//!
//! ```rust
//! use understory_carousel::{Breakpoint, BreakpointTable, SettingsOverlay};
//!
//! let table = BreakpointTable::from_entries(
//!     [
//!         Breakpoint::overlay(480, SettingsOverlay::default().slides_to_show(1)),
//!         Breakpoint::overlay(1024, SettingsOverlay::default().slides_to_show(3)),
//!         Breakpoint::overlay(768, SettingsOverlay::default().slides_to_show(2)),
//!     ],
//!     false,
//! );
//!
//! assert_eq!(table.resolve(1200.0), None);
//! assert_eq!(table.resolve(900.0), Some(1024));
//! assert_eq!(table.resolve(500.0), Some(768));
//! assert_eq!(table.resolve(320.0), Some(480));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::geometry::Metrics;
use crate::settings::{Settings, SettingsError, SettingsOverlay};

/// Which width breakpoints are evaluated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RespondTo {
    /// The viewport width.
    #[default]
    Window,
    /// The carousel element's width.
    Slider,
    /// Whichever of the two is smaller.
    Min,
}

impl RespondTo {
    /// Picks the relevant width from `metrics`.
    #[must_use]
    pub fn width(self, metrics: &Metrics) -> f64 {
        match self {
            Self::Window => metrics.window_width,
            Self::Slider => metrics.slider_width,
            Self::Min => metrics.window_width.min(metrics.slider_width),
        }
    }
}

/// What a breakpoint does once it applies.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BreakpointSettings {
    /// Merge this overlay onto the base settings.
    Overlay(SettingsOverlay),
    /// Destroy the carousel.
    Unslick,
}

/// One row of a [`BreakpointTable`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoint {
    /// Width threshold in pixels.
    pub threshold: u32,
    /// What applies past the threshold.
    pub settings: BreakpointSettings,
}

impl Breakpoint {
    /// A breakpoint that merges `overlay` onto the base settings.
    #[must_use]
    pub fn overlay(threshold: u32, overlay: SettingsOverlay) -> Self {
        Self {
            threshold,
            settings: BreakpointSettings::Overlay(overlay),
        }
    }

    /// A breakpoint that destroys the carousel.
    #[must_use]
    pub fn unslick(threshold: u32) -> Self {
        Self {
            threshold,
            settings: BreakpointSettings::Unslick,
        }
    }
}

/// Sorted, de-duplicated breakpoints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BreakpointTable {
    entries: Vec<Breakpoint>,
    mobile_first: bool,
}

impl BreakpointTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new(mobile_first: bool) -> Self {
        Self {
            entries: Vec::new(),
            mobile_first,
        }
    }

    /// Creates a table from `entries`; later duplicates replace earlier ones.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = Breakpoint>, mobile_first: bool) -> Self {
        let mut table = Self::new(mobile_first);
        table.extend(entries);
        table
    }

    /// Adds or replaces one breakpoint.
    pub fn register(&mut self, breakpoint: Breakpoint) {
        self.insert(breakpoint);
        self.sort();
    }

    /// Adds or replaces several breakpoints.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = Breakpoint>) {
        for breakpoint in entries {
            self.insert(breakpoint);
        }
        self.sort();
    }

    /// Switches between desktop-first and mobile-first matching.
    pub fn set_mobile_first(&mut self, mobile_first: bool) {
        if self.mobile_first != mobile_first {
            self.mobile_first = mobile_first;
            self.sort();
        }
    }

    /// Whether entries apply above (rather than below) their threshold.
    #[must_use]
    pub fn is_mobile_first(&self) -> bool {
        self.mobile_first
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in evaluation order.
    #[must_use]
    pub fn entries(&self) -> &[Breakpoint] {
        &self.entries
    }

    /// What applies at `threshold`.
    #[must_use]
    pub fn get(&self, threshold: u32) -> Option<&BreakpointSettings> {
        self.entries
            .iter()
            .find(|entry| entry.threshold == threshold)
            .map(|entry| &entry.settings)
    }

    /// Threshold of the breakpoint that applies at `width`, if any.
    #[must_use]
    pub fn resolve(&self, width: f64) -> Option<u32> {
        let mut matched = None;
        for entry in &self.entries {
            let threshold = f64::from(entry.threshold);
            let applies = if self.mobile_first {
                width > threshold
            } else {
                width < threshold
            };
            if applies {
                matched = Some(entry.threshold);
            }
        }
        matched
    }

    /// Settings in effect at `threshold`, or `None` if it unslicks.
    ///
    /// Unknown thresholds yield the (normalized) base settings.
    #[must_use]
    pub fn settings_at(&self, threshold: u32, base: &Settings) -> Option<Settings> {
        match self.get(threshold) {
            Some(BreakpointSettings::Unslick) => None,
            Some(BreakpointSettings::Overlay(overlay)) => Some(overlay.apply(base).normalized()),
            None => Some(base.normalized()),
        }
    }

    /// Checks that every overlay yields valid settings on top of `base`.
    pub fn validate(&self, base: &Settings) -> Result<(), SettingsError> {
        for entry in &self.entries {
            if let BreakpointSettings::Overlay(overlay) = &entry.settings {
                overlay
                    .apply(base)
                    .validate()
                    .map_err(|source| SettingsError::Breakpoint {
                        threshold: entry.threshold,
                        source: Box::new(source),
                    })?;
            }
        }
        Ok(())
    }

    fn insert(&mut self, breakpoint: Breakpoint) {
        self.entries
            .retain(|entry| entry.threshold != breakpoint.threshold);
        self.entries.push(breakpoint);
    }

    fn sort(&mut self) {
        if self.mobile_first {
            self.entries.sort_by_key(|entry| entry.threshold);
        } else {
            self.entries
                .sort_by_key(|entry| core::cmp::Reverse(entry.threshold));
        }
    }
}
