// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clone blocks that make an infinite track loop seamlessly.
//!
//! When looping, the rendered track is `[leading clones, real slides, trailing
//! clones]`. The leading block repeats the last `window` real slides and the
//! trailing block repeats the first `window`, so the track can animate one
//! page past either end before snapping back to the equivalent real position.
//!
//! Clones have no identity of their own. A [`RenderSlot`] names the real slide
//! it shows (`source`) and the logical index it stands for.
//!
//! ```rust
//! use understory_carousel::Settings;
//! use understory_carousel::clones::CloneSet;
//!
//! let settings = Settings {
//!     slides_to_show: 3,
//!     ..Settings::default()
//! };
//! let clones = CloneSet::rebuild(7, &settings);
//!
//! let leading: Vec<_> = clones.leading().iter().map(|s| (s.logical, s.source)).collect();
//! assert_eq!(leading, [(-3, 4), (-2, 5), (-1, 6)]);
//! assert_eq!(clones.to_render_index(0), Some(3));
//! assert_eq!(clones.render_len(), 13);
//! ```

use alloc::vec::Vec;

use crate::settings::Settings;
use crate::signed;

/// One position on the rendered track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderSlot {
    /// Index of the real slide displayed here.
    pub source: usize,
    /// Logical index this position represents (negative or `>= slide_count` for clones).
    pub logical: isize,
    /// Whether this position is a clone.
    pub cloned: bool,
}

/// The clone blocks for a given slide count and configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CloneSet {
    slide_count: usize,
    leading: Vec<RenderSlot>,
    trailing: Vec<RenderSlot>,
}

impl CloneSet {
    /// Builds the clone blocks from scratch.
    ///
    /// Empty unless infinite, not fading, and there are more slides than fit in
    /// the viewport. Rebuilding with the same inputs yields an equal set.
    #[must_use]
    pub fn rebuild(slide_count: usize, settings: &Settings) -> Self {
        let show = settings.slides_to_show;
        if !settings.infinite || settings.fade || slide_count <= show {
            return Self {
                slide_count,
                ..Self::default()
            };
        }
        let window = if settings.center_mode { show + 1 } else { show }.min(slide_count);
        let count = signed(slide_count);

        let leading = (slide_count - window..slide_count)
            .map(|source| RenderSlot {
                source,
                logical: signed(source) - count,
                cloned: true,
            })
            .collect();
        let trailing = (0..window)
            .map(|source| RenderSlot {
                source,
                logical: signed(source) + count,
                cloned: true,
            })
            .collect();

        Self {
            slide_count,
            leading,
            trailing,
        }
    }

    /// Returns `true` if there are no clones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty()
    }

    /// Number of clones at each end.
    #[must_use]
    pub fn window(&self) -> usize {
        self.leading.len()
    }

    /// Clones placed before the real slides.
    #[must_use]
    pub fn leading(&self) -> &[RenderSlot] {
        &self.leading
    }

    /// Clones placed after the real slides.
    #[must_use]
    pub fn trailing(&self) -> &[RenderSlot] {
        &self.trailing
    }

    /// Number of real slides this set was built for.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Total number of rendered positions.
    #[must_use]
    pub fn render_len(&self) -> usize {
        self.leading.len() + self.slide_count + self.trailing.len()
    }

    /// Rendered position of a logical index, if it is on the track.
    #[must_use]
    pub fn to_render_index(&self, logical: isize) -> Option<usize> {
        let render = logical.checked_add(signed(self.window()))?;
        usize::try_from(render)
            .ok()
            .filter(|render| *render < self.render_len())
    }

    /// Logical index shown at a rendered position.
    #[must_use]
    pub fn logical_at(&self, render: usize) -> Option<isize> {
        self.slot(render).map(|slot| slot.logical)
    }

    /// Real slide shown at a rendered position.
    #[must_use]
    pub fn source_of(&self, render: usize) -> Option<usize> {
        self.slot(render).map(|slot| slot.source)
    }

    /// The slot at a rendered position.
    #[must_use]
    pub fn slot(&self, render: usize) -> Option<RenderSlot> {
        let window = self.window();
        if render < window {
            return self.leading.get(render).copied();
        }
        let real = render - window;
        if real < self.slide_count {
            return Some(RenderSlot {
                source: real,
                logical: signed(real),
                cloned: false,
            });
        }
        self.trailing.get(real - self.slide_count).copied()
    }

    /// Every rendered slot in track order.
    pub fn slots(&self) -> impl Iterator<Item = RenderSlot> + '_ {
        (0..self.render_len()).filter_map(|render| self.slot(render))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::CloneSet;
    use crate::settings::Settings;

    #[test]
    fn no_clones_when_finite_fading_or_short() {
        let finite = Settings {
            infinite: false,
            ..Settings::default()
        };
        assert!(CloneSet::rebuild(5, &finite).is_empty());

        let fading = Settings {
            fade: true,
            ..Settings::default()
        };
        assert!(CloneSet::rebuild(5, &fading).is_empty());

        let wide = Settings {
            slides_to_show: 5,
            ..Settings::default()
        };
        let clones = CloneSet::rebuild(5, &wide);
        assert!(clones.is_empty());
        assert_eq!(clones.render_len(), 5);
        assert_eq!(clones.to_render_index(0), Some(0));
    }

    #[test]
    fn center_mode_adds_one_clone_per_end() {
        let settings = Settings {
            slides_to_show: 3,
            center_mode: true,
            ..Settings::default()
        };
        let clones = CloneSet::rebuild(7, &settings);
        assert_eq!(clones.window(), 4);
        assert_eq!(clones.leading()[0].logical, -4);
        assert_eq!(clones.trailing()[3].logical, 10);
    }

    #[test]
    fn render_walk_matches_blocks() {
        let settings = Settings {
            slides_to_show: 2,
            ..Settings::default()
        };
        let clones = CloneSet::rebuild(4, &settings);
        let logical: Vec<_> = clones.slots().map(|slot| slot.logical).collect();
        assert_eq!(logical, [-2, -1, 0, 1, 2, 3, 4, 5]);
        let sources: Vec<_> = clones.slots().map(|slot| slot.source).collect();
        assert_eq!(sources, [2, 3, 0, 1, 2, 3, 0, 1]);

        assert_eq!(clones.logical_at(7), Some(5));
        assert_eq!(clones.source_of(1), Some(3));
        assert_eq!(clones.slot(8), None);
        assert_eq!(clones.to_render_index(-3), None);
        assert_eq!(clones.to_render_index(isize::MAX), None);
    }
}
