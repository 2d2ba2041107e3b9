// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-slide presentation flags.
//!
//! Hosts map these onto whatever their rendering layer uses (CSS classes,
//! accessibility attributes, tab order). Flags are computed over the rendered
//! track, so clones can be active or centered too.

use alloc::vec::Vec;

use crate::clones::CloneSet;
use crate::settings::Settings;
use crate::signed;

bitflags::bitflags! {
    /// Presentation state of one rendered slide.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SlideFlags: u8 {
        /// Inside the viewport (visible and focusable).
        const ACTIVE  = 0b0000_0001;
        /// The current slide.
        const CURRENT = 0b0000_0010;
        /// The centered slide in center mode.
        const CENTER  = 0b0000_0100;
        /// A clone rather than a real slide.
        const CLONED  = 0b0000_1000;
    }
}

struct Marker {
    flags: Vec<SlideFlags>,
    window: usize,
    slide_count: usize,
}

impl Marker {
    fn real(&mut self, index: isize, flag: SlideFlags) {
        if let Ok(index) = usize::try_from(index)
            && index < self.slide_count
        {
            self.flags[index + self.window] |= flag;
        }
    }

    fn rendered(&mut self, render: isize, flag: SlideFlags) {
        if let Some(slot) = usize::try_from(render)
            .ok()
            .and_then(|render| self.flags.get_mut(render))
        {
            *slot |= flag;
        }
    }
}

/// Computes the flags of every rendered slide when `index` is current.
///
/// The result is in render order and has [`CloneSet::render_len`] entries.
#[must_use]
pub fn compute_flags(index: usize, settings: &Settings, clones: &CloneSet) -> Vec<SlideFlags> {
    let slide_count = clones.slide_count();
    let mut marker = Marker {
        flags: clones
            .slots()
            .map(|slot| {
                if slot.cloned {
                    SlideFlags::CLONED
                } else {
                    SlideFlags::empty()
                }
            })
            .collect(),
        window: clones.window(),
        slide_count,
    };
    let render_len = signed(marker.flags.len());
    let count = signed(slide_count);
    let index = signed(index);
    let show = signed(settings.slides_to_show.max(1));

    marker.real(index, SlideFlags::CURRENT);

    if settings.center_mode {
        let (show, even_coef, center_offset) = if show >= count {
            (count, -1, count)
        } else {
            (show, isize::from(show % 2 == 0), show / 2)
        };

        if settings.infinite {
            if index >= center_offset && index <= count - 1 - center_offset {
                for real in index - center_offset + even_coef..index + center_offset + 1 {
                    marker.real(real, SlideFlags::ACTIVE);
                }
            } else {
                let offset = show + index;
                for render in offset - center_offset + 1 + even_coef..offset + center_offset + 2 {
                    marker.rendered(render, SlideFlags::ACTIVE);
                }
            }

            if index == 0 {
                marker.rendered(show + count + 1, SlideFlags::CENTER);
            } else if index == count - 1 {
                marker.rendered(show, SlideFlags::CENTER);
            }
        }

        marker.real(index, SlideFlags::CENTER);
    } else if index <= count - show {
        for real in index..index + show {
            marker.real(real, SlideFlags::ACTIVE);
        }
    } else if render_len <= show {
        for slot in &mut marker.flags {
            *slot |= SlideFlags::ACTIVE;
        }
    } else {
        let remainder = count % show;
        let offset = if settings.infinite { show + index } else { index };
        let (start, end) = if settings.slides_to_show == settings.slides_to_scroll
            && count - index < show
        {
            (offset - (show - remainder), offset + remainder)
        } else {
            (offset, offset + show)
        };
        for render in start..end {
            marker.rendered(render, SlideFlags::ACTIVE);
        }
    }

    marker.flags
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{SlideFlags, compute_flags};
    use crate::clones::CloneSet;
    use crate::settings::Settings;

    fn active_logical(settings: &Settings, count: usize, index: usize) -> Vec<isize> {
        let clones = CloneSet::rebuild(count, settings);
        compute_flags(index, settings, &clones)
            .iter()
            .enumerate()
            .filter(|(_, flags)| flags.contains(SlideFlags::ACTIVE))
            .filter_map(|(render, _)| clones.logical_at(render))
            .collect()
    }

    #[test]
    fn finite_window_follows_current() {
        let settings = Settings {
            slides_to_show: 2,
            infinite: false,
            ..Settings::default()
        };
        assert_eq!(active_logical(&settings, 5, 1), [1, 2]);

        let clones = CloneSet::rebuild(5, &settings);
        let flags = compute_flags(1, &settings, &clones);
        assert_eq!(flags[1], SlideFlags::ACTIVE | SlideFlags::CURRENT);
        assert_eq!(flags[0], SlideFlags::empty());
    }

    #[test]
    fn trailing_page_spills_into_clones() {
        let settings = Settings {
            slides_to_show: 3,
            ..Settings::default()
        };
        assert_eq!(active_logical(&settings, 7, 6), [6, 7, 8]);

        // With whole-page scrolling the last page is pulled back instead.
        let paged = Settings {
            slides_to_scroll: 3,
            ..settings
        };
        assert_eq!(active_logical(&paged, 7, 6), [4, 5, 6]);
    }

    #[test]
    fn everything_active_when_it_fits() {
        let settings = Settings {
            slides_to_show: 4,
            ..Settings::default()
        };
        let clones = CloneSet::rebuild(3, &settings);
        let flags = compute_flags(0, &settings, &clones);
        assert!(flags.iter().all(|flags| flags.contains(SlideFlags::ACTIVE)));
    }

    #[test]
    fn center_mode_marks_center_and_neighbors() {
        let settings = Settings {
            slides_to_show: 3,
            center_mode: true,
            ..Settings::default()
        };
        assert_eq!(active_logical(&settings, 7, 3), [2, 3, 4]);
        assert_eq!(active_logical(&settings, 7, 0), [-1, 0, 1]);

        let clones = CloneSet::rebuild(7, &settings);
        let flags = compute_flags(0, &settings, &clones);
        let centered: Vec<_> = flags
            .iter()
            .enumerate()
            .filter(|(_, flags)| flags.contains(SlideFlags::CENTER))
            .filter_map(|(render, _)| clones.logical_at(render))
            .collect();
        // The trailing clone of slide 0 is centered alongside the real one.
        assert_eq!(centered, [0, 7]);
        assert!(flags[11].contains(SlideFlags::CLONED));
    }

    #[test]
    fn even_center_window_is_biased_forward() {
        let settings = Settings {
            slides_to_show: 4,
            center_mode: true,
            ..Settings::default()
        };
        assert_eq!(active_logical(&settings, 10, 3), [2, 3, 4, 5]);
    }
}
