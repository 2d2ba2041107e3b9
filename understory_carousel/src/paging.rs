// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page arithmetic: navigable indexes, dot counts, relative steps, and the
//! enabled state of the previous/next controls.

use alloc::vec::Vec;

use crate::settings::Settings;
use crate::signed;

/// Direction of a relative move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Towards higher indexes.
    Next,
    /// Towards lower indexes.
    Previous,
}

/// Indexes a page can start at.
///
/// Finite tracks cover `0..slide_count`. Infinite tracks also include the
/// clone pages, covering `-slides_to_scroll..2 * slide_count`.
#[must_use]
pub fn navigable_indexes(settings: &Settings, slide_count: usize) -> Vec<isize> {
    let scroll = signed(settings.slides_to_scroll.max(1));
    let show = signed(settings.slides_to_show.max(1));
    let advance = scroll.min(show);

    let (mut break_point, mut counter, max) = if settings.infinite {
        (-scroll, -scroll, signed(slide_count).saturating_mul(2))
    } else {
        (0, 0, signed(slide_count))
    };

    let mut indexes = Vec::new();
    while break_point < max {
        indexes.push(break_point);
        break_point = counter + scroll;
        counter += advance;
    }
    indexes
}

/// Snaps `index` to the navigable index at or before it.
///
/// Indexes past the last navigable index snap to it; indexes before the first
/// one snap to `0`.
#[must_use]
pub fn check_navigable(index: isize, settings: &Settings, slide_count: usize) -> isize {
    let navigables = navigable_indexes(settings, slide_count);
    let Some(&last) = navigables.last() else {
        return index;
    };
    if index > last {
        return last;
    }
    let mut previous = 0;
    for navigable in navigables {
        if index < navigable {
            return previous;
        }
        previous = navigable;
    }
    index
}

/// Index of the last dot (one less than the number of pages).
///
/// `linked` is set for carousels that drive a peer; their finite page count
/// walks the navigable indexes instead of dividing the overflow. The result
/// may be negative for finite tracks that fit entirely in the viewport.
#[must_use]
pub fn dot_count(settings: &Settings, slide_count: usize, linked: bool) -> isize {
    let scroll = signed(settings.slides_to_scroll.max(1));
    let show = signed(settings.slides_to_show.max(1));
    let count = signed(slide_count);

    let walk = || {
        let mut pages = 0;
        let mut break_point = 0;
        let mut counter = 0;
        while break_point < count {
            pages += 1;
            break_point = counter + scroll;
            counter += scroll.min(show);
        }
        pages
    };

    let pages = if settings.infinite {
        if count <= show { 1 } else { walk() }
    } else if settings.center_mode {
        count
    } else if !linked {
        let overflow = count - show;
        let extra = if overflow > 0 {
            (overflow + scroll - 1) / scroll
        } else {
            // Rounds towards zero, which is the ceiling for negatives.
            overflow / scroll
        };
        1 + extra
    } else {
        walk()
    };
    pages - 1
}

/// Dot that is highlighted for `current`.
#[must_use]
pub fn active_dot(current: usize, settings: &Settings) -> usize {
    current / settings.slides_to_scroll.max(1)
}

/// Target of a relative move from `current`, or `None` when everything fits in
/// the viewport.
///
/// Steps are corrected so that a sequence that divides evenly by
/// `slides_to_scroll` keeps landing on page boundaries.
#[must_use]
pub fn step_target(
    step: Step,
    current: usize,
    settings: &Settings,
    slide_count: usize,
) -> Option<isize> {
    let show = settings.slides_to_show.max(1);
    let scroll = settings.slides_to_scroll.max(1);
    if slide_count <= show {
        return None;
    }
    let index_offset = if !slide_count.is_multiple_of(scroll) {
        0
    } else {
        slide_count.saturating_sub(current) % scroll
    };
    let current = signed(current);
    Some(match step {
        Step::Next => {
            let by = if index_offset == 0 { scroll } else { index_offset };
            current + signed(by)
        }
        Step::Previous => {
            let by = if index_offset == 0 {
                signed(scroll)
            } else {
                signed(show) - signed(index_offset)
            };
            current - by
        }
    })
}

/// What the host's pagination controls should show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PagerState {
    /// Number of dots to render; zero when dots are hidden.
    pub dots: usize,
    /// Highlighted dot, if any.
    pub active_dot: Option<usize>,
    /// Whether the previous/next arrows are rendered.
    pub arrows_visible: bool,
    /// Whether the previous arrow is disabled.
    pub prev_disabled: bool,
    /// Whether the next arrow is disabled.
    pub next_disabled: bool,
}

impl PagerState {
    /// Computes the pager for `current`.
    #[must_use]
    pub fn compute(current: usize, settings: &Settings, slide_count: usize, linked: bool) -> Self {
        let scrollable = slide_count > settings.slides_to_show;

        let dots = if settings.dots && scrollable {
            usize::try_from(dot_count(settings, slide_count, linked) + 1).unwrap_or(0)
        } else {
            0
        };
        let active_dot = Some(active_dot(current, settings)).filter(|dot| *dot < dots);

        let arrows_visible = settings.arrows && scrollable;
        let mut prev_disabled = false;
        let mut next_disabled = false;
        if arrows_visible && !settings.infinite {
            if current == 0 {
                prev_disabled = true;
            } else if settings.center_mode {
                next_disabled = current + 1 >= slide_count;
            } else {
                next_disabled = current + settings.slides_to_show >= slide_count;
            }
        }

        Self {
            dots,
            active_dot,
            arrows_visible,
            prev_disabled,
            next_disabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PagerState, Step, check_navigable, dot_count, navigable_indexes, step_target};
    use crate::settings::Settings;

    fn paged(show: usize, scroll: usize, infinite: bool) -> Settings {
        Settings {
            slides_to_show: show,
            slides_to_scroll: scroll,
            infinite,
            ..Settings::default()
        }
    }

    #[test]
    fn navigable_indexes_cover_clone_pages_when_infinite() {
        assert_eq!(navigable_indexes(&paged(1, 1, false), 3), [0, 1, 2]);
        assert_eq!(navigable_indexes(&paged(2, 2, true), 4), [-2, 0, 2, 4, 6]);
        // Scrolling further than the viewport advances by the viewport.
        assert_eq!(navigable_indexes(&paged(1, 2, false), 5), [0, 2, 3, 4]);
        assert!(navigable_indexes(&paged(1, 1, false), 0).is_empty());
    }

    #[test]
    fn check_navigable_snaps_down() {
        let settings = paged(3, 3, true);
        assert_eq!(check_navigable(4, &settings, 9), 3);
        assert_eq!(check_navigable(6, &settings, 9), 6);
        assert_eq!(check_navigable(100, &settings, 9), 15);
        assert_eq!(check_navigable(-100, &settings, 9), 0);
        assert_eq!(check_navigable(7, &paged(1, 1, false), 0), 7);
    }

    #[test]
    fn dot_count_branches() {
        assert_eq!(dot_count(&paged(3, 3, true), 10, false), 3);
        assert_eq!(dot_count(&paged(3, 1, true), 2, false), 0);
        assert_eq!(dot_count(&paged(3, 1, false), 10, false), 7);
        assert_eq!(dot_count(&paged(3, 2, false), 10, false), 4);
        assert_eq!(dot_count(&paged(3, 1, false), 2, false), -1);

        let centered = Settings {
            center_mode: true,
            ..paged(3, 1, false)
        };
        assert_eq!(dot_count(&centered, 6, false), 5);

        assert_eq!(dot_count(&paged(3, 1, false), 10, true), 9);
    }

    #[test]
    fn relative_steps_realign_to_pages() {
        let settings = paged(3, 3, true);
        assert_eq!(step_target(Step::Next, 0, &settings, 9), Some(3));
        // From an off-page index the next step completes the page.
        assert_eq!(step_target(Step::Next, 1, &settings, 9), Some(3));
        assert_eq!(step_target(Step::Previous, 1, &settings, 9), Some(0));
        assert_eq!(step_target(Step::Previous, 0, &settings, 9), Some(-3));
        assert_eq!(step_target(Step::Next, 0, &settings, 3), None);
    }

    #[test]
    fn pager_disables_arrows_at_finite_ends() {
        let settings = Settings {
            dots: true,
            ..paged(2, 1, false)
        };
        let start = PagerState::compute(0, &settings, 5, false);
        assert_eq!(start.dots, 4);
        assert_eq!(start.active_dot, Some(0));
        assert!(start.prev_disabled);
        assert!(!start.next_disabled);

        let end = PagerState::compute(3, &settings, 5, false);
        assert!(end.next_disabled);
        assert!(!end.prev_disabled);

        let looping = PagerState::compute(0, &paged(2, 1, true), 5, false);
        assert!(looping.arrows_visible);
        assert!(!looping.prev_disabled);
        assert_eq!(looping.dots, 0);

        let short = PagerState::compute(0, &settings, 2, false);
        assert!(!short.arrows_visible);
        assert_eq!(short, PagerState::default());
    }
}
