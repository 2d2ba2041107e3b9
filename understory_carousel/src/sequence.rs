// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered list of slide handles a carousel owns.
//!
//! Slides are opaque to the engine; `T` is whatever the host uses to refer to
//! its content. The sequence only changes through the structural operations
//! here, and the carousel rebuilds its derived state after each of them.

use alloc::vec::Vec;

/// Ordered slide handles plus the unfiltered list while a filter is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideSequence<T> {
    slides: Vec<T>,
    unfiltered: Option<Vec<T>>,
}

impl<T> SlideSequence<T> {
    /// Creates a sequence from `slides`.
    #[must_use]
    pub fn new(slides: Vec<T>) -> Self {
        Self {
            slides,
            unfiltered: None,
        }
    }

    /// Number of slides (the slide count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Returns `true` if there are no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// The slides in order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.slides
    }

    /// The slide at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slides.get(index)
    }

    /// Returns `true` while a filter hides some slides.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.unfiltered.is_some()
    }

    /// Inserts `slide`.
    ///
    /// With an `index`, the slide goes before or after the slide at that index,
    /// and an index outside the sequence is rejected. Without one, it goes to
    /// the front (`before`) or the back.
    pub fn add(&mut self, slide: T, index: Option<usize>, before: bool) -> bool {
        let at = match index {
            Some(index) if index >= self.slides.len() => return false,
            Some(index) if before => index,
            Some(index) => index + 1,
            None if before => 0,
            None => self.slides.len(),
        };
        self.slides.insert(at, slide);
        self.unfiltered = None;
        true
    }

    /// Removes slides.
    ///
    /// Without an `index`, removes the first slide (`before`) or the last one.
    /// With one, removes the slide at `index`, or the one before it when
    /// `before` is set. `all` removes every slide once the index is validated.
    /// Returns `false` (and changes nothing) for an index outside the sequence.
    pub fn remove(&mut self, index: Option<usize>, before: bool, all: bool) -> bool {
        let count = self.slides.len();
        let target = match index {
            None if before => Some(0),
            None => count.checked_sub(1),
            Some(index) if before => index.checked_sub(1),
            Some(index) => Some(index),
        };
        let Some(target) = target.filter(|target| *target < count) else {
            return false;
        };
        if all {
            self.slides.clear();
        } else {
            self.slides.remove(target);
        }
        self.unfiltered = None;
        true
    }

    /// Restores the slides hidden by [`SlideSequence::filter`].
    ///
    /// Returns `false` if no filter is active.
    pub fn unfilter(&mut self) -> bool {
        match self.unfiltered.take() {
            Some(all) => {
                self.slides = all;
                true
            }
            None => false,
        }
    }
}

impl<T: Clone> SlideSequence<T> {
    /// Keeps only the slides for which `keep(index, slide)` returns `true`.
    ///
    /// Indexes refer to the unfiltered sequence. Filtering again replaces the
    /// previous filter rather than narrowing it.
    pub fn filter(&mut self, mut keep: impl FnMut(usize, &T) -> bool) {
        let all = self.unfiltered.take().unwrap_or_else(|| self.slides.clone());
        self.slides = all
            .iter()
            .enumerate()
            .filter(|(index, slide)| keep(*index, slide))
            .map(|(_, slide)| slide.clone())
            .collect();
        self.unfiltered = Some(all);
    }
}
