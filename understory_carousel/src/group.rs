// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instance identity and linked ("nav-for") carousels.
//!
//! Carousels are identified by a [`CarouselId`] handed out by an
//! [`IdAllocator`] that the constructing code owns; there is no global
//! counter.
//!
//! A [`CarouselGroup`] owns several carousels plus a [`NavForRegistry`] that
//! says which carousel drives which. Every operation routed through
//! [`CarouselGroup::drive`] collects the driven carousel's [`PeerMessage`]s
//! and delivers them to its peers. Propagation is one level deep: whatever a
//! peer produces while applying a message is dropped, so two carousels can
//! drive each other without echoing.
//!
//! ```rust
//! use understory_carousel::animator::InstantAnimator;
//! use understory_carousel::geometry::Metrics;
//! use understory_carousel::{Carousel, CarouselEvent, CarouselGroup, IdAllocator, Settings};
//!
//! let mut ids = IdAllocator::default();
//! let make = |id, slides_to_show| {
//!     let settings = Settings {
//!         slides_to_show,
//!         ..Settings::default()
//!     };
//!     let slides: Vec<u32> = (0..6).collect();
//!     let metrics = Metrics::new(600.0, 100.0);
//!     let events = Vec::<CarouselEvent>::new();
//!     Carousel::new(id, slides, settings, [], metrics, InstantAnimator::default(), events)
//!         .unwrap()
//! };
//!
//! let main = ids.allocate();
//! let thumbs = ids.allocate();
//! let mut group = CarouselGroup::new();
//! group.insert(make(main, 1));
//! group.insert(make(thumbs, 3));
//! group.link(main, thumbs);
//! group.link(thumbs, main);
//!
//! group.drive(main, |carousel| carousel.go_to(4, false));
//! assert_eq!(group.get(thumbs).map(|c| c.current_index()), Some(4));
//! ```

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::animator::Animator;
use crate::carousel::Carousel;
use crate::events::EventBus;

/// Identifier of one carousel instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CarouselId(u32);

impl CarouselId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Hands out sequential [`CarouselId`]s.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Creates an allocator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh identifier.
    pub fn allocate(&mut self) -> CarouselId {
        let id = CarouselId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// A notification from a driving carousel to its peers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeerMessage {
    /// Navigate to this raw target, without forwarding it further.
    Sync(isize),
    /// The driver's new index; peers that show every slide at once mirror
    /// their flags onto it.
    Mirror(usize),
}

/// Which carousel drives which.
#[derive(Clone, Debug, Default)]
pub struct NavForRegistry {
    peers: HashMap<CarouselId, SmallVec<[CarouselId; 2]>>,
}

impl NavForRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `driver` drive `peer`. Returns `false` for self-links and links
    /// that already exist.
    pub fn link(&mut self, driver: CarouselId, peer: CarouselId) -> bool {
        if driver == peer {
            return false;
        }
        let peers = self.peers.entry(driver).or_default();
        if peers.contains(&peer) {
            return false;
        }
        peers.push(peer);
        true
    }

    /// Removes one link. Returns `false` if it did not exist.
    pub fn unlink(&mut self, driver: CarouselId, peer: CarouselId) -> bool {
        let Some(peers) = self.peers.get_mut(&driver) else {
            return false;
        };
        let before = peers.len();
        peers.retain(|candidate| *candidate != peer);
        let removed = peers.len() != before;
        if peers.is_empty() {
            self.peers.remove(&driver);
        }
        removed
    }

    /// Forgets `id` as a driver and as a peer.
    pub fn remove(&mut self, id: CarouselId) {
        self.peers.remove(&id);
        self.peers.retain(|_, peers| {
            peers.retain(|peer| *peer != id);
            !peers.is_empty()
        });
    }

    /// Carousels driven by `driver`.
    #[must_use]
    pub fn peers(&self, driver: CarouselId) -> &[CarouselId] {
        self.peers.get(&driver).map_or(&[][..], |peers| peers.as_slice())
    }

    /// Returns `true` if `driver` drives at least one carousel.
    #[must_use]
    pub fn is_linked(&self, driver: CarouselId) -> bool {
        !self.peers(driver).is_empty()
    }
}

/// Carousels that may drive each other.
#[derive(Debug)]
pub struct CarouselGroup<T, A, E> {
    carousels: HashMap<CarouselId, Carousel<T, A, E>>,
    registry: NavForRegistry,
}

impl<T, A, E> Default for CarouselGroup<T, A, E> {
    fn default() -> Self {
        Self {
            carousels: HashMap::new(),
            registry: NavForRegistry::new(),
        }
    }
}

impl<T, A: Animator, E: EventBus> CarouselGroup<T, A, E> {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of carousels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.carousels.len()
    }

    /// Returns `true` if the group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty()
    }

    /// Identifiers of every carousel, in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<CarouselId> {
        let mut ids: Vec<_> = self.carousels.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// The links between carousels.
    #[must_use]
    pub fn registry(&self) -> &NavForRegistry {
        &self.registry
    }

    /// Adds a carousel, returning the one it replaces.
    pub fn insert(&mut self, mut carousel: Carousel<T, A, E>) -> Option<Carousel<T, A, E>> {
        let id = carousel.id();
        carousel.set_linked(self.registry.is_linked(id));
        self.carousels.insert(id, carousel)
    }

    /// Removes a carousel and every link that involves it.
    pub fn remove(&mut self, id: CarouselId) -> Option<Carousel<T, A, E>> {
        let mut removed = self.carousels.remove(&id)?;
        self.registry.remove(id);
        removed.set_linked(false);
        for (other, carousel) in &mut self.carousels {
            carousel.set_linked(self.registry.is_linked(*other));
        }
        Some(removed)
    }

    /// The carousel with this identifier.
    #[must_use]
    pub fn get(&self, id: CarouselId) -> Option<&Carousel<T, A, E>> {
        self.carousels.get(&id)
    }

    /// Mutable access without message delivery; prefer [`CarouselGroup::drive`]
    /// for anything that may navigate.
    pub fn get_mut(&mut self, id: CarouselId) -> Option<&mut Carousel<T, A, E>> {
        self.carousels.get_mut(&id)
    }

    /// Makes `driver` drive `peer`. Both must be in the group.
    pub fn link(&mut self, driver: CarouselId, peer: CarouselId) -> bool {
        if !self.carousels.contains_key(&peer) {
            return false;
        }
        let Some(carousel) = self.carousels.get_mut(&driver) else {
            return false;
        };
        if !self.registry.link(driver, peer) {
            return false;
        }
        carousel.set_linked(true);
        true
    }

    /// Removes one link.
    pub fn unlink(&mut self, driver: CarouselId, peer: CarouselId) -> bool {
        if !self.registry.unlink(driver, peer) {
            return false;
        }
        if let Some(carousel) = self.carousels.get_mut(&driver) {
            carousel.set_linked(self.registry.is_linked(driver));
        }
        true
    }

    /// Runs `f` on one carousel and delivers what it tells its peers.
    ///
    /// Returns `None` if `id` is not in the group.
    pub fn drive<R>(&mut self, id: CarouselId, f: impl FnOnce(&mut Carousel<T, A, E>) -> R) -> Option<R> {
        let carousel = self.carousels.get_mut(&id)?;
        let result = f(carousel);
        let messages = carousel.drain_messages();
        self.deliver(id, &messages);
        Some(result)
    }

    /// Ticks every carousel (in identifier order) and delivers the results.
    pub fn tick(&mut self, now: u64) {
        for id in self.ids() {
            self.drive(id, |carousel| carousel.tick(now));
        }
    }

    /// Moves every carousel's clock to `now` without firing timers.
    pub fn advance_clock(&mut self, now: u64) {
        for carousel in self.carousels.values_mut() {
            carousel.advance_clock(now);
        }
    }

    /// Earliest pending timer deadline across the group.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.carousels
            .values()
            .filter_map(Carousel::next_deadline)
            .min()
    }

    fn deliver(&mut self, driver: CarouselId, messages: &[PeerMessage]) {
        if messages.is_empty() {
            return;
        }
        for peer in self.registry.peers(driver) {
            let Some(carousel) = self.carousels.get_mut(peer) else {
                continue;
            };
            for message in messages {
                carousel.receive(*message);
            }
            drop(carousel.drain_messages());
        }
    }
}
