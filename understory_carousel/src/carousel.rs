// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel controller.
//!
//! A [`Carousel`] ties the pure pieces of this crate together: it owns the
//! slide sequence, resolves breakpoints into active settings, keeps the clone
//! set and slide flags current, runs navigation through the
//! [`Navigator`](crate::navigation::Navigator), and drives an
//! [`Animator`] and an [`EventBus`] supplied by the host.
//!
//! The host feeds it measurements ([`Metrics`]), input (pointer samples, keys,
//! hover and focus changes), and time ([`Carousel::tick`]). Nothing here reads
//! a clock or measures anything on its own.
//!
//! Inputs that arm a timer (resizes, navigation, hover, focus, `play`) measure
//! from the last time the carousel was given. Hosts report the current time
//! with [`Carousel::advance_clock`] (or [`Carousel::tick`]) before forwarding
//! such an input, so that debounces and autoplay intervals start at the input.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_carousel::animator::InstantAnimator;
//! use understory_carousel::geometry::Metrics;
//! use understory_carousel::{Carousel, CarouselEvent, IdAllocator, Settings};
//!
//! let mut ids = IdAllocator::default();
//! let settings = Settings {
//!     slides_to_show: 2,
//!     ..Settings::default()
//! };
//! let mut carousel = Carousel::new(
//!     ids.allocate(),
//!     vec!["a", "b", "c", "d", "e"],
//!     settings,
//!     [],
//!     Metrics::new(400.0, 200.0),
//!     InstantAnimator::default(),
//!     Vec::<CarouselEvent>::new(),
//! )
//! .unwrap();
//!
//! carousel.next();
//! assert_eq!(carousel.current_index(), 1);
//! assert_eq!(carousel.animator().track_position(), Some(-600.0));
//! assert!(carousel.events().contains(&CarouselEvent::AfterChange { index: 1 }));
//! ```

use alloc::vec::Vec;

use tracing::{debug, trace};
use understory_timing::TimerQueue;

use crate::animator::{Animator, Completion, FadeMotion, TrackMotion};
use crate::autoplay::{AutoplayDriver, CarouselTimer, RESIZE_DEBOUNCE_MS};
use crate::breakpoints::{Breakpoint, BreakpointTable};
use crate::clones::CloneSet;
use crate::events::{CarouselEvent, EventBus};
use crate::flags::{SlideFlags, compute_flags};
use crate::geometry::{Metrics, compute_offset, rendered_boxes, track_offset};
use crate::gesture::{
    self, GestureContext, GestureInterpreter, GesturePhase, PointerSample, ReleaseAction,
    SwipeMove, SwipeRelease,
};
use crate::group::{CarouselId, PeerMessage};
use crate::navigation::{Navigator, Plan};
use crate::paging::{self, PagerState, Step};
use crate::sequence::SlideSequence;
use crate::settings::{Settings, SettingsError, SettingsOverlay};
use crate::signed;

/// Keys the carousel reacts to when [`Settings::accessibility`] is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Previous slide (next in right-to-left layouts).
    ArrowLeft,
    /// Next slide (previous in right-to-left layouts).
    ArrowRight,
}

/// A headless carousel over slides of type `T`.
///
/// `A` moves pixels and `E` receives notifications; both may be borrowed
/// (`&mut A`, `&mut E`) when the host wants to keep ownership.
///
/// Once unslicked (explicitly, or by an unslick breakpoint) the carousel is
/// inert: every operation except the queries is a no-op.
#[derive(Debug)]
pub struct Carousel<T, A, E> {
    id: CarouselId,
    slides: SlideSequence<T>,
    base: Settings,
    settings: Settings,
    breakpoints: BreakpointTable,
    active_breakpoint: Option<u32>,
    in_responsive_refresh: bool,
    metrics: Metrics,
    pending_metrics: Option<Metrics>,
    clones: CloneSet,
    flags: Vec<SlideFlags>,
    nav: Navigator,
    gesture: GestureInterpreter,
    swipe_left: Option<f64>,
    autoplay: AutoplayDriver,
    timers: TimerQueue<CarouselTimer>,
    now: u64,
    linked: bool,
    outbox: Vec<PeerMessage>,
    unslicked: bool,
    animator: A,
    events: E,
}

impl<T, A: Animator, E: EventBus> Carousel<T, A, E> {
    /// Creates and initializes a carousel.
    ///
    /// `settings` become the base settings that breakpoint overlays are merged
    /// onto. The initial slide is clamped into the sequence. Emits
    /// [`CarouselEvent::Init`] and, when a breakpoint applies right away,
    /// [`CarouselEvent::Breakpoint`].
    pub fn new(
        id: CarouselId,
        slides: Vec<T>,
        settings: Settings,
        breakpoints: impl IntoIterator<Item = Breakpoint>,
        metrics: Metrics,
        animator: A,
        events: E,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let breakpoints = BreakpointTable::from_entries(breakpoints, settings.mobile_first);
        breakpoints.validate(&settings)?;

        let slides = SlideSequence::new(slides);
        let initial = settings.initial_slide.min(slides.len().saturating_sub(1));
        let active = settings.normalized();
        let mut carousel = Self {
            id,
            slides,
            base: settings,
            settings: active,
            breakpoints,
            active_breakpoint: None,
            in_responsive_refresh: false,
            metrics,
            pending_metrics: None,
            clones: CloneSet::default(),
            flags: Vec::new(),
            nav: Navigator::new(initial),
            gesture: GestureInterpreter::default(),
            swipe_left: None,
            autoplay: AutoplayDriver::new(&active),
            timers: TimerQueue::new(),
            now: 0,
            linked: false,
            outbox: Vec::new(),
            unslicked: false,
            animator,
            events,
        };
        carousel.init(true);
        Ok(carousel)
    }

    /// Identifier assigned at construction.
    #[must_use]
    pub fn id(&self) -> CarouselId {
        self.id
    }

    /// Number of real slides.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// The slides in order.
    #[must_use]
    pub fn slides(&self) -> &[T] {
        self.slides.as_slice()
    }

    /// Index of the last completed transition.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.nav.current()
    }

    /// Where the carousel is heading: the running transition's destination,
    /// or the current index when idle.
    #[must_use]
    pub fn position(&self) -> usize {
        self.nav.position()
    }

    /// Returns `true` while a transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.nav.is_animating()
    }

    /// Settings currently in effect (base plus the active breakpoint).
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings breakpoint overlays are merged onto.
    #[must_use]
    pub fn base_settings(&self) -> &Settings {
        &self.base
    }

    /// Registered breakpoints.
    #[must_use]
    pub fn breakpoints(&self) -> &BreakpointTable {
        &self.breakpoints
    }

    /// Threshold of the breakpoint in effect, if any.
    #[must_use]
    pub fn active_breakpoint(&self) -> Option<u32> {
        self.active_breakpoint
    }

    /// Latest applied measurements.
    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Returns `true` once the carousel has been torn down.
    #[must_use]
    pub fn is_unslicked(&self) -> bool {
        self.unslicked
    }

    /// Clone blocks of the rendered track.
    #[must_use]
    pub fn clones(&self) -> &CloneSet {
        &self.clones
    }

    /// Flags of every rendered slide, in render order.
    #[must_use]
    pub fn slide_flags(&self) -> &[SlideFlags] {
        &self.flags
    }

    /// State of the dots and arrows.
    #[must_use]
    pub fn pager(&self) -> PagerState {
        PagerState::compute(
            self.nav.position(),
            &self.settings,
            self.slides.len(),
            self.linked,
        )
    }

    /// Track offset of the drag in progress, before right-to-left mirroring.
    #[must_use]
    pub fn swipe_left(&self) -> Option<f64> {
        self.swipe_left
    }

    /// Whether a click right after the last gesture should go through.
    #[must_use]
    pub fn should_click(&self) -> bool {
        self.gesture.should_click()
    }

    /// Phase of the gesture being tracked.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Earliest pending timer deadline; call [`Carousel::tick`] by then.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Whether this carousel drives peers.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// The animator.
    #[must_use]
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Mutable access to the animator.
    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    /// The event bus.
    #[must_use]
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Mutable access to the event bus.
    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    // --- Navigation ---

    /// Navigates to `index`.
    ///
    /// Infinite carousels, and in-range targets of finite ones, snap to the
    /// page boundary at or before `index`. A finite out-of-range target
    /// bounces back to the current slide.
    pub fn go_to(&mut self, index: isize, skip_animation: bool) {
        if self.unslicked {
            return;
        }
        let count = self.slides.len();
        let target = if self.settings.infinite || (0..signed(count)).contains(&index) {
            paging::check_navigable(index, &self.settings, count)
        } else {
            index
        };
        self.slide_handler(target, false, !skip_animation);
    }

    /// Moves one page forward.
    pub fn next(&mut self) {
        self.step(Step::Next);
    }

    /// Moves one page back.
    pub fn previous(&mut self) {
        self.step(Step::Previous);
    }

    /// Navigates to the page behind dot `page`.
    pub fn go_to_page(&mut self, page: usize) {
        if self.unslicked {
            return;
        }
        let scroll = self.settings.slides_to_scroll.max(1);
        let index = signed(page).saturating_mul(signed(scroll));
        let target = paging::check_navigable(index, &self.settings, self.slides.len());
        self.slide_handler(target, false, true);
    }

    /// Handles a click on the rendered slide at `render_index` (clones
    /// included), when [`Settings::focus_on_select`] is on.
    pub fn select(&mut self, render_index: usize) {
        if self.unslicked || !self.settings.focus_on_select {
            return;
        }
        let Some(logical) = self.clones.logical_at(render_index) else {
            return;
        };
        let animate = self.slides.len() > self.settings.slides_to_show;
        self.slide_handler(logical, false, animate);
    }

    /// Handles an arrow key.
    pub fn key(&mut self, key: Key) {
        if self.unslicked || !self.settings.accessibility {
            return;
        }
        let step = match (key, self.settings.rtl) {
            (Key::ArrowLeft, false) | (Key::ArrowRight, true) => Step::Previous,
            (Key::ArrowRight, false) | (Key::ArrowLeft, true) => Step::Next,
        };
        self.step(step);
    }

    /// Reports that a transition handed to the animator finished.
    ///
    /// Stale tokens (from cancelled or superseded transitions) are ignored.
    pub fn finish(&mut self, done: Completion) {
        if let Some(transition) = self.nav.complete(done) {
            trace!(from = transition.from, to = transition.to, "transition complete");
            self.post_slide(transition.to);
        }
    }

    // --- Autoplay ---

    /// Starts autoplay and clears every pause reason.
    pub fn play(&mut self) {
        if self.unslicked {
            return;
        }
        self.settings.autoplay = true;
        self.autoplay.resume();
        self.arm_autoplay();
    }

    /// Stops autoplay until [`Carousel::play`].
    pub fn pause(&mut self) {
        if self.unslicked {
            return;
        }
        AutoplayDriver::disarm(&mut self.timers);
        self.autoplay.paused = true;
    }

    /// The pointer entered or left the list.
    pub fn set_hovered(&mut self, hovered: bool) {
        if !self.unslicked && self.settings.pause_on_hover {
            self.interrupt(hovered);
        }
    }

    /// The pointer entered or left the dots.
    pub fn set_dots_hovered(&mut self, hovered: bool) {
        if !self.unslicked
            && self.settings.dots
            && self.settings.pause_on_dots_hover
            && self.slides.len() > self.settings.slides_to_show
        {
            self.interrupt(hovered);
        }
    }

    /// The carousel gained or lost keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        if !self.unslicked && self.settings.pause_on_focus {
            self.autoplay.focussed = focused;
            self.arm_autoplay();
        }
    }

    /// The document was hidden or shown again.
    pub fn set_visibility(&mut self, hidden: bool) {
        if !self.unslicked && self.settings.autoplay {
            self.autoplay.interrupted = hidden;
        }
    }

    /// Advances the clock to `now` (milliseconds) and fires expired timers.
    ///
    /// The clock never moves backwards. Autoplay intervals missed while the
    /// host was asleep collapse into a single tick.
    pub fn tick(&mut self, now: u64) {
        self.advance_clock(now);
        while let Some(timer) = self.timers.pop_expired(self.now) {
            match timer {
                CarouselTimer::Autoplay => self.autoplay_tick(),
                CarouselTimer::Resize => self.apply_resize(),
            }
        }
    }

    /// Moves the clock to `now` (milliseconds) without firing timers.
    ///
    /// Timers armed by the next input are measured from `now`. Expired timers
    /// stay queued for the next [`Carousel::tick`]. The clock never moves
    /// backwards.
    pub fn advance_clock(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    /// The time the carousel last saw, in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    // --- Measurements ---

    /// The viewport was resized.
    ///
    /// A change of window width is debounced: the new metrics are applied and
    /// breakpoints re-evaluated [`RESIZE_DEBOUNCE_MS`] after the last call.
    /// Other measurement changes are stored without repositioning; use
    /// [`Carousel::set_metrics`] for that.
    pub fn resize(&mut self, metrics: Metrics) {
        if self.unslicked {
            return;
        }
        let width_changed = metrics.window_width != self.metrics.window_width;
        if width_changed || self.pending_metrics.is_some() {
            self.pending_metrics = Some(metrics);
            self.timers
                .restart(CarouselTimer::Resize, self.now, RESIZE_DEBOUNCE_MS);
        } else {
            self.metrics = metrics;
        }
    }

    /// The device orientation changed: re-evaluates breakpoints immediately.
    pub fn orientation_change(&mut self, metrics: Metrics) {
        if self.unslicked {
            return;
        }
        self.metrics = metrics;
        self.check_responsive(false, false);
        if !self.unslicked {
            self.set_position();
        }
    }

    /// Replaces the measurements and snaps the track to them.
    pub fn set_metrics(&mut self, metrics: Metrics) {
        if self.unslicked {
            return;
        }
        self.metrics = metrics;
        self.set_position();
    }

    /// Snaps the track (or the fade stack) to the current position and emits
    /// [`CarouselEvent::SetPosition`].
    pub fn set_position(&mut self) {
        if self.unslicked {
            return;
        }
        let position = self.nav.position();
        if self.fits_height() {
            self.animator.fit_height(position, 0);
        }
        if self.settings.fade {
            self.animator.place_fades(position);
        } else {
            let offset = self.offset_of(signed(position));
            self.animator.place_track(offset);
        }
        self.events.emit(CarouselEvent::SetPosition);
    }

    // --- Gestures ---

    /// A pointer went down on the list. Returns `true` if a gesture is being
    /// tracked.
    ///
    /// Any attempt interrupts autoplay until the gesture ends.
    pub fn swipe_start(&mut self, pointer: PointerSample) -> bool {
        if self.unslicked || !gesture::accepts(&self.settings, pointer.kind) {
            return false;
        }
        self.autoplay.interrupted = true;
        let settings = self.settings;
        let ctx = self.gesture_context(&settings, settings.slides_to_scroll);
        self.gesture.start(pointer, &ctx)
    }

    /// The pointer moved. Returns `None` when no gesture is being tracked.
    ///
    /// The drag preview is applied to the animator directly.
    pub fn swipe_move(&mut self, pointer: PointerSample) -> Option<SwipeMove> {
        if self.unslicked || !gesture::accepts(&self.settings, pointer.kind) {
            return None;
        }
        let settings = self.settings;
        let ctx = self.gesture_context(&settings, settings.slides_to_scroll);
        let moved = self.gesture.update(pointer, &ctx)?;
        if !moved.scrolling {
            self.swipe_left = moved.swipe_left;
        }
        if moved.render
            && let Some(preview) = moved.swipe_left
        {
            self.animator.place_track(track_offset(preview, &settings));
        }
        Some(moved)
    }

    /// The pointer lifted, left the list, or was cancelled.
    pub fn swipe_end(&mut self) -> SwipeRelease {
        if self.unslicked {
            return SwipeRelease {
                action: ReleaseAction::None,
                edge: None,
            };
        }
        let settings = self.settings;
        let step = if settings.swipe_to_slide {
            let boxes = rendered_boxes(&settings, &self.metrics, self.clones.render_len());
            gesture::swipe_slide_count(
                &settings,
                self.swipe_left,
                self.nav.position(),
                &boxes,
                &self.clones,
                self.metrics.list_width,
            )
        } else {
            settings.slides_to_scroll
        };
        let ctx = self.gesture_context(&settings, step);
        let release = self.gesture.end(&ctx);
        if release.action == ReleaseAction::Scrolled {
            return release;
        }

        self.autoplay.interrupted = false;
        if let Some(direction) = release.edge {
            self.events.emit(CarouselEvent::Edge(direction));
        }
        match release.action {
            ReleaseAction::Navigate { target, direction } => {
                self.slide_handler(target, false, true);
                self.events.emit(CarouselEvent::Swipe(direction));
            }
            ReleaseAction::Reaffirm => {
                self.slide_handler(signed(self.nav.position()), false, true);
            }
            ReleaseAction::None | ReleaseAction::Scrolled => {}
        }
        release
    }

    // --- Configuration and structure ---

    /// Merges `overlay` onto both the base and the active settings.
    ///
    /// Nothing changes if the result is invalid. With `refresh`, the carousel
    /// is re-initialized (which also re-applies the active breakpoint).
    pub fn set_settings(
        &mut self,
        overlay: SettingsOverlay,
        refresh: bool,
    ) -> Result<(), SettingsError> {
        let base = overlay.apply(&self.base);
        base.validate()?;
        let active = overlay.apply(&self.settings);
        active.validate()?;
        let mut breakpoints = self.breakpoints.clone();
        breakpoints.set_mobile_first(base.mobile_first);
        breakpoints.validate(&base)?;

        self.base = base;
        self.settings = active.normalized();
        self.breakpoints = breakpoints;
        if refresh {
            self.reinit();
        }
        Ok(())
    }

    /// Adds or replaces breakpoints.
    pub fn set_breakpoints(
        &mut self,
        entries: impl IntoIterator<Item = Breakpoint>,
        refresh: bool,
    ) -> Result<(), SettingsError> {
        let mut breakpoints = self.breakpoints.clone();
        breakpoints.extend(entries);
        breakpoints.validate(&self.base)?;
        self.breakpoints = breakpoints;
        if refresh {
            self.reinit();
        }
        Ok(())
    }

    /// Inserts a slide (see [`SlideSequence::add`]) and re-initializes.
    ///
    /// Returns `false` if the index is outside the sequence.
    pub fn add_slide(&mut self, slide: T, index: Option<usize>, before: bool) -> bool {
        if self.unslicked || !self.slides.add(slide, index, before) {
            return false;
        }
        self.reinit();
        true
    }

    /// Removes slides (see [`SlideSequence::remove`]) and re-initializes.
    ///
    /// Returns `false` if the index is outside the sequence.
    pub fn remove_slide(&mut self, index: Option<usize>, before: bool, all: bool) -> bool {
        if self.unslicked || !self.slides.remove(index, before, all) {
            return false;
        }
        self.reinit();
        true
    }

    /// Keeps only the slides matching `keep` and re-initializes.
    pub fn filter(&mut self, keep: impl FnMut(usize, &T) -> bool)
    where
        T: Clone,
    {
        if self.unslicked {
            return;
        }
        self.slides.filter(keep);
        self.reinit();
    }

    /// Restores the slides hidden by [`Carousel::filter`].
    ///
    /// Returns `false` if no filter is active.
    pub fn unfilter(&mut self) -> bool {
        if self.unslicked || !self.slides.unfilter() {
            return false;
        }
        self.reinit();
        true
    }

    // --- Lifecycle ---

    /// Tears the carousel down and builds it again, then navigates to the
    /// nearest page boundary.
    pub fn refresh(&mut self) {
        if !self.unslicked {
            self.refresh_with(false);
        }
    }

    /// Rebuilds derived state after a structural or option change and emits
    /// [`CarouselEvent::ReInit`].
    ///
    /// A running transition is settled on its destination first.
    pub fn reinit(&mut self) {
        if self.unslicked {
            return;
        }
        if let Some(pending) = self.nav.abandon() {
            self.animator.cancel();
            self.nav.reset(pending.to);
        }
        self.gesture.reset();
        self.swipe_left = None;

        let count = self.slides.len();
        let mut current = self.nav.current();
        if current >= count && current != 0 {
            current = current.saturating_sub(self.settings.slides_to_scroll.max(1));
        }
        current = current.min(count.saturating_sub(1));
        if count <= self.settings.slides_to_show {
            current = 0;
        }
        self.nav.reset(current);
        self.clones = CloneSet::rebuild(count, &self.settings);

        if self.check_responsive(false, true) || self.unslicked {
            return;
        }

        self.flags = compute_flags(current, &self.settings, &self.clones);
        self.set_position();
        self.autoplay.paused = !self.settings.autoplay;
        self.arm_autoplay();
        debug!(id = self.id.get(), slides = count, current, "reinit");
        self.events.emit(CarouselEvent::ReInit);
    }

    /// Tears the carousel down for good, emitting [`CarouselEvent::Unslick`]
    /// and [`CarouselEvent::Destroy`].
    pub fn unslick(&mut self) {
        if !self.unslicked {
            self.unslick_from(None);
        }
    }

    /// Tears the carousel down, emitting [`CarouselEvent::Destroy`].
    pub fn destroy(&mut self) {
        if !self.unslicked {
            debug!(id = self.id.get(), "destroy");
            self.destroy_with(false);
        }
    }

    // --- Peers ---

    /// Marks this carousel as driving peers.
    ///
    /// Linked carousels queue a [`PeerMessage`] for every navigation; collect
    /// them with [`Carousel::drain_messages`] (a
    /// [`CarouselGroup`](crate::CarouselGroup) does this for you).
    pub fn set_linked(&mut self, linked: bool) {
        self.linked = linked;
    }

    /// Takes the queued peer messages.
    pub fn drain_messages(&mut self) -> Vec<PeerMessage> {
        core::mem::take(&mut self.outbox)
    }

    /// Applies a message from a peer.
    ///
    /// Synced navigation is not propagated any further.
    pub fn receive(&mut self, message: PeerMessage) {
        if self.unslicked {
            return;
        }
        match message {
            PeerMessage::Sync(target) => self.slide_handler(target, true, true),
            PeerMessage::Mirror(index) => {
                if self.slides.len() <= self.settings.slides_to_show {
                    self.flags = compute_flags(index, &self.settings, &self.clones);
                }
            }
        }
    }

    // --- Internals ---

    fn init(&mut self, creation: bool) {
        self.unslicked = false;
        self.clones = CloneSet::rebuild(self.slides.len(), &self.settings);
        self.flags = compute_flags(self.nav.current(), &self.settings, &self.clones);
        self.set_position();
        self.check_responsive(true, false);
        if creation {
            self.events.emit(CarouselEvent::Init);
        }
        if self.settings.autoplay && !self.unslicked {
            self.autoplay.paused = false;
            self.arm_autoplay();
        }
    }

    fn refresh_with(&mut self, initializing: bool) {
        let count = self.slides.len();
        let show = self.settings.slides_to_show;
        let mut current = self.nav.position();
        if !self.settings.infinite {
            current = current.min(count.saturating_sub(show));
        }
        if count <= show {
            current = 0;
        }

        self.destroy_with(true);
        self.nav.reset(current);
        self.init(false);
        if !initializing {
            let target = paging::check_navigable(signed(current), &self.settings, count);
            self.slide_handler(target, false, true);
        }
    }

    fn destroy_with(&mut self, refresh: bool) {
        if refresh {
            AutoplayDriver::disarm(&mut self.timers);
        } else {
            self.timers.clear();
            self.pending_metrics = None;
        }
        self.gesture.reset();
        self.swipe_left = None;
        if self.nav.abandon().is_some() {
            self.animator.cancel();
        }
        self.clones = CloneSet::default();
        self.flags.clear();
        self.unslicked = true;
        if !refresh {
            self.events.emit(CarouselEvent::Destroy);
        }
    }

    fn unslick_from(&mut self, breakpoint: Option<u32>) {
        debug!(id = self.id.get(), ?breakpoint, "unslick");
        self.events.emit(CarouselEvent::Unslick(breakpoint));
        self.destroy_with(false);
    }

    /// Re-evaluates breakpoints. Returns `true` if the carousel was rebuilt
    /// or torn down as a result.
    fn check_responsive(&mut self, initial: bool, force: bool) -> bool {
        if self.in_responsive_refresh || self.breakpoints.is_empty() {
            return false;
        }
        let width = self.base.respond_to.width(&self.metrics);
        let target = self.breakpoints.resolve(width);
        match target {
            Some(threshold) => {
                if self.active_breakpoint == Some(threshold) && !force {
                    return false;
                }
                self.active_breakpoint = Some(threshold);
                match self.breakpoints.settings_at(threshold, &self.base) {
                    Some(settings) => self.apply_breakpoint(settings, initial),
                    None => self.unslick_from(Some(threshold)),
                }
            }
            None => {
                if self.active_breakpoint.is_none() {
                    return false;
                }
                self.active_breakpoint = None;
                self.apply_breakpoint(self.base.normalized(), initial);
            }
        }
        debug!(id = self.id.get(), breakpoint = ?target, width, "breakpoint");
        self.events.emit(CarouselEvent::Breakpoint(target));
        true
    }

    fn apply_breakpoint(&mut self, settings: Settings, initial: bool) {
        self.settings = settings;
        self.in_responsive_refresh = true;
        if initial {
            let initial_slide = settings
                .initial_slide
                .min(self.slides.len().saturating_sub(1));
            self.nav.reset(initial_slide);
            self.refresh_with(true);
        } else {
            self.reinit();
        }
        self.in_responsive_refresh = false;
    }

    fn step(&mut self, step: Step) {
        if self.unslicked {
            return;
        }
        let position = self.nav.position();
        if let Some(target) =
            paging::step_target(step, position, &self.settings, self.slides.len())
        {
            self.slide_handler(target, false, true);
        }
    }

    /// Runs one navigation request through the state machine.
    ///
    /// `sync` marks requests coming from a peer; they are not forwarded again.
    fn slide_handler(&mut self, target: isize, sync: bool, animate: bool) {
        if self.unslicked {
            return;
        }
        let count = self.slides.len();
        let plan = self
            .nav
            .plan(target, animate, &self.settings, count, self.linked);
        match plan {
            Plan::Ignored => {
                debug!(id = self.id.get(), target, "navigation request dropped");
                return;
            }
            Plan::Unchanged => return,
            Plan::Hold | Plan::Reaffirm { .. } | Plan::Change { .. } => {}
        }

        if !sync && self.linked {
            self.outbox.push(PeerMessage::Sync(target));
        }
        let position = self.nav.position();
        if self.nav.abandon().is_some() {
            self.animator.cancel();
        }
        let speed = self.settings.speed;

        match plan {
            Plan::Reaffirm { animate } => {
                let done = self.nav.begin(position, position);
                let done = if animate {
                    let motion = TrackMotion {
                        offset: self.offset_of(signed(position)),
                        duration_ms: speed,
                    };
                    self.animator.animate_track(motion, done)
                } else {
                    Some(done)
                };
                if let Some(done) = done {
                    self.finish(done);
                }
            }
            Plan::Change { from, to, animate } => {
                AutoplayDriver::disarm(&mut self.timers);
                self.events.emit(CarouselEvent::BeforeChange { from, to });
                let done = self.nav.begin(from, to);
                self.flags = compute_flags(to, &self.settings, &self.clones);
                if self.linked {
                    self.outbox.push(PeerMessage::Mirror(to));
                }

                let done = if self.settings.fade {
                    let done = if animate {
                        let motion = FadeMotion {
                            from,
                            to,
                            duration_ms: speed,
                        };
                        self.animator.animate_fade(motion, done)
                    } else {
                        Some(done)
                    };
                    if self.fits_height() {
                        self.animator.fit_height(to, speed);
                    }
                    done
                } else {
                    if self.fits_height() {
                        self.animator.fit_height(to, speed);
                    }
                    if animate {
                        let motion = TrackMotion {
                            offset: self.offset_of(target),
                            duration_ms: speed,
                        };
                        self.animator.animate_track(motion, done)
                    } else {
                        Some(done)
                    }
                };
                if let Some(done) = done {
                    self.finish(done);
                }
            }
            Plan::Hold | Plan::Ignored | Plan::Unchanged => {}
        }
    }

    fn post_slide(&mut self, index: usize) {
        if self.unslicked {
            return;
        }
        self.events.emit(CarouselEvent::AfterChange { index });
        if self.slides.len() > self.settings.slides_to_show {
            self.set_position();
        }
        self.swipe_left = None;
        if self.settings.autoplay {
            self.arm_autoplay();
        }
        if self.settings.accessibility && self.settings.focus_on_change {
            self.events.emit(CarouselEvent::FocusSlide(index));
        }
    }

    fn autoplay_tick(&mut self) {
        let position = self.nav.position();
        if let Some(target) =
            self.autoplay
                .next_target(position, &self.settings, self.slides.len())
        {
            self.slide_handler(target, false, true);
        }
        if self
            .timers
            .deadline_of(&CarouselTimer::Autoplay)
            .is_some_and(|deadline| deadline <= self.now)
        {
            self.arm_autoplay();
        }
    }

    fn apply_resize(&mut self) {
        if let Some(metrics) = self.pending_metrics.take() {
            self.metrics = metrics;
        }
        if self.unslicked {
            return;
        }
        self.check_responsive(false, false);
        if !self.unslicked {
            self.set_position();
        }
    }

    fn interrupt(&mut self, toggle: bool) {
        if !toggle {
            self.arm_autoplay();
        }
        self.autoplay.interrupted = toggle;
    }

    fn arm_autoplay(&mut self) {
        if self.autoplay.paused {
            AutoplayDriver::disarm(&mut self.timers);
            return;
        }
        self.autoplay
            .arm(&mut self.timers, self.now, &self.settings, self.slides.len());
    }

    fn fits_height(&self) -> bool {
        self.settings.adaptive_height
            && self.settings.slides_to_show == 1
            && !self.settings.is_vertical()
    }

    fn offset_of(&self, target: isize) -> f64 {
        let offset = compute_offset(target, &self.settings, self.slides.len(), &self.metrics);
        track_offset(offset, &self.settings)
    }

    fn gesture_context<'a>(&self, settings: &'a Settings, slide_step: usize) -> GestureContext<'a> {
        let slide_count = self.slides.len();
        let current = self.nav.position();
        GestureContext {
            settings,
            slide_count,
            current,
            current_offset: compute_offset(signed(current), settings, slide_count, &self.metrics),
            dot_count: paging::dot_count(settings, slide_count, self.linked),
            animating: self.nav.is_animating(),
            list_width: self.metrics.list_width,
            list_height: self.metrics.list_height,
            slide_step,
        }
    }
}
