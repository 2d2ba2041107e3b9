// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_carousel` crate.
//!
//! Behavioral properties that hold across configurations.

use kurbo::Point;
use understory_carousel::animator::InstantAnimator;
use understory_carousel::clones::CloneSet;
use understory_carousel::gesture::PointerSample;
use understory_carousel::geometry::{Metrics, compute_offset};
use understory_carousel::{
    Breakpoint, Carousel, CarouselEvent, IdAllocator, Settings, SettingsOverlay, SwipeDirection,
};

type TestCarousel = Carousel<usize, InstantAnimator, Vec<CarouselEvent>>;

fn build(count: usize, settings: Settings, metrics: Metrics) -> TestCarousel {
    build_with(count, settings, Vec::new(), metrics)
}

fn build_with(
    count: usize,
    settings: Settings,
    breakpoints: Vec<Breakpoint>,
    metrics: Metrics,
) -> TestCarousel {
    let mut ids = IdAllocator::new();
    Carousel::new(
        ids.allocate(),
        (0..count).collect(),
        settings,
        breakpoints,
        metrics,
        InstantAnimator::default(),
        Vec::new(),
    )
    .unwrap()
}

fn show(slides_to_show: usize, slides_to_scroll: usize) -> Settings {
    Settings {
        slides_to_show,
        slides_to_scroll,
        ..Settings::default()
    }
}

fn count_of(events: &[CarouselEvent], pred: impl Fn(&CarouselEvent) -> bool) -> usize {
    events.iter().filter(|event| pred(event)).count()
}

#[test]
fn clone_set_is_idempotent() {
    let settings = show(3, 1);
    let mut carousel = build(7, settings, Metrics::new(300.0, 100.0));
    let expected = CloneSet::rebuild(7, carousel.settings());
    assert_eq!(carousel.clones(), &expected);

    carousel.reinit();
    carousel.reinit();
    assert_eq!(carousel.clones(), &expected);
    assert_eq!(carousel.clones().render_len(), 7 + 2 * 3);
    assert_eq!(carousel.slide_flags().len(), 13);
}

#[test]
fn seven_slides_loop_one_track_width_apart() {
    let settings = show(3, 1);
    let metrics = Metrics::new(300.0, 100.0);
    let clones = CloneSet::rebuild(7, &settings);

    let leading: Vec<_> = clones
        .leading()
        .iter()
        .map(|slot| (slot.logical, slot.source))
        .collect();
    let trailing: Vec<_> = clones
        .trailing()
        .iter()
        .map(|slot| (slot.logical, slot.source))
        .collect();
    assert_eq!(leading, [(-3, 4), (-2, 5), (-1, 6)]);
    assert_eq!(trailing, [(7, 0), (8, 1), (9, 2)]);

    // Landing on the trailing clone of slide 0 looks exactly like slide 0,
    // one full loop further along.
    let first = compute_offset(0, &settings, 7, &metrics);
    let wrapped = compute_offset(7, &settings, 7, &metrics);
    assert_eq!(first - wrapped, 7.0 * 100.0);
}

#[test]
fn infinite_go_to_always_lands_on_a_real_slide() {
    let mut carousel = build(5, show(2, 1), Metrics::new(400.0, 200.0));
    let targets = (-23..=23).chain([isize::MIN, isize::MIN + 1, isize::MAX, isize::MAX - 1]);
    for target in targets {
        carousel.go_to(target, false);
        let current = carousel.current_index();
        assert!(current < 5, "go_to({target}) landed on {current}");
        assert!(!carousel.is_animating());
        assert_eq!(carousel.position(), current);
    }
}

#[test]
fn finite_go_to_out_of_range_settles_in_place() {
    let settings = Settings {
        infinite: false,
        ..show(1, 1)
    };
    let mut carousel = build(5, settings, Metrics::new(300.0, 100.0));
    carousel.go_to(2, false);
    carousel.events_mut().clear();

    for target in [10, -1, isize::MIN, isize::MAX] {
        carousel.go_to(target, false);
        assert_eq!(carousel.current_index(), 2);
    }
    let events = carousel.events();
    assert_eq!(
        count_of(events, |event| matches!(event, CarouselEvent::BeforeChange { .. })),
        0
    );
    assert_eq!(
        count_of(events, |event| *event == CarouselEvent::AfterChange { index: 2 }),
        4
    );
}

#[test]
fn paged_steps_stay_on_page_boundaries() {
    let mut carousel = build(10, show(3, 3), Metrics::new(900.0, 300.0));
    let mut visited = Vec::new();
    for _ in 0..4 {
        carousel.next();
        visited.push(carousel.current_index());
    }
    assert_eq!(visited, [3, 6, 9, 0]);
}

#[test]
fn fading_to_the_shown_slide_does_nothing() {
    let settings = Settings {
        fade: true,
        ..Settings::default()
    };
    let mut carousel = build(4, settings, Metrics::new(300.0, 100.0));
    carousel.go_to(2, false);
    carousel.events_mut().clear();

    carousel.go_to(2, false);
    assert!(carousel.events().is_empty());
    assert_eq!(carousel.current_index(), 2);
    assert_eq!(carousel.animator().visible_slide(), Some(2));
}

#[test]
fn center_mode_parities_differ_by_one_slide() {
    // Both layouts use 100px slides; the even one has one more slide in view.
    let odd = Settings {
        center_mode: true,
        ..show(3, 1)
    };
    let even = Settings {
        center_mode: true,
        ..show(4, 1)
    };
    let odd_metrics = Metrics::new(300.0, 100.0);
    let even_metrics = Metrics::new(400.0, 100.0);
    let count = 20;
    let target = 10;

    // Leading edge of the target slide inside the viewport.
    let edge = |settings: &Settings, metrics: &Metrics| {
        let clones = CloneSet::rebuild(count, settings);
        let render = clones.to_render_index(target).unwrap();
        render as f64 * 100.0 + compute_offset(target, settings, count, metrics)
    };
    let odd_edge = edge(&odd, &odd_metrics);
    let even_edge = edge(&even, &even_metrics);

    // Odd: exactly centered. Even: the forward bias puts it half a slide
    // past the middle.
    assert_eq!(odd_edge, 100.0);
    assert_eq!(even_edge, 200.0);
    assert_eq!(even_edge - odd_edge, 100.0);
}

#[test]
fn swipe_threshold_separates_settle_from_step() {
    // 500px list with the default threshold of 5: 100px swipes navigate.
    let metrics = Metrics::new(500.0, 300.0);
    let mut carousel = build(5, Settings::default(), metrics);

    let drag = |carousel: &mut TestCarousel, from: f64, to: f64| {
        assert!(carousel.swipe_start(PointerSample::touch(Point::new(from, 10.0))));
        assert!(
            carousel
                .swipe_move(PointerSample::touch(Point::new(to, 10.0)))
                .is_some()
        );
        carousel.swipe_end()
    };

    drag(&mut carousel, 300.0, 201.0);
    assert_eq!(carousel.current_index(), 0);
    assert!(
        carousel
            .events()
            .contains(&CarouselEvent::AfterChange { index: 0 })
    );
    assert!(
        !carousel
            .events()
            .iter()
            .any(|event| matches!(event, CarouselEvent::Swipe(_)))
    );

    drag(&mut carousel, 300.0, 200.0);
    assert_eq!(carousel.current_index(), 1);
    assert_eq!(
        carousel.events().last(),
        Some(&CarouselEvent::Swipe(SwipeDirection::Left))
    );

    drag(&mut carousel, 100.0, 250.0);
    assert_eq!(carousel.current_index(), 0);
    drag(&mut carousel, 100.0, 250.0);
    assert_eq!(carousel.current_index(), 4);
    assert_eq!(
        carousel.events().last(),
        Some(&CarouselEvent::Swipe(SwipeDirection::Right))
    );
}

#[test]
fn breakpoint_overlays_do_not_leak() {
    let base = Settings {
        dots: true,
        ..show(4, 1)
    };
    let breakpoints = vec![
        Breakpoint::overlay(1000, SettingsOverlay::default().slides_to_show(3).dots(false)),
        Breakpoint::overlay(600, SettingsOverlay::default().slides_to_show(1)),
    ];
    let mut carousel = build_with(10, base, breakpoints, Metrics::new(900.0, 300.0));
    assert_eq!(carousel.active_breakpoint(), Some(1000));
    assert_eq!(carousel.settings().slides_to_show, 3);
    assert!(!carousel.settings().dots);

    carousel.resize(Metrics::new(500.0, 300.0));
    carousel.tick(49);
    assert_eq!(carousel.active_breakpoint(), Some(1000));
    carousel.tick(50);
    assert_eq!(carousel.active_breakpoint(), Some(600));
    assert_eq!(carousel.settings().slides_to_show, 1);
    // `dots` comes from the base settings, not from the previous breakpoint.
    assert!(carousel.settings().dots);

    carousel.resize(Metrics::new(1200.0, 300.0));
    carousel.tick(100);
    assert_eq!(carousel.active_breakpoint(), None);
    assert_eq!(carousel.settings(), &carousel.base_settings().normalized());
    assert!(
        carousel
            .events()
            .contains(&CarouselEvent::Breakpoint(None))
    );
}
