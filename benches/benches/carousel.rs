// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use understory_carousel::animator::InstantAnimator;
use understory_carousel::clones::CloneSet;
use understory_carousel::flags::compute_flags;
use understory_carousel::geometry::{Metrics, compute_offset};
use understory_carousel::gesture::PointerSample;
use understory_carousel::paging::check_navigable;
use understory_carousel::{Breakpoint, Carousel, IdAllocator, Settings, SettingsOverlay};
use understory_timing::TimerQueue;

const SIZES: [usize; 3] = [8, 64, 512];

fn layouts() -> [(&'static str, Settings); 3] {
    [
        (
            "single",
            Settings {
                slides_to_show: 1,
                ..Settings::default()
            },
        ),
        (
            "paged",
            Settings {
                slides_to_show: 4,
                slides_to_scroll: 3,
                ..Settings::default()
            },
        ),
        (
            "center",
            Settings {
                slides_to_show: 5,
                center_mode: true,
                ..Settings::default()
            }
            .normalized(),
        ),
    ]
}

fn carousel(count: usize, settings: Settings) -> Carousel<usize, InstantAnimator, ()> {
    let mut ids = IdAllocator::new();
    let breakpoints = [
        Breakpoint::overlay(900, SettingsOverlay::default().slides_to_show(2)),
        Breakpoint::overlay(500, SettingsOverlay::default().slides_to_show(1)),
    ];
    Carousel::new(
        ids.allocate(),
        (0..count).collect(),
        settings,
        breakpoints,
        Metrics::new(1200.0, 400.0),
        InstantAnimator::default(),
        (),
    )
    .expect("bench settings are valid")
}

fn bench_layout(c: &mut Criterion) {
    let metrics = Metrics::new(1200.0, 400.0);
    let mut group = c.benchmark_group("carousel/layout");
    for (name, settings) in layouts() {
        for count in SIZES {
            let targets: Vec<isize> = (-8..count as isize + 8).collect();
            group.throughput(Throughput::Elements(targets.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("compute_offset_{name}"), count),
                &targets,
                |b, targets| {
                    b.iter(|| {
                        for &target in targets {
                            black_box(compute_offset(target, &settings, count, &metrics));
                        }
                    });
                },
            );
            group.bench_with_input(
                BenchmarkId::new(format!("check_navigable_{name}"), count),
                &targets,
                |b, targets| {
                    b.iter(|| {
                        for &target in targets {
                            black_box(check_navigable(target, &settings, count));
                        }
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/rebuild");
    for (name, settings) in layouts() {
        for count in SIZES {
            group.bench_function(BenchmarkId::new(format!("clones_and_flags_{name}"), count), |b| {
                b.iter(|| {
                    let clones = CloneSet::rebuild(count, &settings);
                    black_box(compute_flags(count / 2, &settings, &clones));
                });
            });
        }
    }
    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/navigation");
    for count in SIZES {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(BenchmarkId::new("next_full_loop", count), |b| {
            b.iter_batched(
                || carousel(count, Settings::default()),
                |mut carousel| {
                    for _ in 0..count {
                        carousel.next();
                    }
                    black_box(carousel.current_index());
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_function(BenchmarkId::new("swipe_left", count), |b| {
            b.iter_batched(
                || carousel(count, Settings::default()),
                |mut carousel| {
                    carousel.swipe_start(PointerSample::touch(Point::new(900.0, 10.0)));
                    for step in 1..=20 {
                        let x = 900.0 - f64::from(step) * 30.0;
                        black_box(carousel.swipe_move(PointerSample::touch(Point::new(x, 10.0))));
                    }
                    black_box(carousel.swipe_end());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_autoplay(c: &mut Criterion) {
    let settings = Settings {
        autoplay: true,
        autoplay_speed: 100,
        ..Settings::default()
    };
    let mut group = c.benchmark_group("carousel/autoplay");
    group.bench_function("tick_1000_intervals", |b| {
        b.iter_batched(
            || carousel(64, settings),
            |mut carousel| {
                for step in 1..=1000 {
                    carousel.tick(step * 100);
                }
                black_box(carousel.current_index());
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("timer_queue_restart", |b| {
        b.iter_batched(
            TimerQueue::<u32>::new,
            |mut timers| {
                for now in 0..1000_u64 {
                    timers.restart((now % 4) as u32, now, 50);
                    black_box(timers.pop_expired(now));
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/resize");
    group.bench_function("breakpoint_sweep", |b| {
        b.iter_batched(
            || carousel(64, Settings::default()),
            |mut carousel| {
                let mut now = 0;
                for width in (300..1300).step_by(50) {
                    carousel.resize(Metrics::new(f64::from(width), 400.0));
                    now += 50;
                    carousel.tick(now);
                }
                black_box(carousel.active_breakpoint());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_layout,
    bench_rebuild,
    bench_navigation,
    bench_autoplay,
    bench_resize
);
criterion_main!(benches);
