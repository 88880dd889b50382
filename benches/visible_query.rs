//! Visibility query benchmarks.
//!
//! The windowing scan starts at the first row reaching the query rectangle
//! (binary search) and stops past its far edge, so query time should stay flat
//! as the item count grows while the viewport size is fixed.
//!
//! Run with: cargo bench --bench visible_query

#![allow(missing_docs)] // criterion macros generate undocumented items

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use normgrid::layout::{GridConfig, GridLayout, Point, Viewport};

type Identity = fn(&f64, f64) -> f64;

fn identity(height: &f64, _width: f64) -> f64 {
    *height
}

/// Deterministic heights between 80 and 239.
fn heights(count: usize) -> Vec<f64> {
    (0..count).map(|i| 80.0 + ((i * 37) % 160) as f64).collect()
}

fn layout_with(count: usize) -> (GridLayout<Identity>, Vec<f64>) {
    let config = GridConfig::default()
        .with_columns(3, 5)
        .with_separators(1.0, 1.0);
    let items = heights(count);
    let mut layout = GridLayout::<Identity>::new(config, identity).expect("valid config");
    layout.set_viewport(Viewport::new(375.0, 667.0));
    layout.prepare(&items);
    (layout, items)
}

/// Benchmark visible frames in the middle of the content at growing item counts.
fn benchmark_visible_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_query_scaling");

    for count in [1_000, 10_000, 100_000] {
        let (mut layout, _) = layout_with(count);
        let middle = layout.content_size().height / 2.0;
        let viewport = Viewport::new(375.0, 667.0).with_offset(Point::new(0.0, middle));
        layout.set_viewport(viewport);

        group.bench_with_input(BenchmarkId::new("frames_in_viewport", count), &layout, |b, layout| {
            b.iter(|| black_box(layout.frames_in_viewport()));
        });
    }

    group.finish();
}

/// Benchmark an append to a large grid against a full recomputation.
fn benchmark_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_100k");

    group.bench_function("incremental", |b| {
        b.iter_batched(
            || {
                let (layout, mut items) = layout_with(100_000);
                items.push(120.0);
                (layout, items)
            },
            |(mut layout, items)| {
                layout
                    .insert_at(&items, &[items.len() - 1])
                    .expect("index in range");
                black_box(layout.content_size())
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("full", |b| {
        b.iter_batched(
            || {
                let (layout, mut items) = layout_with(100_000);
                items.push(120.0);
                (layout, items)
            },
            |(mut layout, items)| {
                layout.set_items(&items);
                black_box(layout.content_size())
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, benchmark_visible_scaling, benchmark_append);
criterion_main!(benches);
