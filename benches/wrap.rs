//! Wrap virtualizer performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wrapedit::text::{WrapOptions, build_wrap_segments};
use wrapedit::{Document, MonospaceMeasurer, WrapMode, WrapVirtualizer};

fn prose(lines: usize) -> String {
    (0..lines)
        .map(|i| {
            format!(
                "{i}: the quick brown fox jumps over the lazy dog while the editor keeps wrapping"
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn segment_building(c: &mut Criterion) {
    let measurer = MonospaceMeasurer::default();
    let line = "lorem ipsum dolor sit amet ".repeat(400);
    let mut group = c.benchmark_group("build_wrap_segments");
    for mode in [WrapMode::Char, WrapMode::Word] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{mode:?}")),
            &mode,
            |b, &mode| {
                b.iter(|| build_wrap_segments(black_box(&line), 640.0, &measurer, mode, 2048));
            },
        );
    }
    group.finish();

    // No whitespace at all: the degenerate long-line case.
    let unbroken = "x".repeat(100_000);
    c.bench_function("build_wrap_segments_unbroken_100k", |b| {
        b.iter(|| {
            build_wrap_segments(black_box(&unbroken), 640.0, &measurer, WrapMode::Word, 2048)
        });
    });
}

fn row_mapping(c: &mut Criterion) {
    let measurer = MonospaceMeasurer::default();
    let doc = Document::with_text(&prose(50_000));

    c.bench_function("map_visual_row_cold", |b| {
        b.iter(|| {
            let mut wrap = WrapVirtualizer::new(WrapOptions::default(), WrapMode::Word);
            wrap.map_visual_row_to_line(&doc, black_box(5_000), 320.0, &measurer)
        });
    });

    let mut wrap = WrapVirtualizer::new(WrapOptions::default(), WrapMode::Word);
    wrap.map_visual_row_to_line(&doc, 120_000, 320.0, &measurer);
    c.bench_function("map_visual_row_warm_anchors", |b| {
        b.iter(|| wrap.map_visual_row_to_line(&doc, black_box(100_000), 320.0, &measurer));
    });

    c.bench_function("visual_row_start_for_line_warm", |b| {
        b.iter(|| wrap.visual_row_start_for_line(&doc, black_box(30_000), 320.0, &measurer));
    });

    c.bench_function("estimated_total_visual_rows", |b| {
        b.iter(|| wrap.estimated_total_visual_rows(&doc, 320.0));
    });
}

criterion_group!(benches, segment_building, row_mapping);
criterion_main!(benches);
