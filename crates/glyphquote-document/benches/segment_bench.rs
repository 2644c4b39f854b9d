// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for raster segmentation in the glyphquote-document crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, GrayImage, Luma};

use glyphquote_core::SegmentationConfig;
use glyphquote_document::GlyphSegmenter;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Segment a 640x160 sign mock-up: eight dark letter blocks, each with a
/// detached dot above it, on a light background.
fn bench_segment_sign(c: &mut Criterion) {
    let mut img = GrayImage::from_pixel(640, 160, Luma([235u8]));
    for i in 0..8u32 {
        let x0 = 20 + i * 75;
        for y in 50..140 {
            for x in x0..x0 + 40 {
                img.put_pixel(x, y, Luma([20u8]));
            }
        }
        for y in 20..42 {
            for x in x0 + 5..x0 + 30 {
                img.put_pixel(x, y, Luma([20u8]));
            }
        }
    }
    let dynamic = DynamicImage::ImageLuma8(img);
    let config = SegmentationConfig::default();

    c.bench_function("segment (640x160, 8 glyphs)", |b| {
        b.iter(|| {
            let glyphs = GlyphSegmenter::new(&config).segment(black_box(&dynamic));
            black_box(glyphs.len());
        });
    });
}

criterion_group!(benches, bench_segment_sign);
criterion_main!(benches);
