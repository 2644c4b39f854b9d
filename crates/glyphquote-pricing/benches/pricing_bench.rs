// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for normalisation and pricing in the glyphquote-pricing
// crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use glyphquote_core::{
    BoundingBox, PricingConfig, PricingProfile, ProfileKind, RawGlyph, ScalingMode, TargetSize,
};
use glyphquote_pricing::{PriceCalculator, normalize};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `count` glyphs with varied widths and heights, as a long sign would give.
fn glyphs(count: usize) -> Vec<RawGlyph> {
    (0..count)
        .filter_map(|i| {
            let w = 20.0 + (i % 7) as f64 * 3.5;
            let h = 60.0 + (i % 5) as f64 * 4.0;
            RawGlyph::from_box(BoundingBox::new(i as f64 * 40.0, 0.0, w, h))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Normalise 64 glyphs onto a 1013cm length, which forces a reconciliation
/// remainder.
fn bench_normalize(c: &mut Criterion) {
    let input = glyphs(64);
    let target = TargetSize {
        length: 1013,
        height: 80,
    };

    c.bench_function("normalize (64 glyphs)", |b| {
        b.iter(|| {
            let scaled = normalize(black_box(&input), target, ScalingMode::Geometry);
            black_box(scaled);
        });
    });
}

/// Price 64 scaled glyphs with the thickness profile and multiple colours.
fn bench_price(c: &mut Criterion) {
    let config = PricingConfig::default();
    let target = TargetSize {
        length: 1013,
        height: 80,
    };
    let scaled = normalize(&glyphs(64), target, ScalingMode::Geometry);
    let profile = PricingProfile {
        kind: ProfileKind::AluminiumDoosletter,
        size: 8,
        letter_width_cm: 9,
        color_count: 2,
    };

    c.bench_function("price (64 glyphs)", |b| {
        b.iter(|| {
            let result = PriceCalculator::new(&config).price(black_box(&scaled), &profile);
            black_box(result.total_price);
        });
    });
}

criterion_group!(benches, bench_normalize, bench_price);
criterion_main!(benches);
