// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dimension normalisation: maps raw glyph geometry onto the requested
// physical envelope.

use glyphquote_core::types::{GlyphLabel, RawGlyph, ScaledGlyph, ScalingMode, TargetSize};
use tracing::{debug, instrument};

/// Scale `glyphs` so their lengths sum to `target.length` and the tallest
/// reaches `target.height`.
///
/// In [`ScalingMode::Geometry`] heights come from the bounding boxes; in
/// [`ScalingMode::FontSize`] from each glyph's font size (falling back to
/// the box height when a glyph has none). Lengths are rounded down, raised
/// to at least 1, and the difference from the target is then settled one
/// unit at a time on the currently longest glyph, earliest first on ties.
/// Every length stays positive unless there are more glyphs than units of
/// target length.
#[instrument(skip(glyphs), fields(glyphs = glyphs.len()))]
pub fn normalize(glyphs: &[RawGlyph], target: TargetSize, mode: ScalingMode) -> Vec<ScaledGlyph> {
    if glyphs.is_empty() {
        return Vec::new();
    }

    let total_width: f64 = glyphs.iter().map(RawGlyph::width).sum();
    let width_ratio = ratio(f64::from(target.length), total_width);

    let heights: Vec<f64> = glyphs
        .iter()
        .map(|g| match mode {
            ScalingMode::Geometry => g.height(),
            ScalingMode::FontSize => g.font_size().unwrap_or_else(|| g.height()),
        })
        .collect();
    let max_height = heights.iter().copied().fold(0.0_f64, f64::max);
    let height_ratio = ratio(f64::from(target.height), max_height);

    let mut lengths: Vec<u32> = glyphs
        .iter()
        .map(|g| ((g.width() * width_ratio).floor() as u32).max(1))
        .collect();
    reconcile(&mut lengths, target.length);

    debug!(width_ratio, height_ratio, ?mode, "Glyphs normalised");

    glyphs
        .iter()
        .zip(lengths)
        .zip(heights)
        .enumerate()
        .map(|(i, ((glyph, scaled_length), height))| ScaledGlyph {
            letter: label(glyph, i),
            scaled_length,
            scaled_height: ((height * height_ratio).round() as u32).max(1),
        })
        .collect()
}

fn ratio(target: f64, measured: f64) -> f64 {
    if measured > 0.0 { target / measured } else { 1.0 }
}

/// Adjust `lengths` so they sum to `target` exactly.
fn reconcile(lengths: &mut [u32], target: u32) {
    let target = u64::from(target);
    let mut sum: u64 = lengths.iter().map(|&l| u64::from(l)).sum();

    while sum < target {
        let Some(longest) = index_of_longest(lengths) else {
            return;
        };
        lengths[longest] += 1;
        sum += 1;
    }
    // Lengths raised to 1 (or float rounding) can leave the sum high.
    while sum > target {
        let Some(longest) = index_of_longest(lengths) else {
            return;
        };
        if lengths[longest] == 0 {
            return;
        }
        lengths[longest] -= 1;
        sum -= 1;
    }
}

/// First index holding the maximum value.
fn index_of_longest(lengths: &[u32]) -> Option<usize> {
    lengths
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, u32)>, (i, &len)| match best {
            Some((_, best_len)) if best_len >= len => best,
            _ => Some((i, len)),
        })
        .map(|(i, _)| i)
}

fn label(glyph: &RawGlyph, index: usize) -> GlyphLabel {
    match glyph.label() {
        Some(text) => GlyphLabel::Text(text.to_uppercase()),
        None => GlyphLabel::Ordinal(index + 1),
    }
}
