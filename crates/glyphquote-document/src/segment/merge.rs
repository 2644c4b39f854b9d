// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fragment merging: joins boxes that start within a small horizontal gap of
// the previous box (dotted letters, broken strokes).

use glyphquote_core::types::{GlyphSet, RawGlyph};
use tracing::debug;

/// One left-to-right pass over `glyphs`.
///
/// A box whose left edge lies at or before the running box's right edge plus
/// `gap_px` is absorbed into it. Overlapping boxes therefore always merge.
/// Applying the pass to its own output changes nothing.
pub fn merge_pass(glyphs: GlyphSet, gap_px: u32) -> GlyphSet {
    let gap = f64::from(gap_px);
    let before = glyphs.len();

    let mut merged: Vec<RawGlyph> = Vec::with_capacity(before);
    let mut iter = glyphs.into_inner().into_iter();
    let Some(mut current) = iter.next() else {
        return GlyphSet::default();
    };

    for next in iter {
        if next.bbox().x <= current.bbox().right() + gap {
            current = absorb(current, &next);
        } else {
            merged.push(std::mem::replace(&mut current, next));
        }
    }
    merged.push(current);

    if merged.len() != before {
        debug!(before, after = merged.len(), "Merged glyph fragments");
    }
    GlyphSet::new(merged)
}

fn absorb(current: RawGlyph, next: &RawGlyph) -> RawGlyph {
    let union = current.bbox().union(next.bbox());
    RawGlyph::from_box(union).unwrap_or(current)
}
