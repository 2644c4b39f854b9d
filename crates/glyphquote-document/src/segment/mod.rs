// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster glyph segmentation: binarization, closing, contour extraction,
// noise filtering, reading-order sort, and fragment merging.

pub mod merge;
pub mod segmenter;

pub use merge::merge_pass;
pub use segmenter::GlyphSegmenter;
