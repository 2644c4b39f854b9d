// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// glyphquote-document: Source extraction and glyph segmentation.
//
// Turns uploaded bytes into either decoded pixels or vector character
// records (PDF embedded image first, vector text as fallback), and segments
// raster pixels into an ordered set of glyph bounding boxes.

pub mod image;
pub mod pdf;
pub mod segment;
pub mod source;

// Re-export the primary entry points so callers can use `glyphquote_document::extract` etc.
pub use pdf::reader::PdfSource;
pub use segment::segmenter::GlyphSegmenter;
pub use source::{Extraction, extract, extract_declared};
