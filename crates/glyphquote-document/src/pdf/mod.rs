// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: page traversal, embedded image extraction, and vector text
// extraction using the `lopdf` crate.

pub mod images;
pub mod reader;
pub mod text;

pub use reader::PdfSource;
