// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: decoding uploaded JPEG/PNG files and raw PDF sample buffers.

pub mod decode;

pub use decode::{decode_encoded, decode_samples};
