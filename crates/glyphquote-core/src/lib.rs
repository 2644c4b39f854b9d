// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyphquote: Core types, errors, and configuration shared across all crates.

pub mod config;
pub mod error;
pub mod outcome;
pub mod types;

pub use config::{EngineConfig, PriceTier, PricingConfig, SegmentationConfig};
pub use error::QuoteError;
pub use types::*;
