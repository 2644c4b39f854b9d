// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// glyphquote-pricing: Dimension normalisation and tiered glyph pricing.
//
// Maps raw glyph geometry onto a requested physical envelope and prices the
// result per profile. Everything here is a pure function of its inputs and
// the shared, read-only `PricingConfig`.

pub mod calculator;
pub mod normalize;
pub mod profile;
pub mod surcharge;
pub mod tiers;

pub use calculator::PriceCalculator;
pub use normalize::normalize;
pub use profile::parse_profile;
pub use surcharge::{SizeField, SurchargeRule};
pub use tiers::base_price;
