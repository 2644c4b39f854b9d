// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Base price lookup.

use glyphquote_core::config::PricingConfig;

/// Base price for a glyph of `height_cm`.
///
/// Tiers are checked in order and the first containing tier wins. Heights
/// outside every tier (above the table, or below its first row) get the
/// ceiling price.
pub fn base_price(height_cm: u32, config: &PricingConfig) -> f64 {
    config
        .tiers
        .iter()
        .find(|tier| tier.contains(height_cm))
        .map_or(config.ceiling_price, |tier| tier.base_price)
}
