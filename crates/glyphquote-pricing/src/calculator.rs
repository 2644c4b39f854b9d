// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-glyph price calculation.

use glyphquote_core::config::PricingConfig;
use glyphquote_core::types::{PriceLine, PricingProfile, PricingResult, ScaledGlyph};
use tracing::{info, instrument};

use crate::surcharge::SurchargeRule;
use crate::tiers::base_price;

/// Prices scaled glyphs against a shared price table.
///
/// Every profile runs the same steps: tier lookup, width adjustment,
/// profile surcharge, colour surcharge, rounding to cents.
pub struct PriceCalculator<'a> {
    config: &'a PricingConfig,
}

impl<'a> PriceCalculator<'a> {
    pub fn new(config: &'a PricingConfig) -> Self {
        Self { config }
    }

    /// Price every glyph and total the result.
    #[instrument(skip(self, glyphs, profile), fields(glyphs = glyphs.len(), profile = ?profile.kind))]
    pub fn price(&self, glyphs: &[ScaledGlyph], profile: &PricingProfile) -> PricingResult {
        let rule = SurchargeRule::for_kind(profile.kind);

        let prices: Vec<PriceLine> = glyphs
            .iter()
            .map(|glyph| PriceLine {
                letter: glyph.letter.clone(),
                scaled_length: glyph.scaled_length,
                scaled_height: glyph.scaled_height,
                price: self.glyph_price(glyph.scaled_height, profile, &rule),
            })
            .collect();

        let total_price = round_cents(prices.iter().map(|line| line.price).sum());
        info!(total_price, "Quote priced");

        PricingResult {
            total_price,
            prices,
        }
    }

    fn glyph_price(&self, height_cm: u32, profile: &PricingProfile, rule: &SurchargeRule) -> f64 {
        let base = base_price(height_cm, self.config);

        let width_delta = profile.letter_width_cm.abs_diff(self.config.reference_width_cm);
        let width_pct = width_delta as f64 * self.config.width_adjustment_pct_per_cm;

        let mut price = base * (1.0 + width_pct / 100.0);
        price += base * rule.percent(profile.size) / 100.0;
        if profile.color_count > 1 {
            price += self.config.extra_color_surcharge;
        }
        round_cents(price)
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
