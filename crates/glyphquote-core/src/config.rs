// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration. Built once at startup and shared read-only by every
// pipeline invocation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::types::TargetSize;

/// Tunables for raster glyph segmentation.
///
/// The thresholds depend on scan resolution and typeface, so they are not
/// hard-coded in the segmenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Boxes with area at or below this (px²) are discarded as noise.
    pub min_area_px: u32,
    /// Boxes with width/height at or above this are discarded as smears.
    pub max_aspect_ratio: f64,
    /// A box starting within this many pixels of the previous box's right
    /// edge is merged into it.
    pub merge_gap_px: u32,
    /// Radius of the square closing element (1 gives a 3x3 square).
    pub closing_radius: u8,
    /// Number of dilate/erode iterations in the closing.
    pub closing_iterations: u8,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_area_px: 500,
            max_aspect_ratio: 3.0,
            merge_gap_px: 5,
            closing_radius: 1,
            closing_iterations: 2,
        }
    }
}

/// One row of the base price table. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    pub min_cm: u32,
    pub max_cm: u32,
    pub base_price: f64,
}

impl PriceTier {
    pub const fn new(min_cm: u32, max_cm: u32, base_price: f64) -> Self {
        Self {
            min_cm,
            max_cm,
            base_price,
        }
    }

    pub fn contains(&self, height_cm: u32) -> bool {
        (self.min_cm..=self.max_cm).contains(&height_cm)
    }
}

/// The shared base price table, checked in order; first match wins.
pub const DEFAULT_PRICE_TIERS: [PriceTier; 14] = [
    PriceTier::new(10, 25, 50.0),
    PriceTier::new(25, 30, 60.0),
    PriceTier::new(30, 35, 70.0),
    PriceTier::new(35, 40, 80.0),
    PriceTier::new(41, 45, 85.0),
    PriceTier::new(46, 50, 90.0),
    PriceTier::new(51, 55, 95.0),
    PriceTier::new(56, 60, 100.0),
    PriceTier::new(61, 65, 105.0),
    PriceTier::new(66, 70, 110.0),
    PriceTier::new(71, 75, 120.0),
    PriceTier::new(76, 80, 130.0),
    PriceTier::new(81, 85, 140.0),
    PriceTier::new(86, 90, 160.0),
];

/// Price table and the adjustments shared by every profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub tiers: Vec<PriceTier>,
    /// Base price used when no tier matches.
    pub ceiling_price: f64,
    /// Letter width (cm) at which no width adjustment applies.
    pub reference_width_cm: i64,
    /// Percentage added per centimetre of deviation from the reference width.
    pub width_adjustment_pct_per_cm: f64,
    /// Flat amount added per glyph when more than one colour is requested.
    pub extra_color_surcharge: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_PRICE_TIERS.to_vec(),
            ceiling_price: 160.0,
            reference_width_cm: 6,
            width_adjustment_pct_per_cm: 2.5,
            extra_color_surcharge: 20.0,
        }
    }
}

/// Immutable configuration handed to every pipeline invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub segmentation: SegmentationConfig,
    pub default_target: TargetSize,
    pub pricing: PricingConfig,
}

impl EngineConfig {
    /// Load a configuration file. Missing sections fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let seg = &self.segmentation;
        if seg.max_aspect_ratio.is_nan() || seg.max_aspect_ratio <= 0.0 {
            return Err(QuoteError::InvalidTarget(format!(
                "max_aspect_ratio must be positive, got {}",
                seg.max_aspect_ratio
            )));
        }
        if self.default_target.length == 0 || self.default_target.height == 0 {
            return Err(QuoteError::InvalidTarget(
                "default target must have positive length and height".into(),
            ));
        }
        let pricing = &self.pricing;
        if pricing.tiers.is_empty() {
            return Err(QuoteError::InvalidPricingParameters(
                "price table has no tiers".into(),
            ));
        }
        if let Some(tier) = pricing.tiers.iter().find(|t| t.min_cm > t.max_cm) {
            return Err(QuoteError::InvalidPricingParameters(format!(
                "tier {}-{} has inverted bounds",
                tier.min_cm, tier.max_cm
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "segmentation": { "merge_gap_px": 9 } }"#).unwrap();
        assert_eq!(config.segmentation.merge_gap_px, 9);
        assert_eq!(config.segmentation.min_area_px, 500);
        assert_eq!(config.pricing.tiers.len(), 14);
        assert_eq!(config.default_target, TargetSize::default());
    }

    #[test]
    fn empty_tier_table_is_rejected() {
        let mut config = EngineConfig::default();
        config.pricing.tiers.clear();
        assert!(matches!(
            config.validate(),
            Err(QuoteError::InvalidPricingParameters(_))
        ));
    }

    #[test]
    fn tier_bounds_are_inclusive() {
        let tier = PriceTier::new(25, 30, 60.0);
        assert!(tier.contains(25));
        assert!(tier.contains(30));
        assert!(!tier.contains(31));
    }
}
