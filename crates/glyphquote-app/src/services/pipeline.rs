// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The quote pipeline: extract → segment (raster only) → normalise → price.
//
// Stateless. Every invocation reads the shared configuration and its own
// inputs, so any number may run concurrently.

use glyphquote_core::error::Result;
use glyphquote_core::types::{PricingProfile, PricingResult, RawGlyph, ScalingMode, TargetSize};
use glyphquote_core::EngineConfig;
use glyphquote_document::{Extraction, GlyphSegmenter, extract_declared};
use glyphquote_pricing::{PriceCalculator, normalize};
use serde::Serialize;
use tracing::{info, instrument};

/// A priced quote and how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteOutcome {
    pub result: PricingResult,
    pub mode: ScalingMode,
    pub glyph_count: usize,
}

/// Quote one upload.
///
/// An upload in which no glyph survives segmentation yields an empty result,
/// not an error.
#[instrument(
    skip(data, profile, config),
    fields(data_len = data.len(), profile = ?profile.kind, length = target.length, height = target.height)
)]
pub fn run_pipeline(
    data: &[u8],
    declared_kind: &str,
    target: TargetSize,
    profile: &PricingProfile,
    config: &EngineConfig,
) -> Result<QuoteOutcome> {
    let extraction = extract_declared(data, declared_kind)?;
    let mode = extraction.scaling_mode();

    let glyphs: Vec<RawGlyph> = match extraction {
        Extraction::Raster(image) => GlyphSegmenter::new(&config.segmentation)
            .segment(&image)
            .into_inner(),
        Extraction::VectorText(glyphs) => glyphs,
    };

    if glyphs.is_empty() {
        info!("No shapes detected");
        return Ok(QuoteOutcome {
            result: PricingResult::default(),
            mode,
            glyph_count: 0,
        });
    }

    let scaled = normalize(&glyphs, target, mode);
    let result = PriceCalculator::new(&config.pricing).price(&scaled, profile);

    Ok(QuoteOutcome {
        result,
        mode,
        glyph_count: glyphs.len(),
    })
}


#[cfg(test)]
mod tests {
    use super::fixtures::{png, text_pdf};
    use super::*;
    use glyphquote_core::error::QuoteError;
    use glyphquote_core::types::{GlyphLabel, ProfileKind};

    fn profile(kind: ProfileKind, size: i64) -> PricingProfile {
        PricingProfile {
            kind,
            size,
            letter_width_cm: 6,
            color_count: 1,
        }
    }

    #[test]
    fn raster_upload_is_segmented_scaled_and_priced() {
        let upload = png(300, 120, &[(20, 30, 30, 60), (100, 30, 30, 60), (180, 30, 30, 60)]);
        let outcome = run_pipeline(
            &upload,
            "image/png",
            TargetSize::default(),
            &profile(ProfileKind::Profiel2, 0),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.mode, ScalingMode::Geometry);
        assert_eq!(outcome.glyph_count, 3);

        let lines = &outcome.result.prices;
        let labels: Vec<&GlyphLabel> = lines.iter().map(|l| &l.letter).collect();
        assert_eq!(
            labels,
            vec![&GlyphLabel::Ordinal(1), &GlyphLabel::Ordinal(2), &GlyphLabel::Ordinal(3)]
        );
        assert_eq!(lines.iter().map(|l| l.scaled_length).sum::<u32>(), 200);
        assert!(lines.iter().all(|l| l.scaled_height == 100));
        // Height 100 is above the table, so each glyph costs the ceiling price.
        assert_eq!(outcome.result.total_price, 480.0);
    }

    #[test]
    fn text_pdf_is_scaled_by_font_size() {
        let upload = text_pdf(&["BT /F1 24 Tf 100 700 Td (ab) Tj ET"]);
        let outcome = run_pipeline(
            &upload,
            "application/pdf",
            TargetSize::new(120, 52).unwrap(),
            &profile(ProfileKind::AluminiumDoosletter, 5),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.mode, ScalingMode::FontSize);
        let lines = &outcome.result.prices;
        assert_eq!(lines[0].letter, GlyphLabel::Text("A".into()));
        assert_eq!(lines[1].letter, GlyphLabel::Text("B".into()));
        assert_eq!((lines[0].scaled_length, lines[1].scaled_length), (60, 60));
        assert_eq!(lines[0].scaled_height, 52);
        assert_eq!(lines[0].price, 104.5);
        assert_eq!(outcome.result.total_price, 209.0);
    }

    #[test]
    fn blank_image_gives_an_empty_quote() {
        let upload = png(120, 80, &[]);
        let outcome = run_pipeline(
            &upload,
            "image/png",
            TargetSize::default(),
            &profile(ProfileKind::Profiel2, 0),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.glyph_count, 0);
        assert_eq!(outcome.result, PricingResult::default());
        let json = serde_json::to_value(&outcome.result).unwrap();
        assert_eq!(json, serde_json::json!({ "totalPrice": 0.0, "prices": [] }));
    }

    #[test]
    fn zero_page_pdf_fails_without_partial_result() {
        let upload = text_pdf(&[]);
        let result = run_pipeline(
            &upload,
            "application/pdf",
            TargetSize::default(),
            &profile(ProfileKind::Profiel2, 0),
            &EngineConfig::default(),
        );
        assert!(matches!(result, Err(QuoteError::EmptyDocument)));
    }

    #[test]
    fn unsupported_media_type_is_rejected() {
        let result = run_pipeline(
            b"<svg/>",
            "image/svg+xml",
            TargetSize::default(),
            &profile(ProfileKind::Profiel2, 0),
            &EngineConfig::default(),
        );
        assert!(matches!(result, Err(QuoteError::UnsupportedFormat(_))));
    }

    #[test]
    fn segmentation_thresholds_come_from_config() {
        // Two 30x60 bars 8px apart merge only when the gap allows it.
        let upload = png(200, 120, &[(20, 30, 30, 60), (58, 30, 30, 60)]);
        let mut config = EngineConfig::default();
        let run = |config: &EngineConfig| {
            run_pipeline(
                &upload,
                "image/png",
                TargetSize::default(),
                &profile(ProfileKind::Profiel2, 0),
                config,
            )
            .unwrap()
            .glyph_count
        };

        assert_eq!(run(&config), 2);
        config.segmentation.merge_gap_px = 10;
        assert_eq!(run(&config), 1);
    }
}
