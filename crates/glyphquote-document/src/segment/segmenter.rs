// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster glyph segmenter.

use ::image::{DynamicImage, GrayImage, Luma};
use glyphquote_core::config::SegmentationConfig;
use glyphquote_core::types::{BoundingBox, GlyphSet, RawGlyph};
use imageproc::contours::{BorderType, Contour, find_contours};
use imageproc::contrast::otsu_level;
use imageproc::distance_transform::Norm;
use imageproc::morphology::close;
use tracing::{debug, info, instrument};

use super::merge::merge_pass;

/// Segments a raster image of lettering into glyph bounding boxes.
///
/// Dark shapes on a light background are treated as foreground.
pub struct GlyphSegmenter<'a> {
    config: &'a SegmentationConfig,
}

impl<'a> GlyphSegmenter<'a> {
    pub fn new(config: &'a SegmentationConfig) -> Self {
        Self { config }
    }

    /// Run the full segmentation:
    ///
    /// 1. Grayscale conversion
    /// 2. Inverted Otsu binarization (ink becomes white foreground)
    /// 3. Morphological closing to bridge small breaks
    /// 4. Outermost contours only, reduced to bounding boxes
    /// 5. Noise filter on area and aspect ratio
    /// 6. Reading-order sort and a single fragment merge pass
    ///
    /// An image without foreground yields an empty set.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn segment(&self, image: &DynamicImage) -> GlyphSet {
        let binary = self.binarize(&image.to_luma8());
        let closed = self.close(&binary);

        let contours = find_contours::<i32>(&closed);
        let outer: Vec<BoundingBox> = contours
            .iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .filter_map(bounding_rect)
            .collect();
        debug!(contours = contours.len(), outer = outer.len(), "Contours traced");

        let kept: Vec<RawGlyph> = outer
            .into_iter()
            .filter(|bbox| self.keeps(bbox))
            .filter_map(RawGlyph::from_box)
            .collect();

        let glyphs = merge_pass(GlyphSet::new(kept), self.config.merge_gap_px);
        info!(glyphs = glyphs.len(), "Segmentation complete");
        glyphs
    }

    /// Inverted global Otsu threshold: pixels brighter than the level become
    /// background (0), the rest foreground (255).
    fn binarize(&self, gray: &GrayImage) -> GrayImage {
        let level = otsu_level(gray);
        debug!(level, "Otsu level computed");

        let (width, height) = gray.dimensions();
        let mut output = GrayImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let val = gray.get_pixel(x, y).0[0];
                let binary = if val > level { 0u8 } else { 255u8 };
                output.put_pixel(x, y, Luma([binary]));
            }
        }
        output
    }

    /// Repeated square closing; `k` iterations of radius `r` equal one
    /// closing of radius `k * r` under the chessboard norm.
    fn close(&self, binary: &GrayImage) -> GrayImage {
        let radius = self
            .config
            .closing_radius
            .saturating_mul(self.config.closing_iterations);
        if radius == 0 {
            return binary.clone();
        }
        close(binary, Norm::LInf, radius)
    }

    fn keeps(&self, bbox: &BoundingBox) -> bool {
        bbox.area() > f64::from(self.config.min_area_px)
            && bbox.aspect_ratio() < self.config.max_aspect_ratio
    }
}

/// Axis-aligned bounding rectangle of a contour, inclusive of its edge pixels.
fn bounding_rect(contour: &Contour<i32>) -> Option<BoundingBox> {
    let first = contour.points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &contour.points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(BoundingBox::new(
        f64::from(min_x),
        f64::from(min_y),
        f64::from(max_x - min_x + 1),
        f64::from(max_y - min_y + 1),
    ))
}
