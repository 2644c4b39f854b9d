// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Glyphquote pipeline.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};

/// Supported upload encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Pdf,
    Jpeg,
    Png,
}

impl MediaKind {
    /// Parse a declared content type. Unknown types are rejected.
    pub fn from_mime(mime: &str) -> Result<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "application/pdf" => Ok(Self::Pdf),
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/png" => Ok(Self::Png),
            other => Err(QuoteError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Infer the kind from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// Axis-aligned box in pixel or PDF-point units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Width over height. Infinite for zero-height boxes.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0.0 {
            f64::INFINITY
        } else {
            self.width / self.height
        }
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Reading order: increasing x, ties broken by increasing y.
    pub fn reading_order(&self, other: &BoundingBox) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

/// One segmented character or shape, before scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGlyphFields")]
pub struct RawGlyph {
    bbox: BoundingBox,
    font_size: Option<f64>,
    label: Option<String>,
}

/// Unchecked wire form of [`RawGlyph`].
#[derive(Deserialize)]
struct RawGlyphFields {
    bbox: BoundingBox,
    #[serde(default)]
    font_size: Option<f64>,
    #[serde(default)]
    label: Option<String>,
}

impl TryFrom<RawGlyphFields> for RawGlyph {
    type Error = String;

    fn try_from(fields: RawGlyphFields) -> std::result::Result<Self, Self::Error> {
        let RawGlyphFields {
            bbox,
            font_size,
            label,
        } = fields;
        RawGlyph::new(bbox, font_size, label).ok_or_else(|| {
            format!(
                "glyph extents must be positive, got {}x{}",
                bbox.width, bbox.height
            )
        })
    }
}

impl RawGlyph {
    /// Build a glyph; returns `None` unless both extents are positive.
    pub fn new(bbox: BoundingBox, font_size: Option<f64>, label: Option<String>) -> Option<Self> {
        (bbox.width > 0.0 && bbox.height > 0.0).then_some(Self {
            bbox,
            font_size,
            label,
        })
    }

    /// Glyph from a raster bounding box with no font or text information.
    pub fn from_box(bbox: BoundingBox) -> Option<Self> {
        Self::new(bbox, None, None)
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn width(&self) -> f64 {
        self.bbox.width
    }

    pub fn height(&self) -> f64 {
        self.bbox.height
    }

    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Glyphs in left-to-right reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphSet(Vec<RawGlyph>);

impl GlyphSet {
    /// Sort `glyphs` into reading order.
    pub fn new(mut glyphs: Vec<RawGlyph>) -> Self {
        glyphs.sort_by(|a, b| a.bbox.reading_order(&b.bbox));
        Self(glyphs)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawGlyph> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[RawGlyph] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<RawGlyph> {
        self.0
    }
}

/// Which raw measurement drives the height scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    /// Pixel bounding boxes from raster segmentation.
    Geometry,
    /// Font sizes from vector text extraction.
    FontSize,
}

/// Requested overall physical envelope, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    pub length: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(length: u32, height: u32) -> Result<Self> {
        if length == 0 || height == 0 {
            return Err(QuoteError::InvalidTarget(format!(
                "target length and height must be positive, got {length}x{height}"
            )));
        }
        Ok(Self { length, height })
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self {
            length: 200,
            height: 100,
        }
    }
}

/// Display label of a glyph in a quote.
///
/// Raster glyphs are numbered in reading order; vector glyphs carry their
/// character. Serialised untagged so the former becomes a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GlyphLabel {
    Ordinal(usize),
    Text(String),
}

impl std::fmt::Display for GlyphLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ordinal(n) => write!(f, "#{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A glyph mapped onto the requested physical size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledGlyph {
    pub letter: GlyphLabel,
    pub scaled_length: u32,
    pub scaled_height: u32,
}

/// The four pricing calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileKind {
    /// Profile A: thickness-based surcharge.
    AluminiumDoosletter,
    /// Profile B: no secondary surcharge.
    Profiel2,
    /// Profile C: panel-size surcharge, LUX table.
    Profiel3Lux,
    /// Profile D: panel-size surcharge, alternate table.
    Profiel4,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 4] = [
        Self::AluminiumDoosletter,
        Self::Profiel2,
        Self::Profiel3Lux,
        Self::Profiel4,
    ];

    /// Parse the profile name sent by the caller.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalised: String = name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();
        match normalised.as_str() {
            "aluminium doosletter" | "a" => Ok(Self::AluminiumDoosletter),
            "profiel 2" | "b" => Ok(Self::Profiel2),
            "profiel 3 lux" | "c" => Ok(Self::Profiel3Lux),
            "profiel 4" | "d" => Ok(Self::Profiel4),
            _ => Err(QuoteError::UnknownProfile(name.to_string())),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AluminiumDoosletter => "Aluminium Doosletter",
            Self::Profiel2 => "Profiel 2",
            Self::Profiel3Lux => "Profiel 3 LUX",
            Self::Profiel4 => "Profiel 4",
        }
    }
}

/// Parsed pricing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingProfile {
    pub kind: ProfileKind,
    /// Thickness (profile A) or panel size (profiles C and D). Ignored by B.
    pub size: i64,
    pub letter_width_cm: i64,
    pub color_count: usize,
}

/// Priced glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLine {
    pub letter: GlyphLabel,
    pub scaled_length: u32,
    pub scaled_height: u32,
    pub price: f64,
}

/// Priced glyph sequence with its total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    #[serde(rename = "totalPrice")]
    pub total_price: f64,
    pub prices: Vec<PriceLine>,
}
