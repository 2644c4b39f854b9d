// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Source extraction: decide, per upload, whether glyphs come from pixels or
// from vector text.

use ::image::DynamicImage;
use glyphquote_core::error::{QuoteError, Result};
use glyphquote_core::types::{MediaKind, RawGlyph, ScalingMode};
use tracing::{info, instrument};

use crate::image::decode_encoded;
use crate::pdf::PdfSource;

/// What an upload yielded.
#[derive(Debug, Clone)]
pub enum Extraction {
    /// Pixels to be segmented.
    Raster(DynamicImage),
    /// Character records read straight from PDF text.
    VectorText(Vec<RawGlyph>),
}

impl Extraction {
    /// Raster sources scale by geometry, vector text by font size.
    pub fn scaling_mode(&self) -> ScalingMode {
        match self {
            Self::Raster(_) => ScalingMode::Geometry,
            Self::VectorText(_) => ScalingMode::FontSize,
        }
    }
}

/// Extract an upload whose content type is given as a MIME string.
pub fn extract_declared(data: &[u8], mime: &str) -> Result<Extraction> {
    extract(data, MediaKind::from_mime(mime)?)
}

/// Extract an upload of a known kind.
///
/// PDFs yield their first embedded image when one exists, otherwise the
/// vector text of every page.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn extract(data: &[u8], kind: MediaKind) -> Result<Extraction> {
    match kind {
        MediaKind::Jpeg | MediaKind::Png => decode_encoded(data, kind).map(Extraction::Raster),
        MediaKind::Pdf => extract_pdf(data),
    }
}

fn extract_pdf(data: &[u8]) -> Result<Extraction> {
    let pdf = PdfSource::from_bytes(data)?;
    if pdf.page_count() == 0 {
        return Err(QuoteError::EmptyDocument);
    }

    if let Some(image) = pdf.first_embedded_image()? {
        info!(
            width = image.width(),
            height = image.height(),
            "Using embedded image"
        );
        return Ok(Extraction::Raster(image));
    }

    let glyphs = pdf.vector_glyphs()?;
    if glyphs.is_empty() {
        return Err(QuoteError::NoContentFound);
    }
    info!(glyphs = glyphs.len(), "Using vector text");
    Ok(Extraction::VectorText(glyphs))
}
