// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open an uploaded PDF, walk its pages, and pull out either the
// first embedded raster image or the vector character geometry.

use ::image::DynamicImage;
use glyphquote_core::error::{QuoteError, Result};
use glyphquote_core::types::RawGlyph;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, info, instrument, warn};

use super::images::first_image_xobject;
use super::text::TextExtractor;

/// Depth limit when following `/Parent` links for inherited attributes.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Reads an uploaded PDF held in memory.
pub struct PdfSource {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfSource {
    // -- Construction ---------------------------------------------------------

    /// Parse a PDF from raw bytes.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data)
            .map_err(|err| QuoteError::PdfError(format!("failed to load PDF: {err}")))?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Page object ids in page-number order.
    fn page_ids(&self) -> Vec<ObjectId> {
        // `get_pages` is a BTreeMap keyed by 1-indexed page number.
        self.document.get_pages().into_values().collect()
    }

    // -- Extraction -----------------------------------------------------------

    /// Decode the first embedded raster image, scanning pages in order.
    ///
    /// Returns `Ok(None)` when no page carries an image XObject.
    #[instrument(skip(self))]
    pub fn first_embedded_image(&self) -> Result<Option<DynamicImage>> {
        for (index, page_id) in self.page_ids().into_iter().enumerate() {
            let Some(resources) = self.page_resources(page_id) else {
                continue;
            };
            if let Some(xobject) = first_image_xobject(&self.document, resources) {
                info!(
                    page = index + 1,
                    name = %String::from_utf8_lossy(&xobject.name),
                    "Embedded image found"
                );
                return xobject.decode().map(Some);
            }
        }
        debug!("No embedded images in document");
        Ok(None)
    }

    /// Extract every visible character on every page as a raw glyph.
    #[instrument(skip(self))]
    pub fn vector_glyphs(&self) -> Result<Vec<RawGlyph>> {
        let mut glyphs = Vec::new();

        for (index, page_id) in self.page_ids().into_iter().enumerate() {
            let content = match self.document.get_page_content(page_id) {
                Ok(content) => content,
                Err(err) => {
                    warn!(page = index + 1, %err, "Unreadable page content, skipping");
                    continue;
                }
            };
            let resources = self.page_resources(page_id);
            let extractor = TextExtractor::new(&self.document, resources);
            let page_glyphs = extractor.extract(&content)?;
            debug!(page = index + 1, glyphs = page_glyphs.len(), "Page text extracted");
            glyphs.extend(page_glyphs);
        }

        info!(glyphs = glyphs.len(), "Vector text extraction complete");
        Ok(glyphs)
    }

    // -- Helpers --------------------------------------------------------------

    /// Resolve a page's `/Resources`, following `/Parent` inheritance.
    fn page_resources(&self, page_id: ObjectId) -> Option<&Dictionary> {
        let mut node = self.document.get_dictionary(page_id).ok()?;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(resources) = node.get(b"Resources") {
                return resolve(&self.document, resources).as_dict().ok();
            }
            let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
            node = self.document.get_dictionary(parent).ok()?;
        }
        None
    }
}

/// Follow an indirect reference; direct objects are returned unchanged.
pub(crate) fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        other => other,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{FixturePage, build_pdf};
    use super::*;

    #[test]
    fn counts_pages() {
        let pdf = build_pdf(&[FixturePage::Blank, FixturePage::Blank]);
        let source = PdfSource::from_bytes(&pdf).unwrap();
        assert_eq!(source.page_count(), 2);
    }

    #[test]
    fn malformed_bytes_are_a_pdf_error() {
        let result = PdfSource::from_bytes(b"%PDF-1.5 but nothing else");
        assert!(matches!(result, Err(QuoteError::PdfError(_))));
    }

    #[test]
    fn finds_image_on_a_later_page() {
        let pdf = build_pdf(&[
            FixturePage::Text("BT /F1 24 Tf 100 700 Td (AB) Tj ET"),
            FixturePage::GrayImage {
                width: 4,
                height: 2,
                samples: vec![0, 255, 0, 255, 255, 0, 255, 0],
            },
        ]);
        let source = PdfSource::from_bytes(&pdf).unwrap();
        let image = source.first_embedded_image().unwrap().expect("image present");
        assert_eq!((image.width(), image.height()), (4, 2));
    }

    #[test]
    fn text_only_document_has_no_image() {
        let pdf = build_pdf(&[FixturePage::Text("BT /F1 24 Tf 100 700 Td (AB) Tj ET")]);
        let source = PdfSource::from_bytes(&pdf).unwrap();
        assert!(source.first_embedded_image().unwrap().is_none());
        assert_eq!(source.vector_glyphs().unwrap().len(), 2);
    }

    #[test]
    fn vector_glyphs_span_all_pages() {
        let pdf = build_pdf(&[
            FixturePage::Text("BT /F1 12 Tf 10 10 Td (X) Tj ET"),
            FixturePage::Blank,
            FixturePage::Text("BT /F1 12 Tf 10 10 Td (YZ) Tj ET"),
        ]);
        let source = PdfSource::from_bytes(&pdf).unwrap();
        let labels: Vec<String> = source
            .vector_glyphs()
            .unwrap()
            .iter()
            .filter_map(|g| g.label().map(str::to_owned))
            .collect();
        assert_eq!(labels, vec!["X", "Y", "Z"]);
    }
}
