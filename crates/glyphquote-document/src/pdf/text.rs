// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Vector text extraction: a small content-stream interpreter that tracks the
// graphics and text state and emits one raw glyph per shown character.
//
// Only simple (single-byte) fonts are interpreted. Character codes map to
// text through Latin-1; Type0 fonts are skipped.

use std::collections::HashMap;

use glyphquote_core::error::{QuoteError, Result};
use glyphquote_core::types::{BoundingBox, RawGlyph};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object};
use tracing::{debug, instrument};

use super::reader::resolve;

/// Glyph-space width used when a font carries no metrics (per mille of an em).
const DEFAULT_GLYPH_WIDTH: f64 = 500.0;

/// Guards against runaway `q` without matching `Q`.
const MAX_STATE_DEPTH: usize = 64;

/// A PDF transformation matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn new(values: [f64; 6]) -> Self {
        let [a, b, c, d, e, f] = values;
        Self { a, b, c, d, e, f }
    }

    fn translation(tx: f64, ty: f64) -> Self {
        Self::new([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// `self × other` in PDF row-vector convention.
    fn concat(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Length of the transformed unit x vector.
    fn x_scale(&self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Length of the transformed unit y vector.
    fn y_scale(&self) -> f64 {
        self.c.hypot(self.d)
    }
}

/// Widths of a simple font.
#[derive(Debug, Clone)]
struct FontMetrics {
    first_char: i64,
    widths: Vec<f64>,
    missing_width: f64,
    /// Composite fonts use multi-byte codes this interpreter does not decode.
    composite: bool,
}

impl FontMetrics {
    fn from_dict(doc: &Document, font: &Dictionary) -> Self {
        let composite = font
            .get(b"Subtype")
            .and_then(Object::as_name)
            .map(|s| s == b"Type0")
            .unwrap_or(false);

        let first_char = font
            .get(b"FirstChar")
            .map(|o| resolve(doc, o))
            .and_then(Object::as_i64)
            .unwrap_or(0);

        let widths = font
            .get(b"Widths")
            .map(|o| resolve(doc, o))
            .and_then(Object::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|w| number(resolve(doc, w)).unwrap_or(0.0))
                    .collect()
            })
            .unwrap_or_default();

        let missing_width = font
            .get(b"FontDescriptor")
            .map(|o| resolve(doc, o))
            .and_then(Object::as_dict)
            .and_then(|fd| fd.get(b"MissingWidth"))
            .ok()
            .and_then(number)
            .filter(|w| *w > 0.0)
            .unwrap_or(DEFAULT_GLYPH_WIDTH);

        Self {
            first_char,
            widths,
            missing_width,
            composite,
        }
    }

    fn fallback() -> Self {
        Self {
            first_char: 0,
            widths: Vec::new(),
            missing_width: DEFAULT_GLYPH_WIDTH,
            composite: false,
        }
    }

    /// Glyph-space advance of `code`, in thousandths of an em.
    fn width(&self, code: u8) -> f64 {
        usize::try_from(i64::from(code) - self.first_char)
            .ok()
            .and_then(|i| self.widths.get(i).copied())
            .filter(|w| *w > 0.0)
            .unwrap_or(self.missing_width)
    }
}

/// Text state parameters (PDF 32000 §9.3).
#[derive(Debug, Clone)]
struct TextState {
    font: Option<FontMetrics>,
    font_size: f64,
    char_spacing: f64,
    word_spacing: f64,
    horizontal_scale: f64,
    leading: f64,
    rise: f64,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: None,
            font_size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scale: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

/// Interprets one page's content stream.
pub struct TextExtractor<'a> {
    doc: &'a Document,
    fonts: Option<&'a Dictionary>,
}

/// Mutable interpreter state for a single run.
struct Interpreter<'a> {
    doc: &'a Document,
    fonts: Option<&'a Dictionary>,
    font_cache: HashMap<Vec<u8>, FontMetrics>,
    ctm: Matrix,
    ctm_stack: Vec<(Matrix, TextState)>,
    text: TextState,
    tm: Matrix,
    tlm: Matrix,
    glyphs: Vec<RawGlyph>,
}

impl<'a> TextExtractor<'a> {
    pub fn new(doc: &'a Document, resources: Option<&'a Dictionary>) -> Self {
        let fonts = resources
            .and_then(|r| r.get(b"Font").ok())
            .and_then(|f| resolve(doc, f).as_dict().ok());
        Self { doc, fonts }
    }

    /// Run the interpreter over decoded content bytes.
    #[instrument(skip_all, fields(content_len = content.len()))]
    pub fn extract(&self, content: &[u8]) -> Result<Vec<RawGlyph>> {
        let content = Content::decode(content)
            .map_err(|err| QuoteError::PdfError(format!("malformed content stream: {err}")))?;

        let mut interpreter = Interpreter {
            doc: self.doc,
            fonts: self.fonts,
            font_cache: HashMap::new(),
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            text: TextState::default(),
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            glyphs: Vec::new(),
        };

        for op in &content.operations {
            interpreter.apply(&op.operator, &op.operands);
        }

        debug!(glyphs = interpreter.glyphs.len(), "Content stream interpreted");
        Ok(interpreter.glyphs)
    }
}

impl Interpreter<'_> {
    fn apply(&mut self, operator: &str, operands: &[Object]) {
        let nums = || operands.iter().filter_map(number).collect::<Vec<f64>>();

        match operator {
            // -- Graphics state --
            "q" => {
                if self.ctm_stack.len() < MAX_STATE_DEPTH {
                    self.ctm_stack.push((self.ctm, self.text.clone()));
                }
            }
            "Q" => {
                if let Some((ctm, text)) = self.ctm_stack.pop() {
                    self.ctm = ctm;
                    self.text = text;
                }
            }
            "cm" => {
                if let Ok(values) = <[f64; 6]>::try_from(nums()) {
                    self.ctm = Matrix::new(values).concat(&self.ctm);
                }
            }

            // -- Text objects and state --
            "BT" => {
                self.tm = Matrix::IDENTITY;
                self.tlm = Matrix::IDENTITY;
            }
            "ET" => {}
            "Tf" => {
                if let [Object::Name(name), size] = operands {
                    self.text.font = Some(self.font(name));
                    self.text.font_size = number(size).unwrap_or(0.0);
                }
            }
            "Tc" => self.set_scalar(operands, |t, v| t.char_spacing = v),
            "Tw" => self.set_scalar(operands, |t, v| t.word_spacing = v),
            "Tz" => self.set_scalar(operands, |t, v| t.horizontal_scale = v / 100.0),
            "TL" => self.set_scalar(operands, |t, v| t.leading = v),
            "Ts" => self.set_scalar(operands, |t, v| t.rise = v),

            // -- Positioning --
            "Td" => {
                if let [tx, ty] = nums()[..] {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let [tx, ty] = nums()[..] {
                    self.text.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Ok(values) = <[f64; 6]>::try_from(nums()) {
                    self.tm = Matrix::new(values);
                    self.tlm = self.tm;
                }
            }
            "T*" => self.next_line(),

            // -- Showing text --
            "Tj" => {
                if let Some(bytes) = operands.first().and_then(string_bytes) {
                    self.show(bytes);
                }
            }
            "'" => {
                self.next_line();
                if let Some(bytes) = operands.first().and_then(string_bytes) {
                    self.show(bytes);
                }
            }
            "\"" => {
                if let [aw, ac, s] = operands {
                    self.text.word_spacing = number(aw).unwrap_or(0.0);
                    self.text.char_spacing = number(ac).unwrap_or(0.0);
                    self.next_line();
                    if let Some(bytes) = string_bytes(s) {
                        self.show(bytes);
                    }
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    for item in items {
                        if let Some(bytes) = string_bytes(item) {
                            self.show(bytes);
                        } else if let Some(adjust) = number(item) {
                            let tx = -adjust / 1000.0
                                * self.text.font_size
                                * self.text.horizontal_scale;
                            self.tm = Matrix::translation(tx, 0.0).concat(&self.tm);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn set_scalar(&mut self, operands: &[Object], set: impl FnOnce(&mut TextState, f64)) {
        if let Some(value) = operands.first().and_then(number) {
            set(&mut self.text, value);
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.tlm = Matrix::translation(tx, ty).concat(&self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        let leading = self.text.leading;
        self.move_line(0.0, -leading);
    }

    fn font(&mut self, name: &[u8]) -> FontMetrics {
        if let Some(metrics) = self.font_cache.get(name) {
            return metrics.clone();
        }
        let metrics = self
            .fonts
            .and_then(|fonts| fonts.get(name).ok())
            .and_then(|f| resolve(self.doc, f).as_dict().ok())
            .map(|dict| FontMetrics::from_dict(self.doc, dict))
            .unwrap_or_else(FontMetrics::fallback);
        self.font_cache.insert(name.to_vec(), metrics.clone());
        metrics
    }

    /// Render a string: emit one glyph per visible code and advance `Tm`.
    fn show(&mut self, bytes: &[u8]) {
        let Some(font) = self.text.font.clone() else {
            return;
        };
        if font.composite {
            debug!("Skipping string shown with a composite font");
            return;
        }

        let state = &self.text;
        for &code in bytes {
            let advance = font.width(code) / 1000.0;
            let device = self.tm.concat(&self.ctm);
            let render = Matrix::new([
                state.font_size * state.horizontal_scale,
                0.0,
                0.0,
                state.font_size,
                0.0,
                state.rise,
            ])
            .concat(&device);

            let ch = char::from(code);
            if !ch.is_whitespace() && !ch.is_control() {
                let width = advance * state.font_size * state.horizontal_scale * device.x_scale();
                let size = state.font_size * device.y_scale();
                let bbox = BoundingBox::new(render.e, render.f, width, size);
                if let Some(glyph) = RawGlyph::new(bbox, Some(size), Some(ch.to_string())) {
                    self.glyphs.push(glyph);
                }
            }

            let spacing = if code == b' ' {
                state.char_spacing + state.word_spacing
            } else {
                state.char_spacing
            };
            let tx = (advance * state.font_size + spacing) * state.horizontal_scale;
            self.tm = Matrix::translation(tx, 0.0).concat(&self.tm);
        }
    }
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn string_bytes(object: &Object) -> Option<&[u8]> {
    match object {
        Object::String(bytes, _) => Some(bytes.as_slice()),
        _ => None,
    }
}
