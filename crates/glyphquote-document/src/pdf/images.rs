// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Embedded image XObjects: locating the first image in a page's resources
// and decoding its stream into pixels.

use ::image::{DynamicImage, ImageFormat};
use glyphquote_core::error::{QuoteError, Result};
use lopdf::{Dictionary, Document, Object, Stream};
use tracing::debug;

use super::reader::resolve;
use crate::image::decode_samples;

/// An image XObject found in a page's resources.
pub struct ImageXObject<'a> {
    /// Resource name the page refers to it by (e.g. `Im1`).
    pub name: Vec<u8>,
    doc: &'a Document,
    stream: &'a Stream,
}

/// First stream in `/Resources /XObject` whose `/Subtype` is `/Image`.
pub fn first_image_xobject<'a>(
    doc: &'a Document,
    resources: &'a Dictionary,
) -> Option<ImageXObject<'a>> {
    let xobjects = resolve(doc, resources.get(b"XObject").ok()?).as_dict().ok()?;

    xobjects.iter().find_map(|(name, entry)| {
        let stream = resolve(doc, entry).as_stream().ok()?;
        let subtype = stream.dict.get(b"Subtype").ok()?.as_name().ok()?;
        (subtype == b"Image").then(|| ImageXObject {
            name: name.clone(),
            doc,
            stream,
        })
    })
}

impl ImageXObject<'_> {
    /// Filter names in application order.
    fn filters(&self) -> Vec<Vec<u8>> {
        match self.stream.dict.get(b"Filter").map(|f| resolve(self.doc, f)) {
            Ok(Object::Name(name)) => vec![name.clone()],
            Ok(Object::Array(items)) => items
                .iter()
                .filter_map(|item| resolve(self.doc, item).as_name().ok().map(<[u8]>::to_vec))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn dimension(&self, key: &[u8]) -> Result<u32> {
        self.stream
            .dict
            .get(key)
            .map(|o| resolve(self.doc, o))
            .and_then(Object::as_i64)
            .ok()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| {
                QuoteError::DecodeFailure(format!(
                    "image has no valid /{}",
                    String::from_utf8_lossy(key)
                ))
            })
    }

    /// Number of samples per pixel implied by `/ColorSpace`.
    fn channels(&self) -> Result<usize> {
        let color_space = self
            .stream
            .dict
            .get(b"ColorSpace")
            .map(|cs| resolve(self.doc, cs))
            .map_err(|_| QuoteError::DecodeFailure("image has no /ColorSpace".into()))?;

        match color_space {
            Object::Name(name) => channels_for_name(name),
            Object::Array(items) => {
                let family = items
                    .first()
                    .and_then(|f| resolve(self.doc, f).as_name().ok())
                    .unwrap_or_default();
                if family == b"ICCBased" {
                    let profile = items
                        .get(1)
                        .and_then(|p| resolve(self.doc, p).as_stream().ok())
                        .ok_or_else(|| {
                            QuoteError::DecodeFailure("ICCBased colour space without profile".into())
                        })?;
                    profile
                        .dict
                        .get(b"N")
                        .and_then(Object::as_i64)
                        .ok()
                        .and_then(|n| usize::try_from(n).ok())
                        .ok_or_else(|| QuoteError::DecodeFailure("ICC profile without /N".into()))
                } else {
                    channels_for_name(family)
                }
            }
            _ => Err(QuoteError::DecodeFailure("unreadable /ColorSpace".into())),
        }
    }

    /// Decode the image stream into pixels.
    pub fn decode(&self) -> Result<DynamicImage> {
        let filters = self.filters();
        let last = filters.last().map(Vec::as_slice);
        debug!(
            filters = ?filters.iter().map(|f| String::from_utf8_lossy(f).into_owned()).collect::<Vec<_>>(),
            "Decoding image XObject"
        );

        match last {
            Some(b"DCTDecode") => {
                let jpeg = if filters.len() == 1 {
                    self.stream.content.clone()
                } else {
                    self.decompressed()?
                };
                ::image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg)
                    .map_err(|err| QuoteError::DecodeFailure(err.to_string()))
            }
            Some(f @ (b"JPXDecode" | b"JBIG2Decode" | b"CCITTFaxDecode")) => {
                Err(QuoteError::DecodeFailure(format!(
                    "embedded image filter /{} is not supported",
                    String::from_utf8_lossy(f)
                )))
            }
            _ => {
                let bits = self
                    .stream
                    .dict
                    .get(b"BitsPerComponent")
                    .and_then(Object::as_i64)
                    .unwrap_or(8);
                if bits != 8 {
                    return Err(QuoteError::DecodeFailure(format!(
                        "{bits}-bit image samples are not supported"
                    )));
                }
                let samples = if filters.is_empty() {
                    self.stream.content.clone()
                } else {
                    self.decompressed()?
                };
                decode_samples(
                    &samples,
                    self.dimension(b"Width")?,
                    self.dimension(b"Height")?,
                    self.channels()?,
                )
            }
        }
    }

    fn decompressed(&self) -> Result<Vec<u8>> {
        self.stream
            .decompressed_content()
            .map_err(|err| QuoteError::DecodeFailure(format!("failed to decompress image: {err}")))
    }
}

fn channels_for_name(name: &[u8]) -> Result<usize> {
    match name {
        b"DeviceGray" | b"CalGray" | b"G" => Ok(1),
        b"DeviceRGB" | b"CalRGB" | b"RGB" => Ok(3),
        b"DeviceCMYK" | b"CMYK" => Ok(4),
        other => Err(QuoteError::DecodeFailure(format!(
            "colour space /{} is not supported",
            String::from_utf8_lossy(other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    fn image_stream(dict: Dictionary, content: Vec<u8>) -> (Document, Dictionary) {
        let mut doc = Document::with_version("1.5");
        let id = doc.add_object(Stream::new(dict, content));
        let resources = dictionary! {
            "XObject" => dictionary! {
                "Fm0" => dictionary! { "Subtype" => "Form" },
                "Im0" => id,
            },
        };
        (doc, resources)
    }

    #[test]
    fn skips_non_image_xobjects() {
        let (doc, resources) = image_stream(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 1i64,
                "Height" => 1i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8i64,
            },
            vec![255, 0, 0],
        );
        let xobject = first_image_xobject(&doc, &resources).expect("image found");
        assert_eq!(xobject.name, b"Im0");
        let pixels = xobject.decode().unwrap().to_rgb8();
        assert_eq!(pixels.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn resources_without_images_yield_none() {
        let doc = Document::with_version("1.5");
        let resources = dictionary! { "Font" => dictionary! {} };
        assert!(first_image_xobject(&doc, &resources).is_none());
    }

    #[test]
    fn unsupported_filters_are_decode_failures() {
        let (doc, resources) = image_stream(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 1i64,
                "Height" => 1i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 1i64,
                "Filter" => "CCITTFaxDecode",
            },
            vec![0],
        );
        let xobject = first_image_xobject(&doc, &resources).unwrap();
        assert!(matches!(xobject.decode(), Err(QuoteError::DecodeFailure(_))));
    }

    #[test]
    fn one_bit_samples_are_rejected() {
        let (doc, resources) = image_stream(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 8i64,
                "Height" => 1i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 1i64,
            },
            vec![0b1010_1010],
        );
        let xobject = first_image_xobject(&doc, &resources).unwrap();
        assert!(matches!(xobject.decode(), Err(QuoteError::DecodeFailure(_))));
    }
}
