// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image decoding: encoded uploads (JPEG, PNG) via the `image` crate, and
// uncompressed sample buffers lifted out of PDF image XObjects.

use glyphquote_core::error::{QuoteError, Result};
use glyphquote_core::types::MediaKind;
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use tracing::{debug, instrument};

/// Decode an uploaded raster file using the encoding the caller declared.
#[instrument(skip(data), fields(data_len = data.len(), kind = ?kind))]
pub fn decode_encoded(data: &[u8], kind: MediaKind) -> Result<DynamicImage> {
    let format = match kind {
        MediaKind::Jpeg => ImageFormat::Jpeg,
        MediaKind::Png => ImageFormat::Png,
        MediaKind::Pdf => {
            return Err(QuoteError::UnsupportedFormat(
                "a PDF is not a raster image".into(),
            ));
        }
    };

    let img = image::load_from_memory_with_format(data, format)
        .map_err(|err| QuoteError::DecodeFailure(err.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(QuoteError::DecodeFailure("decoded image is empty".into()));
    }

    debug!(width = img.width(), height = img.height(), "Image decoded");
    Ok(img)
}

/// Largest sample buffer accepted from a PDF, matching the `image` crate's
/// default allocation limit.
const MAX_SAMPLE_BYTES: usize = 512 * 1024 * 1024;

/// Interpret raw 8-bit samples with the given channel count.
///
/// One channel is gray, three are RGB, four are CMYK (converted to RGB).
pub fn decode_samples(
    samples: &[u8],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<DynamicImage> {
    if width == 0 || height == 0 {
        return Err(QuoteError::DecodeFailure(format!(
            "image has zero extent ({width}x{height})"
        )));
    }

    let needed = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(channels))
        .filter(|&bytes| bytes <= MAX_SAMPLE_BYTES)
        .ok_or_else(|| {
            QuoteError::DecodeFailure(format!(
                "image too large ({width}x{height}, {channels} channels)"
            ))
        })?;
    if samples.len() < needed {
        return Err(QuoteError::DecodeFailure(format!(
            "image data too short: need {needed} bytes, got {}",
            samples.len()
        )));
    }
    let samples = &samples[..needed];

    let image = match channels {
        1 => GrayImage::from_raw(width, height, samples.to_vec()).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(width, height, samples.to_vec()).map(DynamicImage::ImageRgb8),
        4 => {
            let rgb: Vec<u8> = samples.chunks_exact(4).flat_map(cmyk_to_rgb).collect();
            RgbImage::from_raw(width, height, rgb).map(DynamicImage::ImageRgb8)
        }
        other => {
            return Err(QuoteError::DecodeFailure(format!(
                "unsupported channel count {other}"
            )));
        }
    };

    image.ok_or_else(|| QuoteError::DecodeFailure("sample buffer does not fit image".into()))
}

fn cmyk_to_rgb(cmyk: &[u8]) -> [u8; 3] {
    let k = 255 - cmyk[3] as u32;
    let channel = |c: u8| ((255 - c as u32) * k / 255) as u8;
    [channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2])]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buffer), format)
            .expect("encode test image");
        buffer
    }

    #[test]
    fn decodes_png_upload() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(12, 7, Luma([200u8])));
        let bytes = encode(&img, ImageFormat::Png);
        let decoded = decode_encoded(&bytes, MediaKind::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }

    #[test]
    fn decodes_jpeg_upload() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([10, 20, 30])));
        let bytes = encode(&img, ImageFormat::Jpeg);
        let decoded = decode_encoded(&bytes, MediaKind::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = decode_encoded(b"definitely not a png", MediaKind::Png);
        assert!(matches!(result, Err(QuoteError::DecodeFailure(_))));
    }

    #[test]
    fn gray_samples_round_into_luma_image() {
        let img = decode_samples(&[0, 64, 128, 255], 2, 2, 1).unwrap();
        let gray = img.to_luma8();
        assert_eq!(gray.get_pixel(1, 1).0[0], 255);
    }

    #[test]
    fn cmyk_samples_convert_to_rgb() {
        // Pure cyan and pure black.
        let img = decode_samples(&[255, 0, 0, 0, 0, 0, 0, 255], 2, 1, 4).unwrap();
        let rgb = img.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 255, 255]);
        assert_eq!(rgb.get_pixel(1, 0).0, [0, 0, 0]);
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        for (width, height) in [(u32::MAX, u32::MAX), (100_000, 100_000)] {
            let result = decode_samples(&[0u8; 16], width, height, 4);
            assert!(
                matches!(result, Err(QuoteError::DecodeFailure(_))),
                "{width}x{height}"
            );
        }
    }

    #[test]
    fn short_sample_buffer_is_rejected() {
        let result = decode_samples(&[0, 0, 0], 2, 2, 1);
        assert!(matches!(result, Err(QuoteError::DecodeFailure(_))));
    }
}
