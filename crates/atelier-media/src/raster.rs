//! Raster transforms shared by the image and vision flows.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::errors::Result;

/// JPEG quality used for vision uploads, matching a visually-lossless
/// default rather than the codec's own.
const JPEG_QUALITY: u8 = 90;

/// Decode raster bytes in any supported container format.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Composite any alpha channel onto a white background.
///
/// Output has identical pixel dimensions and no alpha. Inputs without an
/// alpha channel pass through as plain RGB.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn flatten_alpha(source: &DynamicImage) -> RgbImage {
    let rgba = source.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut flat = RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = f32::from(a) / 255.0;
        let blend = |channel: u8| -> u8 {
            let value = f32::from(channel) * alpha + 255.0 * (1.0 - alpha);
            value.round().clamp(0.0, 255.0) as u8
        };
        flat.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    flat
}

/// Encode to PNG, the canonical stored form for generated images.
pub fn encode_png(source: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    source.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Flatten and JPEG-encode, returning standard base64 text.
///
/// This is the outbound wire form for vision questions; the on-disk upload
/// copy is produced separately.
pub fn encode_jpeg_base64(source: &DynamicImage) -> Result<String> {
    Ok(BASE64.encode(encode_jpeg(source)?))
}

pub(crate) fn encode_jpeg(source: &DynamicImage) -> Result<Vec<u8>> {
    let flat = flatten_alpha(source);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    flat.write_with_encoder(encoder)?;
    Ok(buffer.into_inner())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn checkerboard_rgba(opaque: bool) -> DynamicImage {
        let mut img = RgbaImage::new(4, 3);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let alpha = if opaque { 255 } else { ((x + y) * 40 % 256) as u8 };
            *pixel = Rgba([200, 10, 10, alpha]);
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn flatten_preserves_dimensions() {
        let flat = flatten_alpha(&checkerboard_rgba(false));
        assert_eq!(flat.dimensions(), (4, 3));
    }

    #[test]
    fn flatten_fully_transparent_pixel_is_white() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let flat = flatten_alpha(&DynamicImage::ImageRgba8(img));
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn flatten_opaque_pixel_unchanged() {
        let flat = flatten_alpha(&checkerboard_rgba(true));
        assert_eq!(flat.get_pixel(2, 1).0, [200, 10, 10]);
    }

    #[test]
    fn flattened_output_has_no_alpha_after_reencode() {
        let flat = flatten_alpha(&checkerboard_rgba(false));
        let png = encode_png(&DynamicImage::ImageRgb8(flat)).unwrap();
        let reloaded = decode_image(&png).unwrap().to_rgba8();
        assert!(reloaded.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn png_round_trips_through_decode() {
        let png = encode_png(&checkerboard_rgba(true)).unwrap();
        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded.to_rgba8().dimensions(), (4, 3));
    }

    #[test]
    fn jpeg_base64_decodes_to_valid_jpeg() {
        let encoded = encode_jpeg_base64(&checkerboard_rgba(false)).unwrap();
        let bytes = BASE64.decode(encoded).unwrap();
        // JPEG SOI marker
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_image(b"definitely not an image").is_err());
    }
}
