//! Format-specific decode and encode on top of the `image` crate.
//!
//! Output keeps the input format. JPEG honours the quality slider directly;
//! PNG and WebP are lossless, so quality only picks the PNG compression effort.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{ColorType, DynamicImage};
use crate::utils::{CompressorError, ImageFormat};

type Result<T> = std::result::Result<T, CompressorError>;

/// Below this quality PNG output trades encode time for size.
const PNG_BEST_COMPRESSION_BELOW: f32 = 0.5;

fn to_codec_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::JPEG => image::ImageFormat::Jpeg,
        ImageFormat::PNG => image::ImageFormat::Png,
        ImageFormat::WebP => image::ImageFormat::WebP,
    }
}

fn from_codec_format(format: image::ImageFormat) -> Option<ImageFormat> {
    match format {
        image::ImageFormat::Jpeg => Some(ImageFormat::JPEG),
        image::ImageFormat::Png => Some(ImageFormat::PNG),
        image::ImageFormat::WebP => Some(ImageFormat::WebP),
        _ => None,
    }
}

/// Maps a (0, 1] quality to the 1-100 JPEG scale.
pub fn jpeg_quality(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Decodes `bytes` as the declared format.
///
/// Without a declaration the decoder guesses, and the guessed format is used
/// for output. Anything outside JPEG / PNG / WebP is rejected.
pub fn decode(bytes: &[u8], declared: Option<ImageFormat>) -> Result<(DynamicImage, ImageFormat)> {
    let format = match declared {
        Some(format) => format,
        None => image::guess_format(bytes)
            .ok()
            .and_then(from_codec_format)
            .ok_or_else(|| CompressorError::compression("Unrecognised image content"))?,
    };

    let image = image::load_from_memory_with_format(bytes, to_codec_format(format))
        .map_err(|e| CompressorError::compression(format!("Decode failed: {e}")))?;

    Ok((image, format))
}

/// Encodes `image` as JPEG at the given quality. Alpha is dropped.
pub fn encode_jpeg(image: &DynamicImage, quality: f32) -> Result<Vec<u8>> {
    let image = match image.color() {
        ColorType::L8 | ColorType::Rgb8 => image.clone(),
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    };

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, jpeg_quality(quality));
    image
        .write_with_encoder(encoder)
        .map_err(|e| CompressorError::compression(format!("JPEG encode failed: {e}")))?;
    Ok(out)
}

/// Encodes `image` as PNG with adaptive filtering.
pub fn encode_png(image: &DynamicImage, quality: f32) -> Result<Vec<u8>> {
    let compression = if quality < PNG_BEST_COMPRESSION_BELOW {
        CompressionType::Best
    } else {
        CompressionType::Default
    };

    let mut out = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut out, compression, PngFilter::Adaptive);
    image
        .write_with_encoder(encoder)
        .map_err(|e| CompressorError::compression(format!("PNG encode failed: {e}")))?;
    Ok(out)
}

/// Encodes `image` as lossless WebP.
pub fn encode_webp(image: &DynamicImage) -> Result<Vec<u8>> {
    let image = if image.color().has_alpha() {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    };

    let mut out = Vec::new();
    let encoder = WebPEncoder::new_lossless(&mut out);
    image
        .write_with_encoder(encoder)
        .map_err(|e| CompressorError::compression(format!("WebP encode failed: {e}")))?;
    Ok(out)
}

/// Dispatches to the encoder for `format`.
pub fn encode_as(image: &DynamicImage, format: ImageFormat, quality: f32) -> Result<Vec<u8>> {
    match format {
        ImageFormat::JPEG => encode_jpeg(image, quality),
        ImageFormat::PNG => encode_png(image, quality),
        ImageFormat::WebP => encode_webp(image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8, 200])
        }))
    }

    #[test]
    fn jpeg_quality_scale() {
        assert_eq!(jpeg_quality(1.0), 100);
        assert_eq!(jpeg_quality(0.8), 80);
        assert_eq!(jpeg_quality(0.001), 1);
    }

    #[test]
    fn every_format_encodes_and_decodes_back() {
        let image = gradient(32, 16);
        for format in [ImageFormat::JPEG, ImageFormat::PNG, ImageFormat::WebP] {
            let bytes = encode_as(&image, format, 0.7).unwrap();
            let (decoded, resolved) = decode(&bytes, Some(format)).unwrap();
            assert_eq!(resolved, format);
            assert_eq!((decoded.width(), decoded.height()), (32, 16));
        }
    }

    #[test]
    fn lower_jpeg_quality_gives_smaller_output() {
        let image = gradient(64, 64);
        let high = encode_jpeg(&image, 1.0).unwrap();
        let low = encode_jpeg(&image, 0.1).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn undeclared_content_is_guessed() {
        let bytes = encode_png(&gradient(4, 4), 0.8).unwrap();
        let (_, format) = decode(&bytes, None).unwrap();
        assert_eq!(format, ImageFormat::PNG);
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            decode(b"definitely not an image", Some(ImageFormat::JPEG)),
            Err(CompressorError::CompressionFailed(_))
        ));
        assert!(matches!(
            decode(b"definitely not an image", None),
            Err(CompressorError::CompressionFailed(_))
        ));
    }

    #[test]
    fn declared_type_wins_over_content() {
        let png = encode_png(&gradient(4, 4), 0.8).unwrap();
        assert!(decode(&png, Some(ImageFormat::JPEG)).is_err());
    }
}
