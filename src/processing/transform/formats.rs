//! Maps a [`TargetFormat`] and quality to an encoder.

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;

use crate::utils::{ConvertError, TargetFormat};

type Result<T> = std::result::Result<T, ConvertError>;

/// Encodes `image` as JPEG. Alpha is dropped; quality is clamped to 1-100.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));

    // The JPEG encoder only takes 8-bit luma/RGB
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    rgb.write_with_encoder(encoder)
        .map_err(|e| ConvertError::encode(format!("JPEG encode failed: {e}")))?;
    Ok(buffer)
}

/// Encodes `image` as PNG (lossless, quality is not used).
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image
        .write_with_encoder(PngEncoder::new(&mut buffer))
        .map_err(|e| ConvertError::encode(format!("PNG encode failed: {e}")))?;
    Ok(buffer)
}

/// Encodes `image` as WebP via libwebp, lossy at `quality` unless `lossless`.
pub fn encode_webp(image: &DynamicImage, quality: u8, lossless: bool) -> Result<Vec<u8>> {
    let rgba = image.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());

    // In lossless mode libwebp reads quality as effort, keep that fixed
    let quality = if lossless { 100.0 } else { f32::from(quality.min(100)) };

    // WebPMemory is !Send, copy it out into an owned buffer
    let memory = encoder
        .encode_simple(lossless, quality)
        .map_err(|e| ConvertError::encode(format!("WebP encode failed: {e:?}")))?;
    Ok(memory.to_vec())
}

/// Dispatches to the encoder for `format`.
///
/// `quality` only reaches lossy encoders; see [`TargetFormat::is_lossless_at`].
pub fn encode_image(image: &DynamicImage, format: TargetFormat, quality: u8) -> Result<Vec<u8>> {
    let lossless = format.is_lossless_at(quality);
    match format {
        TargetFormat::Png => encode_png(image),
        TargetFormat::Jpeg => encode_jpeg(image, quality),
        TargetFormat::Webp | TargetFormat::WebpLossy | TargetFormat::WebpLossless => {
            encode_webp(image, quality, lossless)
        }
    }
}
