//! Decode, resize and re-encode via the `image` crate.
//!
//! - [`resize`]: exact, non-uniform resize with pass-through on zero dimensions.
//! - [`formats`]: maps [`TargetFormat`](crate::utils::TargetFormat) to encoders.

mod formats;
mod resize;

use image::DynamicImage;
use tracing::debug;

use crate::utils::{ConvertError, ConvertResult};

pub use formats::encode_image;
pub use resize::apply_resize;

/// Decodes `bytes` into a raster, sniffing the encoding from its content.
pub fn decode(bytes: &[u8]) -> ConvertResult<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| ConvertError::decode(format!("Not a recognized image: {e}")))
}

/// Decodes `bytes` and resizes to `width`x`height` when both are positive.
pub fn transform(bytes: &[u8], width: u32, height: u32) -> ConvertResult<DynamicImage> {
    let image = decode(bytes)?;
    debug!("Decoded {}×{}", image.width(), image.height());
    Ok(apply_resize(image, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TargetFormat;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn resizes_to_exact_dimensions() {
        let raster = transform(&png_bytes(200, 200), 100, 50).unwrap();
        assert_eq!((raster.width(), raster.height()), (100, 50));
    }

    #[test]
    fn single_zero_dimension_keeps_source_size() {
        let raster = transform(&png_bytes(200, 120), 0, 50).unwrap();
        assert_eq!((raster.width(), raster.height()), (200, 120));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = transform(b"definitely not an image", 10, 10).unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }

    #[test]
    fn transform_then_encode() {
        let raster = transform(&png_bytes(30, 30), 10, 20).unwrap();
        let bytes = encode_image(&raster, TargetFormat::Jpeg, 75).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (10, 20));
    }
}
