//! Resize logic for the conversion pipeline.

use image::DynamicImage;
use image::imageops::FilterType;

/// Applies an exact resize to `width`x`height`.
///
/// Returns the original image unchanged when either dimension is 0. Both axes
/// are scaled independently, so the aspect ratio is not preserved.
pub fn apply_resize(image: DynamicImage, width: u32, height: u32) -> DynamicImage {
    if width == 0 || height == 0 {
        return image;
    }

    if image.width() == width && image.height() == height {
        return image;
    }

    image.resize_exact(width, height, FilterType::Triangle)
}
