//! Scaling of input images to the printer's dot width.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

/// Scale an image to `width` pixels, keeping its aspect ratio.
///
/// The height follows proportionally, rounded and never below one row.
/// Images already at the requested width are returned as-is. Lanczos3
/// keeps fine text legible through the heavy downscale most photos need.
pub fn resize_to_width(img: &DynamicImage, width: u32) -> DynamicImage {
    if img.width() == width {
        return img.clone();
    }

    let scale = f64::from(width) / f64::from(img.width());
    let height = ((f64::from(img.height()) * scale).round() as u32).max(1);

    debug!(
        from_width = img.width(),
        from_height = img.height(),
        width,
        height,
        "Scaling image for print head"
    );

    img.resize_exact(width, height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn gray(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([200])))
    }

    #[test]
    fn test_downscales_to_paper_width() {
        let out = resize_to_width(&gray(1920, 1080), crate::PAPER_WIDTH);
        assert_eq!((out.width(), out.height()), (384, 216));
    }

    #[test]
    fn test_upscales_narrow_images() {
        let out = resize_to_width(&gray(96, 48), 384);
        assert_eq!((out.width(), out.height()), (384, 192));
    }

    #[test]
    fn test_width_match_is_identity() {
        let out = resize_to_width(&gray(384, 77), 384);
        assert_eq!((out.width(), out.height()), (384, 77));
    }

    #[test]
    fn test_height_rounds_to_nearest_row() {
        // 10 * (384 / 1000) = 3.84 rows
        let out = resize_to_width(&gray(1000, 10), 384);
        assert_eq!(out.height(), 4);
    }

    #[test]
    fn test_height_never_collapses_to_zero() {
        let out = resize_to_width(&gray(1000, 1), 10);
        assert_eq!(out.height(), 1);
    }
}
