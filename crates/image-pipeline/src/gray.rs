//! Luminance extraction from full-color images.
//!
//! Uses the BT.601 weights (0.299 R + 0.587 G + 0.114 B), truncated toward
//! zero, which is what receipt printer firmwares are tuned against.

use image::{GrayImage, RgbaImage};
use tracing::debug;

/// Convert an RGBA image to single-channel luminance.
///
/// Each output pixel is `0.299*R + 0.587*G + 0.114*B` truncated toward zero.
/// The alpha channel is ignored; callers are expected to have flattened
/// transparency onto a white background beforehand if it matters.
pub fn to_grayscale(img: &RgbaImage) -> GrayImage {
    let (width, height) = img.dimensions();
    debug!(width, height, "Extracting luminance");

    let mut out = GrayImage::new(width, height);
    for (src, dst) in img.pixels().zip(out.pixels_mut()) {
        let [r, g, b, _] = src.0;
        let y = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
        dst.0 = [y as u8];
    }
    out
}
