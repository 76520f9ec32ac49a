//! Gamma tone mapping for luminance images.

use image::GrayImage;
use tracing::debug;

/// Apply a gamma curve to a luminance image in place.
///
/// Each pixel is normalized to [0, 1], raised to `1/gamma`, and scaled back
/// to [0, 255] with truncation. `gamma <= 0`, `gamma == 1`, and NaN are all
/// treated as "no tone mapping requested" and leave the image untouched.
pub fn apply_gamma(img: &mut GrayImage, gamma: f32) {
    if gamma.is_nan() || gamma <= 0.0 || gamma == 1.0 {
        return;
    }

    let (width, height) = img.dimensions();
    debug!(width, height, gamma, "Applying gamma curve");

    let inv = 1.0 / f64::from(gamma);
    for px in img.pixels_mut() {
        let y = f64::from(px.0[0]) / 255.0;
        px.0 = [(y.powf(inv) * 255.0).clamp(0.0, 255.0) as u8];
    }
}
