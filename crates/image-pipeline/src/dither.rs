//! Quantization of grayscale images to black-and-white.
//!
//! Provides flat thresholding, two error-diffusion ditherers (serpentine
//! Floyd-Steinberg and Atkinson), and ordered Bayer dithering with 4x4 and
//! 8x8 matrices. All algorithms work in place and leave every pixel at
//! exactly 0 (black) or 255 (white).

use image::GrayImage;
use tracing::debug;

/// Default threshold value for binarization.
const THRESHOLD: u8 = 128;

/// 4x4 Bayer threshold matrix (permutation of 0..16).
const BAYER_4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// 8x8 Bayer threshold matrix (permutation of 0..64).
const BAYER_8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Quantization algorithm selection.
///
/// Each variant carries only the parameters it needs; dispatch is an
/// exhaustive match in [`DitherMode::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherMode {
    /// Flat threshold, no dithering.
    Threshold {
        /// Pixels below this luminance become black.
        level: u8,
    },
    /// Serpentine Floyd-Steinberg error diffusion.
    FloydSteinberg,
    /// Atkinson error diffusion.
    Atkinson,
    /// Ordered dithering with the 4x4 Bayer matrix.
    Bayer4,
    /// Ordered dithering with the 8x8 Bayer matrix.
    Bayer8,
}

impl Default for DitherMode {
    fn default() -> Self {
        Self::FloydSteinberg
    }
}

impl DitherMode {
    /// Quantize a grayscale image in place with the selected algorithm.
    pub fn apply(self, img: &mut GrayImage) {
        match self {
            Self::Threshold { level } => threshold_convert(img, level),
            Self::FloydSteinberg => floyd_steinberg_dither(img),
            Self::Atkinson => atkinson_dither(img),
            Self::Bayer4 => ordered_dither(img, &BAYER_4),
            Self::Bayer8 => ordered_dither(img, &BAYER_8),
        }
    }
}

/// Flat threshold conversion without dithering.
///
/// Pixels with values below `level` become black (0), others white (255).
pub fn threshold_convert(img: &mut GrayImage, level: u8) {
    let (width, height) = img.dimensions();
    debug!(width, height, level, "Applying threshold conversion");

    for px in img.pixels_mut() {
        px.0 = [if px.0[0] < level { 0 } else { 255 }];
    }
}

/// Apply serpentine Floyd-Steinberg dithering to a grayscale image in place.
///
/// The scan direction alternates per row (even rows left-to-right, odd rows
/// right-to-left) to avoid directional streaking. Error distribution,
/// relative to the scan direction:
/// - Next pixel:              7/16
/// - Next row, behind:        3/16
/// - Next row, directly below: 5/16
/// - Next row, ahead:         1/16
///
/// Error falling outside the image is dropped.
pub fn floyd_steinberg_dither(img: &mut GrayImage) {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying serpentine Floyd-Steinberg dithering");

    let (w, h) = (width as usize, height as usize);
    // f32 working copy: diffusion pushes values transiently outside 0..=255
    let mut lum: Vec<f32> = img.as_raw().iter().map(|&p| f32::from(p)).collect();

    for y in 0..h {
        if y % 2 == 0 {
            for x in 0..w {
                let i = y * w + x;
                let oldp = lum[i];
                let newp = if oldp < f32::from(THRESHOLD) { 0.0 } else { 255.0 };
                let err = oldp - newp;
                lum[i] = newp;

                if x + 1 < w {
                    lum[i + 1] += err * 7.0 / 16.0;
                }
                if y + 1 < h {
                    if x > 0 {
                        lum[i + w - 1] += err * 3.0 / 16.0;
                    }
                    lum[i + w] += err * 5.0 / 16.0;
                    if x + 1 < w {
                        lum[i + w + 1] += err * 1.0 / 16.0;
                    }
                }
            }
        } else {
            for x in (0..w).rev() {
                let i = y * w + x;
                let oldp = lum[i];
                let newp = if oldp < f32::from(THRESHOLD) { 0.0 } else { 255.0 };
                let err = oldp - newp;
                lum[i] = newp;

                if x > 0 {
                    lum[i - 1] += err * 7.0 / 16.0;
                }
                if y + 1 < h {
                    if x + 1 < w {
                        lum[i + w + 1] += err * 3.0 / 16.0;
                    }
                    lum[i + w] += err * 5.0 / 16.0;
                    if x > 0 {
                        lum[i + w - 1] += err * 1.0 / 16.0;
                    }
                }
            }
        }
    }

    for (px, &v) in img.pixels_mut().zip(&lum) {
        px.0 = [v as u8];
    }
}

/// Apply Atkinson dithering to a grayscale image in place.
///
/// Raster scan, always left-to-right. One eighth of the quantization error
/// goes to each of six neighbors: two ahead on the current row, three on the
/// next row, one two rows down. Only 6/8 of the error is redistributed
/// (Atkinson's under-diffusion), which prints with higher contrast than
/// Floyd-Steinberg. Error falling outside the image is dropped.
pub fn atkinson_dither(img: &mut GrayImage) {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying Atkinson dithering");

    let (w, h) = (width as usize, height as usize);
    let mut lum: Vec<f32> = img.as_raw().iter().map(|&p| f32::from(p)).collect();

    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            let oldp = lum[i];
            let newp = if oldp < f32::from(THRESHOLD) { 0.0 } else { 255.0 };
            let err = (oldp - newp) / 8.0;
            lum[i] = newp;

            if x + 1 < w {
                lum[i + 1] += err;
            }
            if x + 2 < w {
                lum[i + 2] += err;
            }
            if y + 1 < h {
                if x > 0 {
                    lum[i + w - 1] += err;
                }
                lum[i + w] += err;
                if x + 1 < w {
                    lum[i + w + 1] += err;
                }
            }
            if y + 2 < h {
                lum[i + 2 * w] += err;
            }
        }
    }

    for (px, &v) in img.pixels_mut().zip(&lum) {
        px.0 = [v as u8];
    }
}

/// Apply ordered (Bayer) dithering in place.
///
/// The threshold for pixel (x, y) is `(matrix[y % n][x % n] + 0.5) * 255 / n²`,
/// so the n² thresholds are evenly spaced across the tonal range. No error
/// propagation; output depends only on the pixel value and its position
/// modulo the matrix size.
fn ordered_dither<const N: usize>(img: &mut GrayImage, matrix: &[[u8; N]; N]) {
    let (width, height) = img.dimensions();
    debug!(width, height, n = N, "Applying ordered Bayer dithering");

    let scale = 255.0 / (N * N) as f32;
    for (x, y, px) in img.enumerate_pixels_mut() {
        let t = (f32::from(matrix[y as usize % N][x as usize % N]) + 0.5) * scale;
        px.0 = [if f32::from(px.0[0]) < t { 0 } else { 255 }];
    }
}

/// Ordered dithering with the 4x4 Bayer matrix.
pub fn bayer4_dither(img: &mut GrayImage) {
    ordered_dither(img, &BAYER_4);
}

/// Ordered dithering with the 8x8 Bayer matrix.
pub fn bayer8_dither(img: &mut GrayImage) {
    ordered_dither(img, &BAYER_8);
}
