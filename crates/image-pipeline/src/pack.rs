//! Packing of black-and-white images into 1-bit-per-pixel raster data.

use image::GrayImage;

/// A 1bpp, row-padded monochrome bitmap in printer byte order.
///
/// Rows are top-to-bottom, `row_bytes = ceil(width / 8)` bytes each. Within a
/// byte the most significant bit is the leftmost pixel, bit value 1 means
/// black. When the width is not a multiple of 8 the trailing padding bits of
/// each row are 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    /// Packed raster data, `row_bytes * height` bytes.
    pub bytes: Vec<u8>,
    /// Bytes per row.
    pub row_bytes: usize,
    /// Image height in rows.
    pub height: usize,
}

impl PackedBitmap {
    /// Byte range of `rows` rows starting at row `y`.
    pub fn band(&self, y: usize, rows: usize) -> &[u8] {
        &self.bytes[y * self.row_bytes..(y + rows) * self.row_bytes]
    }
}

/// Pack a black-and-white image (0 = black, 255 = white) into 1bpp bytes.
///
/// The input is expected to be quantized already; any nonzero value counts
/// as white. Black pixels encode as bit 1, inverted relative to the visual
/// 255-is-white convention.
pub fn pack_monochrome(img: &GrayImage) -> PackedBitmap {
    let (width, height) = img.dimensions();
    let (w, h) = (width as usize, height as usize);
    let row_bytes = (w + 7) / 8;

    let raw = img.as_raw();
    let mut bytes = Vec::with_capacity(row_bytes * h);
    for y in 0..h {
        for xb in 0..row_bytes {
            let mut b: u8 = 0;
            for bit in 0..8 {
                let x = xb * 8 + bit;
                b <<= 1;
                if x < w && raw[y * w + x] == 0 {
                    b |= 1;
                }
            }
            bytes.push(b);
        }
    }

    PackedBitmap {
        bytes,
        row_bytes,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_row_bytes_rounding() {
        for (w, expected) in [(1, 1), (7, 1), (8, 1), (9, 2), (383, 48), (384, 48)] {
            let img = GrayImage::from_pixel(w, 1, Luma([255]));
            assert_eq!(pack_monochrome(&img).row_bytes, expected, "width {w}");
        }
    }

    #[test]
    fn test_all_white_9x1() {
        let img = GrayImage::from_pixel(9, 1, Luma([255]));
        let packed = pack_monochrome(&img);
        assert_eq!(packed.row_bytes, 2);
        assert_eq!(packed.bytes, vec![0x00, 0x00]);
    }

    #[test]
    fn test_all_black_8x1() {
        let img = GrayImage::from_pixel(8, 1, Luma([0]));
        let packed = pack_monochrome(&img);
        assert_eq!(packed.bytes, vec![0xff]);
    }

    #[test]
    fn test_msb_is_leftmost_pixel() {
        let mut img = GrayImage::from_pixel(8, 1, Luma([255]));
        img.put_pixel(0, 0, Luma([0]));
        assert_eq!(pack_monochrome(&img).bytes, vec![0x80]);
    }

    #[test]
    fn test_padding_bits_are_zero() {
        // 9 black pixels: full first byte, then one bit + 7 zero pad bits
        let img = GrayImage::from_pixel(9, 1, Luma([0]));
        let packed = pack_monochrome(&img);
        assert_eq!(packed.bytes, vec![0xff, 0x80]);
    }

    #[test]
    fn test_round_trip() {
        let mut img = GrayImage::new(11, 3);
        for (x, y, px) in img.enumerate_pixels_mut() {
            px.0 = [if (x * 31 + y * 17) % 3 == 0 { 0 } else { 255 }];
        }

        let packed = pack_monochrome(&img);
        assert_eq!(packed.bytes.len(), packed.row_bytes * packed.height);

        for (x, y, px) in img.enumerate_pixels() {
            let byte = packed.bytes[y as usize * packed.row_bytes + x as usize / 8];
            let bit = (byte >> (7 - x % 8)) & 1;
            let expected = if px.0[0] == 0 { 1 } else { 0 };
            assert_eq!(bit, expected, "Mismatch at ({x}, {y})");
        }
    }

    #[test]
    fn test_band_slicing() {
        let img = GrayImage::from_pixel(8, 4, Luma([0]));
        let packed = pack_monochrome(&img);
        assert_eq!(packed.band(0, 2), &[0xff, 0xff]);
        assert_eq!(packed.band(2, 2), &[0xff, 0xff]);
        assert_eq!(packed.band(3, 1).len(), 1);
    }
}
