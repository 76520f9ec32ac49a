//! Print job configuration.
//!
//! Two independent knobs: [`PrintOptions`] shapes the image pipeline,
//! [`TransferConfig`] paces the wire transfer. Both are resolved once per
//! print; absent values fall back to the documented defaults instead of
//! failing.

use std::time::Duration;

use image_pipeline::DitherMode;

use crate::PRINT_WIDTH;

/// Image preparation options.
#[derive(Debug, Clone)]
pub struct PrintOptions {
    /// Target output width in pixels.
    pub width: u32,

    /// Gamma correction; 1.0 (or any non-positive value) disables tone
    /// mapping.
    pub gamma: f32,

    /// Quantization algorithm.
    pub dither: DitherMode,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            width: PRINT_WIDTH,
            gamma: 1.0,
            dither: DitherMode::default(),
        }
    }
}

impl PrintOptions {
    /// Create options with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set target output width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Builder: set gamma correction.
    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Builder: set quantization algorithm.
    pub fn with_dither(mut self, dither: DitherMode) -> Self {
        self.dither = dither;
        self
    }
}

/// Wire transfer pacing.
///
/// `band_rows`/`band_delay` throttle at application-buffer granularity (how
/// much raster is framed together before the printer gets a breather);
/// `chunk_size`/`chunk_delay` throttle at single-write granularity (the
/// link's maximum payload and back-pressure). The knobs compose.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Maximum bytes per link write. Must be nonzero.
    pub chunk_size: usize,

    /// Rows per band; 0 sends the whole image as one frame.
    pub band_rows: usize,

    /// Pause after each band (banded mode only).
    pub band_delay: Duration,

    /// Pause after each chunk.
    pub chunk_delay: Duration,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            chunk_size: 160,
            band_rows: 0,
            band_delay: Duration::ZERO,
            chunk_delay: Duration::ZERO,
        }
    }
}

impl TransferConfig {
    /// Create a config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set maximum bytes per link write.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Builder: set rows per band (0 disables banding).
    pub fn with_band_rows(mut self, band_rows: usize) -> Self {
        self.band_rows = band_rows;
        self
    }

    /// Builder: set the pause after each band.
    pub fn with_band_delay(mut self, band_delay: Duration) -> Self {
        self.band_delay = band_delay;
        self
    }

    /// Builder: set the pause after each chunk.
    pub fn with_chunk_delay(mut self, chunk_delay: Duration) -> Self {
        self.chunk_delay = chunk_delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_option_defaults() {
        let opts = PrintOptions::default();
        assert_eq!(opts.width, 384);
        assert!((opts.gamma - 1.0).abs() < f32::EPSILON);
        assert_eq!(opts.dither, DitherMode::FloydSteinberg);
    }

    #[test]
    fn test_transfer_config_defaults() {
        let cfg = TransferConfig::default();
        assert_eq!(cfg.chunk_size, 160);
        assert_eq!(cfg.band_rows, 0);
        assert_eq!(cfg.band_delay, Duration::ZERO);
        assert_eq!(cfg.chunk_delay, Duration::ZERO);
    }

    #[test]
    fn test_builder_chain() {
        let cfg = TransferConfig::new()
            .with_chunk_size(20)
            .with_band_rows(32)
            .with_band_delay(Duration::from_millis(12))
            .with_chunk_delay(Duration::from_millis(5));

        assert_eq!(cfg.chunk_size, 20);
        assert_eq!(cfg.band_rows, 32);
        assert_eq!(cfg.band_delay, Duration::from_millis(12));
        assert_eq!(cfg.chunk_delay, Duration::from_millis(5));
    }

    #[test]
    fn test_print_options_builder() {
        let opts = PrintOptions::new()
            .with_width(576)
            .with_gamma(2.2)
            .with_dither(DitherMode::Threshold { level: 100 });

        assert_eq!(opts.width, 576);
        assert!((opts.gamma - 2.2).abs() < f32::EPSILON);
        assert_eq!(opts.dither, DitherMode::Threshold { level: 100 });
    }
}
