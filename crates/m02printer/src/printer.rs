//! Print job orchestration: pipeline invocation, band framing, paced
//! transfer.

use image::DynamicImage;
use image_pipeline::{self as pipeline, PackedBitmap};
use tracing::{debug, info};

use crate::options::{PrintOptions, TransferConfig};
use crate::protocol;
use crate::transport::{Transport, write_chunked};
use crate::{PrintError, Result};

/// Raster printer over an abstract transport.
///
/// Owns nothing but the caller-supplied link handle and the transfer
/// configuration. A print job borrows the printer mutably for its whole
/// duration, so a second job cannot start while one is in flight.
pub struct Printer<T: Transport> {
    transport: T,
    config: TransferConfig,
}

impl<T: Transport> Printer<T> {
    /// Create a printer with default transfer pacing.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, TransferConfig::default())
    }

    /// Create a printer with explicit transfer pacing.
    pub fn with_config(transport: T, config: TransferConfig) -> Self {
        Self { transport, config }
    }

    /// Consume the printer and return the transport handle.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run the full raster pipeline on `img` and print the result.
    ///
    /// Resizes to the configured width, extracts luminance, applies the
    /// gamma curve, quantizes, packs to 1bpp and transfers the raster.
    pub async fn print_image(&mut self, img: &DynamicImage, opts: &PrintOptions) -> Result<()> {
        if img.width() == 0 || img.height() == 0 || opts.width == 0 {
            return Err(PrintError::EmptyImage);
        }

        info!(
            width = img.width(),
            height = img.height(),
            target_width = opts.width,
            dither = ?opts.dither,
            "Preparing image for print"
        );

        let resized = pipeline::resize_to_width(img, opts.width);
        let mut gray = pipeline::to_grayscale(&resized.to_rgba8());
        pipeline::apply_gamma(&mut gray, opts.gamma);
        opts.dither.apply(&mut gray);
        let packed = pipeline::pack_monochrome(&gray);

        self.send_raster(&packed).await
    }

    /// Transfer a packed raster: reset, banded frames, feed.
    ///
    /// Every outbound buffer (reset command, each frame header, each band
    /// body, feed command) goes through the chunked writer independently.
    /// In banded mode the writer sleeps `band_delay` after each band so the
    /// printer can drain its buffer. Any write failure aborts the rest of
    /// the sequence; the caller must restart the full print.
    pub async fn send_raster(&mut self, bitmap: &PackedBitmap) -> Result<()> {
        if bitmap.row_bytes == 0 || bitmap.height == 0 {
            return Err(PrintError::EmptyImage);
        }
        if self.config.chunk_size == 0 {
            return Err(PrintError::InvalidChunkSize);
        }
        if bitmap.row_bytes > usize::from(u16::MAX) {
            return Err(PrintError::FrameTooLarge);
        }

        let bands = protocol::split_bands(bitmap.height, self.config.band_rows);
        if bands.iter().any(|&(_, rows)| rows > usize::from(u16::MAX)) {
            return Err(PrintError::FrameTooLarge);
        }

        info!(
            row_bytes = bitmap.row_bytes,
            height = bitmap.height,
            chunk_size = self.config.chunk_size,
            band_rows = self.config.band_rows,
            "Starting raster transfer"
        );

        self.write_all(&protocol::CMD_RESET).await?;

        let banded = self.config.band_rows > 0;
        for (y, rows) in bands {
            debug!(y, rows, "Sending band");
            let header = protocol::raster_header(bitmap.row_bytes as u16, rows as u16);
            self.write_all(&header).await?;
            self.write_all(bitmap.band(y, rows)).await?;

            if banded && !self.config.band_delay.is_zero() {
                tokio::time::sleep(self.config.band_delay).await;
            }
        }

        self.write_all(&protocol::CMD_FEED).await?;

        info!("Raster transfer complete");
        Ok(())
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        write_chunked(
            &mut self.transport,
            data,
            self.config.chunk_size,
            self.config.chunk_delay,
        )
        .await
    }
}
