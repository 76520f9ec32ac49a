//! Phomemo M02 thermal printer driver.
//!
//! Sends 1-bit raster images over BLE using the ESC/POS raster command set,
//! with banded framing and paced, chunked writes to respect the link's
//! payload limit and the printer's small internal buffer. Image preparation
//! (resize, luminance, gamma, dithering, packing) lives in the
//! `image-pipeline` crate.

pub mod ble;
pub mod options;
pub mod printer;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use ble::BleTransport;
pub use options::{PrintOptions, TransferConfig};
pub use printer::Printer;
pub use transport::Transport;

/// Print width in pixels (M02 print head).
pub const PRINT_WIDTH: u32 = 384;

/// Errors that can occur during printer operations.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("Image has zero width or height")]
    EmptyImage,

    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("Frame dimensions do not fit the 16-bit header fields")]
    FrameTooLarge,

    #[error("Printer not found during BLE scan")]
    PrinterNotFound,

    #[error("Missing write characteristic on connected device")]
    MissingCharacteristic,

    #[error("Not connected to any device")]
    NotConnected,

    #[error("BLE connection error: {0}")]
    BleConnection(String),

    #[error("BLE scan error: {0}")]
    BleScan(String),

    #[error("BLE write error: {0}")]
    BleWrite(String),
}

/// Result type alias for printer operations.
pub type Result<T> = std::result::Result<T, PrintError>;
