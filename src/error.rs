//! Error types for encoding, rendering and writing QR images

use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The external encoder could not build a symbol (data too long, bad version, ...)
    #[error("Failed to generate QR code: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    /// Destination could not be opened or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Compressed image encoding failed
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Module grid is empty or not square
    #[error("Invalid module grid: width {width} with {cells} cells")]
    InvalidGrid { width: usize, cells: usize },
}
