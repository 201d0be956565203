//! Error types used by the crate.

use mapbridge_types::EncodingError;
use thiserror::Error;

#[cfg(feature = "image")]
use image::ImageError;

/// Bridge error type.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A coordinate could not be encoded into an event payload.
    #[error("failed to encode payload")]
    Encoding(#[from] EncodingError),
    /// The bridge was configured with values it cannot work with.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// The rendering engine rejected a style operation.
    #[error("style error: {0}")]
    Style(String),
    /// Image decoding error.
    #[cfg(feature = "image")]
    #[error("image decode error: {0:?}")]
    ImageDecode(#[from] ImageError),
}
