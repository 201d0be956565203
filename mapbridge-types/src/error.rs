//! Error type used by the crate.

use thiserror::Error;

/// Error returned when a coordinate value cannot be represented in an outbound payload.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// Coordinate contains `NaN` or infinite values.
    #[error("coordinate is not finite: ({lon}, {lat})")]
    NonFinite {
        /// Longitude of the rejected coordinate.
        lon: f64,
        /// Latitude of the rejected coordinate.
        lat: f64,
    },
    /// Numeric property contains `NaN` or an infinite value.
    #[error("value of {0} is not finite")]
    NonFiniteNumber(String),
    /// Input value does not describe a supported geometry.
    #[error("invalid input geometry: {0}")]
    InvalidGeometry(String),
    /// JSON serialization failed.
    #[error("failed to serialize geometry")]
    Serialization(#[from] serde_json::Error),
}
