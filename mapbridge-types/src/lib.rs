//! Coordinate primitives shared by the map event bridge, and the codec that turns them into GeoJSON values
//! a host UI framework can consume.
//!
//! ```
//! use mapbridge_types::{lnglat, GeoPoint};
//!
//! let point = lnglat!(12.5, 41.9);
//! assert_eq!(point.lon(), 12.5);
//! assert_eq!(point.lat(), 41.9);
//! ```

mod bounds;
mod error;
mod point;
mod screen;

#[cfg(feature = "geojson")]
pub mod geojson;

pub use bounds::CoordinateBounds;
pub use error::EncodingError;
pub use point::{GeoPoint, LngLat, NewGeoPoint};
pub use screen::ScreenPoint;
