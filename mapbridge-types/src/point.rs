use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::EncodingError;

/// A point on the surface of the Earth given in degrees.
pub trait GeoPoint {
    /// Numeric type used to represent coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lon(&self) -> Self::Num;

    /// Returns true if both coordinates are finite numbers.
    fn is_finite(&self) -> bool {
        self.lat().is_finite() && self.lon().is_finite()
    }
}

/// Geo point that can be constructed from its coordinates.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a point from latitude and longitude.
    fn latlon(lat: N, lon: N) -> Self;
    /// Creates a point from longitude and latitude.
    fn lonlat(lon: N, lat: N) -> Self {
        Self::latlon(lat, lon)
    }
}

/// Geographic coordinate as reported by the rendering engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct LngLat {
    lon: f64,
    lat: f64,
}

impl GeoPoint for LngLat {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint<f64> for LngLat {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lon, lat }
    }
}

impl LngLat {
    /// Creates a new point from another one.
    pub fn from(other: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            lon: other.lon(),
            lat: other.lat(),
        }
    }

    /// Returns the `[longitude, latitude]` pair, or an error if any of the values is not finite.
    pub fn to_position(&self) -> Result<[f64; 2], EncodingError> {
        if !self.is_finite() {
            return Err(EncodingError::NonFinite {
                lon: self.lon,
                lat: self.lat,
            });
        }

        Ok([self.lon, self.lat])
    }
}

/// Creates a new [`LngLat`] from longitude and latitude values (in degrees).
///
/// ```
/// use mapbridge_types::{lnglat, GeoPoint};
///
/// let point = lnglat!(52.0, 38.0);
/// assert_eq!(point.lat(), 38.0);
/// ```
#[macro_export]
macro_rules! lnglat {
    ($lon:expr, $lat:expr) => {
        <$crate::LngLat as $crate::NewGeoPoint<f64>>::lonlat($lon, $lat)
    };
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn position_is_lon_first() {
        assert_eq!(
            lnglat!(12.5, 41.9).to_position().expect("finite"),
            [12.5, 41.9]
        );
    }

    #[test]
    fn non_finite_position_is_rejected() {
        assert_matches!(
            lnglat!(f64::NAN, 1.0).to_position(),
            Err(EncodingError::NonFinite { lat, .. }) if lat == 1.0
        );
        assert!(lnglat!(0.0, f64::INFINITY).to_position().is_err());
    }
}
