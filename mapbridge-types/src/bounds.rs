use serde::{Deserialize, Serialize};

use crate::point::LngLat;

/// Geographic box given by its north-east and south-west corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct CoordinateBounds {
    /// North-east corner.
    pub northeast: LngLat,
    /// South-west corner.
    pub southwest: LngLat,
}

impl CoordinateBounds {
    /// Creates a new box from its corners.
    pub fn new(northeast: LngLat, southwest: LngLat) -> Self {
        Self {
            northeast,
            southwest,
        }
    }
}
