use serde::{Deserialize, Serialize};

/// Position on the map surface in pixels from the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct ScreenPoint {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl ScreenPoint {
    /// Creates a new screen point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
