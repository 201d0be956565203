use mapbridge_types::{CoordinateBounds, LngLat};

/// Snapshot of the map camera taken when the engine reports a camera change.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraState {
    /// Geographic position of the view center.
    pub center: LngLat,
    /// Zoom level.
    pub zoom: f64,
    /// Rotation of the map in degrees clockwise from north.
    pub bearing: f64,
    /// Tilt of the map in degrees.
    pub pitch: f64,
    /// Currently visible area.
    pub visible_bounds: CoordinateBounds,
}
