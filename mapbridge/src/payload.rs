//! Builders of outbound event payloads.
//!
//! Spatial payloads are GeoJSON features: the geometry is a point, and the rest of the data goes into the
//! feature's properties. Builders are pure functions of their input.

use mapbridge_types::geojson::{bounds_to_json, number_to_json, point_feature_to_json};
use mapbridge_types::{EncodingError, LngLat, ScreenPoint};

use crate::camera::CameraState;
use crate::event::{JsonObject, Payload};

/// Builds the payload of a `regionDidChange` event.
///
/// Properties are `zoomLevel`, `heading`, `bearing`, `pitch` and `visibleBounds`. `heading` always has the
/// same value as `bearing`, since hosts read either of them.
pub fn region_change_payload(camera: &CameraState) -> Result<Payload, EncodingError> {
    let mut properties = JsonObject::new();
    properties.insert("zoomLevel".into(), number_to_json("zoomLevel", camera.zoom)?);
    properties.insert("heading".into(), number_to_json("heading", camera.bearing)?);
    properties.insert("bearing".into(), number_to_json("bearing", camera.bearing)?);
    properties.insert("pitch".into(), number_to_json("pitch", camera.pitch)?);
    properties.insert(
        "visibleBounds".into(),
        bounds_to_json(&camera.visible_bounds)?,
    );

    point_feature_to_json(&camera.center, properties)
}

/// Builds the payload of a `tap` event from the screen position of the gesture and its geographic projection.
pub fn tap_payload(
    screen_point: ScreenPoint,
    coordinate: LngLat,
) -> Result<Payload, EncodingError> {
    let mut properties = JsonObject::new();
    properties.insert(
        "screenPointX".into(),
        number_to_json("screenPointX", screen_point.x)?,
    );
    properties.insert(
        "screenPointY".into(),
        number_to_json("screenPointY", screen_point.y)?,
    );

    point_feature_to_json(&coordinate, properties)
}

/// Payload of the `didFinishLoadingMap` event. The event is a signal and carries no data.
pub fn map_loaded_payload() -> Payload {
    Payload::new()
}

/// Payload of the `imageMissing` event.
pub fn image_missing_payload(image_name: &str) -> Payload {
    let mut payload = Payload::new();
    payload.insert("imageKey".into(), image_name.into());
    payload
}
