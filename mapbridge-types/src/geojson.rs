//! GeoJSON representation of coordinate primitives.
//!
//! Points are encoded as GeoJSON `Point` geometry objects, bounds as an array of two `[longitude, latitude]` pairs
//! with the north-east corner first. Non-finite coordinates are never encoded.

use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};

use crate::bounds::CoordinateBounds;
use crate::error::EncodingError;
use crate::point::{GeoPoint, LngLat, NewGeoPoint};

/// Converts a point into a GeoJSON `Point` geometry object.
pub fn point_to_json(point: &impl GeoPoint<Num = f64>) -> Result<JsonObject, EncodingError> {
    let position = LngLat::from(point).to_position()?;
    let geometry = Geometry::new(Value::Point(position.to_vec()));

    into_object(serde_json::to_value(&geometry)?)
}

/// Wraps a point into a GeoJSON `Feature` object with the given properties.
pub fn point_feature_to_json(
    point: &impl GeoPoint<Num = f64>,
    properties: JsonObject,
) -> Result<JsonObject, EncodingError> {
    let position = LngLat::from(point).to_position()?;
    let feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(position.to_vec()))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    };

    into_object(serde_json::to_value(&feature)?)
}

/// Converts a number into a JSON value, failing for `NaN` and infinite values.
pub fn number_to_json(name: &str, value: f64) -> Result<JsonValue, EncodingError> {
    serde_json::Number::from_f64(value)
        .map(JsonValue::Number)
        .ok_or_else(|| EncodingError::NonFiniteNumber(name.to_string()))
}

/// Converts a box into `[[ne_lon, ne_lat], [sw_lon, sw_lat]]`.
pub fn bounds_to_json(bounds: &CoordinateBounds) -> Result<JsonValue, EncodingError> {
    let northeast = bounds.northeast.to_position()?;
    let southwest = bounds.southwest.to_position()?;

    Ok(JsonValue::Array(vec![
        position_to_json(northeast),
        position_to_json(southwest),
    ]))
}

/// Reads a point back from a GeoJSON `Point` geometry object.
pub fn point_from_json(object: &JsonObject) -> Result<LngLat, EncodingError> {
    let geometry: Geometry = serde_json::from_value(JsonValue::Object(object.clone()))?;
    match geometry.value {
        Value::Point(position) => lnglat_from_position(&position),
        other => Err(EncodingError::InvalidGeometry(format!(
            "expected a point, got {other:?}"
        ))),
    }
}

/// Reads a box back from its two-pair array representation.
pub fn bounds_from_json(value: &JsonValue) -> Result<CoordinateBounds, EncodingError> {
    let pairs: Vec<Vec<f64>> = serde_json::from_value(value.clone())?;
    let [northeast, southwest] = pairs.as_slice() else {
        return Err(EncodingError::InvalidGeometry(format!(
            "bounds must contain exactly 2 positions, got {}",
            pairs.len()
        )));
    };

    Ok(CoordinateBounds::new(
        lnglat_from_position(northeast)?,
        lnglat_from_position(southwest)?,
    ))
}

fn into_object(value: JsonValue) -> Result<JsonObject, EncodingError> {
    match value {
        JsonValue::Object(object) => Ok(object),
        other => Err(EncodingError::InvalidGeometry(format!(
            "geometry serialized into a non-object value: {other}"
        ))),
    }
}

fn position_to_json(position: [f64; 2]) -> JsonValue {
    JsonValue::Array(position.iter().map(|&v| JsonValue::from(v)).collect())
}

fn lnglat_from_position(position: &[f64]) -> Result<LngLat, EncodingError> {
    match position {
        [lon, lat, ..] => {
            let point = LngLat::lonlat(*lon, *lat);
            point.to_position()?;
            Ok(point)
        }
        _ => Err(EncodingError::InvalidGeometry(format!(
            "position must have at least 2 values, got {}",
            position.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use insta::assert_compact_debug_snapshot;
    use serde_json::json;

    use super::*;
    use crate::lnglat;

    #[test]
    fn point_is_encoded_as_geojson_point() {
        let object = point_to_json(&lnglat!(12.5, 41.9)).expect("finite point");

        assert_eq!(object.get("type"), Some(&json!("Point")));
        assert_eq!(object.get("coordinates"), Some(&json!([12.5, 41.9])));
    }

    #[test]
    fn point_survives_decoding() {
        let object = point_to_json(&lnglat!(-73.98, 40.75)).expect("finite point");
        let point = point_from_json(&object).expect("valid point");

        assert_relative_eq!(point.lon(), -73.98);
        assert_relative_eq!(point.lat(), 40.75);
    }

    #[test]
    fn feature_carries_geometry_and_properties() {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), json!("Rome"));
        let object = point_feature_to_json(&lnglat!(12.5, 41.9), properties).expect("finite point");

        assert_eq!(object.get("type"), Some(&json!("Feature")));
        assert_eq!(
            object.get("geometry"),
            Some(&json!({"type": "Point", "coordinates": [12.5, 41.9]}))
        );
        assert_eq!(object.get("properties"), Some(&json!({"name": "Rome"})));
    }

    #[test]
    fn infinite_number_is_rejected() {
        assert_compact_debug_snapshot!(
            number_to_json("zoomLevel", f64::INFINITY),
            @r#"Err(NonFiniteNumber("zoomLevel"))"#
        );
        assert_eq!(number_to_json("pitch", 45.0).expect("finite"), json!(45.0));
    }

    #[test]
    fn bounds_put_northeast_first() {
        let bounds = CoordinateBounds::new(lnglat!(13.0, 42.0), lnglat!(12.0, 41.0));

        assert_eq!(
            bounds_to_json(&bounds).expect("finite bounds"),
            json!([[13.0, 42.0], [12.0, 41.0]])
        );
    }

    #[test]
    fn non_finite_bounds_fail() {
        let bounds = CoordinateBounds::new(lnglat!(13.0, f64::NAN), lnglat!(12.0, 41.0));

        assert_matches!(
            bounds_to_json(&bounds),
            Err(EncodingError::NonFinite { .. })
        );
    }

    #[test]
    fn non_finite_point_fails() {
        assert_compact_debug_snapshot!(
            point_to_json(&lnglat!(f64::INFINITY, 0.0)),
            @"Err(NonFinite { lon: inf, lat: 0.0 })"
        );
    }

    #[test]
    fn bounds_with_wrong_length_are_rejected() {
        assert_compact_debug_snapshot!(
            bounds_from_json(&json!([[1.0, 2.0]])),
            @r#"Err(InvalidGeometry("bounds must contain exactly 2 positions, got 1"))"#
        );
    }

    #[test]
    fn line_is_not_a_point() {
        let object = json!({"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]});
        let JsonValue::Object(object) = object else {
            unreachable!()
        };

        assert_matches!(
            point_from_json(&object),
            Err(EncodingError::InvalidGeometry(_))
        );
    }
}
