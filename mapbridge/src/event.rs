//! Events delivered to the host framework.

use serde_json::{Map, Value as JsonValue};

/// JSON object with keys kept in insertion order.
pub type JsonObject = Map<String, JsonValue>;

/// Structured payload of an outbound event.
pub type Payload = JsonObject;

/// Type of an outbound event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    /// The user tapped the map.
    Tap,
    /// The camera moved.
    RegionDidChange,
    /// The map finished loading.
    DidFinishLoadingMap,
    /// The style finished loading.
    DidFinishLoadingStyle,
    /// No image provider had an image requested by the style.
    ImageMissing,
}

impl EventType {
    /// Name of the event type as seen by the host.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Tap => "tap",
            EventType::RegionDidChange => "regionDidChange",
            EventType::DidFinishLoadingMap => "didFinishLoadingMap",
            EventType::DidFinishLoadingStyle => "didFinishLoadingStyle",
            EventType::ImageMissing => "imageMissing",
        }
    }
}

/// Event delivered to a host callback.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEvent {
    event_type: EventType,
    payload: Payload,
}

impl MapEvent {
    /// Creates a new event.
    pub fn new(event_type: EventType, payload: Payload) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// Type of the event.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Payload of the event.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Converts the event into the `{type, payload}` object the host consumes.
    pub fn to_json(&self) -> JsonObject {
        let mut object = JsonObject::new();
        object.insert(
            "type".to_string(),
            JsonValue::String(self.event_type.as_str().to_string()),
        );
        object.insert(
            "payload".to_string(),
            JsonValue::Object(self.payload.clone()),
        );
        object
    }
}
