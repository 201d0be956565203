//! The rendering engine as seen by the bridge.
//!
//! The engine draws the map, owns the style document and reports raw events. The bridge never looks inside it; it
//! only reads camera snapshots, asks the style questions and forwards images and annotations.

use std::any::Any;

use mapbridge_types::{LngLat, ScreenPoint};

use crate::annotation::AnnotationSurface;
use crate::camera::CameraState;
use crate::error::BridgeError;
use crate::image::StyleImage;

/// Style document currently loaded into the engine.
pub trait Style {
    /// Returns true if a layer with the given id is present in the style.
    fn layer_exists(&self, layer_id: &str) -> bool;
    /// Returns true if an image with the given name is installed in the style.
    fn image_exists(&self, name: &str) -> bool;
    /// Installs an image into the style under the given name.
    fn add_image(&mut self, name: &str, image: &StyleImage) -> Result<(), BridgeError>;
}

/// Rendering engine consumed by the bridge.
pub trait MapEngine {
    /// Sets the token used to access tile and style services.
    fn set_access_token(&mut self, token: &str);
    /// Starts loading a style from the given URL.
    fn load_style_uri(&mut self, uri: &str);
    /// Starts loading an inline style document.
    fn load_style_json(&mut self, json: &str);
    /// Currently loaded style.
    fn style(&self) -> &dyn Style;
    /// Currently loaded style.
    fn style_mut(&mut self) -> &mut dyn Style;
    /// Snapshot of the current camera.
    fn camera_state(&self) -> CameraState;
    /// Projects a position on the map surface into geographic coordinates.
    fn coordinate_for(&self, screen_point: ScreenPoint) -> LngLat;
    /// Surface point annotations are drawn on.
    fn annotation_surface(&mut self) -> &mut dyn AnnotationSurface;
    /// The bridge stores the engine as a trait object. This method can be used to convert it into the concrete type.
    fn as_any(&self) -> &dyn Any;
    /// The bridge stores the engine as a trait object. This method can be used to convert it into the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Raw event reported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    /// Camera position, zoom, bearing or pitch changed.
    CameraChanged,
    /// The user tapped the map at the given position.
    Tap {
        /// Position of the tap on the map surface.
        screen_point: ScreenPoint,
    },
    /// The map finished loading.
    MapLoaded,
    /// A style finished loading.
    StyleLoaded,
    /// The style references an image that is not installed.
    StyleImageMissing {
        /// Name of the missing image.
        image_name: String,
    },
    /// A layer was added to the style.
    LayerAdded {
        /// Id of the added layer.
        layer_id: String,
    },
}

impl NativeEvent {
    /// Kind of the event, used to match it against subscriptions.
    pub fn kind(&self) -> NativeEventKind {
        match self {
            NativeEvent::CameraChanged => NativeEventKind::CameraChanged,
            NativeEvent::Tap { .. } => NativeEventKind::Tap,
            NativeEvent::MapLoaded => NativeEventKind::MapLoaded,
            NativeEvent::StyleLoaded => NativeEventKind::StyleLoaded,
            NativeEvent::StyleImageMissing { .. } => NativeEventKind::StyleImageMissing,
            NativeEvent::LayerAdded { .. } => NativeEventKind::LayerAdded,
        }
    }
}

/// Kind of a [`NativeEvent`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NativeEventKind {
    /// See [`NativeEvent::CameraChanged`].
    CameraChanged,
    /// See [`NativeEvent::Tap`].
    Tap,
    /// See [`NativeEvent::MapLoaded`].
    MapLoaded,
    /// See [`NativeEvent::StyleLoaded`].
    StyleLoaded,
    /// See [`NativeEvent::StyleImageMissing`].
    StyleImageMissing,
    /// See [`NativeEvent::LayerAdded`].
    LayerAdded,
}
