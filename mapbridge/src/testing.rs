//! In-memory rendering engine for tests.

use std::any::Any;

use ahash::{HashMap, HashSet};
use mapbridge_types::{LngLat, ScreenPoint};

use crate::annotation::{AnnotationId, AnnotationSurface, PointAnnotation};
use crate::camera::CameraState;
use crate::config::StyleSource;
use crate::engine::{MapEngine, Style};
use crate::error::BridgeError;
use crate::image::StyleImage;

/// Style with a fixed set of layers that stores installed images in memory.
#[derive(Debug, Default)]
pub struct FakeStyle {
    /// Ids of the layers of the style.
    pub layers: HashSet<String>,
    /// Installed images.
    pub images: HashMap<String, StyleImage>,
}

impl FakeStyle {
    /// Creates a style with the given layers.
    pub fn with_layers(layer_ids: &[&str]) -> Self {
        let mut style = Self::default();
        for id in layer_ids {
            style.add_layer(id);
        }

        style
    }

    /// Adds a layer to the style.
    pub fn add_layer(&mut self, layer_id: &str) {
        self.layers.insert(layer_id.to_string());
    }
}

impl Style for FakeStyle {
    fn layer_exists(&self, layer_id: &str) -> bool {
        self.layers.contains(layer_id)
    }

    fn image_exists(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    fn add_image(&mut self, name: &str, image: &StyleImage) -> Result<(), BridgeError> {
        self.images.insert(name.to_string(), image.clone());
        Ok(())
    }
}

/// Annotation surface that remembers what it was asked to show.
#[derive(Debug, Default)]
pub struct FakeSurface {
    /// Number of sync calls.
    pub sync_count: usize,
    /// Ids of the annotations given in the last sync call.
    pub shown: Vec<AnnotationId>,
}

impl AnnotationSurface for FakeSurface {
    fn sync(&mut self, annotations: &[PointAnnotation]) {
        self.sync_count += 1;
        self.shown = annotations.iter().map(PointAnnotation::id).collect();
    }
}

/// Engine that records the calls made to it. Camera and tap projection are taken from its fields.
#[derive(Debug, Default)]
pub struct FakeEngine {
    /// Last access token set.
    pub access_token: Option<String>,
    /// Styles loaded so far.
    pub loaded_styles: Vec<StyleSource>,
    /// The style.
    pub style: FakeStyle,
    /// Camera returned by `camera_state`.
    pub camera: CameraState,
    /// Coordinate every screen point projects to.
    pub tap_coordinate: LngLat,
    /// Annotation surface.
    pub surface: FakeSurface,
}

impl MapEngine for FakeEngine {
    fn set_access_token(&mut self, token: &str) {
        self.access_token = Some(token.to_string());
    }

    fn load_style_uri(&mut self, uri: &str) {
        self.loaded_styles.push(StyleSource::Url(uri.to_string()));
    }

    fn load_style_json(&mut self, json: &str) {
        self.loaded_styles.push(StyleSource::Json(json.to_string()));
    }

    fn style(&self) -> &dyn Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut dyn Style {
        &mut self.style
    }

    fn camera_state(&self) -> CameraState {
        self.camera
    }

    fn coordinate_for(&self, _screen_point: ScreenPoint) -> LngLat {
        self.tap_coordinate
    }

    fn annotation_surface(&mut self) -> &mut dyn AnnotationSurface {
        &mut self.surface
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
