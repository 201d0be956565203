//! Point annotations drawn on top of the style.

use mapbridge_types::LngLat;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bridge::MapBridge;
use crate::color::Color;
use crate::component::{MapComponent, Subview};

/// Identity of an annotation. Two annotations are the same annotation if their ids are equal, regardless of
/// their geometry or style.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationId(Uuid);

impl AnnotationId {
    /// Generates a new unique id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnnotationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Appearance of a point annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationStyle {
    /// Name of the style image used as the icon.
    pub icon_image: Option<String>,
    /// Scale of the icon.
    pub icon_size: Option<f64>,
    /// Tint of the icon.
    pub icon_color: Option<Color>,
    /// Label text.
    pub text_field: Option<String>,
}

/// Annotation placed at a single geographic point.
#[derive(Debug, Clone)]
pub struct PointAnnotation {
    id: AnnotationId,
    /// Position of the annotation.
    pub point: LngLat,
    /// Appearance of the annotation.
    pub style: AnnotationStyle,
}

impl PointAnnotation {
    /// Creates an annotation with a new unique id and default style.
    pub fn new(point: LngLat) -> Self {
        Self::with_id(AnnotationId::new(), point)
    }

    /// Creates an annotation with the given id.
    pub fn with_id(id: AnnotationId, point: LngLat) -> Self {
        Self {
            id,
            point,
            style: AnnotationStyle::default(),
        }
    }

    /// Id of the annotation.
    pub fn id(&self) -> AnnotationId {
        self.id
    }
}

/// Engine side of point annotations: draws the given set.
pub trait AnnotationSurface {
    /// Replaces the drawn annotations with the given ones.
    fn sync(&mut self, annotations: &[PointAnnotation]);
}

/// Ordered set of point annotations shown on the map.
///
/// Changes are pushed to the [`AnnotationSurface`] only if the set actually changed.
#[derive(Debug, Default)]
pub struct AnnotationManager {
    annotations: Vec<PointAnnotation>,
    needs_sync: bool,
}

impl AnnotationManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the annotation and syncs the surface.
    pub fn add(&mut self, annotation: PointAnnotation, surface: &mut dyn AnnotationSurface) {
        self.annotations.push(annotation);
        self.needs_sync = true;
        self.sync_if_needed(surface);
    }

    /// Removes all annotations with the given id and syncs the surface. Returns the number of removed annotations.
    pub fn remove(&mut self, id: AnnotationId, surface: &mut dyn AnnotationSurface) -> usize {
        let count = self.annotations.len();
        self.annotations.retain(|annotation| annotation.id != id);

        let removed = count - self.annotations.len();
        if removed > 0 {
            self.needs_sync = true;
            self.sync_if_needed(surface);
        }

        removed
    }

    /// Pushes the annotations to the surface if they changed since the last sync. Returns true if the surface was
    /// updated.
    pub fn sync_if_needed(&mut self, surface: &mut dyn AnnotationSurface) -> bool {
        if !self.needs_sync {
            return false;
        }

        surface.sync(&self.annotations);
        self.needs_sync = false;
        true
    }

    /// Annotations in the order they were added.
    pub fn annotations(&self) -> &[PointAnnotation] {
        &self.annotations
    }

    /// Returns the annotation with the given id.
    pub fn get(&self, id: AnnotationId) -> Option<&PointAnnotation> {
        self.annotations.iter().find(|annotation| annotation.id == id)
    }
}

/// Child component that shows a point annotation while attached to a map.
#[derive(Debug, Clone)]
pub struct PointAnnotationView {
    annotation: PointAnnotation,
    is_attached: bool,
}

impl PointAnnotationView {
    /// Creates a detached component.
    pub fn new(annotation: PointAnnotation) -> Self {
        Self {
            annotation,
            is_attached: false,
        }
    }

    /// The annotation shown by the component.
    pub fn annotation(&self) -> &PointAnnotation {
        &self.annotation
    }

    /// Returns true if the annotation is currently on a map.
    pub fn is_attached(&self) -> bool {
        self.is_attached
    }
}

impl MapComponent for PointAnnotationView {
    fn add_to_map(&mut self, map: &mut MapBridge) {
        if self.is_attached {
            return;
        }

        map.add_point_annotation(self.annotation.clone());
        self.is_attached = true;
    }

    fn remove_from_map(&mut self, map: &mut MapBridge) {
        map.remove_point_annotation(self.annotation.id);
        self.is_attached = false;
    }
}

impl Subview for PointAnnotationView {
    fn as_map_component(&mut self) -> Option<&mut dyn MapComponent> {
        Some(self)
    }
}
