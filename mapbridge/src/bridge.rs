use mapbridge_types::ScreenPoint;

use crate::annotation::{AnnotationId, AnnotationManager, PointAnnotation};
use crate::component::Subview;
use crate::config::{MapConfig, StyleSource};
use crate::engine::{MapEngine, NativeEvent, NativeEventKind};
use crate::error::BridgeError;
use crate::event::{EventType, MapEvent, Payload};
use crate::image::{ImageProvider, ImageResolutionChain, ProviderId};
use crate::layer_waiters::LayerReadinessRegistry;
use crate::payload::{map_loaded_payload, region_change_payload, tap_payload};
use crate::slots::{EventSlots, SlotKind};
use crate::subscription::Subscriptions;

/// Map view exposed to the host framework.
///
/// The bridge owns the rendering engine, receives its raw events through [`MapBridge::handle_event`] and turns them
/// into [`MapEvent`]s delivered to the host callbacks. Each kind of callback has a single slot; if the slot is
/// empty when an event arrives, the event is dropped.
///
/// Note that `didFinishLoadingMap` and `didFinishLoadingStyle` events are delivered through the region change
/// callback, since hosts expect them there.
pub struct MapBridge {
    engine: Box<dyn MapEngine>,
    slots: EventSlots,
    subscriptions: Subscriptions,
    image_providers: ImageResolutionChain,
    layer_waiters: LayerReadinessRegistry,
    point_annotations: AnnotationManager,
}

impl MapBridge {
    /// Creates a new map with the given engine.
    ///
    /// Fails if the access token is empty or the style is neither a URL nor a JSON document.
    pub fn new(config: &MapConfig, mut engine: Box<dyn MapEngine>) -> Result<Self, BridgeError> {
        let style = config.validate()?;
        engine.set_access_token(&config.access_token);

        let mut bridge = Self {
            engine,
            slots: EventSlots::default(),
            subscriptions: Subscriptions::new(),
            image_providers: ImageResolutionChain::new(),
            layer_waiters: LayerReadinessRegistry::new(),
            point_annotations: AnnotationManager::new(),
        };

        bridge.setup_events();
        bridge.load_style(style);

        Ok(bridge)
    }

    fn setup_events(&mut self) {
        self.subscriptions.on_every(NativeEventKind::StyleImageMissing);
        self.subscriptions.on_every(NativeEventKind::StyleLoaded);
        self.subscriptions.on_every(NativeEventKind::LayerAdded);
        self.subscriptions.on_next(NativeEventKind::MapLoaded);
    }

    /// The rendering engine.
    pub fn engine(&self) -> &dyn MapEngine {
        &*self.engine
    }

    /// The rendering engine.
    pub fn engine_mut(&mut self) -> &mut dyn MapEngine {
        &mut *self.engine
    }

    /// Loads a new style. The value is used as a URL if it looks like one, otherwise as an inline JSON document.
    /// Values that are neither are ignored.
    pub fn set_style(&mut self, value: &str) {
        match StyleSource::parse(value) {
            Some(source) => self.load_style(source),
            None => log::warn!("Style is neither a URL nor a JSON document, ignoring it"),
        }
    }

    fn load_style(&mut self, source: StyleSource) {
        match source {
            StyleSource::Url(url) => {
                log::info!("Loading style {url}");
                self.engine.load_style_uri(&url);
            }
            StyleSource::Json(json) => {
                log::info!("Loading inline style");
                self.engine.load_style_json(&json);
            }
        }
    }

    /// Sets the callback receiving `tap` events, replacing the previous one.
    pub fn on_press(&mut self, callback: impl FnMut(&MapEvent) + 'static) {
        self.slots.register(SlotKind::Press, callback);
        self.subscriptions.on_every(NativeEventKind::Tap);
    }

    /// Sets the callback receiving `regionDidChange`, `didFinishLoadingMap` and `didFinishLoadingStyle` events,
    /// replacing the previous one.
    pub fn on_region_change(&mut self, callback: impl FnMut(&MapEvent) + 'static) {
        self.slots.register(SlotKind::MapChange, callback);
        self.subscriptions.on_every(NativeEventKind::CameraChanged);
    }

    /// Handles a raw event reported by the engine.
    pub fn handle_event(&mut self, event: NativeEvent) {
        if !self.subscriptions.accept(event.kind()) {
            log::trace!("Not subscribed to {:?} events", event.kind());
            return;
        }

        match event {
            NativeEvent::CameraChanged => self.handle_camera_changed(),
            NativeEvent::Tap { screen_point } => self.handle_tap(screen_point),
            NativeEvent::MapLoaded => {
                self.fire(EventType::DidFinishLoadingMap, map_loaded_payload());
            }
            NativeEvent::StyleLoaded => {
                self.fire(EventType::DidFinishLoadingStyle, Payload::new());
            }
            NativeEvent::StyleImageMissing { image_name } => {
                self.image_providers.resolve(&image_name, self.engine.style_mut());
            }
            NativeEvent::LayerAdded { layer_id } => {
                self.layer_waiters.layer_added(&layer_id);
            }
        }
    }

    fn handle_camera_changed(&mut self) {
        if !self.slots.slot(SlotKind::MapChange).is_set() {
            return;
        }

        let camera = self.engine.camera_state();
        match region_change_payload(&camera) {
            Ok(payload) => self.fire(EventType::RegionDidChange, payload),
            Err(err) => log::warn!("Dropping region change event: {err}"),
        }
    }

    fn handle_tap(&mut self, screen_point: ScreenPoint) {
        if !self.slots.slot(SlotKind::Press).is_set() {
            return;
        }

        let coordinate = self.engine.coordinate_for(screen_point);
        log::debug!("Tap point {screen_point:?} => {coordinate:?}");

        match tap_payload(screen_point, coordinate) {
            Ok(payload) => self.fire(EventType::Tap, payload),
            Err(err) => log::warn!("Dropping tap event: {err}"),
        }
    }

    fn fire(&mut self, event_type: EventType, payload: Payload) {
        let slot = match event_type {
            EventType::Tap => SlotKind::Press,
            _ => SlotKind::MapChange,
        };

        self.slots.fire(slot, &MapEvent::new(event_type, payload));
    }

    /// Runs the callback once a layer with the given id is in the style. If the layer is already there, the
    /// callback is run before this method returns.
    pub fn wait_for_layer(&mut self, layer_id: &str, callback: impl FnOnce(&str) + 'static) {
        self.layer_waiters.wait_for(self.engine.style(), layer_id, callback);
    }

    /// Callbacks waiting for layers.
    pub fn layer_waiters(&self) -> &LayerReadinessRegistry {
        &self.layer_waiters
    }

    /// Adds an image provider to the end of the missing image resolution chain.
    pub fn add_image_provider(&mut self, provider: Box<dyn ImageProvider>) -> ProviderId {
        self.image_providers.push(provider)
    }

    /// Removes an image provider from the resolution chain.
    pub fn remove_image_provider(&mut self, id: ProviderId) -> Option<Box<dyn ImageProvider>> {
        self.image_providers.remove(id)
    }

    /// Number of registered image providers.
    pub fn image_provider_count(&self) -> usize {
        self.image_providers.len()
    }

    /// Shows a point annotation on the map.
    pub fn add_point_annotation(&mut self, annotation: PointAnnotation) {
        self.point_annotations.add(annotation, self.engine.annotation_surface());
    }

    /// Removes point annotations with the given id. Returns the number of removed annotations.
    pub fn remove_point_annotation(&mut self, id: AnnotationId) -> usize {
        self.point_annotations.remove(id, self.engine.annotation_surface())
    }

    /// Point annotations currently on the map.
    pub fn point_annotations(&self) -> &AnnotationManager {
        &self.point_annotations
    }

    /// Attaches a child node. Nodes that are not map components are ignored.
    pub fn insert_subview(&mut self, subview: &mut dyn Subview, _index: usize) {
        if let Some(component) = subview.as_map_component() {
            component.add_to_map(self);
        }
    }

    /// Detaches a child node, undoing what [`MapBridge::insert_subview`] did.
    pub fn remove_subview(&mut self, subview: &mut dyn Subview) {
        if let Some(component) = subview.as_map_component() {
            component.remove_from_map(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use insta::assert_compact_debug_snapshot;
    use mapbridge_types::{lnglat, CoordinateBounds};
    use serde_json::json;

    use super::*;
    use crate::annotation::PointAnnotationView;
    use crate::camera::CameraState;
    use crate::engine::Style;
    use crate::image::{DecodedImage, Images, StyleImage};
    use crate::testing::FakeEngine;

    const STYLE_URL: &str = "mapbox://styles/mapbox/streets-v11";

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn bridge() -> MapBridge {
        init_logger();
        MapBridge::new(
            &MapConfig::new(STYLE_URL, "pk.test"),
            Box::new(FakeEngine::default()),
        )
        .expect("valid config")
    }

    fn fake(bridge: &MapBridge) -> &FakeEngine {
        bridge
            .engine()
            .as_any()
            .downcast_ref::<FakeEngine>()
            .expect("fake engine")
    }

    fn fake_mut(bridge: &mut MapBridge) -> &mut FakeEngine {
        bridge
            .engine_mut()
            .as_any_mut()
            .downcast_mut::<FakeEngine>()
            .expect("fake engine")
    }

    fn collector() -> (Rc<RefCell<Vec<MapEvent>>>, impl FnMut(&MapEvent)) {
        let events = Rc::new(RefCell::new(vec![]));
        let sink = events.clone();
        (events, move |event: &MapEvent| {
            sink.borrow_mut().push(event.clone())
        })
    }

    fn camera(bearing: f64) -> CameraState {
        CameraState {
            center: lnglat!(12.5, 41.9),
            zoom: 12.0,
            bearing,
            pitch: 0.0,
            visible_bounds: CoordinateBounds::new(lnglat!(12.6, 42.0), lnglat!(12.4, 41.8)),
        }
    }

    struct PlainView;
    impl Subview for PlainView {}

    #[test]
    fn construction_applies_config() {
        let bridge = bridge();

        let engine = fake(&bridge);
        assert_eq!(engine.access_token.as_deref(), Some("pk.test"));
        assert_eq!(
            engine.loaded_styles,
            [StyleSource::Url(STYLE_URL.to_string())]
        );
    }

    #[test]
    fn construction_without_token_fails() {
        let result = MapBridge::new(
            &MapConfig::new(STYLE_URL, ""),
            Box::new(FakeEngine::default()),
        );

        assert_compact_debug_snapshot!(result.err(), @r#"Some(Configuration("access token is not set"))"#);
    }

    #[test]
    fn set_style_disambiguates_value() {
        let mut bridge = bridge();
        bridge.set_style(r#"{"version": 8, "layers": []}"#);
        bridge.set_style("streets please");

        assert_eq!(
            fake(&bridge).loaded_styles,
            [
                StyleSource::Url(STYLE_URL.to_string()),
                StyleSource::Json(r#"{"version": 8, "layers": []}"#.to_string()),
            ]
        );
    }

    #[test]
    fn tap_is_delivered_with_screen_point() {
        let mut bridge = bridge();
        fake_mut(&mut bridge).tap_coordinate = lnglat!(12.5, 41.9);
        let (events, callback) = collector();
        bridge.on_press(callback);

        bridge.handle_event(NativeEvent::Tap {
            screen_point: ScreenPoint::new(100.0, 200.0),
        });

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(
            serde_json::Value::Object(events[0].to_json()),
            json!({
                "type": "tap",
                "payload": {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [12.5, 41.9]},
                    "properties": {"screenPointX": 100.0, "screenPointY": 200.0},
                },
            })
        );
    }

    #[test]
    fn events_without_listener_are_dropped() {
        let mut bridge = bridge();

        bridge.handle_event(NativeEvent::Tap {
            screen_point: ScreenPoint::new(1.0, 1.0),
        });
        bridge.handle_event(NativeEvent::CameraChanged);
        bridge.handle_event(NativeEvent::MapLoaded);

        let (events, callback) = collector();
        bridge.on_region_change(callback);
        bridge.handle_event(NativeEvent::MapLoaded);

        assert!(events.borrow().is_empty());
    }

    #[test]
    fn region_change_callback_is_replaced() {
        let mut bridge = bridge();
        fake_mut(&mut bridge).camera = camera(30.0);
        let (old_events, old_callback) = collector();
        let (new_events, new_callback) = collector();

        bridge.on_region_change(old_callback);
        bridge.handle_event(NativeEvent::CameraChanged);
        bridge.on_region_change(new_callback);
        bridge.handle_event(NativeEvent::CameraChanged);
        bridge.handle_event(NativeEvent::CameraChanged);

        assert_eq!(old_events.borrow().len(), 1);
        assert_eq!(new_events.borrow().len(), 2);

        let new_events = new_events.borrow();
        let event = &new_events[0];
        assert_eq!(event.event_type(), EventType::RegionDidChange);
        let properties = &event.payload()["properties"];
        assert_eq!(properties["heading"], json!(30.0));
        assert_eq!(properties["bearing"], json!(30.0));
    }

    #[test]
    fn malformed_camera_is_dropped_and_bridge_continues() {
        let mut bridge = bridge();
        let (events, callback) = collector();
        bridge.on_region_change(callback);

        fake_mut(&mut bridge).camera = CameraState {
            center: lnglat!(f64::NAN, 0.0),
            ..camera(0.0)
        };
        bridge.handle_event(NativeEvent::CameraChanged);
        assert!(events.borrow().is_empty());

        fake_mut(&mut bridge).camera = camera(0.0);
        bridge.handle_event(NativeEvent::CameraChanged);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn map_loaded_uses_region_change_slot_once() {
        let mut bridge = bridge();
        let (events, callback) = collector();
        bridge.on_region_change(callback);

        bridge.handle_event(NativeEvent::MapLoaded);
        bridge.handle_event(NativeEvent::MapLoaded);

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), EventType::DidFinishLoadingMap);
        assert!(events[0].payload().is_empty());
    }

    #[test]
    fn every_style_load_is_reported() {
        let mut bridge = bridge();
        let (events, callback) = collector();
        bridge.on_region_change(callback);

        bridge.handle_event(NativeEvent::StyleLoaded);
        bridge.handle_event(NativeEvent::StyleLoaded);

        let types: Vec<_> = events.borrow().iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            [
                EventType::DidFinishLoadingStyle,
                EventType::DidFinishLoadingStyle
            ]
        );
    }

    #[test]
    fn missing_image_is_resolved_by_attached_images() {
        let mut bridge = bridge();
        let mut images = Images::new();
        images.insert(
            "pin",
            StyleImage::new(DecodedImage::from_rgba(vec![0; 4], 1, 1).expect("valid image")),
        );
        let (missing, callback) = collector();
        images.on_image_missing(callback);

        bridge.insert_subview(&mut images, 0);
        bridge.handle_event(NativeEvent::StyleImageMissing {
            image_name: "pin".into(),
        });
        bridge.handle_event(NativeEvent::StyleImageMissing {
            image_name: "flag".into(),
        });

        assert!(fake(&bridge).style.image_exists("pin"));
        assert!(!fake(&bridge).style.image_exists("flag"));

        let missing = missing.borrow();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].payload()["imageKey"], json!("flag"));
    }

    #[test]
    fn image_added_from_missing_callback_is_used_next_time() {
        let mut bridge = bridge();
        let mut images = Images::new();
        let mut handle = images.provider();
        images.on_image_missing(move |event| {
            if let Some(name) = event.payload()["imageKey"].as_str() {
                handle.insert(
                    name,
                    StyleImage::new(DecodedImage::from_rgba(vec![0; 4], 1, 1).expect("valid image")),
                );
            }
        });

        bridge.insert_subview(&mut images, 0);
        bridge.handle_event(NativeEvent::StyleImageMissing {
            image_name: "flag".into(),
        });
        assert!(images.contains("flag"));
        assert!(!fake(&bridge).style.image_exists("flag"));

        bridge.handle_event(NativeEvent::StyleImageMissing {
            image_name: "flag".into(),
        });
        assert!(fake(&bridge).style.image_exists("flag"));
    }

    #[test]
    fn detached_images_are_not_consulted() {
        let mut bridge = bridge();
        let mut images = Images::new();
        images.insert(
            "pin",
            StyleImage::new(DecodedImage::from_rgba(vec![0; 4], 1, 1).expect("valid image")),
        );

        bridge.insert_subview(&mut images, 0);
        bridge.insert_subview(&mut images, 0);
        assert_eq!(bridge.image_provider_count(), 1);

        bridge.remove_subview(&mut images);
        assert_eq!(bridge.image_provider_count(), 0);
        assert!(!images.is_attached());

        bridge.handle_event(NativeEvent::StyleImageMissing {
            image_name: "pin".into(),
        });
        assert!(!fake(&bridge).style.image_exists("pin"));
    }

    #[test]
    fn layer_waiters_fire_on_layer_added() {
        let mut bridge = bridge();
        fake_mut(&mut bridge).style.add_layer("roads");
        let fired = Rc::new(RefCell::new(vec![]));

        let sink = fired.clone();
        bridge.wait_for_layer("roads", move |id| sink.borrow_mut().push(format!("now:{id}")));
        let sink = fired.clone();
        bridge.wait_for_layer("labels", move |id| sink.borrow_mut().push(format!("later:{id}")));

        assert_eq!(*fired.borrow(), ["now:roads"]);
        assert!(bridge.layer_waiters().is_pending("labels"));
        assert!(!bridge.layer_waiters().is_pending("roads"));

        bridge.handle_event(NativeEvent::LayerAdded {
            layer_id: "labels".into(),
        });
        bridge.handle_event(NativeEvent::LayerAdded {
            layer_id: "labels".into(),
        });

        assert_eq!(*fired.borrow(), ["now:roads", "later:labels"]);
        assert!(!bridge.layer_waiters().is_pending("labels"));
    }

    #[test]
    fn annotation_detach_leaves_nothing_behind() {
        let mut bridge = bridge();
        let mut view = PointAnnotationView::new(PointAnnotation::new(lnglat!(12.5, 41.9)));

        bridge.insert_subview(&mut view, 0);
        assert!(view.is_attached());
        assert_eq!(bridge.point_annotations().annotations().len(), 1);
        assert_eq!(fake(&bridge).surface.shown, [view.annotation().id()]);

        bridge.remove_subview(&mut view);
        assert!(!view.is_attached());
        assert!(bridge.point_annotations().annotations().is_empty());
        assert!(fake(&bridge).surface.shown.is_empty());

        bridge.remove_subview(&mut view);
        assert_eq!(fake(&bridge).surface.sync_count, 2);
    }

    #[test]
    fn plain_subviews_are_ignored() {
        let mut bridge = bridge();

        bridge.insert_subview(&mut PlainView, 0);
        bridge.remove_subview(&mut PlainView);

        assert!(bridge.point_annotations().annotations().is_empty());
        assert_eq!(bridge.image_provider_count(), 0);
    }
}
