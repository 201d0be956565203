use std::cell::RefCell;
use std::rc::Rc;

use ahash::{HashMap, HashMapExt};

use crate::bridge::MapBridge;
use crate::component::{MapComponent, Subview};
use crate::engine::Style;
use crate::error::BridgeError;
use crate::event::{EventType, MapEvent};
#[cfg(feature = "image")]
use crate::image::DecodedImage;
use crate::image::{ImageProvider, ProviderId, StyleImage};
use crate::payload::image_missing_payload;
use crate::slots::CallbackSlot;

/// Child component that supplies named images to the style on demand.
///
/// Once attached to a map, the component takes part in resolving missing style images. If no provider of the map
/// has a requested image, the component fires its `onImageMissing` callback with an `imageMissing` event, giving
/// the host a chance to add the image.
pub struct Images {
    state: Rc<RefCell<ImagesState>>,
    provider_id: Option<ProviderId>,
}

struct ImagesState {
    images: HashMap<String, StyleImage>,
    on_image_missing: CallbackSlot,
}

impl Default for Images {
    fn default() -> Self {
        Self::new()
    }
}

impl Images {
    /// Creates a component without images.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ImagesState {
                images: HashMap::new(),
                on_image_missing: CallbackSlot::default(),
            })),
            provider_id: None,
        }
    }

    /// Adds or replaces an image.
    pub fn insert(&mut self, name: impl Into<String>, image: StyleImage) {
        self.state.borrow_mut().images.insert(name.into(), image);
    }

    /// Decodes an encoded image (PNG or JPEG) and adds it.
    #[cfg(feature = "image")]
    pub fn insert_encoded(
        &mut self,
        name: impl Into<String>,
        bytes: &[u8],
        scale: f32,
    ) -> Result<(), BridgeError> {
        let image = StyleImage {
            scale,
            ..StyleImage::new(DecodedImage::decode(bytes)?)
        };
        self.insert(name, image);
        Ok(())
    }

    /// Returns true if the component has an image with the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.state.borrow().images.contains_key(name)
    }

    /// Sets the callback receiving `imageMissing` events, replacing the previous one.
    pub fn on_image_missing(&mut self, callback: impl FnMut(&MapEvent) + 'static) {
        self.state.borrow_mut().on_image_missing.set(callback);
    }

    /// Returns true if the component is registered in a map.
    pub fn is_attached(&self) -> bool {
        self.provider_id.is_some()
    }

    /// Returns a second handle to the same images and callback.
    pub(crate) fn provider(&self) -> Self {
        Self {
            state: self.state.clone(),
            provider_id: None,
        }
    }
}

impl ImageProvider for Images {
    fn add_missing_image_to_style(
        &mut self,
        style: &mut dyn Style,
        image_name: &str,
    ) -> Result<bool, BridgeError> {
        let state = self.state.borrow();
        let Some(image) = state.images.get(image_name) else {
            return Ok(false);
        };

        style.add_image(image_name, image)?;
        Ok(true)
    }

    fn send_image_missing_event(&mut self, image_name: &str) {
        let event = MapEvent::new(EventType::ImageMissing, image_missing_payload(image_name));

        // The callback may add images through another handle, so the state must not be borrowed while it runs.
        let mut slot = std::mem::take(&mut self.state.borrow_mut().on_image_missing);
        slot.fire(&event);

        let mut state = self.state.borrow_mut();
        if !state.on_image_missing.is_set() {
            state.on_image_missing = slot;
        }
    }
}

impl MapComponent for Images {
    fn add_to_map(&mut self, map: &mut MapBridge) {
        if self.provider_id.is_some() {
            return;
        }

        self.provider_id = Some(map.add_image_provider(Box::new(self.provider())));
    }

    fn remove_from_map(&mut self, map: &mut MapBridge) {
        if let Some(id) = self.provider_id.take() {
            map.remove_image_provider(id);
        }
    }
}

impl Subview for Images {
    fn as_map_component(&mut self) -> Option<&mut dyn MapComponent> {
        Some(self)
    }
}
