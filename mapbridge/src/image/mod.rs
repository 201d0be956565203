//! Resolution of images the style requests but does not have.
//!
//! When the engine reports a missing style image, the [`ImageResolutionChain`] asks its [`ImageProvider`]s in
//! registration order to install it. The first provider that succeeds ends the search. If none does, every provider
//! is told about the miss in a separate pass, after all attempts are done.

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::Style;
use crate::error::BridgeError;

mod decoded;
mod images;

pub use decoded::{DecodedImage, StyleImage};
pub use images::Images;

/// Source of images for the style.
pub trait ImageProvider {
    /// Installs the image into the style if the provider has it. Returns `Ok(true)` if the image was installed.
    fn add_missing_image_to_style(
        &mut self,
        style: &mut dyn Style,
        image_name: &str,
    ) -> Result<bool, BridgeError>;

    /// Called when no provider could install the image.
    fn send_image_missing_event(&mut self, image_name: &str);
}

impl<T: ImageProvider> ImageProvider for Rc<RefCell<T>> {
    fn add_missing_image_to_style(
        &mut self,
        style: &mut dyn Style,
        image_name: &str,
    ) -> Result<bool, BridgeError> {
        self.borrow_mut().add_missing_image_to_style(style, image_name)
    }

    fn send_image_missing_event(&mut self, image_name: &str) {
        self.borrow_mut().send_image_missing_event(image_name)
    }
}

/// Handle of a provider registered in an [`ImageResolutionChain`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProviderId(u64);

/// Ordered list of image providers.
#[derive(Default)]
pub struct ImageResolutionChain {
    providers: Vec<(ProviderId, Box<dyn ImageProvider>)>,
    next_id: u64,
}

impl ImageResolutionChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn ImageProvider>) -> ProviderId {
        let id = ProviderId(self.next_id);
        self.next_id += 1;
        self.providers.push((id, provider));
        id
    }

    /// Removes the provider from the chain and returns it.
    pub fn remove(&mut self, id: ProviderId) -> Option<Box<dyn ImageProvider>> {
        let index = self.providers.iter().position(|(p, _)| *p == id)?;
        Some(self.providers.remove(index).1)
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if there are no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Tries to install the image into the style. Returns true if some provider did it.
    ///
    /// A provider that fails with an error is treated as one that does not have the image.
    pub fn resolve(&mut self, image_name: &str, style: &mut dyn Style) -> bool {
        for (id, provider) in &mut self.providers {
            match provider.add_missing_image_to_style(style, image_name) {
                Ok(true) => {
                    log::debug!("Image {image_name} was provided by {id:?}");
                    return true;
                }
                Ok(false) => {}
                Err(err) => {
                    log::warn!("Image provider {id:?} failed to add image {image_name}: {err}")
                }
            }
        }

        log::debug!("No provider has image {image_name}");
        for (_, provider) in &mut self.providers {
            provider.send_image_missing_event(image_name);
        }

        false
    }
}
