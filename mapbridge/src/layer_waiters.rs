//! Callbacks waiting for style layers to appear.

use ahash::{HashMap, HashMapExt};

use crate::engine::Style;

/// Callback run once a layer is available. Receives the id of the layer.
pub type LayerCallback = Box<dyn FnOnce(&str)>;

/// Keeps callbacks waiting for style layers that do not exist yet.
///
/// A callback is run at most once. Callbacks for a layer that exists at registration time are run immediately.
/// Others are queued until the engine reports that the layer was added, and then run in the order they were
/// registered. There is no timeout: if the layer never appears, its callbacks are never run.
#[derive(Default)]
pub struct LayerReadinessRegistry {
    waiters: HashMap<String, Vec<LayerCallback>>,
}

impl LayerReadinessRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            waiters: HashMap::new(),
        }
    }

    /// Runs the callback when the layer is available in the style.
    pub fn wait_for(
        &mut self,
        style: &dyn Style,
        layer_id: &str,
        callback: impl FnOnce(&str) + 'static,
    ) {
        if style.layer_exists(layer_id) {
            callback(layer_id);
            return;
        }

        self.waiters
            .entry(layer_id.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Runs and discards all callbacks waiting for the layer. Returns the number of callbacks run.
    pub fn layer_added(&mut self, layer_id: &str) -> usize {
        let Some(callbacks) = self.waiters.remove(layer_id) else {
            return 0;
        };

        let count = callbacks.len();
        for callback in callbacks {
            callback(layer_id);
        }

        count
    }

    /// Returns true if some callback waits for the layer.
    pub fn is_pending(&self, layer_id: &str) -> bool {
        self.waiters.contains_key(layer_id)
    }

    /// Number of callbacks waiting for the layer.
    pub fn pending_count(&self, layer_id: &str) -> usize {
        self.waiters.get(layer_id).map_or(0, Vec::len)
    }

    /// Ids of all layers that have waiting callbacks.
    pub fn pending_layers(&self) -> impl Iterator<Item = &str> {
        self.waiters.keys().map(String::as_str)
    }
}
