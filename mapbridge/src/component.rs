//! Child components of a map.
//!
//! The host framework attaches and detaches child nodes of the map view. The bridge only cares about children that
//! are map components: anything else is ignored.

use crate::bridge::MapBridge;

/// A child that installs something into the map when attached.
///
/// `remove_from_map` must undo everything `add_to_map` did.
pub trait MapComponent {
    /// Installs the component into the map.
    fn add_to_map(&mut self, map: &mut MapBridge);
    /// Removes the component from the map.
    fn remove_from_map(&mut self, map: &mut MapBridge);
}

/// A child node of the map view, as given by the host framework.
pub trait Subview {
    /// Returns the node as a map component, if it is one.
    fn as_map_component(&mut self) -> Option<&mut dyn MapComponent> {
        None
    }
}
