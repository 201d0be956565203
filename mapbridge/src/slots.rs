use std::fmt::{Debug, Formatter};

use crate::event::MapEvent;

/// Host callback receiving outbound events.
pub type EventCallback = Box<dyn FnMut(&MapEvent)>;

/// Holds at most one host callback. Setting a new callback replaces the previous one.
#[derive(Default)]
pub struct CallbackSlot {
    callback: Option<EventCallback>,
}

impl Debug for CallbackSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackSlot")
            .field("is_set", &self.is_set())
            .finish()
    }
}

impl CallbackSlot {
    /// Replaces the callback in the slot.
    pub fn set(&mut self, callback: impl FnMut(&MapEvent) + 'static) {
        self.callback = Some(Box::new(callback));
    }

    /// Returns true if a callback is set.
    pub fn is_set(&self) -> bool {
        self.callback.is_some()
    }

    /// Delivers the event to the callback. Returns false if the slot is empty, in which case the event is dropped.
    pub fn fire(&mut self, event: &MapEvent) -> bool {
        match &mut self.callback {
            Some(callback) => {
                callback(event);
                true
            }
            None => false,
        }
    }
}

/// Kind of a host callback slot of the map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Receives `tap` events.
    Press,
    /// Receives `regionDidChange`, `didFinishLoadingMap` and `didFinishLoadingStyle` events.
    MapChange,
}

/// Callback slots of the map, one per [`SlotKind`].
#[derive(Debug, Default)]
pub struct EventSlots {
    press: CallbackSlot,
    map_change: CallbackSlot,
}

impl EventSlots {
    /// Slot of the given kind.
    pub fn slot(&self, kind: SlotKind) -> &CallbackSlot {
        match kind {
            SlotKind::Press => &self.press,
            SlotKind::MapChange => &self.map_change,
        }
    }

    /// Slot of the given kind.
    pub fn slot_mut(&mut self, kind: SlotKind) -> &mut CallbackSlot {
        match kind {
            SlotKind::Press => &mut self.press,
            SlotKind::MapChange => &mut self.map_change,
        }
    }

    /// Sets the callback of the given kind, replacing the previous one.
    pub fn register(&mut self, kind: SlotKind, callback: impl FnMut(&MapEvent) + 'static) {
        self.slot_mut(kind).set(callback);
    }

    /// Delivers the event through the slot of the given kind. Returns false if the event was dropped.
    pub fn fire(&mut self, kind: SlotKind, event: &MapEvent) -> bool {
        let delivered = self.slot_mut(kind).fire(event);
        if !delivered {
            log::debug!(
                "No {kind:?} listener is registered, dropping {} event",
                event.event_type().as_str()
            );
        }

        delivered
    }
}
