use ahash::{HashMap, HashMapExt};

use crate::engine::NativeEventKind;

/// How long a subscription lives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubscriptionMode {
    /// Every event of the kind is accepted.
    Every,
    /// Only the next event of the kind is accepted, then the subscription is dropped.
    Next,
}

/// Set of native event kinds the bridge listens to.
///
/// There is at most one subscription per kind. Subscribing to an already subscribed kind does not change the
/// existing subscription, so a handler is never run twice for one event.
#[derive(Debug, Default)]
pub struct Subscriptions {
    entries: HashMap<NativeEventKind, SubscriptionMode>,
}

impl Subscriptions {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Subscribes to every event of the kind.
    pub fn on_every(&mut self, kind: NativeEventKind) {
        self.entries.insert(kind, SubscriptionMode::Every);
    }

    /// Subscribes to the next event of the kind only.
    pub fn on_next(&mut self, kind: NativeEventKind) {
        self.entries.entry(kind).or_insert(SubscriptionMode::Next);
    }

    /// Returns true if events of the kind are currently accepted.
    pub fn is_subscribed(&self, kind: NativeEventKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Checks whether an event of the kind should be handled, dropping a one-shot subscription if it is.
    pub fn accept(&mut self, kind: NativeEventKind) -> bool {
        match self.entries.get(&kind) {
            Some(SubscriptionMode::Every) => true,
            Some(SubscriptionMode::Next) => {
                self.entries.remove(&kind);
                true
            }
            None => false,
        }
    }
}
