//! Mapbridge connects an embedded map rendering engine to the component tree of a host UI framework.
//!
//! The engine draws the map and reports raw events: camera movement, taps, style loading, images the style is
//! missing. The host framework issues declarative commands and wants serializable events back. In between sits
//! the [`MapBridge`], which
//!
//! * converts engine events into [`MapEvent`]s with GeoJSON payloads (see [`payload`]) and delivers them to the
//!   single host callback registered for their kind,
//! * resolves missing style images through an ordered chain of [`ImageProvider`](image::ImageProvider)s,
//! * lets components wait for style layers that do not exist yet
//!   ([`LayerReadinessRegistry`](layer_waiters::LayerReadinessRegistry)),
//! * keeps the point annotations of attached child components in sync with the engine.
//!
//! Everything runs on the thread that delivers engine events and host commands. Nothing in the crate is `Send`.
//!
//! ```no_run
//! use mapbridge::{MapBridge, MapConfig, NativeEvent};
//! # fn engine() -> Box<dyn mapbridge::MapEngine> { todo!() }
//!
//! let config = MapConfig::new("mapbox://styles/mapbox/streets-v11", "pk.token");
//! let mut map = MapBridge::new(&config, engine()).expect("valid configuration");
//! map.on_press(|event| println!("{:?}", event.to_json()));
//!
//! // Called by the engine integration:
//! map.handle_event(NativeEvent::MapLoaded);
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod annotation;
mod bridge;
mod camera;
mod color;
pub mod component;
mod config;
mod engine;
pub mod error;
mod event;
pub mod image;
pub mod layer_waiters;
pub mod payload;
mod slots;
mod subscription;

#[cfg(any(test, feature = "_tests"))]
pub mod testing;

pub use bridge::MapBridge;
pub use camera::CameraState;
pub use color::Color;
pub use config::{MapConfig, StyleSource};
pub use engine::{MapEngine, NativeEvent, NativeEventKind, Style};
pub use event::{EventType, JsonObject, MapEvent, Payload};
pub use slots::{CallbackSlot, EventCallback, EventSlots, SlotKind};
pub use subscription::{SubscriptionMode, Subscriptions};

// Reexport mapbridge_types
pub use mapbridge_types;
