// ABOUTME: Event definitions republished by the control to its host
// ABOUTME: Engine event surface, lifecycle events and the publish-subscribe hub

pub mod control;
pub mod engine;
pub mod event_hub;

pub use control::ControlEvent;
pub use engine::{EngineEvent, EngineEventKind, EventSource};
pub use event_hub::{EventHub, SubscriptionId};
