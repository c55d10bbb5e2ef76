// ABOUTME: Host-native events raised by the control
// ABOUTME: Lifecycle outcomes plus republished engine upcalls

use crate::engine::{EngineEvent, EngineEventKind};

/// Events delivered to host subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// The engine finished bootstrapping and the cached configuration was applied
    Ready { epoch: u64 },

    /// The engine bootstrap failed; no retry is attempted
    LoadFailed { epoch: u64, error: String },

    /// An engine emitter fired
    Engine(EngineEvent),
}

impl ControlEvent {
    /// Engine event kind, if this is a republished upcall
    pub fn engine_kind(&self) -> Option<EngineEventKind> {
        match self {
            ControlEvent::Engine(event) => Some(event.kind),
            _ => None,
        }
    }

    pub fn is_lifecycle(&self) -> bool {
        matches!(self, ControlEvent::Ready { .. } | ControlEvent::LoadFailed { .. })
    }
}

impl From<EngineEvent> for ControlEvent {
    fn from(event: EngineEvent) -> Self {
        ControlEvent::Engine(event)
    }
}
