// ABOUTME: The enumerated event surface of the embedded engine
// ABOUTME: Editor-level and session-level emitters with their untyped payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which remote emitter an event is subscribed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    Editor,
    Session,
}

/// Every engine event the bridge subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineEventKind {
    // Editor emitter
    Blur,
    Change,
    ChangeSelectionStyle,
    ChangeSession,
    Copy,
    Focus,
    Paste,

    // Session emitter
    ChangeAnnotation,
    ChangeBackMarker,
    ChangeBreakpoint,
    ChangeFold,
    ChangeFrontMarker,
    ChangeMode,
    ChangeOverwrite,
    ChangeScrollLeft,
    ChangeScrollTop,
    ChangeTabSize,
    ChangeWrapLimit,
    ChangeWrapMode,
    TokenizerUpdate,
}

impl EngineEventKind {
    /// The full subscription surface, editor events first
    pub const ALL: &'static [EngineEventKind] = &[
        EngineEventKind::Blur,
        EngineEventKind::Change,
        EngineEventKind::ChangeSelectionStyle,
        EngineEventKind::ChangeSession,
        EngineEventKind::Copy,
        EngineEventKind::Focus,
        EngineEventKind::Paste,
        EngineEventKind::ChangeAnnotation,
        EngineEventKind::ChangeBackMarker,
        EngineEventKind::ChangeBreakpoint,
        EngineEventKind::ChangeFold,
        EngineEventKind::ChangeFrontMarker,
        EngineEventKind::ChangeMode,
        EngineEventKind::ChangeOverwrite,
        EngineEventKind::ChangeScrollLeft,
        EngineEventKind::ChangeScrollTop,
        EngineEventKind::ChangeTabSize,
        EngineEventKind::ChangeWrapLimit,
        EngineEventKind::ChangeWrapMode,
        EngineEventKind::TokenizerUpdate,
    ];

    /// Event name as the engine's emitters know it
    pub fn name(self) -> &'static str {
        match self {
            EngineEventKind::Blur => "blur",
            EngineEventKind::Change => "change",
            EngineEventKind::ChangeSelectionStyle => "changeSelectionStyle",
            EngineEventKind::ChangeSession => "changeSession",
            EngineEventKind::Copy => "copy",
            EngineEventKind::Focus => "focus",
            EngineEventKind::Paste => "paste",
            EngineEventKind::ChangeAnnotation => "changeAnnotation",
            EngineEventKind::ChangeBackMarker => "changeBackMarker",
            EngineEventKind::ChangeBreakpoint => "changeBreakpoint",
            EngineEventKind::ChangeFold => "changeFold",
            EngineEventKind::ChangeFrontMarker => "changeFrontMarker",
            EngineEventKind::ChangeMode => "changeMode",
            EngineEventKind::ChangeOverwrite => "changeOverwrite",
            EngineEventKind::ChangeScrollLeft => "changeScrollLeft",
            EngineEventKind::ChangeScrollTop => "changeScrollTop",
            EngineEventKind::ChangeTabSize => "changeTabSize",
            EngineEventKind::ChangeWrapLimit => "changeWrapLimit",
            EngineEventKind::ChangeWrapMode => "changeWrapMode",
            EngineEventKind::TokenizerUpdate => "tokenizerUpdate",
        }
    }

    pub fn source(self) -> EventSource {
        match self {
            EngineEventKind::Blur
            | EngineEventKind::Change
            | EngineEventKind::ChangeSelectionStyle
            | EngineEventKind::ChangeSession
            | EngineEventKind::Copy
            | EngineEventKind::Focus
            | EngineEventKind::Paste => EventSource::Editor,
            _ => EventSource::Session,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

impl std::fmt::Display for EngineEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One upcall from an engine emitter, payload kept as delivered
#[derive(Debug, Clone, PartialEq)]
pub struct EngineEvent {
    pub kind: EngineEventKind,
    pub payload: Value,
}

impl EngineEvent {
    pub fn new(kind: EngineEventKind, payload: Value) -> Self {
        Self { kind, payload }
    }

    /// Event without a payload (blur, focus, changeFold, ...)
    pub fn bare(kind: EngineEventKind) -> Self {
        Self {
            kind,
            payload: Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_split_between_emitters() {
        let editor = EngineEventKind::ALL
            .iter()
            .filter(|k| k.source() == EventSource::Editor)
            .count();
        let session = EngineEventKind::ALL
            .iter()
            .filter(|k| k.source() == EventSource::Session)
            .count();
        assert_eq!(editor, 7);
        assert_eq!(session, 13);
    }

    #[test]
    fn test_names_match_serde_representation() {
        for kind in EngineEventKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, Value::String(kind.name().to_string()));
            assert_eq!(EngineEventKind::from_name(kind.name()), Some(*kind));
        }
    }

    #[test]
    fn test_unknown_event_name() {
        assert_eq!(EngineEventKind::from_name("changeCursor"), None);
    }
}
