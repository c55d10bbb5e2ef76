// ABOUTME: Host-side bridge to an editor engine running in an embedded script context
// ABOUTME: Readiness lifecycle, configuration cache, typed proxies, events and clipboard plumbing

pub mod clipboard;
pub mod config;
pub mod config_cache;
pub mod control;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod event_bridge;
pub mod handle;
pub mod protocol;
pub mod proxy;
pub mod readiness;

pub use clipboard::{ClipboardBridge, HostClipboard, MemoryClipboard};
pub use config::{ConfigError, ControlConfig};
pub use config_cache::{ConfigurationCache, PendingConfiguration};
pub use control::{CodeEditor, READ_ONLY_OPTION};
pub use dispatch::{ControlClosed, ControlSender, Job};
pub use engine::{
    BootstrapCompleter, BootstrapResource, BootstrapResult, BootstrapTicket, EngineSession,
    HostBridge, RemoteError, RenderSurface,
};
pub use error::{BridgeError, Result};
pub use handle::{EngineHandle, EngineLink};
pub use protocol::{
    CursorPlacement, Direction, EditorCall, EngineRequest, RemoteObject, SessionCall,
    UndoManagerCall,
};
pub use proxy::{EditorProxy, SessionProxy, UndoManagerProxy};
pub use readiness::{Readiness, ReadinessController};

// Re-exported so hosts need only this crate for the common types
pub use acebridge_events::{ControlEvent, EngineEvent, EngineEventKind, EventHub, SubscriptionId};
pub use acebridge_types::{AliasKind, Command, Mode, Position, Range, SearchOptions, Theme};
