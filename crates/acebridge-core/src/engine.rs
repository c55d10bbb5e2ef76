// ABOUTME: Seams to the external rendering surface and the engine living inside it
// ABOUTME: Bootstrap tickets, the remote session trait and the host upcall interface

use std::fmt;
use std::rc::{Rc, Weak};

use acebridge_events::{EngineEvent, EngineEventKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::protocol::EngineRequest;

/// Location of the static document that exposes the engine namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BootstrapResource(String);

impl BootstrapResource {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BootstrapResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure reported by the engine side of a call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The engine threw while executing the call
    #[error("engine raised: {0}")]
    Raised(String),

    /// The script context behind the session is gone
    #[error("engine context was torn down")]
    Disconnected,
}

/// Outcome of a bootstrap, delivered once
pub type BootstrapResult = Result<Rc<dyn EngineSession>, String>;

/// Surface side of a bootstrap; completes the matching [`BootstrapTicket`]
pub struct BootstrapCompleter {
    sender: oneshot::Sender<BootstrapResult>,
}

impl BootstrapCompleter {
    /// Returns false if the control stopped waiting (reload or teardown)
    pub fn complete(self, session: Rc<dyn EngineSession>) -> bool {
        self.sender.send(Ok(session)).is_ok()
    }

    pub fn fail(self, error: impl Into<String>) -> bool {
        self.sender.send(Err(error.into())).is_ok()
    }

    pub fn is_abandoned(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Control side of a bootstrap.
///
/// Resolves exactly once. Dropping the completer without answering resolves
/// the ticket with a load error.
pub struct BootstrapTicket {
    receiver: oneshot::Receiver<BootstrapResult>,
}

const ABANDONED: &str = "render surface dropped the bootstrap without completing it";

impl BootstrapTicket {
    pub fn channel() -> (BootstrapCompleter, BootstrapTicket) {
        let (sender, receiver) = oneshot::channel();
        (BootstrapCompleter { sender }, BootstrapTicket { receiver })
    }

    /// Ticket that is already resolved
    pub fn ready(result: BootstrapResult) -> Self {
        let (completer, ticket) = Self::channel();
        let _ = completer.sender.send(result);
        ticket
    }

    /// Non-blocking check; `None` while the bootstrap is still running
    pub fn try_resolve(&mut self) -> Option<BootstrapResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(ABANDONED.to_string())),
        }
    }

    /// Wait for the bootstrap to resolve. Cancel-safe; must not be called
    /// again once it has returned.
    pub async fn wait(&mut self) -> BootstrapResult {
        (&mut self.receiver)
            .await
            .unwrap_or_else(|_| Err(ABANDONED.to_string()))
    }
}

impl fmt::Debug for BootstrapTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapTicket").finish_non_exhaustive()
    }
}

/// The rendering/script context the engine runs in.
pub trait RenderSurface {
    /// Start loading the bootstrap document. Must not block.
    fn load(&mut self, resource: &BootstrapResource) -> BootstrapTicket;

    /// Discard the current document, if any
    fn unload(&mut self) {}
}

/// A live engine: the remote object graph behind one successful bootstrap.
///
/// Methods take `&self`; an implementation may call back into the
/// registered [`HostBridge`] while a request is being served.
pub trait EngineSession {
    fn dispatch(&self, request: &EngineRequest) -> Result<Value, RemoteError>;

    /// Publish the host callback object as a member of the engine namespace
    fn register_host(&self, member: &str, host: Weak<dyn HostBridge>) -> Result<(), RemoteError>;

    /// Route one emitter event to the registered host object
    fn subscribe(&self, kind: EngineEventKind) -> Result<(), RemoteError>;
}

/// Upcalls from the engine into the host.
pub trait HostBridge {
    fn emit(&self, event: EngineEvent);

    /// The engine intercepted a copy; `data` goes to the host clipboard
    fn copy(&self, data: &str);

    /// The engine intercepted a paste and wants the host clipboard text
    fn paste(&self) -> Option<String>;
}
