// ABOUTME: Typed proxies over the engine's editor, session and undo manager objects
// ABOUTME: Each proxy is pinned to the epoch it was created in and fails once that epoch ends

mod editor;
mod marshal;
mod session;
mod undo;

pub use editor::EditorProxy;
pub use session::SessionProxy;
pub use undo::UndoManagerProxy;

use serde_json::Value;

use crate::error::Result;
use crate::handle::EngineLink;
use crate::protocol::EngineRequest;

/// What every proxy holds: the shared link and its own epoch
#[derive(Debug, Clone)]
pub(crate) struct ProxyCore {
    link: EngineLink,
    epoch: u64,
}

impl ProxyCore {
    pub(crate) fn new(link: EngineLink, epoch: u64) -> Self {
        Self { link, epoch }
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.link.handle_for(self.epoch).is_ok()
    }

    /// Send one request; no borrow of the link is held across the call
    pub(crate) fn call(&self, request: impl Into<EngineRequest>) -> Result<Value> {
        let handle = self.link.handle_for(self.epoch)?;
        handle.dispatch(&request.into())
    }
}
