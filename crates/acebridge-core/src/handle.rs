// ABOUTME: Ownership of the live engine and the epoch that guards every proxy
// ABOUTME: EngineHandle keeps the session and callback object alive; EngineLink is the shared slot

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use acebridge_logging::{debug, warn};
use serde_json::Value;

use crate::engine::EngineSession;
use crate::error::{BridgeError, Result};
use crate::event_bridge::BridgeCallbacks;
use crate::protocol::EngineRequest;

/// The one valid connection to a bootstrapped engine.
///
/// Never mutated after construction apart from the callback slot, which is
/// filled once on install and emptied once on invalidation.
pub struct EngineHandle {
    epoch: u64,
    session: Rc<dyn EngineSession>,
    callbacks: RefCell<Option<Rc<BridgeCallbacks>>>,
}

impl EngineHandle {
    pub(crate) fn new(epoch: u64, session: Rc<dyn EngineSession>) -> Self {
        Self {
            epoch,
            session,
            callbacks: RefCell::new(None),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn dispatch(&self, request: &EngineRequest) -> Result<Value> {
        self.session.dispatch(request).map_err(|error| {
            let method = request.method();
            warn!(epoch = self.epoch, method = %method, error = %error, "Engine call failed");
            BridgeError::call(method, error)
        })
    }

    pub(crate) fn session(&self) -> &Rc<dyn EngineSession> {
        &self.session
    }

    pub(crate) fn attach_callbacks(&self, callbacks: Rc<BridgeCallbacks>) {
        let previous = self.callbacks.replace(Some(callbacks));
        debug_assert!(previous.is_none(), "callback object installed twice");
    }

    pub fn has_callbacks(&self) -> bool {
        self.callbacks.borrow().is_some()
    }

    /// Release the callback object. Returns true only the first time.
    pub(crate) fn release_callbacks(&self) -> bool {
        let released = self.callbacks.borrow_mut().take();
        match released {
            Some(callbacks) => {
                debug!(epoch = self.epoch, "Releasing engine callback object");
                drop(callbacks);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHandle")
            .field("epoch", &self.epoch)
            .field("has_callbacks", &self.has_callbacks())
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct LinkInner {
    epoch: Cell<u64>,
    handle: RefCell<Option<Rc<EngineHandle>>>,
}

/// Shared slot holding the current handle and epoch.
///
/// Proxies keep a clone of the link plus the epoch they were created in; any
/// advance of the epoch makes them permanently stale.
#[derive(Clone, Default)]
pub struct EngineLink {
    inner: Rc<LinkInner>,
}

impl EngineLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_epoch(&self) -> u64 {
        self.inner.epoch.get()
    }

    /// Start a new epoch, invalidating and releasing the current handle
    pub(crate) fn advance(&self) -> u64 {
        let retired = self.inner.handle.borrow_mut().take();
        if let Some(handle) = retired {
            handle.release_callbacks();
        }
        let next = self.inner.epoch.get() + 1;
        self.inner.epoch.set(next);
        next
    }

    pub(crate) fn install(&self, handle: Rc<EngineHandle>) {
        debug_assert_eq!(handle.epoch(), self.current_epoch());
        let previous = self.inner.handle.replace(Some(handle));
        debug_assert!(previous.is_none(), "engine handle installed over a live one");
    }

    /// Current handle, if an engine is attached
    pub fn current(&self) -> Option<Rc<EngineHandle>> {
        self.inner.handle.borrow().clone()
    }

    /// Handle for a proxy created in `epoch`
    pub fn handle_for(&self, epoch: u64) -> Result<Rc<EngineHandle>> {
        let current = self.current_epoch();
        if epoch != current {
            return Err(BridgeError::StaleHandle {
                held: epoch,
                current,
            });
        }
        self.current().ok_or(BridgeError::NotReady)
    }
}

impl std::fmt::Debug for EngineLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineLink")
            .field("epoch", &self.current_epoch())
            .field("attached", &self.inner.handle.borrow().is_some())
            .finish()
    }
}
