// ABOUTME: The single host callback object installed into the engine namespace
// ABOUTME: Republishes engine emitter events as control events and serves clipboard upcalls

use std::rc::{Rc, Weak};

use acebridge_events::{ControlEvent, EngineEvent, EngineEventKind, EventHub, EventSource};
use acebridge_logging::{debug, trace};

use crate::clipboard::{ClipboardBridge, HostClipboard};
use crate::engine::HostBridge;
use crate::error::{BridgeError, Result};
use crate::handle::EngineHandle;

/// Namespace member the callback object is registered under
pub const HOST_MEMBER: &str = "host";

/// Receives every upcall for one engine epoch.
///
/// The engine handle owns the only strong reference; the engine holds a weak
/// one, so upcalls arriving after invalidation find nothing to call.
pub struct BridgeCallbacks {
    epoch: u64,
    hub: EventHub,
    clipboard: ClipboardBridge,
}

impl BridgeCallbacks {
    pub fn new(epoch: u64, hub: EventHub, clipboard: Rc<dyn HostClipboard>) -> Self {
        Self {
            epoch,
            hub,
            clipboard: ClipboardBridge::new(clipboard),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl HostBridge for BridgeCallbacks {
    fn emit(&self, event: EngineEvent) {
        trace!(epoch = self.epoch, kind = %event.kind, "Engine upcall");
        self.hub.publish(&ControlEvent::Engine(event));
    }

    fn copy(&self, data: &str) {
        self.clipboard.on_engine_copy(data);
    }

    fn paste(&self) -> Option<String> {
        self.clipboard.on_engine_paste()
    }
}

/// Register the callback object with the engine and subscribe to every emitter.
pub(crate) fn install(
    handle: &EngineHandle,
    hub: &EventHub,
    clipboard: Rc<dyn HostClipboard>,
) -> Result<()> {
    let callbacks = Rc::new(BridgeCallbacks::new(handle.epoch(), hub.clone(), clipboard));
    let host: Rc<dyn HostBridge> = callbacks.clone();
    let weak: Weak<dyn HostBridge> = Rc::downgrade(&host);
    drop(host);

    // Held before registering so a reentrant upcall during setup can upgrade
    handle.attach_callbacks(callbacks);

    let session = handle.session();
    session
        .register_host(HOST_MEMBER, weak)
        .map_err(|error| BridgeError::call(format!("namespace.{HOST_MEMBER}"), error))?;

    for kind in EngineEventKind::ALL {
        session
            .subscribe(*kind)
            .map_err(|error| BridgeError::call(subscribe_method(*kind), error))?;
    }

    debug!(
        epoch = handle.epoch(),
        events = EngineEventKind::ALL.len(),
        "Engine callback object installed"
    );
    Ok(())
}

fn subscribe_method(kind: EngineEventKind) -> String {
    let emitter = match kind.source() {
        EventSource::Editor => "editor",
        EventSource::Session => "session",
    };
    format!("{emitter}.on({kind})")
}
