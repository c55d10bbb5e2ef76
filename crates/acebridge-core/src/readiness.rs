// ABOUTME: Bootstrap lifecycle of the embedded engine
// ABOUTME: Tracks Unloaded/Loading/Ready/Failed and owns the in-flight ticket and the engine link

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use acebridge_logging::{PerfTimer, info, warn};

use crate::engine::{BootstrapResource, BootstrapResult, BootstrapTicket, EngineSession, RenderSurface};
use crate::error::{BridgeError, Result};
use crate::handle::{EngineHandle, EngineLink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Readiness {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Readiness::Unloaded => "unloaded",
            Readiness::Loading => "loading",
            Readiness::Ready => "ready",
            Readiness::Failed => "failed",
        })
    }
}

struct InFlight {
    epoch: u64,
    ticket: BootstrapTicket,
    timer: PerfTimer,
}

/// A bootstrap that resolved for the current epoch
pub(crate) struct Completion {
    pub epoch: u64,
    pub result: BootstrapResult,
}

/// Drives the surface through bootstrap and keeps the one valid engine handle.
pub struct ReadinessController {
    surface: Box<dyn RenderSurface>,
    resource: BootstrapResource,
    link: EngineLink,
    state: Readiness,
    in_flight: Option<InFlight>,
    last_error: Option<String>,
    slow_threshold: Option<Duration>,
}

impl ReadinessController {
    pub fn new(surface: Box<dyn RenderSurface>, resource: BootstrapResource) -> Self {
        Self {
            surface,
            resource,
            link: EngineLink::new(),
            state: Readiness::Unloaded,
            in_flight: None,
            last_error: None,
            slow_threshold: None,
        }
    }

    /// Warn when a bootstrap takes longer than `threshold`
    pub fn with_slow_threshold(mut self, threshold: Option<Duration>) -> Self {
        self.slow_threshold = threshold;
        self
    }

    pub fn state(&self) -> Readiness {
        self.state
    }

    pub fn link(&self) -> &EngineLink {
        &self.link
    }

    pub fn epoch(&self) -> u64 {
        self.link.current_epoch()
    }

    pub fn resource(&self) -> &BootstrapResource {
        &self.resource
    }

    /// Error of the most recent failed bootstrap
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Ask the surface for the bootstrap document. Never blocks.
    pub fn begin_load(&mut self) -> Result<()> {
        if !matches!(self.state, Readiness::Unloaded | Readiness::Failed) {
            return Err(BridgeError::InvalidTransition {
                from: self.state,
                action: "load",
            });
        }

        let epoch = self.link.advance();
        let ticket = self.surface.load(&self.resource);
        let mut timer = PerfTimer::new("engine_bootstrap");
        if let Some(threshold) = self.slow_threshold {
            timer = timer.with_warn_threshold(threshold);
        }

        self.in_flight = Some(InFlight {
            epoch,
            ticket,
            timer,
        });
        self.state = Readiness::Loading;
        info!(epoch, resource = %self.resource, "Engine bootstrap started");
        Ok(())
    }

    /// Non-blocking check for a finished bootstrap
    pub(crate) fn poll(&mut self) -> Option<Completion> {
        let in_flight = self.in_flight.as_mut()?;
        let result = in_flight.ticket.try_resolve()?;
        let finished = self.in_flight.take()?;
        self.accept(finished.epoch, finished.timer, result)
    }

    /// Wait for the in-flight bootstrap; `None` if nothing is loading
    pub(crate) async fn wait(&mut self) -> Option<Completion> {
        let in_flight = self.in_flight.as_mut()?;
        let result = in_flight.ticket.wait().await;
        let finished = self.in_flight.take()?;
        self.accept(finished.epoch, finished.timer, result)
    }

    fn accept(&mut self, epoch: u64, timer: PerfTimer, result: BootstrapResult) -> Option<Completion> {
        if epoch != self.link.current_epoch() {
            warn!(
                epoch,
                current = self.link.current_epoch(),
                "Ignoring bootstrap completion from a superseded load"
            );
            timer.abandon();
            return None;
        }
        timer.finish();
        Some(Completion { epoch, result })
    }

    /// Wrap a freshly bootstrapped session and publish it in the link
    pub(crate) fn attach(&mut self, epoch: u64, session: Rc<dyn EngineSession>) -> Rc<EngineHandle> {
        let handle = Rc::new(EngineHandle::new(epoch, session));
        self.link.install(Rc::clone(&handle));
        handle
    }

    pub(crate) fn mark_ready(&mut self) {
        self.state = Readiness::Ready;
        self.last_error = None;
        info!(epoch = self.epoch(), "Engine ready");
    }

    /// Discard any partial handle and settle in `Failed`
    pub(crate) fn mark_failed(&mut self, error: &str) {
        self.link.advance();
        self.state = Readiness::Failed;
        self.last_error = Some(error.to_string());
    }

    /// Invalidate the engine and anything loading; back to `Unloaded`
    pub(crate) fn teardown(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.timer.abandon();
        }
        let had_engine = self.link.current().is_some();
        self.link.advance();
        if self.state != Readiness::Unloaded {
            self.surface.unload();
        }
        info!(
            epoch = self.epoch(),
            from = %self.state,
            had_engine,
            "Engine torn down"
        );
        self.state = Readiness::Unloaded;
    }
}

impl fmt::Debug for ReadinessController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessController")
            .field("state", &self.state)
            .field("epoch", &self.epoch())
            .field("resource", &self.resource)
            .field("loading", &self.in_flight.is_some())
            .finish_non_exhaustive()
    }
}
