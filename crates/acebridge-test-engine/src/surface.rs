// ABOUTME: Render surface whose bootstrap outcome is scripted by the test
// ABOUTME: Loads can finish immediately, wait for the test, fail or be abandoned

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use acebridge_core::{BootstrapCompleter, BootstrapResource, BootstrapTicket, EngineSession, RenderSurface};
use acebridge_logging::debug;

use crate::session::TestSession;

/// How the next bootstrap resolves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPlan {
    /// Resolved before `load` returns
    Immediate,
    /// Resolved when the test calls [`SurfaceController::complete_pending`]
    Deferred,
    /// Fails with this message before `load` returns
    Fail(String),
    /// The surface drops the bootstrap without answering
    Abandon,
}

#[derive(Default)]
struct SurfaceState {
    default_plan: Option<LoadPlan>,
    plans: VecDeque<LoadPlan>,
    pending: Option<BootstrapCompleter>,
    sessions: Vec<Rc<TestSession>>,
    resources: Vec<BootstrapResource>,
    unloads: usize,
}

impl SurfaceState {
    fn next_plan(&mut self) -> LoadPlan {
        self.plans
            .pop_front()
            .or_else(|| self.default_plan.clone())
            .unwrap_or(LoadPlan::Immediate)
    }

    fn new_session(&mut self) -> Rc<TestSession> {
        let session = Rc::new(TestSession::new());
        self.sessions.push(Rc::clone(&session));
        session
    }
}

/// The surface half, handed to the control
pub struct ScriptedSurface {
    state: Rc<RefCell<SurfaceState>>,
}

/// The test's half: decides outcomes and inspects what the control did
#[derive(Clone)]
pub struct SurfaceController {
    state: Rc<RefCell<SurfaceState>>,
}

impl ScriptedSurface {
    /// Surface whose loads resolve per `plan` unless a plan is queued
    pub fn new(plan: LoadPlan) -> (ScriptedSurface, SurfaceController) {
        let state = Rc::new(RefCell::new(SurfaceState {
            default_plan: Some(plan),
            ..Default::default()
        }));
        (
            ScriptedSurface {
                state: Rc::clone(&state),
            },
            SurfaceController { state },
        )
    }

    pub fn immediate() -> (ScriptedSurface, SurfaceController) {
        Self::new(LoadPlan::Immediate)
    }

    pub fn deferred() -> (ScriptedSurface, SurfaceController) {
        Self::new(LoadPlan::Deferred)
    }
}

impl RenderSurface for ScriptedSurface {
    fn load(&mut self, resource: &BootstrapResource) -> BootstrapTicket {
        let mut state = self.state.borrow_mut();
        state.resources.push(resource.clone());
        let plan = state.next_plan();
        debug!(resource = %resource, plan = ?plan, "Scripted surface load");

        match plan {
            LoadPlan::Immediate => {
                let session: Rc<dyn EngineSession> = state.new_session();
                BootstrapTicket::ready(Ok(session))
            }
            LoadPlan::Deferred => {
                let (completer, ticket) = BootstrapTicket::channel();
                state.pending = Some(completer);
                ticket
            }
            LoadPlan::Fail(message) => BootstrapTicket::ready(Err(message)),
            LoadPlan::Abandon => {
                let (_completer, ticket) = BootstrapTicket::channel();
                ticket
            }
        }
    }

    fn unload(&mut self) {
        let mut state = self.state.borrow_mut();
        state.unloads += 1;
        state.pending = None;
        if let Some(session) = state.sessions.last() {
            session.disconnect();
        }
    }
}

impl SurfaceController {
    /// Queue the outcome of the next load, ahead of the default plan
    pub fn plan_next(&self, plan: LoadPlan) {
        self.state.borrow_mut().plans.push_back(plan);
    }

    /// Finish the deferred load with a fresh engine; false if the control gave up on it
    pub fn complete_pending(&self) -> bool {
        self.complete_pending_with(|_| {})
    }

    /// Like [`complete_pending`](Self::complete_pending), preparing the engine first
    pub fn complete_pending_with(&self, setup: impl FnOnce(&TestSession)) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(completer) = state.pending.take() else {
            return false;
        };
        let session = state.new_session();
        setup(&session);
        completer.complete(session)
    }

    pub fn fail_pending(&self, message: impl Into<String>) -> bool {
        match self.state.borrow_mut().pending.take() {
            Some(completer) => completer.fail(message),
            None => false,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.state
            .borrow()
            .pending
            .as_ref()
            .is_some_and(|completer| !completer.is_abandoned())
    }

    /// The most recently created engine
    pub fn session(&self) -> Option<Rc<TestSession>> {
        self.state.borrow().sessions.last().cloned()
    }

    pub fn session_count(&self) -> usize {
        self.state.borrow().sessions.len()
    }

    pub fn load_count(&self) -> usize {
        self.state.borrow().resources.len()
    }

    pub fn last_resource(&self) -> Option<BootstrapResource> {
        self.state.borrow().resources.last().cloned()
    }

    pub fn unload_count(&self) -> usize {
        self.state.borrow().unloads
    }
}

impl std::fmt::Debug for SurfaceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SurfaceController")
            .field("loads", &state.resources.len())
            .field("unloads", &state.unloads)
            .field("sessions", &state.sessions.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> BootstrapResource {
        BootstrapResource::new("ace/editor.html")
    }

    #[test]
    fn test_immediate_load_creates_session() {
        let (mut surface, controller) = ScriptedSurface::immediate();
        let mut ticket = surface.load(&resource());
        assert!(matches!(ticket.try_resolve(), Some(Ok(_))));
        assert_eq!(controller.session_count(), 1);
        assert_eq!(controller.last_resource(), Some(resource()));
    }

    #[test]
    fn test_deferred_load_waits_for_controller() {
        let (mut surface, controller) = ScriptedSurface::deferred();
        let mut ticket = surface.load(&resource());
        assert!(ticket.try_resolve().is_none());
        assert!(controller.has_pending());

        assert!(controller.complete_pending());
        assert!(matches!(ticket.try_resolve(), Some(Ok(_))));
        assert!(!controller.complete_pending());
    }

    #[test]
    fn test_queued_plans_run_first() {
        let (mut surface, controller) = ScriptedSurface::immediate();
        controller.plan_next(LoadPlan::Fail("missing bootstrap".into()));
        controller.plan_next(LoadPlan::Abandon);

        let mut failed = surface.load(&resource());
        assert_eq!(failed.try_resolve().and_then(|r| r.err()).as_deref(), Some("missing bootstrap"));
        let mut abandoned = surface.load(&resource());
        assert!(matches!(abandoned.try_resolve(), Some(Err(_))));
        let mut ok = surface.load(&resource());
        assert!(matches!(ok.try_resolve(), Some(Ok(_))));
        assert_eq!(controller.load_count(), 3);
    }

    #[test]
    fn test_unload_disconnects_latest_session() {
        let (mut surface, controller) = ScriptedSurface::immediate();
        let _ticket = surface.load(&resource());
        surface.unload();
        assert_eq!(controller.unload_count(), 1);
        assert!(controller.session().unwrap().is_disconnected());
    }
}
