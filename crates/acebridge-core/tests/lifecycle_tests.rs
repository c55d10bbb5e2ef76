// ABOUTME: Readiness lifecycle of the control against the scripted surface
// ABOUTME: Covers load, failure, reload, unload and invalidation of proxies from earlier engines

mod common;

use acebridge_core::{BridgeError, ControlEvent, Readiness};
use acebridge_test_engine::LoadPlan;
use common::{Fixture, record_events};

/// An immediate bootstrap becomes ready on the next pump and announces it once
#[test]
fn test_load_then_pump_becomes_ready() {
    let mut fixture = Fixture::immediate();
    let events = record_events(&fixture.editor);

    fixture.editor.load().expect("load from unloaded");
    assert_eq!(fixture.editor.readiness(), Readiness::Loading);
    assert!(!fixture.editor.is_ready());

    assert_eq!(fixture.editor.pump(), Readiness::Ready);
    assert_eq!(
        *events.borrow(),
        vec![ControlEvent::Ready {
            epoch: fixture.editor.epoch()
        }]
    );

    // Further pumps do not repeat the transition
    fixture.editor.pump();
    assert_eq!(events.borrow().len(), 1);
}

/// Loading stays loading until the surface answers
#[test]
fn test_deferred_bootstrap_waits_for_surface() {
    let mut fixture = Fixture::deferred();
    fixture.editor.load().unwrap();

    assert_eq!(fixture.editor.pump(), Readiness::Loading);
    assert_eq!(fixture.editor.editor().unwrap_err(), BridgeError::NotReady);

    assert!(fixture.surface.complete_pending());
    assert_eq!(fixture.editor.pump(), Readiness::Ready);
    assert!(fixture.editor.editor().is_ok());
}

/// A failed bootstrap is reported once and recovered by reload
#[test]
fn test_load_failure_then_reload() {
    let mut fixture = Fixture::immediate();
    fixture
        .surface
        .plan_next(LoadPlan::Fail("bootstrap document missing".into()));
    let events = record_events(&fixture.editor);

    fixture.editor.set_text("kept across the failure").unwrap();
    fixture.editor.load().unwrap();
    assert_eq!(fixture.editor.pump(), Readiness::Failed);

    let failed_epoch = fixture.editor.epoch();
    assert_eq!(fixture.editor.last_error(), Some("bootstrap document missing"));
    assert!(matches!(
        events.borrow().as_slice(),
        [ControlEvent::LoadFailed { error, .. }] if error == "bootstrap document missing"
    ));

    // Cached state survives and the control stays usable
    assert_eq!(fixture.editor.text().unwrap(), "kept across the failure");
    assert!(!fixture.editor.exec_command("selectall").unwrap());

    fixture.editor.reload().unwrap();
    assert_eq!(fixture.editor.pump(), Readiness::Ready);
    assert!(fixture.editor.epoch() > failed_epoch);
    assert_eq!(fixture.editor.last_error(), None);
    assert_eq!(fixture.session().text(), "kept across the failure");
}

/// A surface that drops the bootstrap counts as a load failure
#[test]
fn test_abandoned_bootstrap_fails() {
    let mut fixture = Fixture::immediate();
    fixture.surface.plan_next(LoadPlan::Abandon);

    fixture.editor.load().unwrap();
    assert_eq!(fixture.editor.pump(), Readiness::Failed);
    assert!(
        fixture
            .editor
            .last_error()
            .is_some_and(|error| error.contains("dropped the bootstrap"))
    );
}

/// `load` is only valid from unloaded or failed
#[test]
fn test_load_while_loading_is_rejected() {
    let mut fixture = Fixture::deferred();
    fixture.editor.load().unwrap();

    let err = fixture.editor.load().unwrap_err();
    assert_eq!(
        err,
        BridgeError::InvalidTransition {
            from: Readiness::Loading,
            action: "load"
        }
    );
    assert_eq!(err.to_string(), "cannot load while loading");
    assert_eq!(fixture.surface.load_count(), 1);
}

/// Proxies from before a reload fail with StaleHandle; fresh ones work
#[test]
fn test_reload_invalidates_old_proxies() {
    let mut fixture = Fixture::ready_with("first engine");
    let old_editor = fixture.editor.editor().unwrap();
    let old_session = fixture.editor.session().unwrap();
    let old_undo = fixture.editor.undo_manager().unwrap();
    let old_epoch = old_editor.epoch();
    assert!(old_editor.is_valid());

    fixture.editor.reload().unwrap();
    assert_eq!(fixture.editor.pump(), Readiness::Ready);
    let current = fixture.editor.epoch();

    assert_eq!(
        old_editor.value().unwrap_err(),
        BridgeError::StaleHandle {
            held: old_epoch,
            current
        }
    );
    assert!(matches!(old_session.length(), Err(BridgeError::StaleHandle { .. })));
    assert!(matches!(old_undo.has_undo(), Err(BridgeError::StaleHandle { .. })));
    assert!(!old_editor.is_valid());

    let fresh = fixture.editor.editor().unwrap();
    assert_eq!(fresh.value().unwrap(), "first engine");
    assert_eq!(fixture.surface.session_count(), 2);
}

/// Reloading mid-bootstrap abandons the older load
#[test]
fn test_reload_while_loading_supersedes_ticket() {
    let mut fixture = Fixture::deferred();
    fixture.editor.load().unwrap();
    fixture.editor.reload().unwrap();

    assert_eq!(fixture.surface.load_count(), 2);
    assert_eq!(fixture.surface.unload_count(), 1);
    assert!(fixture.surface.complete_pending());
    assert_eq!(fixture.editor.pump(), Readiness::Ready);
    assert_eq!(fixture.surface.session_count(), 1);
}

/// Unload releases the engine but keeps what it showed
#[test]
fn test_unload_returns_to_unloaded() {
    let mut fixture = Fixture::ready_with("hello");
    let session = fixture.session();
    assert!(session.host_registered());

    fixture.editor.unload();
    assert_eq!(fixture.editor.readiness(), Readiness::Unloaded);
    assert_eq!(fixture.surface.unload_count(), 1);
    assert!(!session.host_registered());
    assert_eq!(fixture.editor.editor().unwrap_err(), BridgeError::NotReady);
    assert_eq!(fixture.editor.text().unwrap(), "hello");

    fixture.editor.load().unwrap();
    assert_eq!(fixture.editor.pump(), Readiness::Ready);
    assert_eq!(fixture.session().text(), "hello");
}

/// Dropping the control tears the engine down
#[test]
fn test_drop_releases_host_object() {
    let fixture = Fixture::ready_with("bye");
    let session = fixture.session();
    let proxy = fixture.editor.editor().unwrap();

    drop(fixture.editor);
    assert!(!session.host_registered());
    assert_eq!(fixture.surface.unload_count(), 1);
    assert!(matches!(proxy.value(), Err(BridgeError::StaleHandle { .. })));
}
