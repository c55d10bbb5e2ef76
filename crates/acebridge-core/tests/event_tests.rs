// ABOUTME: Engine events republished to the host and clipboard upcalls from the engine
// ABOUTME: Checks the installed host object, event ordering around Ready and release on reload

mod common;

use acebridge_core::{ControlEvent, EngineEvent, EngineEventKind, HostClipboard, Position};
use common::{Fixture, record_events};
use serde_json::json;

fn engine_kinds(events: &[ControlEvent]) -> Vec<EngineEventKind> {
    events.iter().filter_map(ControlEvent::engine_kind).collect()
}

/// One host object, subscribed to the whole event surface
#[test]
fn test_host_object_installed_with_full_subscription() {
    let fixture = Fixture::ready_with("");
    let session = fixture.session();

    assert_eq!(session.host_member().as_deref(), Some("host"));
    assert!(session.host_registered());
    assert_eq!(session.subscriptions(), EngineEventKind::ALL.to_vec());
}

/// Ready is announced after the flush has run through the event bridge
#[test]
fn test_ready_follows_flush_events() {
    let mut fixture = Fixture::immediate();
    let events = record_events(&fixture.editor);
    fixture.editor.set_mode("ace/mode/rust").unwrap();
    fixture.editor.set_text("fn main() {}").unwrap();
    fixture.editor.load().unwrap();
    fixture.editor.pump();

    let events = events.borrow();
    assert!(matches!(events.last(), Some(ControlEvent::Ready { .. })));
    assert!(events.contains(&ControlEvent::Engine(EngineEvent::new(
        EngineEventKind::ChangeMode,
        json!({ "mode": "ace/mode/rust" })
    ))));
    assert_eq!(engine_kinds(&events).first(), Some(&EngineEventKind::Change));
}

/// Edits, focus and engine-originated events reach subscribers with their payload
#[test]
fn test_engine_events_republished() {
    let mut fixture = Fixture::ready_with("x");
    let events = record_events(&fixture.editor);

    fixture.editor.set_text("y").unwrap();
    fixture.editor.editor().unwrap().focus().unwrap();
    assert!(fixture.session().fire(EngineEvent::new(
        EngineEventKind::TokenizerUpdate,
        json!({ "data": { "first": 0, "last": 3 } })
    )));

    let events = events.borrow();
    assert_eq!(
        events[0],
        ControlEvent::Engine(EngineEvent::new(
            EngineEventKind::Change,
            json!({ "action": "setValue" })
        ))
    );
    assert_eq!(
        engine_kinds(&events),
        vec![
            EngineEventKind::Change,
            EngineEventKind::Focus,
            EngineEventKind::TokenizerUpdate
        ]
    );
    assert_eq!(
        events[2],
        ControlEvent::Engine(EngineEvent::new(
            EngineEventKind::TokenizerUpdate,
            json!({ "data": { "first": 0, "last": 3 } })
        ))
    );
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let mut fixture = Fixture::ready_with("");
    let count = std::rc::Rc::new(std::cell::Cell::new(0));
    let seen = count.clone();
    let id = fixture
        .editor
        .subscribe(move |_| seen.set(seen.get() + 1));

    fixture.editor.set_text("one").unwrap();
    assert_eq!(count.get(), 1);

    assert!(fixture.editor.unsubscribe(id));
    fixture.editor.set_text("two").unwrap();
    assert_eq!(count.get(), 1);
    assert!(!fixture.editor.unsubscribe(id));
}

/// The engine's own copy and paste go through the host clipboard
#[test]
fn test_engine_clipboard_upcalls() {
    let fixture = Fixture::ready_with("copy me");
    let events = record_events(&fixture.editor);
    fixture
        .session()
        .select(Position::new(0, 0), Position::new(0, 4));

    assert!(fixture.editor.exec_command("copy").unwrap());
    assert_eq!(fixture.clipboard.contents().as_deref(), Some("copy"));

    fixture.clipboard.write_text("paste ");
    fixture
        .session()
        .select(Position::new(0, 0), Position::new(0, 0));
    assert!(fixture.editor.exec_command("paste").unwrap());
    assert_eq!(fixture.editor.text().unwrap(), "paste copy me");

    let kinds = engine_kinds(&events.borrow());
    assert_eq!(
        kinds,
        vec![
            EngineEventKind::Copy,
            EngineEventKind::Paste,
            EngineEventKind::Change
        ]
    );
}

/// `on_paste` behaves like a paste from the engine's own input
#[test]
fn test_on_paste_inserts_and_notifies() {
    let fixture = Fixture::ready_with("end");
    let events = record_events(&fixture.editor);
    fixture.editor.editor().unwrap().on_paste("the ").unwrap();

    assert_eq!(fixture.editor.text().unwrap(), "the end");
    assert_eq!(
        events.borrow()[0],
        ControlEvent::Engine(EngineEvent::new(
            EngineEventKind::Paste,
            json!({ "text": "the " })
        ))
    );
}

/// The old engine can no longer reach the host after a reload
#[test]
fn test_reload_releases_previous_host_object() {
    let mut fixture = Fixture::ready_with("");
    let old_session = fixture.session();
    let events = record_events(&fixture.editor);

    fixture.editor.reload().unwrap();
    fixture.editor.pump();
    events.borrow_mut().clear();

    assert!(!old_session.host_registered());
    assert!(!old_session.fire(EngineEvent::bare(EngineEventKind::Focus)));
    assert!(events.borrow().is_empty());
    assert!(fixture.session().host_registered());
}
