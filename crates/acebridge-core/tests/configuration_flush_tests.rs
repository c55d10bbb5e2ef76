// ABOUTME: Settings made before the engine is ready and how they reach it
// ABOUTME: Flush order, last-write-wins, flush failures and settings carried over a reload

mod common;

use std::rc::Rc;

use acebridge_core::{
    BridgeError, CodeEditor, ControlConfig, MemoryClipboard, Mode, Readiness, Theme,
};
use acebridge_test_engine::ScriptedSurface;
use common::{Fixture, record_events};
use serde_json::{Value, json};

/// Pending settings arrive as text, mode, theme, then options in first-write order
#[test]
fn test_flush_order_and_last_write_wins() {
    let mut fixture = Fixture::deferred();
    let editor = &mut fixture.editor;

    editor.set_option("fontSize", 14).unwrap();
    editor.set_theme("ace/theme/monokai").unwrap();
    editor.set_text("one").unwrap();
    editor.set_mode("ace/mode/rust").unwrap();
    editor.set_option("showPrintMargin", false).unwrap();
    editor.set_text("two").unwrap();
    editor.set_option("fontSize", 16).unwrap();

    editor.load().unwrap();
    assert!(fixture.surface.complete_pending());
    assert_eq!(fixture.editor.pump(), Readiness::Ready);

    let session = fixture.session();
    assert_eq!(
        session.requests(),
        vec![
            "session.setValue",
            "session.setMode",
            "editor.setTheme",
            "editor.setOption",
            "editor.setOption",
        ]
    );
    assert_eq!(session.text(), "two");
    assert_eq!(session.mode(), "ace/mode/rust");
    assert_eq!(session.theme(), "ace/theme/monokai");
    assert_eq!(session.option("fontSize"), json!(16));
    assert_eq!(session.option("showPrintMargin"), json!(false));

    // The cache is spent once the engine is live
    assert!(fixture.editor.pending().is_none());
}

/// Text written while loading is normalized and the default mode applies
#[test]
fn test_text_set_while_loading_scenario() {
    let mut fixture = Fixture::deferred();
    fixture.editor.load().unwrap();
    fixture.editor.set_text("a\r\nb").unwrap();

    assert!(fixture.surface.complete_pending());
    assert_eq!(fixture.editor.pump(), Readiness::Ready);

    assert_eq!(fixture.editor.text().unwrap(), "a\nb");
    assert_eq!(fixture.editor.mode().unwrap(), Some(Mode::Text));
    assert_eq!(fixture.editor.theme().unwrap(), Some(Theme::Chrome));
}

/// The initial document comes without undo history
#[test]
fn test_initial_text_is_not_undoable() {
    let fixture = Fixture::ready_with("loaded");
    assert!(!fixture.editor.has_undo().unwrap());
    fixture.editor.undo().unwrap();
    assert_eq!(fixture.editor.text().unwrap(), "loaded");
}

/// An unknown alias is rejected and leaves both cache and engine alone
#[test]
fn test_unknown_mode_alias_changes_nothing() {
    let mut fixture = Fixture::deferred();
    fixture.editor.set_mode("ace/mode/python").unwrap();
    assert!(matches!(
        fixture.editor.set_mode("unknown/alias"),
        Err(BridgeError::UnknownAlias { .. })
    ));
    assert_eq!(fixture.editor.mode().unwrap(), Some(Mode::Python));

    fixture.editor.load().unwrap();
    fixture.surface.complete_pending();
    fixture.editor.pump();

    let err = fixture.editor.set_mode("unknown/alias").unwrap_err();
    assert_eq!(err.to_string(), "unknown mode alias 'unknown/alias'");
    assert_eq!(fixture.session().mode(), "ace/mode/python");
    assert_eq!(fixture.editor.mode().unwrap(), Some(Mode::Python));
}

/// A failing flush fails the load and keeps the settings for the next attempt
#[test]
fn test_flush_failure_keeps_pending_configuration() {
    let mut fixture = Fixture::deferred();
    let events = record_events(&fixture.editor);
    fixture.editor.set_mode("ace/mode/rust").unwrap();
    fixture.editor.set_text("unsaved").unwrap();

    fixture.editor.load().unwrap();
    assert!(
        fixture
            .surface
            .complete_pending_with(|session| session.fail_method("session.setMode", "mode worker crashed"))
    );
    assert_eq!(fixture.editor.pump(), Readiness::Failed);

    let failed_session = fixture.session();
    assert!(!failed_session.host_registered());
    assert!(
        fixture
            .editor
            .last_error()
            .is_some_and(|error| error.contains("session.setMode") && error.contains("mode worker crashed"))
    );
    assert!(matches!(
        events.borrow().last(),
        Some(acebridge_core::ControlEvent::LoadFailed { .. })
    ));

    let pending = fixture.editor.pending().expect("settings kept");
    assert_eq!(pending.mode, Some(Mode::Rust));
    assert_eq!(pending.text.as_deref(), Some("unsaved"));

    fixture.editor.reload().unwrap();
    assert!(fixture.surface.complete_pending());
    assert_eq!(fixture.editor.pump(), Readiness::Ready);
    let session = fixture.session();
    assert_eq!(session.mode(), "ace/mode/rust");
    assert_eq!(session.text(), "unsaved");
}

/// An option the engine rejects fails that load only; the next reload gets ready
#[test]
fn test_rejected_pending_option_does_not_block_reload() {
    let mut fixture = Fixture::immediate();
    fixture.editor.set_text("kept").unwrap();
    fixture.editor.set_option("tabSize", "wide").unwrap();
    fixture.editor.set_option("fontSize", 14).unwrap();

    fixture.editor.load().unwrap();
    assert_eq!(fixture.editor.pump(), Readiness::Failed);
    assert!(
        fixture
            .editor
            .last_error()
            .is_some_and(|error| error.contains("editor.setOption") && error.contains("tabSize"))
    );

    let pending = fixture.editor.pending().expect("settings kept");
    assert!(!pending.options.contains_key("tabSize"));
    assert_eq!(pending.options.get("fontSize"), Some(&json!(14)));

    for _ in 0..2 {
        fixture.editor.reload().unwrap();
        assert_eq!(fixture.editor.pump(), Readiness::Ready);
    }
    let session = fixture.session();
    assert_eq!(session.text(), "kept");
    assert_eq!(session.option("fontSize"), json!(14));
    assert_eq!(session.option("tabSize"), json!(4));
}

/// An empty option name is refused up front and never reaches the flush
#[test]
fn test_empty_option_name_rejected_while_loading() {
    let mut fixture = Fixture::deferred();
    fixture.editor.load().unwrap();

    assert!(matches!(
        fixture.editor.set_option("", 1),
        Err(BridgeError::BridgeCall { .. })
    ));
    assert!(
        fixture
            .editor
            .pending()
            .is_some_and(|pending| !pending.options.contains_key(""))
    );

    assert!(fixture.surface.complete_pending());
    assert_eq!(fixture.editor.pump(), Readiness::Ready);
}

/// A reload shows what the previous engine showed, including live options
#[test]
fn test_reload_carries_live_state() {
    let mut fixture = Fixture::ready_with("start");
    fixture.editor.set_option("fontSize", 20).unwrap();
    fixture.editor.set_mode("ace/mode/json").unwrap();
    fixture.editor.set_theme("ace/theme/dracula").unwrap();
    fixture.editor.set_text("edited").unwrap();

    fixture.editor.reload().unwrap();
    assert_eq!(fixture.editor.pending().and_then(|p| p.mode), Some(Mode::Json));
    assert_eq!(fixture.editor.pump(), Readiness::Ready);

    let session = fixture.session();
    assert_eq!(session.text(), "edited");
    assert_eq!(session.mode(), "ace/mode/json");
    assert_eq!(session.theme(), "ace/theme/dracula");
    assert_eq!(session.option("fontSize"), json!(20));
}

/// Settings from a TOML file are applied on load
#[test]
fn test_config_file_settings_applied() {
    let config = ControlConfig::from_toml_str(
        r#"
        bootstrap = "file:///opt/ace/editor.html"
        initial_text = "[package]\r\nname = \"demo\""
        mode = "ace/mode/toml"
        theme = "ace/theme/monokai"
        read_only = true

        [options]
        tabSize = 2
        showGutter = false
        "#,
    )
    .expect("valid config");

    let (surface, controller) = ScriptedSurface::immediate();
    let mut editor =
        CodeEditor::with_config(surface, Rc::new(MemoryClipboard::default()), &config).unwrap();
    editor.load().unwrap();
    assert_eq!(editor.pump(), Readiness::Ready);

    assert_eq!(
        controller.last_resource().map(|r| r.to_string()).as_deref(),
        Some("file:///opt/ace/editor.html")
    );
    let session = controller.session().unwrap();
    assert_eq!(session.text(), "[package]\nname = \"demo\"");
    assert_eq!(session.mode(), "ace/mode/toml");
    assert_eq!(session.option("tabSize"), json!(2));
    assert_eq!(session.option("showGutter"), Value::Bool(false));

    assert!(editor.read_only().unwrap());
    assert_eq!(editor.session().unwrap().tab_size().unwrap(), 2);
    assert!(!editor.exec_command("cut").unwrap());
}
