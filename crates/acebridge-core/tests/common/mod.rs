// ABOUTME: Shared fixtures for the control integration tests
// ABOUTME: Builds controls over the scripted surface and records published events

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use acebridge_core::{CodeEditor, ControlEvent, MemoryClipboard, Readiness};
use acebridge_test_engine::{ScriptedSurface, SurfaceController, TestSession};

pub struct Fixture {
    pub editor: CodeEditor,
    pub surface: SurfaceController,
    pub clipboard: Rc<MemoryClipboard>,
}

impl Fixture {
    /// Control over a surface whose loads wait for the test
    pub fn deferred() -> Self {
        let (surface, controller) = ScriptedSurface::deferred();
        let clipboard = Rc::new(MemoryClipboard::default());
        Self {
            editor: CodeEditor::new(surface, clipboard.clone()),
            surface: controller,
            clipboard,
        }
    }

    /// Control over a surface whose loads finish immediately
    pub fn immediate() -> Self {
        let (surface, controller) = ScriptedSurface::immediate();
        let clipboard = Rc::new(MemoryClipboard::default());
        Self {
            editor: CodeEditor::new(surface, clipboard.clone()),
            surface: controller,
            clipboard,
        }
    }

    /// Loaded and ready, with `text` in the document
    pub fn ready_with(text: &str) -> Self {
        let mut fixture = Self::immediate();
        fixture.editor.set_text(text).expect("cached write");
        fixture.editor.load().expect("load from unloaded");
        assert_eq!(fixture.editor.pump(), Readiness::Ready);
        fixture
    }

    pub fn session(&self) -> Rc<TestSession> {
        self.surface.session().expect("engine was bootstrapped")
    }
}

/// Collects every event the control publishes
pub fn record_events(editor: &CodeEditor) -> Rc<RefCell<Vec<ControlEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    editor.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

