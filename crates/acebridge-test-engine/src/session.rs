// ABOUTME: In-process engine session that serves bridge requests against a local document
// ABOUTME: Records every request, supports injected failures and calls back into the registered host

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use acebridge_core::protocol::{CursorPlacement, Direction, EditorCall, EngineRequest, SessionCall, UndoManagerCall};
use acebridge_core::{EngineSession, HostBridge, RemoteError};
use acebridge_events::{EngineEvent, EngineEventKind};
use acebridge_logging::{debug, trace};
use acebridge_types::{Position, Range};
use indexmap::IndexMap;
use serde_json::{Value, json};
use thiserror::Error;

use crate::commands;
use crate::document::{Document, UndoHistory};
use crate::search::{SearchError, SearchSettings};

pub const DEFAULT_MODE: &str = "ace/mode/text";
pub const DEFAULT_THEME: &str = "ace/theme/textmate";
pub const DEFAULT_FONT_SIZE: u64 = 12;

#[derive(Debug, Error)]
enum Fault {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("bad argument: {0}")]
    Argument(String),
}

/// Result of one request, delivered after the engine state is released
#[derive(Debug, Default)]
struct Outcome {
    value: Value,
    events: Vec<EngineEvent>,
    copied: Option<String>,
}

impl Outcome {
    fn unit() -> Self {
        Self::default()
    }

    fn value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    fn event(mut self, kind: EngineEventKind, payload: Value) -> Self {
        self.events.push(EngineEvent::new(kind, payload));
        self
    }

    fn merge(mut self, other: Outcome) -> Self {
        self.events.extend(other.events);
        self.copied = other.copied.or(self.copied);
        self
    }
}

fn change(action: &str) -> Value {
    json!({ "action": action })
}

struct EngineState {
    document: Document,
    history: UndoHistory,
    mode: String,
    theme: String,
    options: IndexMap<String, Value>,
    tab_size: u32,
    soft_tabs: bool,
    wrap_mode: bool,
    scroll_top: f64,
    scroll_left: f64,
    overwrite: bool,
    focused: bool,
    last_search: Option<SearchSettings>,
}

impl Default for EngineState {
    fn default() -> Self {
        let mut options = IndexMap::new();
        options.insert("readOnly".to_string(), Value::Bool(false));
        options.insert("fontSize".to_string(), Value::from(DEFAULT_FONT_SIZE));
        Self {
            document: Document::default(),
            history: UndoHistory::new(),
            mode: DEFAULT_MODE.to_string(),
            theme: DEFAULT_THEME.to_string(),
            options,
            tab_size: 4,
            soft_tabs: true,
            wrap_mode: false,
            scroll_top: 0.0,
            scroll_left: 0.0,
            overwrite: false,
            focused: false,
            last_search: None,
        }
    }
}

impl EngineState {
    fn apply(&mut self, request: &EngineRequest, clipboard: Option<String>) -> Result<Outcome, Fault> {
        match request {
            EngineRequest::Editor(call) => self.editor(call, clipboard),
            EngineRequest::Session(call) => self.session(call),
            EngineRequest::UndoManager(call) => Ok(self.undo_manager(call)),
        }
    }

    fn read_only(&self) -> bool {
        self.options
            .get("readOnly")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn editor(&mut self, call: &EditorCall, clipboard: Option<String>) -> Result<Outcome, Fault> {
        let outcome = match call {
            EditorCall::GetValue => Outcome::value(self.document.text()),
            EditorCall::SetValue { value, cursor } => {
                self.history.record(&self.document);
                self.document.set_text(value);
                let end = self.document.len_chars();
                match cursor {
                    CursorPlacement::SelectAll => self.document.select(0, end),
                    CursorPlacement::Start => self.document.collapse_to(0),
                    CursorPlacement::End => self.document.collapse_to(end),
                }
                Outcome::unit().event(EngineEventKind::Change, change("setValue"))
            }
            EditorCall::GetCopyText | EditorCall::GetSelectedText => {
                Outcome::value(self.document.selected_text())
            }
            EditorCall::GetSelectionRange => {
                let (start, end) = self.document.selection();
                Outcome::value(self.document.range_of(start, end).to_remote())
            }
            EditorCall::SelectAll => {
                self.document.select(0, self.document.len_chars());
                Outcome::unit()
            }
            EditorCall::ClearSelection => {
                self.document.collapse_to(self.document.head());
                Outcome::unit()
            }
            EditorCall::Insert { text } => self.insert_at_selection(text),
            EditorCall::Remove { direction } => self.remove(*direction),
            EditorCall::GetCursorPosition => {
                Outcome::value(self.document.position_of(self.document.head()).to_remote())
            }
            EditorCall::MoveCursorTo { row, column } | EditorCall::NavigateTo { row, column } => {
                let offset = self.document.offset_of(Position::new(*row, *column));
                self.document.collapse_to(offset);
                Outcome::unit()
            }
            EditorCall::GotoLine { line, column } => {
                let offset = self
                    .document
                    .offset_of(Position::new(line.saturating_sub(1), *column));
                self.document.collapse_to(offset);
                Outcome::unit()
            }
            EditorCall::Undo => self.undo(),
            EditorCall::Redo => self.redo(),
            EditorCall::Find { needle, options } => {
                let mut settings = SearchSettings::from_remote(options);
                settings.needle = Some(needle.clone());
                self.find(settings)?
            }
            EditorCall::FindNext { options } | EditorCall::FindPrevious { options } => {
                let mut settings =
                    SearchSettings::from_remote(options).or_needle_from(self.last_search.as_ref());
                settings.skip_current = true;
                settings.backwards = matches!(call, EditorCall::FindPrevious { .. });
                self.find(settings)?
            }
            EditorCall::FindAll { needle, options } => {
                let mut settings = SearchSettings::from_remote(options);
                settings.needle = Some(needle.clone());
                let count = settings.matches(&self.document)?.len();
                self.last_search = Some(settings);
                Outcome::value(count)
            }
            EditorCall::Replace {
                replacement,
                options,
            } => {
                let settings = SearchSettings::from_remote(options).or_needle_from(self.last_search.as_ref());
                self.replace_one(replacement, settings)?
            }
            EditorCall::ReplaceAll {
                replacement,
                options,
            } => {
                let settings = SearchSettings::from_remote(options).or_needle_from(self.last_search.as_ref());
                self.replace_all(replacement, settings)?
            }
            EditorCall::ExecCommand { name } => self.exec(name, clipboard),
            EditorCall::Commands => Outcome::value(commands::by_name()),
            EditorCall::GetTheme => Outcome::value(self.theme.clone()),
            EditorCall::SetTheme { theme } => {
                self.theme = theme.clone();
                Outcome::unit()
            }
            EditorCall::GetOption { name } => Outcome::value(self.option(name)),
            EditorCall::SetOption { name, value } => self.set_option(name, value.clone())?,
            EditorCall::GetReadOnly => Outcome::value(self.read_only()),
            EditorCall::SetReadOnly { read_only } => {
                self.options
                    .insert("readOnly".to_string(), Value::Bool(*read_only));
                Outcome::unit()
            }
            EditorCall::GetFontSize => Outcome::value(self.option("fontSize")),
            EditorCall::SetFontSize { size } => {
                self.options.insert("fontSize".to_string(), Value::from(*size));
                Outcome::unit()
            }
            EditorCall::Focus => self.set_focus(true),
            EditorCall::Blur => self.set_focus(false),
            EditorCall::IsFocused => Outcome::value(self.focused),
            EditorCall::OnPaste { text } => {
                if self.read_only() {
                    Outcome::unit()
                } else {
                    Outcome::unit()
                        .event(EngineEventKind::Paste, json!({ "text": text }))
                        .merge(self.insert_at_selection(text))
                }
            }
        };
        Ok(outcome)
    }

    fn session(&mut self, call: &SessionCall) -> Result<Outcome, Fault> {
        let outcome = match call {
            SessionCall::GetValue => Outcome::value(self.document.text()),
            SessionCall::SetValue { value } => {
                self.document.set_text(value);
                self.history.reset();
                Outcome::unit().event(EngineEventKind::Change, change("setValue"))
            }
            SessionCall::GetMode => Outcome::value(self.mode.clone()),
            SessionCall::SetMode { mode } => self.set_mode(mode),
            SessionCall::GetLength => Outcome::value(self.document.line_count()),
            SessionCall::GetLine { row } => Outcome::value(self.document.line(*row as usize)),
            SessionCall::GetLines {
                first_row,
                last_row,
            } => {
                let last = (*last_row as usize).min(self.document.line_count().saturating_sub(1));
                let lines: Vec<String> = (*first_row as usize..=last)
                    .map(|row| self.document.line(row))
                    .collect();
                Outcome::value(lines)
            }
            SessionCall::GetTextRange { range } => {
                let (start, end) = self.offsets(range)?;
                Outcome::value(self.document.slice(start, end))
            }
            SessionCall::Insert { position, text } => {
                let position = Position::from_remote(position)
                    .map_err(|error| Fault::Argument(error.to_string()))?;
                let offset = self.document.offset_of(position);
                self.history.record(&self.document);
                let after = self.document.splice(offset, offset, text);
                Outcome::value(self.document.position_of(after).to_remote())
                    .event(EngineEventKind::Change, change("insert"))
            }
            SessionCall::Remove { range } => {
                let (start, end) = self.offsets(range)?;
                self.history.record(&self.document);
                self.document.splice(start, end, "");
                Outcome::value(self.document.position_of(start).to_remote())
                    .event(EngineEventKind::Change, change("remove"))
            }
            SessionCall::Replace { range, text } => {
                let (start, end) = self.offsets(range)?;
                self.history.record(&self.document);
                let after = self.document.splice(start, end, text);
                Outcome::value(self.document.position_of(after).to_remote())
                    .event(EngineEventKind::Change, change("replace"))
            }
            SessionCall::GetTabSize => Outcome::value(self.tab_size),
            SessionCall::SetTabSize { size } => self.set_option("tabSize", Value::from(*size))?,
            SessionCall::GetUseSoftTabs => Outcome::value(self.soft_tabs),
            SessionCall::SetUseSoftTabs { enabled } => self.set_option("useSoftTabs", Value::Bool(*enabled))?,
            SessionCall::GetUseWrapMode => Outcome::value(self.wrap_mode),
            SessionCall::SetUseWrapMode { enabled } => self.set_option("wrap", Value::Bool(*enabled))?,
            SessionCall::GetScrollTop => Outcome::value(self.scroll_top),
            SessionCall::SetScrollTop { offset } => {
                self.scroll_top = *offset;
                Outcome::unit().event(EngineEventKind::ChangeScrollTop, json!(offset))
            }
            SessionCall::GetScrollLeft => Outcome::value(self.scroll_left),
            SessionCall::SetScrollLeft { offset } => {
                self.scroll_left = *offset;
                Outcome::unit().event(EngineEventKind::ChangeScrollLeft, json!(offset))
            }
            SessionCall::GetOverwrite => Outcome::value(self.overwrite),
            SessionCall::SetOverwrite { enabled } => self.set_option("overwrite", Value::Bool(*enabled))?,
            SessionCall::GetOption { name } => Outcome::value(self.option(name)),
            SessionCall::SetOption { name, value } => self.set_option(name, value.clone())?,
        };
        Ok(outcome)
    }

    fn undo_manager(&mut self, call: &UndoManagerCall) -> Outcome {
        match call {
            UndoManagerCall::HasUndo => Outcome::value(self.history.has_undo()),
            UndoManagerCall::HasRedo => Outcome::value(self.history.has_redo()),
            UndoManagerCall::Undo => self.undo(),
            UndoManagerCall::Redo => self.redo(),
            UndoManagerCall::Reset => {
                self.history.reset();
                Outcome::unit()
            }
            UndoManagerCall::MarkClean => {
                self.history.mark_clean();
                Outcome::unit()
            }
            UndoManagerCall::IsClean => Outcome::value(self.history.is_clean()),
        }
    }

    fn offsets(&self, range: &Value) -> Result<(usize, usize), Fault> {
        let range = Range::from_remote(range)
            .map_err(|error| Fault::Argument(error.to_string()))?
            .ordered();
        Ok((self.document.offset_of(range.start), self.document.offset_of(range.end)))
    }

    fn option(&self, name: &str) -> Value {
        match name {
            "tabSize" => Value::from(self.tab_size),
            "useSoftTabs" => Value::Bool(self.soft_tabs),
            "wrap" => Value::Bool(self.wrap_mode),
            "overwrite" => Value::Bool(self.overwrite),
            "mode" => Value::String(self.mode.clone()),
            "theme" => Value::String(self.theme.clone()),
            _ => self.options.get(name).cloned().unwrap_or(Value::Null),
        }
    }

    fn set_option(&mut self, name: &str, value: Value) -> Result<Outcome, Fault> {
        let expect_bool = |value: &Value| {
            value
                .as_bool()
                .ok_or_else(|| Fault::Argument(format!("{name} expects a boolean, got {value}")))
        };

        let outcome = match name {
            "tabSize" => {
                let size = value
                    .as_u64()
                    .and_then(|size| u32::try_from(size).ok())
                    .ok_or_else(|| Fault::Argument(format!("tabSize expects a count, got {value}")))?;
                self.tab_size = size;
                Outcome::unit().event(EngineEventKind::ChangeTabSize, Value::Null)
            }
            "useSoftTabs" => {
                self.soft_tabs = expect_bool(&value)?;
                Outcome::unit()
            }
            "wrap" => {
                self.wrap_mode = expect_bool(&value)?;
                Outcome::unit().event(EngineEventKind::ChangeWrapMode, Value::Null)
            }
            "overwrite" => {
                self.overwrite = expect_bool(&value)?;
                Outcome::unit().event(EngineEventKind::ChangeOverwrite, Value::Null)
            }
            "mode" => match value.as_str() {
                Some(mode) => self.set_mode(mode),
                None => return Err(Fault::Argument(format!("mode expects an alias, got {value}"))),
            },
            "theme" => match value.as_str() {
                Some(theme) => {
                    self.theme = theme.to_string();
                    Outcome::unit()
                }
                None => return Err(Fault::Argument(format!("theme expects an alias, got {value}"))),
            },
            _ => {
                self.options.insert(name.to_string(), value);
                Outcome::unit()
            }
        };
        Ok(outcome)
    }

    fn set_mode(&mut self, mode: &str) -> Outcome {
        self.mode = mode.to_string();
        Outcome::unit().event(EngineEventKind::ChangeMode, json!({ "mode": mode }))
    }

    fn set_focus(&mut self, focused: bool) -> Outcome {
        if self.focused == focused {
            return Outcome::unit();
        }
        self.focused = focused;
        let kind = if focused {
            EngineEventKind::Focus
        } else {
            EngineEventKind::Blur
        };
        Outcome::unit().event(kind, Value::Null)
    }

    fn insert_at_selection(&mut self, text: &str) -> Outcome {
        let (start, end) = self.document.selection();
        self.history.record(&self.document);
        self.document.splice(start, end, text);
        Outcome::unit().event(EngineEventKind::Change, change("insert"))
    }

    fn remove(&mut self, direction: Direction) -> Outcome {
        let (start, end) = self.document.selection();
        let span = if start != end {
            Some((start, end))
        } else {
            match direction {
                Direction::Left if start > 0 => Some((start - 1, start)),
                Direction::Right if start < self.document.len_chars() => Some((start, start + 1)),
                _ => None,
            }
        };
        let Some((start, end)) = span else {
            return Outcome::unit();
        };
        self.history.record(&self.document);
        self.document.splice(start, end, "");
        Outcome::unit().event(EngineEventKind::Change, change("remove"))
    }

    fn remove_line(&mut self) -> Outcome {
        let row = self.document.position_of(self.document.head()).row;
        let line_count = self.document.line_count() as u32;
        let mut start = self.document.offset_of(Position::new(row, 0));
        let end = if row + 1 < line_count {
            self.document.offset_of(Position::new(row + 1, 0))
        } else {
            // Last row: take the preceding line break instead
            start = start.saturating_sub(1);
            self.document.len_chars()
        };
        if start == end {
            return Outcome::unit();
        }
        self.history.record(&self.document);
        self.document.splice(start, end, "");
        Outcome::unit().event(EngineEventKind::Change, change("remove"))
    }

    fn undo(&mut self) -> Outcome {
        if self.history.undo(&mut self.document) {
            Outcome::unit().event(EngineEventKind::Change, change("undo"))
        } else {
            Outcome::unit()
        }
    }

    fn redo(&mut self) -> Outcome {
        if self.history.redo(&mut self.document) {
            Outcome::unit().event(EngineEventKind::Change, change("redo"))
        } else {
            Outcome::unit()
        }
    }

    fn find(&mut self, settings: SearchSettings) -> Result<Outcome, Fault> {
        let found = settings.locate(&self.document)?;
        self.last_search = Some(settings);
        Ok(match found {
            Some((start, end)) => {
                self.document.select(start, end);
                Outcome::value(self.document.range_of(start, end).to_remote())
            }
            None => Outcome::value(Value::Null),
        })
    }

    fn replace_one(&mut self, replacement: &str, settings: SearchSettings) -> Result<Outcome, Fault> {
        let found = settings.locate(&self.document)?;
        let Some((start, end)) = found else {
            self.last_search = Some(settings);
            return Ok(Outcome::value(0));
        };

        let text = settings.expand(&self.document.slice(start, end), replacement)?;
        self.history.record(&self.document);
        let after = self.document.splice(start, end, &text);
        self.document.select(start, after);
        self.last_search = Some(settings);
        Ok(Outcome::value(1).event(EngineEventKind::Change, change("replace")))
    }

    fn replace_all(&mut self, replacement: &str, settings: SearchSettings) -> Result<Outcome, Fault> {
        let matches = settings.matches(&self.document)?;
        if matches.is_empty() {
            self.last_search = Some(settings);
            return Ok(Outcome::value(0));
        }

        self.history.record(&self.document);
        // Back to front so earlier offsets stay valid
        for &(start, end) in matches.iter().rev() {
            let text = settings.expand(&self.document.slice(start, end), replacement)?;
            self.document.splice(start, end, &text);
        }
        self.last_search = Some(settings);
        Ok(Outcome::value(matches.len()).event(EngineEventKind::Change, change("replace")))
    }

    fn exec(&mut self, name: &str, clipboard: Option<String>) -> Outcome {
        let Some(spec) = commands::lookup(name) else {
            debug!(command = %name, "Unknown command");
            return Outcome::value(false);
        };
        if self.read_only() && !spec.read_only {
            debug!(command = %name, "Command refused, editor is read-only");
            return Outcome::value(false);
        }

        let outcome = match spec.name {
            "selectall" => {
                self.document.select(0, self.document.len_chars());
                Outcome::unit()
            }
            "copy" => self.copy_selection(),
            "cut" => {
                let copied = self.copy_selection();
                if copied.copied.is_some() {
                    let (start, end) = self.document.selection();
                    self.history.record(&self.document);
                    self.document.splice(start, end, "");
                    copied.event(EngineEventKind::Change, change("remove"))
                } else {
                    copied
                }
            }
            "paste" => match clipboard {
                Some(text) if !text.is_empty() => Outcome::unit()
                    .event(EngineEventKind::Paste, json!({ "text": text }))
                    .merge(self.insert_at_selection(&text)),
                _ => Outcome::unit(),
            },
            "undo" => self.undo(),
            "redo" => self.redo(),
            "removeline" => self.remove_line(),
            // Interface-only commands: nothing to do without a renderer
            _ => Outcome::unit(),
        };
        outcome.with_value(true)
    }

    fn copy_selection(&self) -> Outcome {
        let text = self.document.selected_text();
        if text.is_empty() {
            return Outcome::unit();
        }
        Outcome {
            events: vec![EngineEvent::new(EngineEventKind::Copy, json!({ "text": text }))],
            copied: Some(text),
            ..Outcome::default()
        }
    }
}

fn is_paste_command(request: &EngineRequest) -> bool {
    matches!(request, EngineRequest::Editor(EditorCall::ExecCommand { name }) if name == "paste")
}

/// A live engine instance for tests.
///
/// Requests are served synchronously against a rope document. Host upcalls
/// (events, clipboard) are made only after the engine state is released, so a
/// host may call back into the session from inside an event handler.
#[derive(Default)]
pub struct TestSession {
    state: RefCell<EngineState>,
    host: RefCell<Option<(String, Weak<dyn HostBridge>)>>,
    subscriptions: RefCell<Vec<EngineEventKind>>,
    requests: RefCell<Vec<String>>,
    failures: RefCell<HashMap<String, String>>,
    disconnected: Cell<bool>,
}

impl TestSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Qualified method names of every request served so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    /// Make every call to `method` (e.g. `session.setMode`) raise `message`
    pub fn fail_method(&self, method: impl Into<String>, message: impl Into<String>) {
        self.failures.borrow_mut().insert(method.into(), message.into());
    }

    pub fn clear_failures(&self) {
        self.failures.borrow_mut().clear();
    }

    /// Behave like an engine whose script context has been destroyed
    pub fn disconnect(&self) {
        self.disconnected.set(true);
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected.get()
    }

    pub fn text(&self) -> String {
        self.state.borrow().document.text()
    }

    pub fn mode(&self) -> String {
        self.state.borrow().mode.clone()
    }

    pub fn theme(&self) -> String {
        self.state.borrow().theme.clone()
    }

    pub fn option(&self, name: &str) -> Value {
        self.state.borrow().option(name)
    }

    pub fn selected_text(&self) -> String {
        self.state.borrow().document.selected_text()
    }

    /// Place the selection directly, as a user dragging the mouse would
    pub fn select(&self, anchor: Position, head: Position) {
        let mut state = self.state.borrow_mut();
        let anchor = state.document.offset_of(anchor);
        let head = state.document.offset_of(head);
        state.document.select(anchor, head);
    }

    pub fn host_member(&self) -> Option<String> {
        self.host.borrow().as_ref().map(|(member, _)| member.clone())
    }

    /// True while the registered host object is still alive
    pub fn host_registered(&self) -> bool {
        self.host_bridge().is_some()
    }

    pub fn subscriptions(&self) -> Vec<EngineEventKind> {
        self.subscriptions.borrow().clone()
    }

    /// Emit `event` to the host if it is subscribed; false if nobody heard it
    pub fn fire(&self, event: EngineEvent) -> bool {
        if !self.subscriptions.borrow().contains(&event.kind) {
            return false;
        }
        match self.host_bridge() {
            Some(host) => {
                host.emit(event);
                true
            }
            None => false,
        }
    }

    fn host_bridge(&self) -> Option<Rc<dyn HostBridge>> {
        self.host.borrow().as_ref().and_then(|(_, host)| host.upgrade())
    }
}

impl EngineSession for TestSession {
    fn dispatch(&self, request: &EngineRequest) -> Result<Value, RemoteError> {
        let method = request.method();
        trace!(method = %method, "Test engine request");
        self.requests.borrow_mut().push(method.clone());

        if self.disconnected.get() {
            return Err(RemoteError::Disconnected);
        }
        if let Some(message) = self.failures.borrow().get(&method) {
            return Err(RemoteError::Raised(message.clone()));
        }

        let clipboard = if is_paste_command(request) {
            self.host_bridge().and_then(|host| host.paste())
        } else {
            None
        };

        let outcome = self
            .state
            .borrow_mut()
            .apply(request, clipboard)
            .map_err(|fault| RemoteError::Raised(fault.to_string()))?;

        if let Some(text) = &outcome.copied
            && let Some(host) = self.host_bridge()
        {
            host.copy(text);
        }
        for event in outcome.events {
            self.fire(event);
        }
        Ok(outcome.value)
    }

    fn register_host(&self, member: &str, host: Weak<dyn HostBridge>) -> Result<(), RemoteError> {
        if self.disconnected.get() {
            return Err(RemoteError::Disconnected);
        }
        *self.host.borrow_mut() = Some((member.to_string(), host));
        Ok(())
    }

    fn subscribe(&self, kind: EngineEventKind) -> Result<(), RemoteError> {
        if self.disconnected.get() {
            return Err(RemoteError::Disconnected);
        }
        let method = format!("subscribe.{}", kind.name());
        if let Some(message) = self.failures.borrow().get(&method) {
            return Err(RemoteError::Raised(message.clone()));
        }
        let mut subscriptions = self.subscriptions.borrow_mut();
        if !subscriptions.contains(&kind) {
            subscriptions.push(kind);
        }
        Ok(())
    }
}

impl std::fmt::Debug for TestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSession")
            .field("requests", &self.requests.borrow().len())
            .field("host", &self.host_member())
            .field("disconnected", &self.disconnected.get())
            .finish_non_exhaustive()
    }
}
