// ABOUTME: Typed request schema for calls into the engine's object graph
// ABOUTME: One enum per remote object; serialized as tagged JSON for message-based engines

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Remote objects reachable from a live engine handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RemoteObject {
    Editor,
    Session,
    UndoManager,
}

impl RemoteObject {
    pub fn name(self) -> &'static str {
        match self {
            RemoteObject::Editor => "editor",
            RemoteObject::Session => "session",
            RemoteObject::UndoManager => "undoManager",
        }
    }
}

/// Where the cursor lands after `editor.setValue`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum CursorPlacement {
    /// Select the whole new text
    SelectAll,
    Start,
    #[default]
    End,
}

impl From<CursorPlacement> for i8 {
    fn from(placement: CursorPlacement) -> i8 {
        match placement {
            CursorPlacement::SelectAll => 0,
            CursorPlacement::Start => -1,
            CursorPlacement::End => 1,
        }
    }
}

impl TryFrom<i8> for CursorPlacement {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CursorPlacement::SelectAll),
            -1 => Ok(CursorPlacement::Start),
            1 => Ok(CursorPlacement::End),
            other => Err(format!("invalid cursor placement {other}")),
        }
    }
}

/// Direction for single-character deletes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// Calls on the editor object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditorCall {
    GetValue,
    SetValue { value: String, cursor: CursorPlacement },
    GetCopyText,
    GetSelectedText,
    GetSelectionRange,
    SelectAll,
    ClearSelection,
    Insert { text: String },
    Remove { direction: Direction },
    GetCursorPosition,
    MoveCursorTo { row: u32, column: u32 },
    GotoLine { line: u32, column: u32 },
    NavigateTo { row: u32, column: u32 },
    Undo,
    Redo,
    Find { needle: String, options: Value },
    FindNext { options: Value },
    FindPrevious { options: Value },
    FindAll { needle: String, options: Value },
    Replace { replacement: String, options: Value },
    ReplaceAll { replacement: String, options: Value },
    ExecCommand { name: String },
    /// Enumerate `commands.byName`
    Commands,
    GetTheme,
    SetTheme { theme: String },
    GetOption { name: String },
    SetOption { name: String, value: Value },
    GetReadOnly,
    SetReadOnly { read_only: bool },
    GetFontSize,
    SetFontSize { size: u32 },
    Focus,
    Blur,
    IsFocused,
    OnPaste { text: String },
}

impl EditorCall {
    pub fn op(&self) -> &'static str {
        match self {
            EditorCall::GetValue => "getValue",
            EditorCall::SetValue { .. } => "setValue",
            EditorCall::GetCopyText => "getCopyText",
            EditorCall::GetSelectedText => "getSelectedText",
            EditorCall::GetSelectionRange => "getSelectionRange",
            EditorCall::SelectAll => "selectAll",
            EditorCall::ClearSelection => "clearSelection",
            EditorCall::Insert { .. } => "insert",
            EditorCall::Remove { .. } => "remove",
            EditorCall::GetCursorPosition => "getCursorPosition",
            EditorCall::MoveCursorTo { .. } => "moveCursorTo",
            EditorCall::GotoLine { .. } => "gotoLine",
            EditorCall::NavigateTo { .. } => "navigateTo",
            EditorCall::Undo => "undo",
            EditorCall::Redo => "redo",
            EditorCall::Find { .. } => "find",
            EditorCall::FindNext { .. } => "findNext",
            EditorCall::FindPrevious { .. } => "findPrevious",
            EditorCall::FindAll { .. } => "findAll",
            EditorCall::Replace { .. } => "replace",
            EditorCall::ReplaceAll { .. } => "replaceAll",
            EditorCall::ExecCommand { .. } => "execCommand",
            EditorCall::Commands => "commands",
            EditorCall::GetTheme => "getTheme",
            EditorCall::SetTheme { .. } => "setTheme",
            EditorCall::GetOption { .. } => "getOption",
            EditorCall::SetOption { .. } => "setOption",
            EditorCall::GetReadOnly => "getReadOnly",
            EditorCall::SetReadOnly { .. } => "setReadOnly",
            EditorCall::GetFontSize => "getFontSize",
            EditorCall::SetFontSize { .. } => "setFontSize",
            EditorCall::Focus => "focus",
            EditorCall::Blur => "blur",
            EditorCall::IsFocused => "isFocused",
            EditorCall::OnPaste { .. } => "onPaste",
        }
    }
}

/// Calls on the edit session (document model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SessionCall {
    GetValue,
    /// Replaces the document and clears undo history
    SetValue { value: String },
    GetMode,
    SetMode { mode: String },
    GetLength,
    GetLine { row: u32 },
    GetLines { first_row: u32, last_row: u32 },
    GetTextRange { range: Value },
    Insert { position: Value, text: String },
    Remove { range: Value },
    Replace { range: Value, text: String },
    GetTabSize,
    SetTabSize { size: u32 },
    GetUseSoftTabs,
    SetUseSoftTabs { enabled: bool },
    GetUseWrapMode,
    SetUseWrapMode { enabled: bool },
    GetScrollTop,
    SetScrollTop { offset: f64 },
    GetScrollLeft,
    SetScrollLeft { offset: f64 },
    GetOverwrite,
    SetOverwrite { enabled: bool },
    GetOption { name: String },
    SetOption { name: String, value: Value },
}

impl SessionCall {
    pub fn op(&self) -> &'static str {
        match self {
            SessionCall::GetValue => "getValue",
            SessionCall::SetValue { .. } => "setValue",
            SessionCall::GetMode => "getMode",
            SessionCall::SetMode { .. } => "setMode",
            SessionCall::GetLength => "getLength",
            SessionCall::GetLine { .. } => "getLine",
            SessionCall::GetLines { .. } => "getLines",
            SessionCall::GetTextRange { .. } => "getTextRange",
            SessionCall::Insert { .. } => "insert",
            SessionCall::Remove { .. } => "remove",
            SessionCall::Replace { .. } => "replace",
            SessionCall::GetTabSize => "getTabSize",
            SessionCall::SetTabSize { .. } => "setTabSize",
            SessionCall::GetUseSoftTabs => "getUseSoftTabs",
            SessionCall::SetUseSoftTabs { .. } => "setUseSoftTabs",
            SessionCall::GetUseWrapMode => "getUseWrapMode",
            SessionCall::SetUseWrapMode { .. } => "setUseWrapMode",
            SessionCall::GetScrollTop => "getScrollTop",
            SessionCall::SetScrollTop { .. } => "setScrollTop",
            SessionCall::GetScrollLeft => "getScrollLeft",
            SessionCall::SetScrollLeft { .. } => "setScrollLeft",
            SessionCall::GetOverwrite => "getOverwrite",
            SessionCall::SetOverwrite { .. } => "setOverwrite",
            SessionCall::GetOption { .. } => "getOption",
            SessionCall::SetOption { .. } => "setOption",
        }
    }
}

/// Calls on the session's undo manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum UndoManagerCall {
    HasUndo,
    HasRedo,
    Undo,
    Redo,
    Reset,
    MarkClean,
    IsClean,
}

impl UndoManagerCall {
    pub fn op(&self) -> &'static str {
        match self {
            UndoManagerCall::HasUndo => "hasUndo",
            UndoManagerCall::HasRedo => "hasRedo",
            UndoManagerCall::Undo => "undo",
            UndoManagerCall::Redo => "redo",
            UndoManagerCall::Reset => "reset",
            UndoManagerCall::MarkClean => "markClean",
            UndoManagerCall::IsClean => "isClean",
        }
    }
}

/// A single call into the engine, addressed to one remote object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", content = "call", rename_all = "camelCase")]
pub enum EngineRequest {
    Editor(EditorCall),
    Session(SessionCall),
    UndoManager(UndoManagerCall),
}

impl EngineRequest {
    pub fn target(&self) -> RemoteObject {
        match self {
            EngineRequest::Editor(_) => RemoteObject::Editor,
            EngineRequest::Session(_) => RemoteObject::Session,
            EngineRequest::UndoManager(_) => RemoteObject::UndoManager,
        }
    }

    /// Qualified method name, e.g. `session.setValue`
    pub fn method(&self) -> String {
        let op = match self {
            EngineRequest::Editor(call) => call.op(),
            EngineRequest::Session(call) => call.op(),
            EngineRequest::UndoManager(call) => call.op(),
        };
        format!("{}.{}", self.target().name(), op)
    }
}

impl From<EditorCall> for EngineRequest {
    fn from(call: EditorCall) -> Self {
        EngineRequest::Editor(call)
    }
}

impl From<SessionCall> for EngineRequest {
    fn from(call: SessionCall) -> Self {
        EngineRequest::Session(call)
    }
}

impl From<UndoManagerCall> for EngineRequest {
    fn from(call: UndoManagerCall) -> Self {
        EngineRequest::UndoManager(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_names() {
        assert_eq!(
            EngineRequest::from(SessionCall::SetValue { value: "x".into() }).method(),
            "session.setValue"
        );
        assert_eq!(
            EngineRequest::from(UndoManagerCall::HasUndo).method(),
            "undoManager.hasUndo"
        );
        assert_eq!(
            EngineRequest::from(EditorCall::Commands).method(),
            "editor.commands"
        );
    }

    #[test]
    fn test_wire_shape() {
        let request = EngineRequest::from(EditorCall::SetValue {
            value: "a\nb".into(),
            cursor: CursorPlacement::End,
        });
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "target": "editor",
                "call": { "op": "setValue", "value": "a\nb", "cursor": 1 }
            })
        );

        let request = EngineRequest::from(SessionCall::GetLines {
            first_row: 0,
            last_row: 2,
        });
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "target": "session",
                "call": { "op": "getLines", "firstRow": 0, "lastRow": 2 }
            })
        );
    }

    #[test]
    fn test_wire_shape_decodes() {
        let request: EngineRequest = serde_json::from_value(json!({
            "target": "editor",
            "call": { "op": "remove", "direction": "left" }
        }))
        .unwrap();
        assert_eq!(
            request,
            EngineRequest::Editor(EditorCall::Remove {
                direction: Direction::Left
            })
        );
    }

    #[test]
    fn test_cursor_placement_codes() {
        assert_eq!(i8::from(CursorPlacement::Start), -1);
        assert_eq!(CursorPlacement::try_from(0), Ok(CursorPlacement::SelectAll));
        assert!(CursorPlacement::try_from(7).is_err());
    }
}
