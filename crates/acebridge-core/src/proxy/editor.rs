// ABOUTME: Proxy over the engine's editor object
// ABOUTME: Selection, cursor, search, commands and view options

use acebridge_types::{Command, Position, Range, SearchOptions};
use serde_json::{Map, Value};

use super::marshal::{decode, decode_count, decode_optional_range, decode_position, decode_range};
use super::{ProxyCore, SessionProxy};
use crate::error::{BridgeError, Result};
use crate::handle::EngineLink;
use crate::protocol::{CursorPlacement, Direction, EditorCall};

#[derive(Debug, Clone)]
pub struct EditorProxy {
    core: ProxyCore,
}

impl EditorProxy {
    pub(crate) fn new(link: EngineLink, epoch: u64) -> Self {
        Self {
            core: ProxyCore::new(link, epoch),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.core.epoch()
    }

    /// False once the engine this proxy was created for has been replaced
    pub fn is_valid(&self) -> bool {
        self.core.is_valid()
    }

    /// The session this editor is showing
    pub fn session(&self) -> SessionProxy {
        SessionProxy::from_core(self.core.clone())
    }

    pub fn value(&self) -> Result<String> {
        decode("editor.getValue", self.core.call(EditorCall::GetValue)?)
    }

    /// Replace the document text; undoable, unlike [`SessionProxy::set_value`]
    pub fn set_value(&self, text: &str, cursor: CursorPlacement) -> Result<()> {
        self.core.call(EditorCall::SetValue {
            value: text.to_string(),
            cursor,
        })?;
        Ok(())
    }

    /// Text a copy would place on the clipboard (the selection)
    pub fn copy_text(&self) -> Result<String> {
        decode("editor.getCopyText", self.core.call(EditorCall::GetCopyText)?)
    }

    pub fn selected_text(&self) -> Result<String> {
        decode(
            "editor.getSelectedText",
            self.core.call(EditorCall::GetSelectedText)?,
        )
    }

    pub fn selection_range(&self) -> Result<Range> {
        let value = self.core.call(EditorCall::GetSelectionRange)?;
        decode_range("editor.getSelectionRange", &value)
    }

    pub fn select_all(&self) -> Result<()> {
        self.core.call(EditorCall::SelectAll)?;
        Ok(())
    }

    pub fn clear_selection(&self) -> Result<()> {
        self.core.call(EditorCall::ClearSelection)?;
        Ok(())
    }

    /// Insert at the cursor, replacing the selection
    pub fn insert(&self, text: &str) -> Result<()> {
        self.core.call(EditorCall::Insert {
            text: text.to_string(),
        })?;
        Ok(())
    }

    /// Delete the selection, or one character in `direction` when nothing is selected
    pub fn remove(&self, direction: Direction) -> Result<()> {
        self.core.call(EditorCall::Remove { direction })?;
        Ok(())
    }

    pub fn cursor_position(&self) -> Result<Position> {
        let value = self.core.call(EditorCall::GetCursorPosition)?;
        decode_position("editor.getCursorPosition", &value)
    }

    pub fn move_cursor_to(&self, position: Position) -> Result<()> {
        self.core.call(EditorCall::MoveCursorTo {
            row: position.row,
            column: position.column,
        })?;
        Ok(())
    }

    /// Jump to a one-based line number
    pub fn goto_line(&self, line: u32, column: u32) -> Result<()> {
        self.core.call(EditorCall::GotoLine { line, column })?;
        Ok(())
    }

    /// Move the cursor and clear the selection
    pub fn navigate_to(&self, position: Position) -> Result<()> {
        self.core.call(EditorCall::NavigateTo {
            row: position.row,
            column: position.column,
        })?;
        Ok(())
    }

    pub fn undo(&self) -> Result<()> {
        self.core.call(EditorCall::Undo)?;
        Ok(())
    }

    pub fn redo(&self) -> Result<()> {
        self.core.call(EditorCall::Redo)?;
        Ok(())
    }

    /// Select the next match of `needle`; `None` when there is no match
    pub fn find(&self, needle: &str, options: &SearchOptions) -> Result<Option<Range>> {
        let value = self.core.call(EditorCall::Find {
            needle: needle.to_string(),
            options: options.to_remote(),
        })?;
        decode_optional_range("editor.find", &value)
    }

    /// Repeat the last search forwards
    pub fn find_next(&self, options: &SearchOptions) -> Result<Option<Range>> {
        let value = self.core.call(EditorCall::FindNext {
            options: options.to_remote(),
        })?;
        decode_optional_range("editor.findNext", &value)
    }

    /// Repeat the last search backwards
    pub fn find_previous(&self, options: &SearchOptions) -> Result<Option<Range>> {
        let value = self.core.call(EditorCall::FindPrevious {
            options: options.to_remote(),
        })?;
        decode_optional_range("editor.findPrevious", &value)
    }

    /// Number of matches in the document
    pub fn find_all(&self, needle: &str, options: &SearchOptions) -> Result<u32> {
        let value = self.core.call(EditorCall::FindAll {
            needle: needle.to_string(),
            options: options.to_remote(),
        })?;
        decode_count("editor.findAll", &value)
    }

    /// Replace the current match; returns how many were replaced (0 or 1)
    pub fn replace(&self, replacement: &str, options: &SearchOptions) -> Result<u32> {
        let value = self.core.call(EditorCall::Replace {
            replacement: replacement.to_string(),
            options: options.to_remote(),
        })?;
        decode_count("editor.replace", &value)
    }

    pub fn replace_all(&self, replacement: &str, options: &SearchOptions) -> Result<u32> {
        let value = self.core.call(EditorCall::ReplaceAll {
            replacement: replacement.to_string(),
            options: options.to_remote(),
        })?;
        decode_count("editor.replaceAll", &value)
    }

    /// Run a named command; `false` if the engine does not know it or refused it
    pub fn exec_command(&self, name: &str) -> Result<bool> {
        let value = self.core.call(EditorCall::ExecCommand {
            name: name.to_string(),
        })?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Every command the engine knows, in registration order
    pub fn commands(&self) -> Result<Vec<Command>> {
        let value = self.core.call(EditorCall::Commands)?;
        let by_name: Map<String, Value> = decode("editor.commands", value)?;
        by_name
            .into_iter()
            .map(|(name, descriptor)| {
                let mut command: Command = decode("editor.commands", descriptor)?;
                if command.name.is_empty() {
                    command.name = name;
                }
                Ok(command)
            })
            .collect()
    }

    /// Current theme alias
    pub fn theme(&self) -> Result<String> {
        decode("editor.getTheme", self.core.call(EditorCall::GetTheme)?)
    }

    pub fn set_theme(&self, alias: &str) -> Result<()> {
        self.core.call(EditorCall::SetTheme {
            theme: alias.to_string(),
        })?;
        Ok(())
    }

    pub fn option(&self, name: &str) -> Result<Value> {
        self.core.call(EditorCall::GetOption {
            name: name.to_string(),
        })
    }

    pub fn set_option(&self, name: &str, value: Value) -> Result<()> {
        if name.is_empty() {
            return Err(BridgeError::call("editor.setOption", "option name is empty"));
        }
        self.core.call(EditorCall::SetOption {
            name: name.to_string(),
            value,
        })?;
        Ok(())
    }

    pub fn read_only(&self) -> Result<bool> {
        decode("editor.getReadOnly", self.core.call(EditorCall::GetReadOnly)?)
    }

    pub fn set_read_only(&self, read_only: bool) -> Result<()> {
        self.core.call(EditorCall::SetReadOnly { read_only })?;
        Ok(())
    }

    pub fn font_size(&self) -> Result<u32> {
        let value = self.core.call(EditorCall::GetFontSize)?;
        decode_count("editor.getFontSize", &value)
    }

    pub fn set_font_size(&self, size: u32) -> Result<()> {
        self.core.call(EditorCall::SetFontSize { size })?;
        Ok(())
    }

    pub fn focus(&self) -> Result<()> {
        self.core.call(EditorCall::Focus)?;
        Ok(())
    }

    pub fn blur(&self) -> Result<()> {
        self.core.call(EditorCall::Blur)?;
        Ok(())
    }

    pub fn is_focused(&self) -> Result<bool> {
        decode("editor.isFocused", self.core.call(EditorCall::IsFocused)?)
    }

    /// Paste `text` as if it came from the clipboard (fires the paste event)
    pub fn on_paste(&self, text: &str) -> Result<()> {
        self.core.call(EditorCall::OnPaste {
            text: text.to_string(),
        })?;
        Ok(())
    }
}
