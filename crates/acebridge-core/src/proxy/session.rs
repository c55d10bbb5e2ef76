// ABOUTME: Proxy over the engine's edit session (the document model)
// ABOUTME: Text access by row and range, mode and the per-document view settings

use acebridge_types::{Position, Range};
use serde_json::Value;

use super::marshal::{decode, decode_count, decode_position};
use super::{ProxyCore, UndoManagerProxy};
use crate::error::Result;
use crate::protocol::SessionCall;

#[derive(Debug, Clone)]
pub struct SessionProxy {
    core: ProxyCore,
}

impl SessionProxy {
    pub(crate) fn from_core(core: ProxyCore) -> Self {
        Self { core }
    }

    pub fn epoch(&self) -> u64 {
        self.core.epoch()
    }

    pub fn is_valid(&self) -> bool {
        self.core.is_valid()
    }

    pub fn undo_manager(&self) -> UndoManagerProxy {
        UndoManagerProxy::from_core(self.core.clone())
    }

    pub fn value(&self) -> Result<String> {
        decode("session.getValue", self.core.call(SessionCall::GetValue)?)
    }

    /// Replace the document and start a fresh undo history
    pub fn set_value(&self, text: &str) -> Result<()> {
        self.core.call(SessionCall::SetValue {
            value: text.to_string(),
        })?;
        Ok(())
    }

    /// Current mode alias
    pub fn mode(&self) -> Result<String> {
        decode("session.getMode", self.core.call(SessionCall::GetMode)?)
    }

    pub fn set_mode(&self, alias: &str) -> Result<()> {
        self.core.call(SessionCall::SetMode {
            mode: alias.to_string(),
        })?;
        Ok(())
    }

    /// Number of rows in the document
    pub fn length(&self) -> Result<u32> {
        let value = self.core.call(SessionCall::GetLength)?;
        decode_count("session.getLength", &value)
    }

    pub fn line(&self, row: u32) -> Result<String> {
        decode("session.getLine", self.core.call(SessionCall::GetLine { row })?)
    }

    /// Rows `first_row..=last_row`
    pub fn lines(&self, first_row: u32, last_row: u32) -> Result<Vec<String>> {
        decode(
            "session.getLines",
            self.core.call(SessionCall::GetLines {
                first_row,
                last_row,
            })?,
        )
    }

    pub fn text_range(&self, range: Range) -> Result<String> {
        decode(
            "session.getTextRange",
            self.core.call(SessionCall::GetTextRange {
                range: range.to_remote(),
            })?,
        )
    }

    /// Insert at `position`; returns the position after the inserted text
    pub fn insert(&self, position: Position, text: &str) -> Result<Position> {
        let value = self.core.call(SessionCall::Insert {
            position: position.to_remote(),
            text: text.to_string(),
        })?;
        decode_position("session.insert", &value)
    }

    /// Delete `range`; returns where the removed text started
    pub fn remove(&self, range: Range) -> Result<Position> {
        let value = self.core.call(SessionCall::Remove {
            range: range.to_remote(),
        })?;
        decode_position("session.remove", &value)
    }

    /// Replace `range` with `text`; returns the end of the new text
    pub fn replace(&self, range: Range, text: &str) -> Result<Position> {
        let value = self.core.call(SessionCall::Replace {
            range: range.to_remote(),
            text: text.to_string(),
        })?;
        decode_position("session.replace", &value)
    }

    pub fn tab_size(&self) -> Result<u32> {
        let value = self.core.call(SessionCall::GetTabSize)?;
        decode_count("session.getTabSize", &value)
    }

    pub fn set_tab_size(&self, size: u32) -> Result<()> {
        self.core.call(SessionCall::SetTabSize { size })?;
        Ok(())
    }

    pub fn use_soft_tabs(&self) -> Result<bool> {
        decode(
            "session.getUseSoftTabs",
            self.core.call(SessionCall::GetUseSoftTabs)?,
        )
    }

    pub fn set_use_soft_tabs(&self, enabled: bool) -> Result<()> {
        self.core.call(SessionCall::SetUseSoftTabs { enabled })?;
        Ok(())
    }

    pub fn use_wrap_mode(&self) -> Result<bool> {
        decode(
            "session.getUseWrapMode",
            self.core.call(SessionCall::GetUseWrapMode)?,
        )
    }

    pub fn set_use_wrap_mode(&self, enabled: bool) -> Result<()> {
        self.core.call(SessionCall::SetUseWrapMode { enabled })?;
        Ok(())
    }

    pub fn scroll_top(&self) -> Result<f64> {
        decode("session.getScrollTop", self.core.call(SessionCall::GetScrollTop)?)
    }

    pub fn set_scroll_top(&self, offset: f64) -> Result<()> {
        self.core.call(SessionCall::SetScrollTop { offset })?;
        Ok(())
    }

    pub fn scroll_left(&self) -> Result<f64> {
        decode(
            "session.getScrollLeft",
            self.core.call(SessionCall::GetScrollLeft)?,
        )
    }

    pub fn set_scroll_left(&self, offset: f64) -> Result<()> {
        self.core.call(SessionCall::SetScrollLeft { offset })?;
        Ok(())
    }

    pub fn overwrite(&self) -> Result<bool> {
        decode("session.getOverwrite", self.core.call(SessionCall::GetOverwrite)?)
    }

    pub fn set_overwrite(&self, enabled: bool) -> Result<()> {
        self.core.call(SessionCall::SetOverwrite { enabled })?;
        Ok(())
    }

    pub fn option(&self, name: &str) -> Result<Value> {
        self.core.call(SessionCall::GetOption {
            name: name.to_string(),
        })
    }

    pub fn set_option(&self, name: &str, value: Value) -> Result<()> {
        self.core.call(SessionCall::SetOption {
            name: name.to_string(),
            value,
        })?;
        Ok(())
    }
}
