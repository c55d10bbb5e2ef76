// ABOUTME: Proxy over the session's undo manager

use super::ProxyCore;
use super::marshal::decode;
use crate::error::Result;
use crate::protocol::UndoManagerCall;

#[derive(Debug, Clone)]
pub struct UndoManagerProxy {
    core: ProxyCore,
}

impl UndoManagerProxy {
    pub(crate) fn from_core(core: ProxyCore) -> Self {
        Self { core }
    }

    pub fn epoch(&self) -> u64 {
        self.core.epoch()
    }

    pub fn is_valid(&self) -> bool {
        self.core.is_valid()
    }

    pub fn has_undo(&self) -> Result<bool> {
        decode("undoManager.hasUndo", self.core.call(UndoManagerCall::HasUndo)?)
    }

    pub fn has_redo(&self) -> Result<bool> {
        decode("undoManager.hasRedo", self.core.call(UndoManagerCall::HasRedo)?)
    }

    /// Undo the last change; does nothing when the history is empty
    pub fn undo(&self) -> Result<()> {
        if self.has_undo()? {
            self.core.call(UndoManagerCall::Undo)?;
        }
        Ok(())
    }

    /// Redo the last undone change; does nothing when there is none
    pub fn redo(&self) -> Result<()> {
        if self.has_redo()? {
            self.core.call(UndoManagerCall::Redo)?;
        }
        Ok(())
    }

    /// Forget all history
    pub fn reset(&self) -> Result<()> {
        self.core.call(UndoManagerCall::Reset)?;
        Ok(())
    }

    pub fn mark_clean(&self) -> Result<()> {
        self.core.call(UndoManagerCall::MarkClean)?;
        Ok(())
    }

    /// True if nothing changed since the last [`mark_clean`](Self::mark_clean)
    pub fn is_clean(&self) -> Result<bool> {
        decode("undoManager.isClean", self.core.call(UndoManagerCall::IsClean)?)
    }
}
