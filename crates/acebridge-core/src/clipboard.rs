// ABOUTME: Clipboard bridge between the sandboxed engine and the host clipboard
// ABOUTME: Host-initiated copy/cut/paste plus the engine's intercepted copy/paste upcalls

use std::cell::RefCell;
use std::rc::Rc;

use acebridge_logging::{debug, trace};
use acebridge_types::normalize_line_endings;

use crate::error::Result;
use crate::protocol::Direction;
use crate::proxy::EditorProxy;

/// Plain-text access to the host clipboard
pub trait HostClipboard {
    fn read_text(&self) -> Option<String>;
    fn write_text(&self, text: &str);
}

/// Process-local clipboard, for hosts without a system clipboard and for tests
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: RefCell<Option<String>>,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(text.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl HostClipboard for MemoryClipboard {
    fn read_text(&self) -> Option<String> {
        self.contents()
    }

    fn write_text(&self, text: &str) {
        *self.contents.borrow_mut() = Some(text.to_string());
    }
}

/// Moves text between the editor selection and the host clipboard.
#[derive(Clone)]
pub struct ClipboardBridge {
    clipboard: Rc<dyn HostClipboard>,
}

impl ClipboardBridge {
    pub fn new(clipboard: Rc<dyn HostClipboard>) -> Self {
        Self { clipboard }
    }

    pub fn clipboard(&self) -> &Rc<dyn HostClipboard> {
        &self.clipboard
    }

    /// Copy the selection. The clipboard is left alone when nothing is selected.
    pub fn copy(&self, editor: &EditorProxy) -> Result<bool> {
        let text = editor.copy_text()?;
        if text.is_empty() {
            trace!("Copy skipped, selection is empty");
            return Ok(false);
        }
        self.clipboard.write_text(&text);
        debug!(chars = text.chars().count(), "Copied selection to host clipboard");
        Ok(true)
    }

    /// Copy, then delete the selection if the copy happened
    pub fn cut(&self, editor: &EditorProxy) -> Result<bool> {
        if !self.copy(editor)? {
            return Ok(false);
        }
        editor.remove(Direction::Left)?;
        Ok(true)
    }

    /// Paste the clipboard text at the cursor, replacing any selection.
    /// Goes through the engine's paste path so its `paste` event fires.
    pub fn paste(&self, editor: &EditorProxy) -> Result<bool> {
        match self.clipboard.read_text() {
            Some(text) if !text.is_empty() => {
                let text = normalize_line_endings(&text);
                editor.on_paste(&text)?;
                debug!(chars = text.chars().count(), "Pasted host clipboard");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Upcall: the engine intercepted a copy
    pub(crate) fn on_engine_copy(&self, data: &str) {
        trace!(chars = data.chars().count(), "Engine copy intercepted");
        self.clipboard.write_text(data);
    }

    /// Upcall: the engine intercepted a paste
    pub(crate) fn on_engine_paste(&self) -> Option<String> {
        let text = self
            .clipboard
            .read_text()
            .map(|text| normalize_line_endings(&text).into_owned());
        trace!(available = text.is_some(), "Engine paste intercepted");
        text
    }
}

impl std::fmt::Debug for ClipboardBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardBridge").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let clipboard = MemoryClipboard::default();
        assert_eq!(clipboard.read_text(), None);
        clipboard.write_text("hello");
        assert_eq!(clipboard.contents().as_deref(), Some("hello"));
    }

    #[test]
    fn test_upcalls_go_to_host_clipboard() {
        let clipboard = Rc::new(MemoryClipboard::with_text("before"));
        let bridge = ClipboardBridge::new(clipboard.clone());

        assert_eq!(bridge.on_engine_paste().as_deref(), Some("before"));
        bridge.on_engine_copy("after");
        assert_eq!(clipboard.contents().as_deref(), Some("after"));
    }

    #[test]
    fn test_engine_paste_gets_normalized_text() {
        let clipboard = Rc::new(MemoryClipboard::with_text("one\r\ntwo\r"));
        let bridge = ClipboardBridge::new(clipboard);
        assert_eq!(bridge.on_engine_paste().as_deref(), Some("one\ntwo"));
    }
}
