// ABOUTME: Rope-backed document with a single anchor/head selection
// ABOUTME: Converts between row/column positions and char offsets and keeps a snapshot undo history

use acebridge_types::{Position, Range};
use ropey::Rope;

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    text: Rope,
    anchor: usize,
    head: usize,
}

/// Document text plus selection, addressed in char offsets
#[derive(Debug, Clone, Default)]
pub struct Document {
    rope: Rope,
    anchor: usize,
    head: usize,
}

impl Document {
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Rows, counting the empty row after a trailing newline
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Row text without its line break; empty past the end
    pub fn line(&self, row: usize) -> String {
        if row >= self.rope.len_lines() {
            return String::new();
        }
        let line = self.rope.line(row);
        let len = self.line_len(row);
        line.slice(..len).to_string()
    }

    fn line_len(&self, row: usize) -> usize {
        let line = self.rope.line(row);
        let mut len = line.len_chars();
        while len > 0 && matches!(line.char(len - 1), '\n' | '\r') {
            len -= 1;
        }
        len
    }

    /// Char offset of `position`, clamped into the document
    pub fn offset_of(&self, position: Position) -> usize {
        let last_row = self.rope.len_lines().saturating_sub(1);
        let row = (position.row as usize).min(last_row);
        let column = (position.column as usize).min(self.line_len(row));
        self.rope.line_to_char(row) + column
    }

    pub fn position_of(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let row = self.rope.char_to_line(offset);
        let column = offset - self.rope.line_to_char(row);
        Position::new(row as u32, column as u32)
    }

    pub fn range_of(&self, start: usize, end: usize) -> Range {
        Range::new(self.position_of(start), self.position_of(end))
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.rope.len_chars());
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }

    pub fn byte_to_char(&self, byte: usize) -> usize {
        self.rope.byte_to_char(byte)
    }

    // Selection

    /// Ordered selection bounds
    pub fn selection(&self) -> (usize, usize) {
        (self.anchor.min(self.head), self.anchor.max(self.head))
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.head
    }

    pub fn select(&mut self, anchor: usize, head: usize) {
        let len = self.rope.len_chars();
        self.anchor = anchor.min(len);
        self.head = head.min(len);
    }

    pub fn collapse_to(&mut self, offset: usize) {
        self.select(offset, offset);
    }

    pub fn selected_text(&self) -> String {
        let (start, end) = self.selection();
        self.slice(start, end)
    }

    // Edits

    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.collapse_to(0);
    }

    /// Replace `start..end` with `text`; returns the offset after the new text
    pub fn splice(&mut self, start: usize, end: usize, text: &str) -> usize {
        let len = self.rope.len_chars();
        let end = end.min(len);
        let start = start.min(end);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        let after = start + text.chars().count();
        self.collapse_to(after);
        after
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.rope.clone(),
            anchor: self.anchor,
            head: self.head,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.rope = snapshot.text;
        self.anchor = snapshot.anchor;
        self.head = snapshot.head;
    }
}

/// Whole-document snapshots, enough for an engine used in tests
#[derive(Debug, Default)]
pub struct UndoHistory {
    done: Vec<Snapshot>,
    undone: Vec<Snapshot>,
    clean_at: Option<usize>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self {
            clean_at: Some(0),
            ..Default::default()
        }
    }

    /// Remember `document` as it is before an edit
    pub fn record(&mut self, document: &Document) {
        self.done.push(document.snapshot());
        self.undone.clear();
    }

    pub fn has_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn has_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo(&mut self, document: &mut Document) -> bool {
        let Some(previous) = self.done.pop() else {
            return false;
        };
        self.undone.push(document.snapshot());
        document.restore(previous);
        true
    }

    pub fn redo(&mut self, document: &mut Document) -> bool {
        let Some(next) = self.undone.pop() else {
            return false;
        };
        self.done.push(document.snapshot());
        document.restore(next);
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn mark_clean(&mut self) {
        self.clean_at = Some(self.done.len());
    }

    pub fn is_clean(&self) -> bool {
        self.clean_at == Some(self.done.len())
    }
}
