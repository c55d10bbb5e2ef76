// ABOUTME: Document positions and ranges in row/column coordinates
// ABOUTME: Converted to and from the engine's literal object form on every crossing

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A zero-based (row, column) location in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Engine literal: `{"row": r, "column": c}`
    pub fn to_remote(self) -> Value {
        serde_json::json!({ "row": self.row, "column": self.column })
    }

    /// Decode the engine literal form
    pub fn from_remote(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

/// A span between two positions; `start` is not required to precede `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub const fn from_coords(start_row: u32, start_column: u32, end_row: u32, end_column: u32) -> Self {
        Self {
            start: Position::new(start_row, start_column),
            end: Position::new(end_row, end_column),
        }
    }

    /// Collapsed range at a single position
    pub const fn caret(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Same range with `start <= end`
    pub fn ordered(self) -> Self {
        if self.end < self.start {
            Self {
                start: self.end,
                end: self.start,
            }
        } else {
            self
        }
    }

    /// Engine literal: `{"start": {..}, "end": {..}}`
    pub fn to_remote(self) -> Value {
        serde_json::json!({
            "start": self.start.to_remote(),
            "end": self.end.to_remote(),
        })
    }

    /// Decode the engine literal form
    pub fn from_remote(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}
