// ABOUTME: Search configuration passed to the engine's find/replace operations
// ABOUTME: Enumerated option set converted to the engine's search literal

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::position::Range;

/// Options for a single find or replace operation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Text or pattern to look for; `None` reuses the engine's last needle
    pub needle: Option<String>,
    /// Search towards the start of the document
    pub backwards: bool,
    /// Continue from the other end when the document edge is reached
    pub wrap: bool,
    pub case_sensitive: bool,
    pub whole_word: bool,
    /// Interpret the needle as a regular expression
    pub regex: bool,
    /// Do not match at the current selection
    pub skip_current: bool,
    /// Restrict the search to this range
    pub range: Option<Range>,
}

impl SearchOptions {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: Some(needle.into()),
            wrap: true,
            ..Default::default()
        }
    }

    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    pub fn whole_word(mut self, enabled: bool) -> Self {
        self.whole_word = enabled;
        self
    }

    pub fn regex(mut self, enabled: bool) -> Self {
        self.regex = enabled;
        self
    }

    pub fn wrap(mut self, enabled: bool) -> Self {
        self.wrap = enabled;
        self
    }

    pub fn backwards(mut self, enabled: bool) -> Self {
        self.backwards = enabled;
        self
    }

    pub fn skip_current(mut self, enabled: bool) -> Self {
        self.skip_current = enabled;
        self
    }

    pub fn within(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    /// Same options with a different needle
    pub fn with_needle(&self, needle: impl Into<String>) -> Self {
        Self {
            needle: Some(needle.into()),
            ..self.clone()
        }
    }

    /// Engine search literal; the needle is only included when set
    pub fn to_remote(&self) -> Value {
        let mut object = Map::new();
        if let Some(needle) = &self.needle {
            object.insert("needle".into(), Value::String(needle.clone()));
        }
        object.insert("backwards".into(), Value::Bool(self.backwards));
        object.insert("wrap".into(), Value::Bool(self.wrap));
        object.insert("caseSensitive".into(), Value::Bool(self.case_sensitive));
        object.insert("wholeWord".into(), Value::Bool(self.whole_word));
        object.insert("regExp".into(), Value::Bool(self.regex));
        object.insert("skipCurrent".into(), Value::Bool(self.skip_current));
        if let Some(range) = self.range {
            object.insert("range".into(), range.to_remote());
        }
        Value::Object(object)
    }
}
