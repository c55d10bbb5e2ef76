// ABOUTME: Find and replace over the test document using the regex crate
// ABOUTME: Reads the engine's search literal and applies wrap, direction and skip-current rules

use acebridge_types::Range;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::document::Document;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no search needle given and no previous search")]
    NoNeedle,

    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A search literal as the engine receives it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSettings {
    pub needle: Option<String>,
    pub backwards: bool,
    pub wrap: bool,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regex: bool,
    pub skip_current: bool,
    pub range: Option<Range>,
}

fn flag(options: &Value, name: &str) -> bool {
    options.get(name).and_then(Value::as_bool).unwrap_or(false)
}

impl SearchSettings {
    pub fn from_remote(options: &Value) -> Self {
        Self {
            needle: options.get("needle").and_then(Value::as_str).map(str::to_string),
            backwards: flag(options, "backwards"),
            wrap: flag(options, "wrap"),
            case_sensitive: flag(options, "caseSensitive"),
            whole_word: flag(options, "wholeWord"),
            regex: flag(options, "regExp"),
            skip_current: flag(options, "skipCurrent"),
            range: options.get("range").and_then(|range| Range::from_remote(range).ok()),
        }
    }

    /// Fall back to the needle of the previous search
    pub fn or_needle_from(mut self, previous: Option<&SearchSettings>) -> Self {
        if self.needle.is_none() {
            self.needle = previous.and_then(|previous| previous.needle.clone());
        }
        self
    }

    pub fn pattern(&self) -> Result<Regex, SearchError> {
        let needle = self.needle.as_deref().ok_or(SearchError::NoNeedle)?;
        let mut pattern = if self.regex {
            needle.to_string()
        } else {
            regex::escape(needle)
        };
        if self.whole_word {
            pattern = format!(r"\b(?:{pattern})\b");
        }
        if !self.case_sensitive {
            pattern = format!("(?i){pattern}");
        }
        Ok(Regex::new(&pattern)?)
    }

    /// Every non-empty match as char offsets, in document order
    pub fn matches(&self, document: &Document) -> Result<Vec<(usize, usize)>, SearchError> {
        let regex = self.pattern()?;
        let text = document.text();
        let bounds = self.range.map(|range| {
            let range = range.ordered();
            (document.offset_of(range.start), document.offset_of(range.end))
        });

        Ok(regex
            .find_iter(&text)
            .filter(|found| !found.is_empty())
            .map(|found| (document.byte_to_char(found.start()), document.byte_to_char(found.end())))
            .filter(|(start, end)| bounds.is_none_or(|(low, high)| *start >= low && *end <= high))
            .collect())
    }

    /// The match a find would select, starting from the current selection
    pub fn locate(&self, document: &Document) -> Result<Option<(usize, usize)>, SearchError> {
        let all = self.matches(document)?;
        let (selection_start, selection_end) = document.selection();

        let found = if self.backwards {
            let from = if self.skip_current { selection_start } else { selection_end };
            all.iter()
                .rev()
                .find(|(_, end)| *end <= from)
                .or_else(|| if self.wrap { all.last() } else { None })
        } else {
            let from = if self.skip_current { selection_end } else { selection_start };
            all.iter()
                .find(|(start, _)| *start >= from)
                .or_else(|| if self.wrap { all.first() } else { None })
        };
        Ok(found.copied())
    }

    /// Replacement text for the match `matched`; capture groups expand in regex mode
    pub fn expand(&self, matched: &str, replacement: &str) -> Result<String, SearchError> {
        if !self.regex {
            return Ok(replacement.to_string());
        }
        Ok(self.pattern()?.replace(matched, replacement).into_owned())
    }
}
