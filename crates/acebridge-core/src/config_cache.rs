// ABOUTME: Buffer for settings made before the engine exists
// ABOUTME: Holds text, mode, theme and ordered options until the ready transition consumes them

use acebridge_logging::error;
use acebridge_types::{Mode, Theme};
use indexmap::IndexMap;
use serde_json::Value;

/// Settings waiting for the engine.
///
/// Options keep the position of their first write; a later write to the same
/// key replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingConfiguration {
    pub text: Option<String>,
    pub mode: Option<Mode>,
    pub theme: Option<Theme>,
    pub options: IndexMap<String, Value>,
}

impl PendingConfiguration {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.mode.is_none() && self.theme.is_none() && self.options.is_empty()
    }
}

/// Write-only cache in front of a not-yet-ready engine.
#[derive(Debug)]
pub struct ConfigurationCache {
    pending: Option<PendingConfiguration>,
    flushing: bool,
}

impl Default for ConfigurationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationCache {
    pub fn new() -> Self {
        Self {
            pending: Some(PendingConfiguration::default()),
            flushing: false,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        if let Some(pending) = self.writable("text") {
            pending.text = Some(text.into());
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if let Some(pending) = self.writable("mode") {
            pending.mode = Some(mode);
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if let Some(pending) = self.writable("theme") {
            pending.theme = Some(theme);
        }
    }

    pub fn set_option(&mut self, key: impl Into<String>, value: Value) {
        if let Some(pending) = self.writable("option") {
            pending.options.insert(key.into(), value);
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.pending.as_ref()?.text.as_deref()
    }

    pub fn mode(&self) -> Option<Mode> {
        self.pending.as_ref()?.mode
    }

    pub fn theme(&self) -> Option<Theme> {
        self.pending.as_ref()?.theme
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.pending.as_ref()?.options.get(key)
    }

    pub fn pending(&self) -> Option<&PendingConfiguration> {
        self.pending.as_ref()
    }

    pub fn is_flushing(&self) -> bool {
        self.flushing
    }

    /// Hand the pending settings to the flush. Yields `None` if already taken.
    pub(crate) fn begin_flush(&mut self) -> Option<PendingConfiguration> {
        let pending = self.pending.take()?;
        self.flushing = true;
        Some(pending)
    }

    /// The flush applied everything; the cache stays empty while ready
    pub(crate) fn finish_flush(&mut self) {
        debug_assert!(self.flushing, "finish_flush without begin_flush");
        self.flushing = false;
    }

    /// The flush failed part way; keep the settings for the next load
    pub(crate) fn abort_flush(&mut self, pending: PendingConfiguration) {
        self.flushing = false;
        self.pending = Some(pending);
    }

    /// Reopen the cache after the engine went away, seeded with what it last showed
    pub(crate) fn reopen(&mut self, seed: PendingConfiguration) {
        // Never got ready: the existing buffer is newer than any seed
        if self.pending.is_none() {
            self.pending = Some(seed);
        }
    }

    fn writable(&mut self, what: &'static str) -> Option<&mut PendingConfiguration> {
        if self.flushing {
            debug_assert!(false, "configuration {what} written during flush");
            error!(setting = what, "Configuration written while the cache is being flushed; dropped");
            return None;
        }
        Some(self.pending.get_or_insert_with(PendingConfiguration::default))
    }
}
