// ABOUTME: The host-facing editor control
// ABOUTME: Routes every call to the live engine when ready and to the configuration cache otherwise

use std::rc::Rc;

use acebridge_events::{ControlEvent, EventHub, SubscriptionId};
use acebridge_logging::{debug, error, info, timed, warn};
use acebridge_types::{AliasKind, Command, Mode, Range, SearchOptions, Theme, normalize_line_endings};
use indexmap::IndexMap;
use serde_json::Value;

use crate::clipboard::{ClipboardBridge, HostClipboard};
use crate::config::{ConfigError, ControlConfig};
use crate::config_cache::{ConfigurationCache, PendingConfiguration};
use crate::dispatch::{ControlSender, JobQueue};
use crate::engine::{EngineSession, RenderSurface};
use crate::error::{BridgeError, Result};
use crate::event_bridge;
use crate::protocol::{CursorPlacement, Direction};
use crate::proxy::{EditorProxy, SessionProxy, UndoManagerProxy};
use crate::readiness::{Completion, Readiness, ReadinessController};

/// Engine option carrying the read-only flag
pub const READ_ONLY_OPTION: &str = "readOnly";
const MODE_OPTION: &str = "mode";
const THEME_OPTION: &str = "theme";
const SET_OPTION_METHOD: &str = "editor.setOption";

/// A flush step failed; `option` names the pending option the engine rejected
struct FlushFailure {
    error: BridgeError,
    option: Option<String>,
}

impl From<BridgeError> for FlushFailure {
    fn from(error: BridgeError) -> Self {
        Self { error, option: None }
    }
}

/// Alias carried by a generic `mode`/`theme` option write
fn alias_argument(kind: AliasKind, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BridgeError::UnknownAlias {
            kind,
            alias: value.to_string(),
        })
}

struct Proxies {
    editor: EditorProxy,
    session: SessionProxy,
    undo: UndoManagerProxy,
}

/// An embedded editor engine behind a typed, always-callable API.
///
/// Settings made before the engine is ready are cached and applied, in a fixed
/// order, the moment it becomes ready. The control is bound to the thread that
/// created it; use [`CodeEditor::sender`] to reach it from elsewhere.
pub struct CodeEditor {
    readiness: ReadinessController,
    cache: ConfigurationCache,
    hub: EventHub,
    clipboard: ClipboardBridge,
    proxies: Option<Proxies>,
    // Options applied while ready, carried over a reload
    live_options: IndexMap<String, Value>,
    sender: ControlSender,
    jobs: JobQueue,
}

impl CodeEditor {
    /// Control with the default configuration
    pub fn new(surface: impl RenderSurface + 'static, clipboard: Rc<dyn HostClipboard>) -> Self {
        Self::build(Box::new(surface), clipboard, &ControlConfig::default(), Mode::default(), Theme::default())
    }

    /// Control that shows `text` once loaded
    pub fn with_text(
        surface: impl RenderSurface + 'static,
        clipboard: Rc<dyn HostClipboard>,
        text: &str,
    ) -> Self {
        let mut editor = Self::new(surface, clipboard);
        editor.cache.set_text(normalize_line_endings(text).into_owned());
        editor
    }

    pub fn with_config(
        surface: impl RenderSurface + 'static,
        clipboard: Rc<dyn HostClipboard>,
        config: &ControlConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let mode = config.resolved_mode()?;
        let theme = config.resolved_theme()?;
        Ok(Self::build(Box::new(surface), clipboard, config, mode, theme))
    }

    fn build(
        surface: Box<dyn RenderSurface>,
        clipboard: Rc<dyn HostClipboard>,
        config: &ControlConfig,
        mode: Mode,
        theme: Theme,
    ) -> Self {
        let readiness = ReadinessController::new(surface, config.bootstrap_resource())
            .with_slow_threshold(config.slow_bootstrap_threshold());

        let mut cache = ConfigurationCache::new();
        if let Some(text) = &config.initial_text {
            cache.set_text(normalize_line_endings(text).into_owned());
        }
        cache.set_mode(mode);
        cache.set_theme(theme);
        if config.read_only {
            cache.set_option(READ_ONLY_OPTION, Value::Bool(true));
        }
        for (name, value) in &config.options {
            let alias = value.as_str().unwrap_or_default();
            match name.as_str() {
                MODE_OPTION => cache.set_mode(Mode::from_alias(alias).unwrap_or(mode)),
                THEME_OPTION => cache.set_theme(Theme::from_alias(alias).unwrap_or(theme)),
                _ => cache.set_option(name.clone(), value.clone()),
            }
        }

        let (sender, rx) = ControlSender::channel();
        Self {
            readiness,
            cache,
            hub: EventHub::new(),
            clipboard: ClipboardBridge::new(clipboard),
            proxies: None,
            live_options: IndexMap::new(),
            sender,
            jobs: JobQueue::new(rx),
        }
    }

    // Lifecycle

    /// Start bootstrapping the engine; completion is observed by `pump` or `settle`
    pub fn load(&mut self) -> Result<()> {
        self.readiness.begin_load()
    }

    /// Throw away the engine (or the load in progress) and bootstrap a new one.
    ///
    /// Text, mode, theme and options shown by a ready engine are carried over.
    /// Every proxy obtained before the reload fails with `StaleHandle`.
    pub fn reload(&mut self) -> Result<()> {
        info!(from = %self.readiness(), "Reloading engine");
        self.retire_engine();
        self.readiness.begin_load()
    }

    /// Tear the engine down and return to `Unloaded`
    pub fn unload(&mut self) {
        self.retire_engine();
    }

    /// Finish a completed bootstrap and run queued cross-thread jobs. Never blocks.
    pub fn pump(&mut self) -> Readiness {
        if let Some(completion) = self.readiness.poll() {
            self.complete_bootstrap(completion);
        }
        for job in self.jobs.drain() {
            job(self);
        }
        self.readiness()
    }

    /// Wait for the load in progress, if any, then pump
    pub async fn settle(&mut self) -> Readiness {
        if let Some(completion) = self.readiness.wait().await {
            self.complete_bootstrap(completion);
        }
        self.pump()
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness.state()
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.state() == Readiness::Ready
    }

    pub fn epoch(&self) -> u64 {
        self.readiness.epoch()
    }

    /// Why the last bootstrap failed
    pub fn last_error(&self) -> Option<&str> {
        self.readiness.last_error()
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: FnMut(&ControlEvent) + 'static,
    {
        self.hub.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.hub.unsubscribe(id)
    }

    /// Handle for queueing work onto this control from other threads
    pub fn sender(&self) -> ControlSender {
        self.sender.clone()
    }

    /// Settings still waiting for the engine
    pub fn pending(&self) -> Option<&PendingConfiguration> {
        self.cache.pending()
    }

    fn complete_bootstrap(&mut self, completion: Completion) {
        let Completion { epoch, result } = completion;
        let outcome = result
            .map_err(BridgeError::LoadFailure)
            .and_then(|session| self.activate(epoch, session));

        match outcome {
            Ok(()) => {
                self.readiness.mark_ready();
                self.hub.publish(&ControlEvent::Ready { epoch });
            }
            Err(failure) => {
                let message = match failure {
                    BridgeError::LoadFailure(message) => message,
                    other => other.to_string(),
                };
                error!(epoch, error = %message, "Engine bootstrap failed");
                self.proxies = None;
                self.live_options.clear();
                self.readiness.mark_failed(&message);
                self.hub.publish(&ControlEvent::LoadFailed {
                    epoch,
                    error: message,
                });
            }
        }
    }

    fn activate(&mut self, epoch: u64, session: Rc<dyn EngineSession>) -> Result<()> {
        let handle = self.readiness.attach(epoch, session);
        event_bridge::install(&handle, &self.hub, Rc::clone(self.clipboard.clipboard()))?;

        let editor = EditorProxy::new(self.readiness.link().clone(), epoch);
        let session = editor.session();
        let undo = session.undo_manager();
        self.proxies = Some(Proxies {
            editor,
            session,
            undo,
        });

        self.flush_pending()
    }

    fn flush_pending(&mut self) -> Result<()> {
        let Some(mut pending) = self.cache.begin_flush() else {
            return Ok(());
        };

        let applied = timed!("configuration_flush", { self.apply_pending(&pending) });
        match applied {
            Ok(()) => {
                self.cache.finish_flush();
                Ok(())
            }
            Err(FlushFailure { error, option }) => {
                // The rejected option would fail every later load as well
                if let Some(name) = option {
                    warn!(option = %name, error = %error, "Dropping pending option the engine rejected");
                    pending.options.shift_remove(&name);
                }
                self.cache.abort_flush(pending);
                Err(error)
            }
        }
    }

    /// Text, then mode, then theme, then options in first-write order
    fn apply_pending(&mut self, pending: &PendingConfiguration) -> std::result::Result<(), FlushFailure> {
        let proxies = self.proxies.as_ref().ok_or(BridgeError::NotReady)?;

        if let Some(text) = &pending.text {
            // Through the session so the loaded document has no undo history
            proxies.session.set_value(text)?;
        }
        if let Some(mode) = pending.mode {
            proxies.session.set_mode(mode.alias())?;
        }
        if let Some(theme) = pending.theme {
            proxies.editor.set_theme(theme.alias())?;
        }
        for (name, value) in &pending.options {
            proxies
                .editor
                .set_option(name, value.clone())
                .map_err(|error| FlushFailure {
                    error,
                    option: Some(name.clone()),
                })?;
        }

        self.live_options = pending.options.clone();
        debug!(
            text = pending.text.is_some(),
            mode = ?pending.mode,
            theme = ?pending.theme,
            options = pending.options.len(),
            "Applied pending configuration"
        );
        Ok(())
    }

    fn retire_engine(&mut self) {
        if self.is_ready() {
            let seed = self.snapshot_live();
            self.cache.reopen(seed);
        }
        self.proxies = None;
        self.live_options.clear();
        self.readiness.teardown();
    }

    fn snapshot_live(&self) -> PendingConfiguration {
        let mut seed = PendingConfiguration {
            options: self.live_options.clone(),
            ..Default::default()
        };
        let Some(proxies) = self.proxies.as_ref() else {
            return seed;
        };

        match proxies.editor.value() {
            Ok(text) => seed.text = Some(text),
            Err(failure) => warn!(error = %failure, "Could not read text before reload"),
        }
        match proxies.session.mode() {
            Ok(alias) => seed.mode = Mode::from_alias(&alias),
            Err(failure) => warn!(error = %failure, "Could not read mode before reload"),
        }
        match proxies.editor.theme() {
            Ok(alias) => seed.theme = Theme::from_alias(&alias),
            Err(failure) => warn!(error = %failure, "Could not read theme before reload"),
        }
        seed
    }

    fn live(&self) -> Option<&Proxies> {
        if self.is_ready() {
            self.proxies.as_ref()
        } else {
            None
        }
    }

    fn require_live(&self) -> Result<&Proxies> {
        self.live().ok_or(BridgeError::NotReady)
    }

    // Proxies

    pub fn editor(&self) -> Result<EditorProxy> {
        Ok(self.require_live()?.editor.clone())
    }

    pub fn session(&self) -> Result<SessionProxy> {
        Ok(self.require_live()?.session.clone())
    }

    pub fn undo_manager(&self) -> Result<UndoManagerProxy> {
        Ok(self.require_live()?.undo.clone())
    }

    // Text

    /// Document text; the cached text until the engine is ready
    pub fn text(&self) -> Result<String> {
        match self.live() {
            Some(proxies) => {
                let text = proxies.editor.value()?;
                Ok(normalize_line_endings(&text).into_owned())
            }
            None => Ok(self.cache.text().unwrap_or_default().to_string()),
        }
    }

    /// Replace the document text. Carriage returns are stripped first.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        let normalized = normalize_line_endings(text);
        match self.live() {
            Some(proxies) => proxies.editor.set_value(&normalized, CursorPlacement::End),
            None => {
                self.cache.set_text(normalized.into_owned());
                Ok(())
            }
        }
    }

    /// Character count of the document
    pub fn length(&self) -> Result<usize> {
        Ok(self.text()?.chars().count())
    }

    // Mode and theme

    /// Current mode; `None` if the engine reports a mode outside the table
    pub fn mode(&self) -> Result<Option<Mode>> {
        match self.live() {
            Some(proxies) => {
                let alias = proxies.session.mode()?;
                let mode = Mode::from_alias(&alias);
                if mode.is_none() {
                    debug!(alias = %alias, "Engine reports a mode outside the alias table");
                }
                Ok(mode)
            }
            None => Ok(self.cache.mode()),
        }
    }

    pub fn set_mode(&mut self, alias: &str) -> Result<()> {
        let mode = Mode::from_alias(alias).ok_or_else(|| BridgeError::UnknownAlias {
            kind: AliasKind::Mode,
            alias: alias.to_string(),
        })?;
        match self.live() {
            Some(proxies) => proxies.session.set_mode(mode.alias()),
            None => {
                self.cache.set_mode(mode);
                Ok(())
            }
        }
    }

    pub fn theme(&self) -> Result<Option<Theme>> {
        match self.live() {
            Some(proxies) => Ok(Theme::from_alias(&proxies.editor.theme()?)),
            None => Ok(self.cache.theme()),
        }
    }

    pub fn set_theme(&mut self, alias: &str) -> Result<()> {
        let theme = Theme::from_alias(alias).ok_or_else(|| BridgeError::UnknownAlias {
            kind: AliasKind::Theme,
            alias: alias.to_string(),
        })?;
        match self.live() {
            Some(proxies) => proxies.editor.set_theme(theme.alias()),
            None => {
                self.cache.set_theme(theme);
                Ok(())
            }
        }
    }

    // Options

    /// Current value of an engine option; `mode` and `theme` read as their aliases
    pub fn option(&self, key: &str) -> Result<Option<Value>> {
        match self.live() {
            Some(proxies) => {
                let value = proxies.editor.option(key)?;
                Ok((!value.is_null()).then_some(value))
            }
            None => Ok(match key {
                MODE_OPTION => self.cache.mode().map(|mode| Value::from(mode.alias())),
                THEME_OPTION => self.cache.theme().map(|theme| Value::from(theme.alias())),
                _ => self.cache.option(key).cloned(),
            }),
        }
    }

    /// Set an engine option. `mode` and `theme` are checked against the alias
    /// tables exactly like [`set_mode`](Self::set_mode) and [`set_theme`](Self::set_theme).
    pub fn set_option(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match key {
            "" => Err(BridgeError::call(SET_OPTION_METHOD, "option name is empty")),
            MODE_OPTION => self.set_mode(&alias_argument(AliasKind::Mode, &value)?),
            THEME_OPTION => self.set_theme(&alias_argument(AliasKind::Theme, &value)?),
            _ => match self.live() {
                Some(proxies) => {
                    proxies.editor.set_option(key, value.clone())?;
                    self.live_options.insert(key.to_string(), value);
                    Ok(())
                }
                None => {
                    self.cache.set_option(key, value);
                    Ok(())
                }
            },
        }
    }

    pub fn read_only(&self) -> Result<bool> {
        Ok(self
            .option(READ_ONLY_OPTION)?
            .and_then(|value| value.as_bool())
            .unwrap_or(false))
    }

    pub fn set_read_only(&mut self, read_only: bool) -> Result<()> {
        self.set_option(READ_ONLY_OPTION, read_only)
    }

    // History

    pub fn undo(&self) -> Result<()> {
        match self.live() {
            Some(proxies) => proxies.undo.undo(),
            None => Ok(()),
        }
    }

    pub fn redo(&self) -> Result<()> {
        match self.live() {
            Some(proxies) => proxies.undo.redo(),
            None => Ok(()),
        }
    }

    pub fn has_undo(&self) -> Result<bool> {
        match self.live() {
            Some(proxies) => proxies.undo.has_undo(),
            None => Ok(false),
        }
    }

    pub fn has_redo(&self) -> Result<bool> {
        match self.live() {
            Some(proxies) => proxies.undo.has_redo(),
            None => Ok(false),
        }
    }

    // Clipboard and selection

    /// Copy the selection to the host clipboard; `false` if nothing was selected
    pub fn copy(&self) -> Result<bool> {
        match self.live() {
            Some(proxies) => self.clipboard.copy(&proxies.editor),
            None => Ok(false),
        }
    }

    pub fn cut(&self) -> Result<bool> {
        match self.live() {
            Some(proxies) => self.clipboard.cut(&proxies.editor),
            None => Ok(false),
        }
    }

    pub fn paste(&self) -> Result<bool> {
        match self.live() {
            Some(proxies) => self.clipboard.paste(&proxies.editor),
            None => Ok(false),
        }
    }

    pub fn select_all(&self) -> Result<()> {
        self.require_live()?.editor.select_all()
    }

    pub fn selected_text(&self) -> Result<String> {
        self.require_live()?.editor.selected_text()
    }

    pub fn delete_next_char(&self) -> Result<()> {
        self.require_live()?.editor.remove(Direction::Right)
    }

    pub fn delete_previous_char(&self) -> Result<()> {
        self.require_live()?.editor.remove(Direction::Left)
    }

    // Search

    pub fn find(&self, needle: &str, options: &SearchOptions) -> Result<Option<Range>> {
        self.require_live()?.editor.find(needle, options)
    }

    pub fn find_next(&self, options: &SearchOptions) -> Result<Option<Range>> {
        self.require_live()?.editor.find_next(options)
    }

    pub fn find_previous(&self, options: &SearchOptions) -> Result<Option<Range>> {
        self.require_live()?.editor.find_previous(options)
    }

    pub fn find_all(&self, needle: &str, options: &SearchOptions) -> Result<u32> {
        self.require_live()?.editor.find_all(needle, options)
    }

    pub fn replace(&self, replacement: &str, options: &SearchOptions) -> Result<u32> {
        self.require_live()?.editor.replace(replacement, options)
    }

    pub fn replace_all(&self, replacement: &str, options: &SearchOptions) -> Result<u32> {
        self.require_live()?.editor.replace_all(replacement, options)
    }

    /// Find the next `needle` from the cursor and replace that one match
    pub fn find_and_replace(&self, needle: &str, replacement: &str) -> Result<u32> {
        let editor = &self.require_live()?.editor;
        let options = SearchOptions::new(needle);
        if editor.find(needle, &options)?.is_none() {
            return Ok(0);
        }
        editor.replace(replacement, &options)
    }

    // Commands

    /// Run a named engine command. Always `false` before the engine is ready.
    pub fn exec_command(&self, name: &str) -> Result<bool> {
        match self.live() {
            Some(proxies) => proxies.editor.exec_command(name),
            None => {
                debug!(command = %name, state = %self.readiness(), "Command ignored, engine not ready");
                Ok(false)
            }
        }
    }

    pub fn show_find(&self) -> Result<bool> {
        self.exec_command("find")
    }

    pub fn show_replace(&self) -> Result<bool> {
        self.exec_command("replace")
    }

    pub fn show_options(&self) -> Result<bool> {
        self.exec_command("showSettingsMenu")
    }

    pub fn command_list(&self) -> Result<Vec<Command>> {
        self.require_live()?.editor.commands()
    }
}

impl Drop for CodeEditor {
    fn drop(&mut self) {
        self.proxies = None;
        self.readiness.teardown();
    }
}

impl std::fmt::Debug for CodeEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeEditor")
            .field("readiness", &self.readiness)
            .field("pending", &self.cache.pending())
            .field("hub", &self.hub)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::engine::{BootstrapResource, BootstrapTicket};

    /// Surface whose bootstrap never finishes
    struct StalledSurface;

    impl RenderSurface for StalledSurface {
        fn load(&mut self, _resource: &BootstrapResource) -> BootstrapTicket {
            let (completer, ticket) = BootstrapTicket::channel();
            std::mem::forget(completer);
            ticket
        }
    }

    fn editor() -> CodeEditor {
        CodeEditor::new(StalledSurface, Rc::new(MemoryClipboard::default()))
    }

    #[test]
    fn test_cached_reads_before_ready() {
        let mut editor = editor();
        editor.load().unwrap();
        assert_eq!(editor.pump(), Readiness::Loading);

        editor.set_text("a\r\nb").unwrap();
        editor.set_mode("ace/mode/python").unwrap();
        editor.set_option("tabSize", 2).unwrap();

        assert_eq!(editor.text().unwrap(), "a\nb");
        assert_eq!(editor.length().unwrap(), 3);
        assert_eq!(editor.mode().unwrap(), Some(Mode::Python));
        assert_eq!(editor.theme().unwrap(), Some(Theme::Chrome));
        assert_eq!(editor.option("tabSize").unwrap(), Some(Value::from(2)));
        assert_eq!(editor.option("fontSize").unwrap(), None);
    }

    #[test]
    fn test_with_text_seeds_normalized_document() {
        let editor = CodeEditor::with_text(
            StalledSurface,
            Rc::new(MemoryClipboard::default()),
            "fn main() {\r\n}",
        );
        assert_eq!(editor.text().unwrap(), "fn main() {\n}");
        assert_eq!(editor.pending().and_then(|p| p.text.as_deref()), Some("fn main() {\n}"));
    }

    #[test]
    fn test_cached_mode_and_theme_options_use_alias_tables() {
        let mut editor = editor();
        assert!(matches!(
            editor.set_option("mode", "ace/mode/cobol"),
            Err(BridgeError::UnknownAlias {
                kind: AliasKind::Mode,
                ..
            })
        ));
        assert!(matches!(
            editor.set_option("", true),
            Err(BridgeError::BridgeCall { .. })
        ));

        editor.set_option("theme", "ace/theme/monokai").unwrap();
        assert_eq!(editor.theme().unwrap(), Some(Theme::Monokai));
        assert_eq!(
            editor.option("theme").unwrap(),
            Some(Value::from("ace/theme/monokai"))
        );
        assert_eq!(editor.option("mode").unwrap(), Some(Value::from("ace/mode/text")));
        assert!(!editor.pending().unwrap().options.contains_key("theme"));
    }

    #[test]
    fn test_unknown_alias_changes_nothing() {
        let mut editor = editor();
        assert_eq!(
            editor.set_mode("unknown/alias").unwrap_err(),
            BridgeError::UnknownAlias {
                kind: AliasKind::Mode,
                alias: "unknown/alias".into()
            }
        );
        assert!(matches!(
            editor.set_theme("ace/theme/neon"),
            Err(BridgeError::UnknownAlias {
                kind: AliasKind::Theme,
                ..
            })
        ));
        assert_eq!(editor.mode().unwrap(), Some(Mode::Text));
        assert_eq!(editor.theme().unwrap(), Some(Theme::Chrome));
    }

    #[test]
    fn test_live_operations_need_an_engine() {
        let editor = editor();
        assert_eq!(editor.editor().unwrap_err(), BridgeError::NotReady);
        assert_eq!(editor.selected_text().unwrap_err(), BridgeError::NotReady);
        assert_eq!(editor.command_list().unwrap_err(), BridgeError::NotReady);
        assert!(!editor.exec_command("nonexistentCommand").unwrap());
        assert!(!editor.copy().unwrap());
        assert!(!editor.has_undo().unwrap());
        assert!(editor.undo().is_ok());
    }

    #[test]
    fn test_read_only_is_cached_as_an_option() {
        let mut editor = editor();
        assert!(!editor.read_only().unwrap());
        editor.set_read_only(true).unwrap();
        assert!(editor.read_only().unwrap());
        assert_eq!(
            editor.pending().unwrap().options.get(READ_ONLY_OPTION),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn test_config_seeds_cache() {
        let config = ControlConfig {
            initial_text: Some("x\r\ny".into()),
            mode: "ace/mode/json".into(),
            read_only: true,
            options: [("fontSize".to_string(), Value::from(15))].into_iter().collect(),
            ..Default::default()
        };
        let editor = CodeEditor::with_config(StalledSurface, Rc::new(MemoryClipboard::default()), &config)
            .unwrap();

        let pending = editor.pending().unwrap();
        assert_eq!(pending.text.as_deref(), Some("x\ny"));
        assert_eq!(pending.mode, Some(Mode::Json));
        let keys: Vec<&str> = pending.options.keys().map(String::as_str).collect();
        assert_eq!(keys, vec![READ_ONLY_OPTION, "fontSize"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ControlConfig {
            theme: "ace/theme/neon".into(),
            ..Default::default()
        };
        assert!(matches!(
            CodeEditor::with_config(StalledSurface, Rc::new(MemoryClipboard::default()), &config),
            Err(ConfigError::UnknownTheme(_))
        ));
    }

    #[test]
    fn test_load_twice_is_invalid() {
        let mut editor = editor();
        editor.load().unwrap();
        assert!(matches!(
            editor.load(),
            Err(BridgeError::InvalidTransition {
                from: Readiness::Loading,
                ..
            })
        ));
        editor.reload().unwrap();
        assert_eq!(editor.readiness(), Readiness::Loading);
    }
}
