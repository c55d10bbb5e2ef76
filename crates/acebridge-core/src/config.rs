// ABOUTME: Construction-time configuration of the control, loaded from TOML
// ABOUTME: Bootstrap location, initial document settings and ordered engine options

use std::path::Path;
use std::time::Duration;

use acebridge_types::{Mode, Theme};
use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::engine::BootstrapResource;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown mode alias '{0}'")]
    UnknownMode(String),

    #[error("unknown theme alias '{0}'")]
    UnknownTheme(String),

    #[error("bootstrap resource must not be empty")]
    EmptyBootstrap,

    #[error("option names must not be empty")]
    EmptyOptionName,
}

/// Control configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlConfig {
    /// Path or URL of the document that exposes the engine namespace
    pub bootstrap: String,

    /// Text shown once the engine is ready
    pub initial_text: Option<String>,

    /// Mode alias applied on load
    pub mode: String,

    /// Theme alias applied on load
    pub theme: String,

    pub read_only: bool,

    /// Engine options applied on load, in file order
    pub options: IndexMap<String, Value>,

    /// Bootstraps slower than this are logged as warnings; 0 disables the check
    pub slow_bootstrap_ms: u64,
}

fn default_bootstrap() -> String {
    "ace/editor.html".to_string()
}

fn default_slow_bootstrap_ms() -> u64 {
    2_000
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            bootstrap: default_bootstrap(),
            initial_text: None,
            mode: Mode::default().alias().to_string(),
            theme: Theme::default().alias().to_string(),
            read_only: false,
            options: IndexMap::new(),
            slow_bootstrap_ms: default_slow_bootstrap_ms(),
        }
    }
}

impl ControlConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ControlConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read control config {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Failed to load control config {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bootstrap.trim().is_empty() {
            return Err(ConfigError::EmptyBootstrap);
        }
        self.resolved_mode()?;
        self.resolved_theme()?;
        if self.options.keys().any(|name| name.is_empty()) {
            return Err(ConfigError::EmptyOptionName);
        }
        if let Some(value) = self.options.get("mode") {
            let alias = value.as_str().unwrap_or_default();
            Mode::from_alias(alias).ok_or_else(|| ConfigError::UnknownMode(value.to_string()))?;
        }
        if let Some(value) = self.options.get("theme") {
            let alias = value.as_str().unwrap_or_default();
            Theme::from_alias(alias).ok_or_else(|| ConfigError::UnknownTheme(value.to_string()))?;
        }
        Ok(())
    }

    pub fn resolved_mode(&self) -> Result<Mode, ConfigError> {
        Mode::from_alias(&self.mode).ok_or_else(|| ConfigError::UnknownMode(self.mode.clone()))
    }

    pub fn resolved_theme(&self) -> Result<Theme, ConfigError> {
        Theme::from_alias(&self.theme).ok_or_else(|| ConfigError::UnknownTheme(self.theme.clone()))
    }

    pub fn bootstrap_resource(&self) -> BootstrapResource {
        BootstrapResource::new(self.bootstrap.clone())
    }

    pub fn slow_bootstrap_threshold(&self) -> Option<Duration> {
        (self.slow_bootstrap_ms > 0).then(|| Duration::from_millis(self.slow_bootstrap_ms))
    }
}
