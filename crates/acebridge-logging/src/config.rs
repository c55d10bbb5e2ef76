// ABOUTME: Configuration structures and environment variable parsing for logging
// ABOUTME: Handles log levels, per-module overrides, output targets and the log file path

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use tracing::Level;

/// Environment variable holding the global level or a RUST_LOG-style directive list
pub const LEVEL_ENV: &str = "ACEBRIDGE_LOG";
/// Presence enables JSON output
pub const JSON_ENV: &str = "ACEBRIDGE_LOG_JSON";
/// Presence disables console output
pub const NO_CONSOLE_ENV: &str = "ACEBRIDGE_LOG_NO_CONSOLE";
/// Presence disables file output
pub const NO_FILE_ENV: &str = "ACEBRIDGE_LOG_NO_FILE";

/// Module that logs every engine upcall at trace level
const EVENT_BRIDGE_TARGET: &str = "acebridge_core::event_bridge";

/// Wrapper for tracing::Level that (de)serializes as a lowercase name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub Level);

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(level_name(self.0))
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<LogLevel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let level = parse_log_level(&s).map_err(serde::de::Error::custom)?;
        Ok(LogLevel(level))
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        LogLevel(level)
    }
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}

/// Main configuration structure for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level (trace, debug, info, warn, error)
    pub level: LogLevel,

    /// Per-module log level overrides
    pub module_levels: HashMap<String, LogLevel>,

    /// Output configuration
    pub output: OutputConfig,

    /// File logging configuration
    pub file: FileConfig,
}

/// Configuration for different output targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON structured output
    pub json: bool,

    /// Pretty-print console output (vs compact)
    pub pretty_console: bool,
}

/// Configuration for file logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Path to log file (defaults to <config dir>/acebridge/acebridge.log)
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        // Upcalls are chatty; keep them quiet unless asked for explicitly
        let mut module_levels = HashMap::new();
        module_levels.insert(EVENT_BRIDGE_TARGET.to_string(), LogLevel(Level::INFO));

        Self {
            level: LogLevel(Level::INFO),
            module_levels,
            output: OutputConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: false,
            json: false,
            pretty_console: false,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: default_log_file_path(),
        }
    }
}

impl LoggingConfig {
    /// Create a new configuration with environment variable overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides to this configuration.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        // ACEBRIDGE_LOG wins over RUST_LOG; both accept directive lists
        if let Ok(directives) = env::var(LEVEL_ENV) {
            self.parse_directives(&directives)
                .with_context(|| format!("Invalid {LEVEL_ENV} value"))?;
        } else if let Ok(directives) = env::var("RUST_LOG") {
            self.parse_directives(&directives)
                .context("Invalid RUST_LOG value")?;
        }

        if env::var(JSON_ENV).is_ok() {
            self.output.json = true;
        }

        if env::var(NO_CONSOLE_ENV).is_ok() {
            self.output.console = false;
        }

        if env::var(NO_FILE_ENV).is_ok() {
            self.output.file = false;
        }

        Ok(())
    }

    /// Parse RUST_LOG-style directives, e.g. "debug" or "info,acebridge_core=trace".
    fn parse_directives(&mut self, directives: &str) -> Result<()> {
        for directive in directives.split(',') {
            let directive = directive.trim();
            if directive.is_empty() {
                continue;
            }

            if let Some((module, level_str)) = directive.split_once('=') {
                let level = parse_log_level(level_str).with_context(|| {
                    format!("Invalid log level '{level_str}' for module '{module}'")
                })?;
                self.module_levels
                    .insert(module.to_string(), LogLevel(level));
            } else {
                self.level = LogLevel(
                    parse_log_level(directive)
                        .with_context(|| format!("Invalid global log level '{directive}'"))?,
                );
            }
        }
        Ok(())
    }
}

/// Get the default log file path: <config dir>/acebridge/acebridge.log
fn default_log_file_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("acebridge").join("acebridge.log")
    } else {
        PathBuf::from("acebridge.log")
    }
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Parse a log level string (case-insensitive).
pub(crate) fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ),
    }
}
