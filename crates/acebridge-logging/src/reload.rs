// ABOUTME: Runtime log level reloading
// ABOUTME: Swaps the active level filter without reinstalling the subscriber

use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Registry, reload};

use crate::config::LoggingConfig;
use crate::layers::create_env_filter;

/// Handle for updating log configuration at runtime
#[derive(Clone)]
pub struct LoggingReloadHandle {
    filter_handle: reload::Handle<EnvFilter, Registry>,
    current_config: Arc<RwLock<LoggingConfig>>,
}

impl LoggingReloadHandle {
    pub fn new(filter_handle: reload::Handle<EnvFilter, Registry>, config: LoggingConfig) -> Self {
        Self {
            filter_handle,
            current_config: Arc::new(RwLock::new(config)),
        }
    }

    /// Change the global level
    pub fn update_log_level(&self, level: Level) -> Result<()> {
        self.apply(|config| config.level = level.into())?;
        tracing::info!(new_level = %level, "Log level updated at runtime");
        Ok(())
    }

    /// Change or add one module override
    pub fn update_module_level(&self, module: &str, level: Level) -> Result<()> {
        self.apply(|config| {
            config
                .module_levels
                .insert(module.to_string(), level.into());
        })?;
        tracing::info!(module = %module, new_level = %level, "Module log level updated at runtime");
        Ok(())
    }

    /// Re-read levels from the environment, keeping the output targets
    pub fn reload_from_env(&self) -> Result<()> {
        let fresh =
            LoggingConfig::from_env().context("Failed to load configuration from environment")?;

        self.apply(|config| {
            config.level = fresh.level;
            config.module_levels = fresh.module_levels.clone();
        })?;

        let config = self.current_config.read();
        tracing::info!(
            level = %config.level.0,
            module_count = config.module_levels.len(),
            "Logging configuration reloaded from environment"
        );
        Ok(())
    }

    pub fn current_config(&self) -> LoggingConfig {
        self.current_config.read().clone()
    }

    // The stored config only changes once the new filter is live
    fn apply(&self, edit: impl FnOnce(&mut LoggingConfig)) -> Result<()> {
        let mut config = self.current_config.write();
        let mut candidate = config.clone();
        edit(&mut candidate);

        let new_filter =
            create_env_filter(&candidate).context("Failed to create new environment filter")?;
        self.filter_handle
            .reload(new_filter)
            .context("Failed to reload log filter")?;

        *config = candidate;
        Ok(())
    }
}

impl std::fmt::Debug for LoggingReloadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingReloadHandle")
            .field("current_config", &*self.current_config.read())
            .finish_non_exhaustive()
    }
}
