// ABOUTME: Tracing subscriber initialization and layer composition
// ABOUTME: Stacks the configured output layers over a fixed or reloadable level filter

use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter, Registry, layer::Layered, prelude::*, reload, util::SubscriberInitExt,
};

use crate::config::LoggingConfig;
use crate::layers::{BoxedLayer, create_env_filter, create_output_layers};
use crate::reload::LoggingReloadHandle;

type Filtered = Layered<EnvFilter, Registry>;
type ReloadFiltered = Layered<reload::Layer<EnvFilter, Registry>, Registry>;

/// Initialize the global tracing subscriber with the given configuration.
pub fn init_subscriber(config: LoggingConfig) -> Result<()> {
    let env_filter = create_env_filter(&config).context("Failed to create environment filter")?;
    let layers: Vec<BoxedLayer<Filtered>> = create_output_layers(&config)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    announce(&config, false);
    Ok(())
}

/// Initialize the global tracing subscriber with hot-reload support.
///
/// Returns a handle that can change levels at runtime.
pub fn init_subscriber_with_reload(config: LoggingConfig) -> Result<LoggingReloadHandle> {
    let env_filter = create_env_filter(&config).context("Failed to create environment filter")?;
    let (filter_layer, filter_handle) = reload::Layer::new(env_filter);
    let layers: Vec<BoxedLayer<ReloadFiltered>> = create_output_layers(&config)?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    announce(&config, true);
    Ok(LoggingReloadHandle::new(filter_handle, config))
}

fn announce(config: &LoggingConfig, reload_enabled: bool) {
    tracing::info!(
        log_level = %config.level.0,
        console_output = config.output.console,
        file_output = config.output.file,
        json_output = config.output.json,
        file_path = %config.file.path.display(),
        reload_enabled,
        "Acebridge logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileConfig, LogLevel, OutputConfig};
    use std::collections::HashMap;
    use tempfile::tempdir;
    use tracing::Level;

    #[test]
    fn test_second_init_reports_error() {
        // Whichever test installs first wins; the other attempt must fail cleanly
        let first = init_subscriber(LoggingConfig::default());
        let second = init_subscriber(LoggingConfig::default());
        assert!(first.is_err() || second.is_err());
    }

    #[test]
    fn test_custom_config_builds_filter_and_layers() {
        let temp_dir = tempdir().unwrap();

        let config = LoggingConfig {
            level: LogLevel(Level::DEBUG),
            module_levels: HashMap::new(),
            output: OutputConfig {
                console: true,
                file: true,
                json: false,
                pretty_console: true,
            },
            file: FileConfig {
                path: temp_dir.path().join("acebridge.log"),
            },
        };

        assert!(create_env_filter(&config).is_ok());
        let layers: Vec<BoxedLayer<Filtered>> = create_output_layers(&config).unwrap();
        assert_eq!(layers.len(), 2);
    }
}
