// ABOUTME: Output layer construction for console, file and JSON logging
// ABOUTME: Layers are boxed over a generic subscriber so they stack on a reloadable filter

use anyhow::{Context, Result};
use std::fs;
use tracing::Subscriber;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    registry::LookupSpan,
};

use crate::config::{FileConfig, LoggingConfig, OutputConfig};

pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Console layer, compact unless pretty output was requested
pub fn create_console_layer<S>(config: &OutputConfig) -> Option<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
{
    if !config.console || config.json {
        return None;
    }

    let layer = if config.pretty_console {
        fmt::layer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .pretty()
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .boxed()
    };

    Some(layer)
}

/// Daily-rolling file layer writing through a non-blocking worker.
pub fn create_file_layer<S>(config: &FileConfig) -> Result<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
{
    let directory = config
        .path
        .parent()
        .context("Log file path has no parent directory")?;

    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory: {}", directory.display()))?;

    let file_name = config
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Invalid log file path")?;

    let (writer, guard) = non_blocking(rolling::daily(directory, file_name));
    // The worker must outlive every span; the subscriber is process-global
    std::mem::forget(guard);

    Ok(fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .boxed())
}

/// JSON layer on stdout, replacing the console layer when enabled
pub fn create_json_layer<S>(config: &OutputConfig) -> Option<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
{
    if !config.json || !config.console {
        return None;
    }

    Some(
        fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
    )
}

/// Every output layer the configuration asks for.
pub fn create_output_layers<S>(config: &LoggingConfig) -> Result<Vec<BoxedLayer<S>>>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
{
    let mut layers = Vec::new();
    layers.extend(create_console_layer(&config.output));
    layers.extend(create_json_layer(&config.output));
    if config.output.file {
        layers.push(create_file_layer(&config.file)?);
    }
    Ok(layers)
}

/// Build the level filter from the global level plus module overrides.
pub fn create_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::new(config.level.0.to_string());

    for (module, level) in &config.module_levels {
        let directive = format!("{}={}", module, level.0);
        filter = filter.add_directive(
            directive
                .parse()
                .with_context(|| format!("Invalid filter directive '{directive}'"))?,
        );
    }

    Ok(filter)
}
