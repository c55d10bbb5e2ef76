// ABOUTME: Public API for acebridge logging built on tokio-tracing
// ABOUTME: Centralized configuration, subscriber setup, runtime reload and timing helpers

pub mod config;
pub mod layers;
pub mod performance;
pub mod reload;
pub mod subscriber;

// Re-export tracing macros for convenience
pub use tracing::{Level, Span, debug, error, info, instrument, span, trace, warn};

use std::sync::OnceLock;

pub use config::LoggingConfig;
pub use performance::PerfTimer;
pub use reload::LoggingReloadHandle;
pub use subscriber::{init_subscriber, init_subscriber_with_reload};

use anyhow::Result;

/// Global reload handle for runtime log level updates
static GLOBAL_RELOAD_HANDLE: OnceLock<LoggingReloadHandle> = OnceLock::new();

/// Initialize logging from the environment (ACEBRIDGE_LOG and friends).
pub fn init_logging() -> Result<()> {
    init_subscriber(LoggingConfig::from_env()?)
}

pub fn init_logging_with_config(config: LoggingConfig) -> Result<()> {
    init_subscriber(config)
}

/// Initialize logging with hot-reload support and keep the handle globally.
pub fn init_logging_with_reload(config: LoggingConfig) -> Result<LoggingReloadHandle> {
    let handle = init_subscriber_with_reload(config)?;
    let _ = GLOBAL_RELOAD_HANDLE.set(handle.clone());
    Ok(handle)
}

/// Update the global level through the handle stored by [`init_logging_with_reload`].
pub fn update_log_level(level: Level) -> Result<()> {
    match GLOBAL_RELOAD_HANDLE.get() {
        Some(handle) => handle.update_log_level(level),
        None => anyhow::bail!("Logging not initialized with reload support"),
    }
}

pub fn update_module_level(module: &str, level: Level) -> Result<()> {
    match GLOBAL_RELOAD_HANDLE.get() {
        Some(handle) => handle.update_module_level(module, level),
        None => anyhow::bail!("Logging not initialized with reload support"),
    }
}

pub fn reload_from_env() -> Result<()> {
    match GLOBAL_RELOAD_HANDLE.get() {
        Some(handle) => handle.reload_from_env(),
        None => anyhow::bail!("Logging not initialized with reload support"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::{fmt, prelude::*};

    #[test]
    fn test_runtime_updates_need_reload_support() {
        if GLOBAL_RELOAD_HANDLE.get().is_none() {
            assert!(update_log_level(Level::DEBUG).is_err());
            assert!(update_module_level("acebridge_core", Level::DEBUG).is_err());
            assert!(reload_from_env().is_err());
        }
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_structured_fields_reach_output() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(move || writer.clone()),
        );

        tracing::subscriber::with_default(subscriber, || {
            info!(epoch = 3, "Engine ready");
            warn!(alias = "ace/mode/cobol", "Unknown mode alias");
        });

        let contents = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(contents.contains("Engine ready"), "{contents}");
        assert!(contents.contains("epoch=3"), "{contents}");
        assert!(contents.contains("ace/mode/cobol"), "{contents}");
    }
}
