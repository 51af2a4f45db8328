//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for site-i18n.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{I18nError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file appender when dropped, so the caller
/// keeps it alive for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let console_layer = if config.format == "json" {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "site-i18n.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| I18nError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a successfully loaded translation table
pub fn log_table_loaded(source: &str, languages: usize, keys: usize) {
    info!(
        source = source,
        languages = languages,
        keys = keys,
        "Translation table loaded"
    );
}

/// Log the embedded fallback table replacing the remote one
///
/// Unrecoverable causes (a broken resource URL, for instance) are logged as
/// errors since every later load fails the same way.
pub fn log_fallback_used(source: &str, cause: &I18nError) {
    if cause.is_recoverable() {
        warn!(
            source = source,
            error = %cause,
            severity = %cause.severity(),
            "Translations load failed, using fallback"
        );
    } else {
        error!(
            source = source,
            error = %cause,
            severity = %cause.severity(),
            "Translation source is misconfigured, using fallback"
        );
    }
}

/// Log a language being applied to the page
pub fn log_language_applied(language: &str, updated: usize, untouched: usize) {
    debug!(
        language = language,
        updated = updated,
        untouched = untouched,
        "Language applied to page"
    );
}
