//! # Structured Logging
//!
//! Subscriber bootstrap for binaries and tests that use the workspace crates,
//! plus a batch error logger that reports through `tracing`.

use shared_types_rs::LoggingConfig;
use std::error::Error as StdError;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

// Flag to track if logging has been initialized
static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Callback receiving the key and the error of a failed batch item
pub type BatchErrorLogger = Box<dyn FnMut(&str, &(dyn StdError + 'static))>;

/// Initializes the structured logging system.
///
/// `RUST_LOG` takes precedence over `config.level`. Records emitted through the
/// `log` facade are bridged into the subscriber. Calling this more than once is
/// a no-op; a subscriber installed by someone else is left in place.
pub fn init_logging(config: Option<LoggingConfig>) -> bool {
    if LOGGING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return false;
    }

    let config = config.unwrap_or_default();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},warn", config.level)));

    let subscriber = Registry::default().with(filter);

    // Distinct layer types for JSON and text, so each branch installs itself.
    let installed = if config.json_format {
        let json_layer = fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_target(true);
        subscriber.with(json_layer).try_init().is_ok()
    } else {
        let text_layer = fmt::layer().with_target(true);
        subscriber.with(text_layer).try_init().is_ok()
    };

    if installed {
        tracing::info!(
            service = %config.service_name,
            level = %config.level,
            json = %config.json_format,
            "Structured logging initialized"
        );
    }

    installed
}

/// A [`BatchErrorLogger`] that records each failed item as a `warn` event
pub fn tracing_error_logger() -> BatchErrorLogger {
    Box::new(|key, error| {
        tracing::warn!(key = %key, error = %error, "batch item rejected");
    })
}
