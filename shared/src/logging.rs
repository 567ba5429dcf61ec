//! Shared logging utilities for consistent tracing across the switcher

use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Crates whose events are shown at the requested level
const OWN_CRATES: &[&str] = &["switcher", "shared"];

/// Build the filter directive used by [`init_tracing_with_level`]
pub fn filter_directive(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    let mut directives: Vec<String> = OWN_CRATES
        .iter()
        .map(|krate| format!("{krate}={base_level}"))
        .collect();
    directives.push("reqwest=warn".to_string());
    directives.push("hyper=warn".to_string());
    directives.join(",")
}

/// Initialize the stdout tracing subscriber with an optional log level
///
/// `RUST_LOG`, when set, replaces the computed directive entirely.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(log_level)));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Initialize tracing at the default level
pub fn init_tracing() {
    init_tracing_with_level(None);
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for request-aware info logging
#[macro_export]
macro_rules! request_info {
    ($request_id:expr, $($arg:tt)*) => {
        tracing::info!(
            request = %$request_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for request-aware warning logging
#[macro_export]
macro_rules! request_warn {
    ($request_id:expr, $($arg:tt)*) => {
        tracing::warn!(
            request = %$request_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for request-aware debug logging
#[macro_export]
macro_rules! request_debug {
    ($request_id:expr, $($arg:tt)*) => {
        tracing::debug!(
            request = %$request_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(details: &str) {
    info!(timestamp = format_timestamp(), "🚀 Starting {}", details);
}

/// Contextual logging helper for error conditions
pub fn log_error(context: &str, error: &dyn std::fmt::Display) {
    error!(
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}
