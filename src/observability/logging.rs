//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Pick the filter from `RUST_LOG`, falling back to the configured level
//!
//! Events go to stderr so stdout carries only progress lines and the
//! handed-over command's own output.

use std::io::IsTerminal;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Default filter directive for a configured level.
pub fn default_directive(config: &ObservabilityConfig) -> String {
    format!("ready_gate={}", config.log_level.to_ascii_lowercase())
}

/// Colour only when the stream is a terminal, so redirected logs stay plain.
pub fn ansi_enabled(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi_enabled(&std::io::stderr()))
                .with_target(false)
                .compact(),
        )
        .try_init();
}
