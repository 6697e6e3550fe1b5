//! Tracing initialization for the FFmpeg MCP server.
//!
//! Log output always goes to stderr: with the stdio transport, stdout carries
//! the MCP protocol stream and must not be written to.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls the log level and filtering. Examples:
//!   - `RUST_LOG=debug` - Enable debug logging for all modules
//!   - `RUST_LOG=ffmpeg_mcp=debug` - Log every ffmpeg argument vector
//!   - `RUST_LOG=warn,ffmpeg_mcp_common=debug` - Warn by default, debug for common

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
    util::TryInitError,
};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn subscriber(
    default_level: &str,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(fmt_layer)
}

/// Initialize the global subscriber with `RUST_LOG` filtering (default `info`).
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// ffmpeg_mcp_common::tracing::init_tracing();
/// tracing::info!("Server starting");
/// ```
pub fn init_tracing() {
    subscriber(DEFAULT_LOG_LEVEL).init();
}

/// Try to initialize tracing with a custom default level, returning an error
/// if a subscriber is already installed.
///
/// ```
/// use ffmpeg_mcp_common::tracing::try_init_tracing;
///
/// // Ok or Err depending on whether another test got there first
/// let _ = try_init_tracing("debug");
/// ```
pub fn try_init_tracing(default_level: &str) -> Result<(), TryInitError> {
    subscriber(default_level).try_init()
}
