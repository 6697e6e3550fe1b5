//! FFmpeg MCP Common Library
//!
//! Configuration, error types, transport selection, server lifecycle and
//! tracing setup shared by the FFmpeg MCP server and its tests.

pub mod config;
pub mod error;
pub mod server;
pub mod tracing;
pub mod transport;


pub use config::Config;
pub use error::{ConfigError, Error, Result};
pub use server::{McpServerBuilder, ServerError, shutdown_channel};
pub use transport::{Transport, TransportArgs, TransportMode};
