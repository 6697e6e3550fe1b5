//! Workspace-level integration tests for the FFmpeg MCP server.
//!
//! These tests verify:
//! - The server starts and reports its capabilities
//! - Tool registration and schema generation
//! - Sandbox and parameter validation through the public API
//! - The `{success, output, error}` result format seen by MCP clients

pub mod input_validation;
pub mod output_format;
pub mod server_startup;
