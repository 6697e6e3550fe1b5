//! FFmpeg MCP Library
//!
//! MCP server exposing sandboxed video processing through FFmpeg:
//! - `trim_video` - Extract a segment of a video without re-encoding
//! - `convert_video_format` - Transcode a video into another container format
//!
//! Every path is confined to a working directory (see [`sandbox`]) and the
//! ffmpeg binary is resolved and run by [`executor`].

pub mod executor;
pub mod handler;
pub mod sandbox;
pub mod server;

#[cfg(all(test, unix))]
mod test_support;

pub use executor::FfmpegExecutor;
pub use handler::{ConvertVideoFormatParams, FfmpegHandler, ToolResponse, TrimVideoParams};
pub use sandbox::{Sandbox, is_safe};
pub use server::FfmpegServer;
