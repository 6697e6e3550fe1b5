//! FFmpeg MCP Server
//!
//! MCP server for sandboxed video trimming and format conversion.
//!
//! # Tools
//!
//! - `trim_video` - Trim a video to a start time and duration
//! - `convert_video_format` - Convert a video to another format
//!
//! # Usage
//!
//! ```bash
//! # Run with stdio transport (default)
//! ffmpeg-mcp
//!
//! # Run with HTTP transport and a custom working directory
//! ffmpeg-mcp --transport http --port 8080 --working-dir /srv/media
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use ffmpeg_mcp::{FfmpegHandler, FfmpegServer};
use ffmpeg_mcp_common::{Config, McpServerBuilder, TransportArgs};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ffmpeg-mcp")]
#[command(about = "MCP server for sandboxed video processing using FFmpeg")]
#[command(version)]
struct Args {
    #[command(flatten)]
    transport: TransportArgs,

    /// Directory all tool paths are resolved against (overrides FFMPEG_MCP_WORKING_DIR)
    #[arg(long)]
    working_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    ffmpeg_mcp_common::tracing::init_tracing();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(dir) = args.working_dir {
        config = config.with_working_dir(dir);
    }

    let handler = FfmpegHandler::new(config.clone()).await.with_context(|| {
        format!(
            "Failed to prepare working directory {}",
            config.working_dir.display()
        )
    })?;

    tracing::info!(
        working_dir = %handler.working_dir().display(),
        ffmpeg = %config.ffmpeg_binary,
        timeout_secs = config.timeout.map(|t| t.as_secs()),
        "Starting ffmpeg-mcp server"
    );

    let server = FfmpegServer::new(handler);
    let transport = args.transport.into_transport();

    McpServerBuilder::new(server)
        .with_transport(transport)
        .run()
        .await?;

    Ok(())
}
