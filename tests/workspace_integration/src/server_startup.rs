//! Server startup integration tests.
//!
//! Tests that the MCP server can be instantiated against a fresh working
//! directory and provides correct server info.

use ffmpeg_mcp::{FfmpegHandler, FfmpegServer};
use ffmpeg_mcp_common::Config;

/// Build a server rooted in a not-yet-existing directory under `tmp`.
pub async fn test_server(tmp: &tempfile::TempDir) -> FfmpegServer {
    let config = Config::new(tmp.path().join("ffmpeg_mcp_files"));
    let handler = FfmpegHandler::new(config)
        .await
        .expect("handler should initialize");
    FfmpegServer::new(handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::ServerHandler;

    #[tokio::test]
    async fn test_server_startup_creates_working_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let server = test_server(&tmp).await;

        assert!(tmp.path().join("ffmpeg_mcp_files").is_dir());
        assert!(server.handler().working_dir().ends_with("ffmpeg_mcp_files"));
    }

    #[tokio::test]
    async fn test_server_info_advertises_tools() {
        let tmp = tempfile::tempdir().unwrap();
        let server = test_server(&tmp).await;
        let info = server.get_info();

        assert!(info.capabilities.tools.is_some(), "tools capability must be enabled");
        let instructions = info.instructions.as_ref().unwrap().to_lowercase();
        assert!(instructions.contains("ffmpeg"));
    }

    #[tokio::test]
    async fn test_independent_servers_use_isolated_directories() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let server_a = test_server(&a).await;
        let server_b = test_server(&b).await;

        assert_ne!(
            server_a.handler().working_dir(),
            server_b.handler().working_dir()
        );
    }
}
