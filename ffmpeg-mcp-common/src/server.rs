//! MCP server lifecycle.
//!
//! [`McpServerBuilder`] binds an rmcp `ServerHandler` to the selected
//! transport and runs it until the client disconnects, a termination signal
//! arrives, or the optional shutdown channel fires.
//!
//! # Example
//!
//! ```ignore
//! use ffmpeg_mcp_common::server::McpServerBuilder;
//! use ffmpeg_mcp_common::transport::Transport;
//!
//! McpServerBuilder::new(server)
//!     .with_transport(Transport::stdio())
//!     .run()
//!     .await?;
//! ```

use crate::transport::Transport;
use rmcp::{ServerHandler, ServiceExt};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::sync::oneshot;

/// Path the streamable HTTP service is mounted under.
pub const HTTP_MOUNT_PATH: &str = "/mcp";

/// Errors that can occur when running an MCP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified port
    #[error("Failed to bind to port {port}: {message}")]
    BindFailed { port: u16, message: String },

    /// Transport error during communication
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builder for configuring and running MCP servers.
pub struct McpServerBuilder<H> {
    handler: H,
    transport: Transport,
    shutdown_rx: Option<oneshot::Receiver<()>>,
}

impl<H> McpServerBuilder<H>
where
    H: ServerHandler + Clone + Send + Sync + 'static,
{
    /// Create a new server builder with the given handler.
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            transport: Transport::default(),
            shutdown_rx: None,
        }
    }

    /// Set the transport mode for the server.
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Stop the server when `shutdown_rx` resolves instead of waiting for a
    /// process signal.
    pub fn with_shutdown(mut self, shutdown_rx: oneshot::Receiver<()>) -> Self {
        self.shutdown_rx = Some(shutdown_rx);
        self
    }

    /// The transport this builder will serve on.
    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// Run the MCP server until shutdown.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(transport = %self.transport, "Starting MCP server");

        let Self {
            handler,
            transport,
            shutdown_rx,
        } = self;
        let shutdown = shutdown_signal(shutdown_rx);

        match transport {
            Transport::Stdio => serve_stdio(handler, shutdown).await,
            Transport::Http { port } => serve_http(handler, port, shutdown).await,
        }
    }
}

async fn serve_stdio<H>(
    handler: H,
    shutdown: impl std::future::Future<Output = ()>,
) -> Result<(), ServerError>
where
    H: ServerHandler + Clone + Send + Sync + 'static,
{
    let service = handler
        .serve(rmcp::transport::io::stdio())
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;

    tokio::select! {
        result = service.waiting() => {
            result.map_err(|e| ServerError::Transport(e.to_string()))?;
            tracing::info!("Client disconnected");
        }
        _ = shutdown => {
            tracing::info!("Received shutdown signal, stopping server");
        }
    }
    Ok(())
}

async fn serve_http<H>(
    handler: H,
    port: u16,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError>
where
    H: ServerHandler + Clone + Send + Sync + 'static,
{
    use rmcp::transport::streamable_http_server::{
        StreamableHttpService, session::local::LocalSessionManager,
    };

    let service = StreamableHttpService::new(
        move || Ok(handler.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let router = axum::Router::new().nest_service(HTTP_MOUNT_PATH, service);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::BindFailed {
            port,
            message: e.to_string(),
        })?;

    tracing::info!(port, path = HTTP_MOUNT_PATH, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Resolve on the explicit shutdown channel if one was given, otherwise on
/// SIGTERM/SIGINT.
async fn shutdown_signal(shutdown_rx: Option<oneshot::Receiver<()>>) {
    match shutdown_rx {
        Some(rx) => {
            let _ = rx.await;
        }
        None => wait_for_termination().await,
    }
}

#[cfg(unix)]
async fn wait_for_termination() {
    use tokio::signal::unix::{SignalKind, signal};

    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "Failed to register signal handlers, falling back to Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("Received SIGTERM"),
        _ = sigint.recv() => tracing::info!("Received SIGINT"),
    }
}

#[cfg(not(unix))]
async fn wait_for_termination() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C");
}

/// Create a channel for triggering shutdown programmatically.
///
/// Pass the receiver to [`McpServerBuilder::with_shutdown`] and keep the
/// sender; sending on it or dropping it stops the server.
pub fn shutdown_channel() -> (oneshot::Sender<()>, oneshot::Receiver<()>) {
    oneshot::channel()
}
