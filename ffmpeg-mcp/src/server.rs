//! MCP Server implementation for the FFmpeg tools.
//!
//! Tool failures never surface as protocol errors: the handler folds them
//! into a [`ToolResponse`], which is sent back as JSON with the MCP error
//! flag set. Protocol errors are reserved for unknown tools and arguments
//! that do not deserialize.

use crate::handler::{ConvertVideoFormatParams, FfmpegHandler, ToolResponse, TrimVideoParams};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    model::{
        CallToolResult, Content, ListResourcesResult, ReadResourceResult, ServerCapabilities,
        ServerInfo,
    },
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::info;

/// Tool name for [`FfmpegServer::trim_video`].
pub const TRIM_VIDEO_TOOL: &str = "trim_video";

/// Tool name for [`FfmpegServer::convert_video_format`].
pub const CONVERT_VIDEO_FORMAT_TOOL: &str = "convert_video_format";

/// MCP Server exposing sandboxed ffmpeg operations.
#[derive(Clone)]
pub struct FfmpegServer {
    handler: Arc<FfmpegHandler>,
}

impl FfmpegServer {
    /// Create a new server around an initialized handler.
    pub fn new(handler: FfmpegHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// The handler backing this server.
    pub fn handler(&self) -> &FfmpegHandler {
        &self.handler
    }

    /// Trim a video.
    pub async fn trim_video(&self, params: TrimVideoParams) -> Result<CallToolResult, McpError> {
        info!(
            input = %params.input_path,
            start_time = params.start_time,
            duration = params.duration,
            output = %params.output_path,
            "Trimming video"
        );

        let response = self.handler.trim_video(params).await;
        to_call_tool_result(&response)
    }

    /// Convert a video to another format.
    pub async fn convert_video_format(
        &self,
        params: ConvertVideoFormatParams,
    ) -> Result<CallToolResult, McpError> {
        info!(
            input = %params.input_path,
            format = %params.output_format,
            output = %params.output_path,
            "Converting video format"
        );

        let response = self.handler.convert_video_format(params).await;
        to_call_tool_result(&response)
    }
}

impl ServerHandler for FfmpegServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "Multimedia processing server using FFmpeg. \
                 Trims videos and converts them between formats. \
                 All paths are relative to the working directory {}.",
                self.handler.working_dir().display()
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _params: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<rmcp::model::ListToolsResult, McpError>> + Send + '_
    {
        async move {
            use rmcp::model::ListToolsResult;

            Ok(ListToolsResult {
                tools: tool_definitions(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        params: rmcp::model::CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            match params.name.as_ref() {
                TRIM_VIDEO_TOOL => {
                    let tool_params: TrimVideoParams = parse_params(params.arguments)?;
                    self.trim_video(tool_params).await
                }
                CONVERT_VIDEO_FORMAT_TOOL => {
                    let tool_params: ConvertVideoFormatParams = parse_params(params.arguments)?;
                    self.convert_video_format(tool_params).await
                }
                _ => Err(McpError::invalid_params(
                    format!("Unknown tool: {}", params.name),
                    None,
                )),
            }
        }
    }

    fn list_resources(
        &self,
        _params: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        async move {
            Ok(ListResourcesResult {
                resources: vec![],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn read_resource(
        &self,
        params: rmcp::model::ReadResourceRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            Err(McpError::resource_not_found(
                format!("Unknown resource: {}", params.uri),
                None,
            ))
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Definitions of every tool this server registers.
pub fn tool_definitions() -> Vec<rmcp::model::Tool> {
    vec![
        create_tool::<TrimVideoParams>(
            TRIM_VIDEO_TOOL,
            "Trim a video to a start time and duration (in seconds) without re-encoding. \
             Paths are relative to the working directory; the output is overwritten.",
        ),
        create_tool::<ConvertVideoFormatParams>(
            CONVERT_VIDEO_FORMAT_TOOL,
            "Convert a video to another container format (e.g. mp4, webm, mkv). \
             The format's extension is appended to the output path if missing.",
        ),
    ]
}

/// Create a tool definition from a parameter type.
fn create_tool<T: JsonSchema>(name: &'static str, description: &'static str) -> rmcp::model::Tool {
    use schemars::schema_for;

    let schema = schema_for!(T);
    let schema_value = serde_json::to_value(&schema).unwrap_or_default();

    let input_schema = match schema_value {
        serde_json::Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    };

    rmcp::model::Tool {
        name: Cow::Borrowed(name),
        description: Some(Cow::Borrowed(description)),
        input_schema,
        annotations: None,
        icons: None,
        meta: None,
        output_schema: None,
        title: None,
    }
}

/// Parse tool parameters from JSON arguments.
fn parse_params<T: for<'de> Deserialize<'de>>(
    arguments: Option<serde_json::Map<String, serde_json::Value>>,
) -> Result<T, McpError> {
    arguments
        .map(|args| serde_json::from_value(serde_json::Value::Object(args)))
        .transpose()
        .map_err(|e| McpError::invalid_params(format!("Invalid parameters: {}", e), None))?
        .ok_or_else(|| McpError::invalid_params("Missing parameters", None))
}

/// Serialize a tool response as JSON text, flagging failures as tool errors.
pub fn to_call_tool_result(response: &ToolResponse) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(response).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize result: {}", e), None)
    })?;

    let content = vec![Content::text(json)];
    Ok(if response.success {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    })
}

// =============================================================================
// Tests
// =============================================================================
