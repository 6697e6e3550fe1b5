//! FFmpeg tool handler.
//!
//! This module provides the `FfmpegHandler` struct, the parameter types for
//! the `trim_video` and `convert_video_format` tools, and the
//! `{success, output, error}` response shape they return.

use crate::executor::FfmpegExecutor;
use crate::sandbox::Sandbox;
use ffmpeg_mcp_common::config::Config;
use ffmpeg_mcp_common::error::{Error, INVALID_TIME_MESSAGE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

// =============================================================================
// Output Types
// =============================================================================

/// Structured result of a tool invocation.
///
/// Exactly one of `output` and `error` is set, according to `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable result message on success.
    pub output: Option<String>,
    /// Error message on failure.
    pub error: Option<String>,
}

impl ToolResponse {
    /// A successful response carrying `output`.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: Some(output.into()),
            error: None,
        }
    }

    /// A failed response carrying `error`.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(error.into()),
        }
    }
}

impl From<Result<String, Error>> for ToolResponse {
    fn from(result: Result<String, Error>) -> Self {
        match result {
            Ok(output) => ToolResponse::success(output),
            Err(e) => ToolResponse::failure(e.to_string()),
        }
    }
}

// =============================================================================
// Parameter Types
// =============================================================================

/// Parameters for trimming a video.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct TrimVideoParams {
    /// Input video path, relative to the working directory.
    pub input_path: String,
    /// Start offset in seconds. Must be >= 0.
    pub start_time: f64,
    /// Length of the extracted segment in seconds. Must be > 0.
    pub duration: f64,
    /// Output video path, relative to the working directory. Overwritten if it exists.
    pub output_path: String,
}

impl TrimVideoParams {
    /// Check the time window without touching the filesystem.
    pub fn validate_times(&self) -> Result<(), Error> {
        let start_ok = self.start_time.is_finite() && self.start_time >= 0.0;
        let duration_ok = self.duration.is_finite() && self.duration > 0.0;
        if start_ok && duration_ok {
            Ok(())
        } else {
            Err(Error::invalid_parameters(INVALID_TIME_MESSAGE))
        }
    }
}

/// Parameters for converting a video to another container format.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ConvertVideoFormatParams {
    /// Input video path, relative to the working directory.
    pub input_path: String,
    /// Target format name as understood by ffmpeg's `-f` flag (e.g. "mp4", "webm", "MKV").
    pub output_format: String,
    /// Output path, relative to the working directory. `.{format}` is appended if missing.
    pub output_path: String,
}

/// Lowercase and trim a format token, rejecting anything that is not a
/// plain name.
///
/// The token ends up as a file suffix, so separators and dots are refused.
pub fn normalize_format(raw: &str) -> Result<String, Error> {
    let format = raw.trim().to_lowercase();
    let valid = !format.is_empty()
        && format
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(format)
    } else {
        Err(Error::invalid_parameters(format!(
            "Invalid output format '{}'",
            raw.trim()
        )))
    }
}

/// Append `.{format}` to `output_path` unless it already ends with it.
pub fn with_format_suffix(output_path: &str, format: &str) -> String {
    let suffix = format!(".{}", format);
    if output_path.ends_with(&suffix) {
        output_path.to_string()
    } else {
        format!("{}{}", output_path, suffix)
    }
}

// =============================================================================
// Argument Builders
// =============================================================================

/// ffmpeg arguments for a stream-copy extraction of `duration` seconds
/// starting at `start_time`.
pub fn trim_args(input: &Path, output: &Path, start_time: f64, duration: f64) -> Vec<String> {
    vec![
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
        "-ss".to_string(),
        start_time.to_string(),
        "-t".to_string(),
        duration.to_string(),
        "-c:v".to_string(),
        "copy".to_string(),
        "-c:a".to_string(),
        "copy".to_string(),
        "-y".to_string(),
        output.to_string_lossy().into_owned(),
    ]
}

/// ffmpeg arguments for a format-forced transcode.
pub fn convert_args(input: &Path, output: &Path, format: &str) -> Vec<String> {
    vec![
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
        "-f".to_string(),
        format.to_string(),
        "-y".to_string(),
        output.to_string_lossy().into_owned(),
    ]
}

// =============================================================================
// FfmpegHandler
// =============================================================================

/// Runs the sandboxed ffmpeg tools.
pub struct FfmpegHandler {
    /// Application configuration.
    pub config: Config,
    sandbox: Sandbox,
    executor: FfmpegExecutor,
}

impl FfmpegHandler {
    /// Create a handler, creating the working directory if it is missing.
    ///
    /// # Errors
    /// Returns `Error::Io` if the working directory cannot be created.
    #[instrument(level = "debug", name = "ffmpeg_handler_new", skip_all)]
    pub async fn new(config: Config) -> Result<Self, Error> {
        debug!(working_dir = %config.working_dir.display(), "Initializing FfmpegHandler");

        let sandbox = Sandbox::create(&config.working_dir).await?;
        let executor = FfmpegExecutor::from_config(&config);

        Ok(Self {
            config,
            sandbox,
            executor,
        })
    }

    /// The canonical working directory.
    pub fn working_dir(&self) -> &Path {
        self.sandbox.root()
    }

    /// Trim a video. Never fails; errors are folded into the response.
    #[instrument(level = "info", skip(self, params), fields(input = %params.input_path, output = %params.output_path))]
    pub async fn trim_video(&self, params: TrimVideoParams) -> ToolResponse {
        let response = ToolResponse::from(self.run_trim(&params).await);
        log_outcome("trim_video", &response);
        response
    }

    /// Convert a video to another format. Never fails; errors are folded
    /// into the response.
    #[instrument(level = "info", skip(self, params), fields(input = %params.input_path, format = %params.output_format))]
    pub async fn convert_video_format(&self, params: ConvertVideoFormatParams) -> ToolResponse {
        let response = ToolResponse::from(self.run_convert(&params).await);
        log_outcome("convert_video_format", &response);
        response
    }

    async fn run_trim(&self, params: &TrimVideoParams) -> Result<String, Error> {
        let input = self.sandbox.resolve(&params.input_path)?;
        let output = self.sandbox.resolve(&params.output_path)?;
        params.validate_times()?;
        self.require_input(&input, &params.input_path).await?;

        let args = trim_args(&input, &output, params.start_time, params.duration);
        self.executor.execute(&args).await?;

        Ok(format!("Video trimmed to {}", output.display()))
    }

    async fn run_convert(&self, params: &ConvertVideoFormatParams) -> Result<String, Error> {
        let input = self.sandbox.resolve(&params.input_path)?;
        self.sandbox.resolve(&params.output_path)?;
        let format = normalize_format(&params.output_format)?;
        let output = self.sandbox.resolve(&with_format_suffix(&params.output_path, &format))?;
        self.require_input(&input, &params.input_path).await?;

        let args = convert_args(&input, &output, &format);
        self.executor.execute(&args).await?;

        Ok(format!("Video converted to {}", output.display()))
    }

    async fn require_input(&self, input: &Path, as_given: &str) -> Result<(), Error> {
        match tokio::fs::try_exists(input).await {
            Ok(true) => Ok(()),
            _ => Err(Error::input_missing(as_given)),
        }
    }
}

fn log_outcome(tool: &str, response: &ToolResponse) {
    match (&response.output, &response.error) {
        (Some(output), _) => info!(tool, output = %output, "Tool succeeded"),
        (_, Some(error)) => warn!(tool, error = %error, "Tool failed"),
        _ => {}
    }
}

// =============================================================================
// Tests
// =============================================================================
