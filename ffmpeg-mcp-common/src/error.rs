//! Error types shared by the FFmpeg MCP crates.
//!
//! Every tool failure maps onto one variant of [`Error`]. The `Display`
//! output of each variant is exactly the message the caller sees in the
//! `error` field of a failed tool response, so the wording here is part of
//! the external contract.
//!
//! # Error Categories
//!
//! - `Error::PathEscape`: a resolved path left the working directory
//! - `Error::InputMissing`: the source file does not exist
//! - `Error::InvalidParameters`: rejected tool arguments
//! - `Error::ExecutableNotFound`: the media binary could not be located
//! - `Error::ProcessFailure`: the media binary exited non-zero
//! - `Error::LaunchFailure`: the media binary could not be started
//! - `Error::Timeout`: the media binary exceeded the configured timeout
//! - `ConfigError`: missing or invalid configuration

use thiserror::Error;

/// Message returned when a path resolves outside the working directory.
pub const PATH_ESCAPE_MESSAGE: &str = "Path outside working directory not allowed";

/// Message returned when trim times are out of range.
pub const INVALID_TIME_MESSAGE: &str = "Invalid time parameters";

/// Unified error type for sandboxed command execution.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (missing env vars, invalid values)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request path does not resolve beneath the working directory
    #[error("Path outside working directory not allowed")]
    PathEscape,

    /// The input file does not exist. Holds the path as the caller gave it.
    #[error("Input file {0} does not exist")]
    InputMissing(String),

    /// Tool arguments failed validation
    #[error("{0}")]
    InvalidParameters(String),

    /// The external executable could not be resolved
    #[error("Executable '{0}' not found in PATH")]
    ExecutableNotFound(String),

    /// The external process exited with a non-zero status.
    /// Holds the trimmed stderr output.
    #[error("{0}")]
    ProcessFailure(String),

    /// The external process could not be started
    #[error("{0}")]
    LaunchFailure(String),

    /// The external process was killed after exceeding the timeout
    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    /// File system I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new invalid-parameters error.
    ///
    /// # Example
    ///
    /// ```
    /// use ffmpeg_mcp_common::error::Error;
    ///
    /// let err = Error::invalid_parameters("Invalid time parameters");
    /// assert_eq!(err.to_string(), "Invalid time parameters");
    /// ```
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Error::InvalidParameters(message.into())
    }

    /// Create a new input-missing error for the caller-supplied path.
    pub fn input_missing(path: impl Into<String>) -> Self {
        Error::InputMissing(path.into())
    }

    /// Create a new process failure carrying the child's stderr.
    pub fn process_failure(stderr: impl Into<String>) -> Self {
        Error::ProcessFailure(stderr.into())
    }

    /// Create a new launch failure.
    pub fn launch_failure(message: impl Into<String>) -> Self {
        Error::LaunchFailure(message.into())
    }

    /// Create a new timeout error.
    ///
    /// # Example
    ///
    /// ```
    /// use ffmpeg_mcp_common::error::Error;
    ///
    /// let err = Error::timeout(30);
    /// assert!(err.to_string().contains("30 seconds"));
    /// ```
    pub fn timeout(seconds: u64) -> Self {
        Error::Timeout(seconds)
    }

    /// Whether the error was raised before any process was launched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::PathEscape | Error::InputMissing(_) | Error::InvalidParameters(_)
        )
    }
}

/// Configuration errors.
///
/// These errors occur when loading configuration from environment
/// variables or command-line flags.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Required environment variable {0} is not set")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl ConfigError {
    /// Create a new missing environment variable error.
    pub fn missing_env_var(name: impl Into<String>) -> Self {
        ConfigError::MissingEnvVar(name.into())
    }

    /// Create a new invalid value error.
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue(name.into(), reason.into())
    }
}

/// Result type alias using the unified Error type.
pub type Result<T> = std::result::Result<T, Error>;
