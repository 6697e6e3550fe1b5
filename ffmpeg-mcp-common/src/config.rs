//! Configuration module for loading environment variables and settings.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the sandbox root.
pub const WORKING_DIR_VAR: &str = "FFMPEG_MCP_WORKING_DIR";

/// Environment variable naming the media executable.
pub const FFMPEG_BINARY_VAR: &str = "FFMPEG_BINARY";

/// Environment variable holding the optional process timeout in seconds.
pub const FFMPEG_TIMEOUT_VAR: &str = "FFMPEG_TIMEOUT_SECS";

/// Directory under the user's home used when no working dir is configured.
pub const DEFAULT_WORKING_DIR_NAME: &str = "ffmpeg_mcp_files";

/// Executable looked up when `FFMPEG_BINARY` is unset.
pub const DEFAULT_FFMPEG_BINARY: &str = "ffmpeg";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Sandbox root. Every tool path must resolve beneath it.
    pub working_dir: PathBuf,
    /// Program name or path of the media executable
    pub ffmpeg_binary: String,
    /// Upper bound on a single ffmpeg run. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// HTTP server port
    pub port: u16,
}

impl Config {
    /// Build a configuration rooted at `working_dir` with default settings.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ffmpeg_binary: DEFAULT_FFMPEG_BINARY.to_string(),
            timeout: None,
            port: 8080,
        }
    }

    /// Load configuration from environment variables and .env file.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVar` if no working directory is set and
    /// the home directory cannot be determined, or `ConfigError::InvalidValue`
    /// if a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok(), dirs::home_dir())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// `from_env` delegates here; tests pass a closure over a map instead of
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F, home: Option<PathBuf>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let working_dir = match lookup(WORKING_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => expand_home(dir.trim(), home.as_deref())?,
            None => home
                .map(|h| h.join(DEFAULT_WORKING_DIR_NAME))
                .ok_or_else(|| ConfigError::missing_env_var(WORKING_DIR_VAR))?,
        };

        let ffmpeg_binary = lookup(FFMPEG_BINARY_VAR)
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_FFMPEG_BINARY.to_string());

        let timeout = match lookup(FFMPEG_TIMEOUT_VAR) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_value("PORT", format!("'{}' is not a port", raw)))?,
            None => 8080,
        };

        Ok(Self {
            working_dir,
            ffmpeg_binary,
            timeout,
            port,
        })
    }

    /// Replace the working directory, e.g. from a command-line flag.
    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = working_dir.into();
        self
    }

    /// Set the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the media executable name or path.
    pub fn with_ffmpeg_binary(mut self, binary: impl Into<String>) -> Self {
        self.ffmpeg_binary = binary.into();
        self
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::invalid_value(
            FFMPEG_TIMEOUT_VAR,
            format!("'{}' is not a positive number of seconds", raw),
        )),
    }
}

/// Expand a leading `~` against the home directory.
fn expand_home(raw: &str, home: Option<&std::path::Path>) -> Result<PathBuf, ConfigError> {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(raw)),
    };

    let home = home.ok_or_else(|| {
        ConfigError::invalid_value(WORKING_DIR_VAR, "cannot expand '~' without a home directory")
    })?;
    Ok(if rest.is_empty() { home.to_path_buf() } else { home.join(rest) })
}
