//! Resolution and execution of the external media processor.

use ffmpeg_mcp_common::config::Config;
use ffmpeg_mcp_common::error::Error;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Runs ffmpeg (or a configured stand-in) and maps its exit status onto
/// `Result<String, Error>`.
#[derive(Debug, Clone)]
pub struct FfmpegExecutor {
    program: String,
    timeout: Option<Duration>,
}

impl FfmpegExecutor {
    /// Create an executor for `program`, resolved through `PATH` on each run.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Create an executor from the binary and timeout settings in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ffmpeg_binary.clone()).with_timeout(config.timeout)
    }

    /// Kill the child and fail with `Error::Timeout` after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The unresolved program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Locate the executable with `which`.
    ///
    /// # Errors
    /// Returns `Error::ExecutableNotFound` if the lookup fails or prints
    /// nothing.
    #[instrument(level = "debug", skip(self), fields(program = %self.program))]
    pub async fn resolve_executable(&self) -> Result<PathBuf, Error> {
        let output = Command::new("which")
            .arg(&self.program)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                warn!(error = %e, "Could not run 'which'");
                Error::ExecutableNotFound(self.program.clone())
            })?;

        if !output.status.success() {
            return Err(Error::ExecutableNotFound(self.program.clone()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.lines().map(str::trim).find(|line| !line.is_empty()) {
            Some(path) => {
                debug!(resolved = %path, "Resolved executable");
                Ok(PathBuf::from(path))
            }
            None => Err(Error::ExecutableNotFound(self.program.clone())),
        }
    }

    /// Resolve the executable and run it with `args`.
    ///
    /// Resolution happens before `args` is looked at, so a missing binary
    /// fails the same way whatever the request contained.
    ///
    /// Returns the trimmed stdout on exit code 0.
    ///
    /// # Errors
    /// - `Error::ExecutableNotFound` if the binary cannot be located
    /// - `Error::LaunchFailure` if the process cannot be started
    /// - `Error::ProcessFailure` with trimmed stderr on a non-zero exit
    /// - `Error::Timeout` if a timeout is configured and exceeded
    pub async fn execute(&self, args: &[String]) -> Result<String, Error> {
        let program = self.resolve_executable().await?;
        self.run(&program, args).await
    }

    /// Run an already-resolved executable.
    #[instrument(level = "debug", skip(self, args), fields(program = %program.display()))]
    pub async fn run(&self, program: &Path, args: &[String]) -> Result<String, Error> {
        debug!(args = ?args, "Running ffmpeg");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::launch_failure(e.to_string()))?;

        let output = match self.timeout {
            // Dropping the wait future drops the child, which kills it.
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    warn!(timeout_secs = limit.as_secs(), "ffmpeg timed out, killing");
                    Error::timeout(limit.as_secs())
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| Error::launch_failure(e.to_string()))?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!(status = %output.status, stderr = %stderr, "ffmpeg failed");
        if stderr.is_empty() {
            Err(Error::process_failure(format!(
                "{} exited with {}",
                program.display(),
                output.status
            )))
        } else {
            Err(Error::process_failure(stderr))
        }
    }
}
