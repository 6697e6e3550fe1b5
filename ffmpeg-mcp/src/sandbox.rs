//! Working-directory sandbox for tool paths.
//!
//! Every path a tool hands to ffmpeg is joined onto the working directory,
//! lexically normalised and then required to sit strictly beneath it.
//!
//! Normalisation is purely textual: `.` and `..` are folded, symlinks are not
//! followed. A symlink inside the working directory that points elsewhere
//! will pass the check, so this is a guard against accidental or naive
//! traversal, not an isolation boundary.

use ffmpeg_mcp_common::error::Error;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Make `path` absolute against the current directory and fold `.`/`..`
/// components without touching the filesystem.
///
/// `..` at the root stays at the root, matching how the kernel resolves it.
pub fn normalize(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // pop() refuses to remove the root
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    Ok(normalized)
}

/// Returns true iff `candidate` resolves strictly beneath `base`.
///
/// The comparison is per path component, so `/work2/clip.mp4` is not
/// considered inside `/work`, and `base` itself is not inside `base`.
pub fn is_safe(base: &Path, candidate: &Path) -> bool {
    match (normalize(base), normalize(candidate)) {
        (Ok(base), Ok(candidate)) => candidate != base && candidate.starts_with(&base),
        _ => false,
    }
}

/// Path resolver rooted at the working directory.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Create the working directory if needed and root a sandbox at its
    /// canonical location.
    ///
    /// # Errors
    /// Returns `Error::Io` if the directory cannot be created or resolved.
    pub async fn create(root: impl AsRef<Path>) -> Result<Self, Error> {
        let root = root.as_ref();
        tokio::fs::create_dir_all(root).await?;
        let root = tokio::fs::canonicalize(root).await?;
        debug!(root = %root.display(), "Sandbox ready");
        Ok(Self { root })
    }

    /// Root a sandbox at an existing, already-absolute directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The working directory every resolved path lives under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a caller-supplied path against the working directory.
    ///
    /// Relative paths are joined onto the root. Absolute paths replace it and
    /// are accepted only if they already point inside.
    ///
    /// # Errors
    /// Returns `Error::PathEscape` if the result is not strictly beneath the
    /// working directory.
    pub fn resolve(&self, user_path: &str) -> Result<PathBuf, Error> {
        let joined = self.root.join(user_path);
        let resolved = normalize(&joined).map_err(|_| Error::PathEscape)?;

        if is_safe(&self.root, &resolved) {
            Ok(resolved)
        } else {
            warn!(path = %user_path, root = %self.root.display(), "Rejected path outside working directory");
            Err(Error::PathEscape)
        }
    }
}
