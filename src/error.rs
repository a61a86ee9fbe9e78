use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    // Root validation
    #[error("empty root path")]
    EmptyPath,

    #[error("cannot stat walk root '{}': {source}", .path.display())]
    RootMetadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("walk root '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    // Traversal
    #[error("cannot open directory '{}': {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::EmptyPath => None,
            Self::RootMetadata { path, .. }
            | Self::NotADirectory(path)
            | Self::Discovery { path, .. } => Some(path),
        }
    }

    /// Whether the walk was aborted midway by resource exhaustion.
    ///
    /// Root validation failures happen before any callback fires and are
    /// not considered hard.
    pub fn is_hard(&self) -> bool {
        matches!(self, Self::Discovery { .. })
    }

    /// Legacy status code: every error maps to `-1`.
    pub fn status(&self) -> i32 {
        -1
    }
}

/// Returns `true` when a failure to open a directory means the process is
/// out of descriptors or memory, as opposed to a per-directory condition.
pub(crate) fn is_resource_exhaustion(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::OutOfMemory {
        return true;
    }
    match err.raw_os_error() {
        Some(code) => hard_errno(code),
        None => false,
    }
}

#[cfg(unix)]
fn hard_errno(code: i32) -> bool {
    use nix::errno::Errno;

    code == Errno::EMFILE as i32 || code == Errno::ENFILE as i32 || code == Errno::ENOMEM as i32
}

#[cfg(not(unix))]
fn hard_errno(_code: i32) -> bool {
    false
}
