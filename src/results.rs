use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// The output of a completed walk.
#[derive(Debug, Clone, Default)]
pub struct WalkSummary {
    /// Number of visitor invocations, the root included.
    pub visited: usize,

    /// Visits classified as [`EntryKind::Directory`](crate::EntryKind::Directory),
    /// the root included.
    pub directories: usize,

    /// Visits classified as [`EntryKind::RegularFile`](crate::EntryKind::RegularFile).
    pub files: usize,

    /// Visits classified as [`EntryKind::NotStatable`](crate::EntryKind::NotStatable).
    pub not_statable: usize,

    /// Directories whose contents could not be listed (permission denied,
    /// vanished, no longer a directory). Each still received its own visit.
    pub pruned: usize,

    /// Entries skipped because their joined path would exceed the limit.
    pub overlong: Vec<OverlongPath>,

    /// The resolved legacy descriptor hint. Never enforced.
    pub fd_limit: usize,

    /// `true` when the visitor returned [`WalkState::Quit`](crate::WalkState::Quit).
    pub stopped: bool,

    /// Wall-clock time from validation to the last visit.
    pub duration: Duration,
}

/// A child entry that was not queued because its path was too long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlongPath {
    /// Directory the entry was listed from.
    pub parent: PathBuf,

    /// Raw directory-entry name.
    pub name: OsString,

    /// Byte length the joined path would have had.
    pub len: usize,

    /// The configured maximum, terminator included.
    pub limit: usize,
}
