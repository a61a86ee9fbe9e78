use std::ffi::{OsStr, OsString};
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};

/// Classification delivered with every visit.
///
/// Only directories and regular files are told apart. Anything else that
/// could be stat-ed (symlinks under [`WalkFlags::PHYSICAL`], sockets, FIFOs,
/// devices) is reported as [`EntryKind::RegularFile`]; inspect
/// [`Visit::metadata`] to tell those apart.
///
/// [`WalkFlags::PHYSICAL`]: crate::WalkFlags::PHYSICAL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A directory (`FTW_D`).
    Directory,

    /// A regular file, or any non-directory object (`FTW_F`).
    RegularFile,

    /// Metadata could not be fetched (`FTW_NS`).
    NotStatable,
}

/// Position information handed to the visitor, the counterpart of `struct FTW`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraversalCtx {
    /// Reported depth. Its meaning depends on the walk's
    /// [`DepthMode`](crate::DepthMode).
    pub level: usize,

    /// Byte offset of the final component within the visited path.
    pub base: usize,
}

/// One queued filesystem object.
///
/// Created by discovery, owned by the pending queue, dropped right after
/// its visit.
#[derive(Debug)]
pub(crate) struct EntryRecord {
    pub name: OsString,

    /// Path reported to the visitor, built from the caller's root.
    pub full_path: PathBuf,

    /// Where the entry is actually opened and stat-ed, when that differs
    /// from `full_path` (relative roots under `CHDIR`).
    pub fs_path: Option<PathBuf>,

    /// Distance from the walk root; root's children are at depth 1.
    pub depth: usize,

    /// Filled in when the record is dequeued.
    pub metadata: Option<Metadata>,
    pub stat_error: Option<io::Error>,
}

impl EntryRecord {
    pub fn new(name: OsString, full_path: PathBuf, depth: usize) -> Self {
        Self {
            name,
            full_path,
            fs_path: None,
            depth,
            metadata: None,
            stat_error: None,
        }
    }

    pub fn with_fs_path(mut self, fs_path: PathBuf) -> Self {
        if fs_path != self.full_path {
            self.fs_path = Some(fs_path);
        }
        self
    }

    pub fn fs_path(&self) -> &Path {
        self.fs_path.as_deref().unwrap_or(&self.full_path)
    }

    /// Offset of `name` inside `full_path`.
    pub fn base(&self) -> usize {
        self.full_path
            .as_os_str()
            .len()
            .saturating_sub(self.name.len())
    }
}

/// Borrowed view of an entry for the duration of one callback.
#[derive(Debug)]
pub struct Visit<'a> {
    pub(crate) path: &'a Path,
    pub(crate) metadata: Option<&'a Metadata>,
    pub(crate) error: Option<&'a io::Error>,
    pub(crate) kind: EntryKind,
    pub(crate) ctx: TraversalCtx,
    pub(crate) is_root: bool,
}

impl<'a> Visit<'a> {
    /// Path of the entry: the parent's path joined with the entry name.
    pub fn path(&self) -> &'a Path {
        self.path
    }

    /// Final component of [`Visit::path`].
    pub fn file_name(&self) -> Option<&'a OsStr> {
        self.path.file_name()
    }

    /// Metadata fetched for the entry. `None` exactly when the entry is
    /// [`EntryKind::NotStatable`].
    pub fn metadata(&self) -> Option<&'a Metadata> {
        self.metadata
    }

    /// The error from the failed metadata fetch of a not-statable entry.
    pub fn error(&self) -> Option<&'a io::Error> {
        self.error
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn ctx(&self) -> TraversalCtx {
        self.ctx
    }

    /// `true` for the final visit, which reports the walk root.
    pub fn is_root(&self) -> bool {
        self.is_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_points_at_name() {
        let record = EntryRecord::new("b.txt".into(), PathBuf::from("root/sub/b.txt"), 2);
        assert_eq!(record.base(), "root/sub/".len());
        assert!(record.metadata.is_none());
    }

    #[test]
    fn fs_path_defaults_to_reported_path() {
        let record = EntryRecord::new("a".into(), PathBuf::from("root/a"), 1);
        assert_eq!(record.fs_path(), Path::new("root/a"));

        let record = record.with_fs_path(PathBuf::from("/work/root/a"));
        assert_eq!(record.full_path, Path::new("root/a"));
        assert_eq!(record.fs_path(), Path::new("/work/root/a"));
    }
}
