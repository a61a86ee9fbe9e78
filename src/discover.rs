use std::fs;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::entry::EntryRecord;
use crate::error::{is_resource_exhaustion, WalkError};
use crate::queue::PendingQueue;
use crate::results::OverlongPath;

/// Outcome of listing one directory.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Listing {
    /// Children were appended to the queue.
    Listed { children: usize },

    /// The parent was empty, `.` or `..`; nothing was read.
    Skipped,

    /// The directory could not be opened for a per-directory reason; its
    /// subtree is treated as empty.
    Pruned,
}

/// Per-walk inputs of the discovery step.
pub(crate) struct DiscoverOptions {
    pub max_path_len: usize,
}

/// List `parent` once and append a record per child to the queue tail.
///
/// `parent` is the path reported to the visitor; `fs_parent` is where the
/// directory is actually read, and differs only for relative roots under
/// `CHDIR`. The directory handle is closed before returning. Children whose
/// joined path would reach `max_path_len` are skipped and recorded in
/// `overlong`.
pub(crate) fn discover(
    parent: &Path,
    fs_parent: &Path,
    child_depth: usize,
    queue: &mut PendingQueue,
    opts: &DiscoverOptions,
    overlong: &mut Vec<OverlongPath>,
) -> Result<Listing, WalkError> {
    let raw = parent.as_os_str();
    if raw.is_empty() || raw == "." || raw == ".." {
        return Ok(Listing::Skipped);
    }

    let read_dir = match fs::read_dir(fs_parent) {
        Ok(rd) => rd,
        Err(e) if is_resource_exhaustion(&e) => {
            return Err(WalkError::Discovery {
                path: parent.to_path_buf(),
                source: e,
            });
        }
        Err(e) => {
            debug!(path = %parent.display(), error = %e, "pruning unreadable directory");
            return Ok(Listing::Pruned);
        }
    };

    let mut children = 0;
    for dent in read_dir {
        let dent = match dent {
            Ok(d) => d,
            Err(e) => {
                // Keep what was read so far.
                debug!(path = %parent.display(), error = %e, "directory listing cut short");
                break;
            }
        };

        let name = dent.file_name();
        if name == "." || name == ".." {
            continue;
        }

        let full_path = parent.join(&name);
        let fs_path = fs_parent.join(&name);
        let len = full_path.as_os_str().len().max(fs_path.as_os_str().len());
        if len >= opts.max_path_len {
            warn!(
                parent = %parent.display(),
                name = ?name,
                len,
                limit = opts.max_path_len,
                "skipping entry with overlong path"
            );
            overlong.push(OverlongPath {
                parent: parent.to_path_buf(),
                name,
                len,
                limit: opts.max_path_len,
            });
            continue;
        }

        queue.push_back(EntryRecord::new(name, full_path, child_depth).with_fs_path(fs_path));
        children += 1;
    }

    trace!(path = %parent.display(), children, "listed directory");
    Ok(Listing::Listed { children })
}
