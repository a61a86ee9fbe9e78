//! Scoped working-directory switching for [`WalkFlags::CHDIR`].
//!
//! The working directory is process-wide. Two walks using `CHDIR` at the
//! same time in one process will resolve relative paths against each
//! other's directories; callers that walk concurrently must not set it.
//!
//! [`WalkFlags::CHDIR`]: crate::WalkFlags::CHDIR

use std::env;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Restores the saved working directory when dropped.
#[derive(Debug)]
pub(crate) struct CwdGuard {
    saved: PathBuf,
}

impl CwdGuard {
    /// Save the current directory and switch into `target`.
    ///
    /// Returns `None` if the current directory cannot be read; nothing is
    /// switched in that case. A failed switch still yields a guard so the
    /// saved directory is re-entered on drop.
    pub fn enter(target: &Path) -> Option<Self> {
        let saved = match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                warn!(error = %e, "cannot read working directory, not switching");
                return None;
            }
        };
        if let Err(e) = env::set_current_dir(target) {
            warn!(path = %target.display(), error = %e, "cannot enter directory");
        }
        Some(Self { saved })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.saved) {
            warn!(path = %self.saved.display(), error = %e, "cannot restore working directory");
        }
    }
}
