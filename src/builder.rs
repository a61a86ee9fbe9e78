use std::path::PathBuf;

use crate::engine::{run, DepthMode, WalkConfig};
use crate::error::WalkError;
use crate::flags::WalkFlags;
use crate::limits::default_max_path_len;
use crate::results::WalkSummary;
use crate::traits::Visitor;

// ---------------------------------------------------------------------------
// WalkBuilder
// ---------------------------------------------------------------------------

/// Configures and runs a walk.
///
/// Created via [`xwalk::walker()`](crate::walker). Configure with chained
/// builder methods, then call [`run()`](WalkBuilder::run).
///
/// # Example
///
/// ```rust,ignore
/// let summary = xwalk::walker("/srv/data")
///     .physical(true)
///     .depth_mode(DepthMode::Tree)
///     .run(&mut visitor, &mut state)?;
/// ```
#[derive(Debug, Clone)]
pub struct WalkBuilder {
    root:         PathBuf,
    flags:        WalkFlags,
    fd_hint:      i32,
    max_path_len: usize,
    depth_mode:   DepthMode,
}

impl WalkBuilder {
    /// Start a walk configuration rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:         root.into(),
            flags:        WalkFlags::empty(),
            fd_hint:      0,
            max_path_len: default_max_path_len(),
            depth_mode:   DepthMode::default(),
        }
    }

    // ── Flags ─────────────────────────────────────────────────────────────

    /// Replace the whole flag set.
    pub fn flags(mut self, flags: WalkFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Fetch metadata without following symbolic links.
    ///
    /// A link to a directory is then reported with its own metadata and
    /// its target is not entered.
    pub fn physical(mut self, yes: bool) -> Self {
        self.flags.set(WalkFlags::PHYSICAL, yes);
        self
    }

    /// Switch the working directory into each directory while its children
    /// are listed. See [`WalkFlags::CHDIR`].
    pub fn chdir(mut self, yes: bool) -> Self {
        self.flags.set(WalkFlags::CHDIR, yes);
        self
    }

    // ── Limits ────────────────────────────────────────────────────────────

    /// Legacy open-descriptor hint. Values `<= 0` resolve to the process
    /// maximum. Reported in [`WalkSummary::fd_limit`] but never enforced:
    /// the walk keeps at most one directory open regardless.
    pub fn fd_limit(mut self, hint: i32) -> Self {
        self.fd_hint = hint;
        self
    }

    /// Maximum path length in bytes, terminator included. Children whose
    /// joined path would not fit are skipped and listed in
    /// [`WalkSummary::overlong`]. Defaults to the platform `PATH_MAX`.
    pub fn max_path_len(mut self, len: usize) -> Self {
        self.max_path_len = len;
        self
    }

    /// Choose what [`TraversalCtx::level`](crate::TraversalCtx::level) reports.
    pub fn depth_mode(mut self, mode: DepthMode) -> Self {
        self.depth_mode = mode;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Run the walk, handing `user_data` to every visit.
    ///
    /// Blocks until the subtree is drained. The root is reported last.
    ///
    /// # Errors
    ///
    /// Fails without visiting anything if the root path is empty, cannot be
    /// stat-ed, or is not a directory. Fails midway with
    /// [`WalkError::Discovery`] if opening a directory runs out of
    /// descriptors or memory. Everything else is reported through the
    /// visit's [`EntryKind`](crate::EntryKind) or the summary.
    pub fn run<U, V>(self, visitor: &mut V, user_data: &mut U) -> Result<WalkSummary, WalkError>
    where
        U: ?Sized,
        V: Visitor<U> + ?Sized,
    {
        let config = WalkConfig {
            flags:        self.flags,
            fd_hint:      self.fd_hint,
            max_path_len: self.max_path_len,
            depth_mode:   self.depth_mode,
        };
        run(&self.root, config, visitor, user_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_toggle_flags() {
        let builder = WalkBuilder::new("/tmp").physical(true).chdir(true);
        assert_eq!(builder.flags, WalkFlags::PHYSICAL | WalkFlags::CHDIR);

        let builder = builder.physical(false);
        assert_eq!(builder.flags, WalkFlags::CHDIR);
    }

    #[test]
    fn defaults() {
        let builder = WalkBuilder::new("/tmp");
        assert!(builder.flags.is_empty());
        assert_eq!(builder.fd_hint, 0);
        assert_eq!(builder.max_path_len, default_max_path_len());
        assert_eq!(builder.depth_mode, DepthMode::Nesting);
    }
}
