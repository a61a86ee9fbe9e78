use std::env;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, trace};

use crate::cwd::CwdGuard;
use crate::discover::{discover, DiscoverOptions, Listing};
use crate::entry::{EntryKind, EntryRecord, TraversalCtx, Visit};
use crate::error::WalkError;
use crate::flags::WalkFlags;
use crate::limits::resolve_fd_limit;
use crate::queue::PendingQueue;
use crate::results::WalkSummary;
use crate::stat;
use crate::traits::{Visitor, WalkState};

// ---------------------------------------------------------------------------
// DepthMode
// ---------------------------------------------------------------------------

/// What [`TraversalCtx::level`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthMode {
    /// The shared nesting counter at the moment of the callback.
    ///
    /// The counter is raised only while a directory's children are being
    /// listed and is lowered again before that directory is reported, so
    /// every visit observes `0`. This is the value legacy `xftw` callers
    /// received.
    #[default]
    Nesting,

    /// Distance from the root, fixed when the entry is queued. The root's
    /// children are at level 1; the root itself is reported at level 0.
    Tree,
}

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Parameters passed from the builder to the engine.
#[derive(Debug, Clone)]
pub(crate) struct WalkConfig {
    pub flags:        WalkFlags,
    pub fd_hint:      i32,
    pub max_path_len: usize,
    pub depth_mode:   DepthMode,
}

// ---------------------------------------------------------------------------
// WalkContext
// ---------------------------------------------------------------------------

/// Mutable state for one walk. Never shared between walks.
struct WalkContext {
    flags:      WalkFlags,
    depth_mode: DepthMode,
    discover:   DiscoverOptions,
    level:      usize,
    queue:      PendingQueue,
    summary:    WalkSummary,
}

impl WalkContext {
    /// List a directory entry's children onto the queue tail.
    ///
    /// One level only; deeper levels are reached when the drain loop
    /// dequeues the children.
    fn descend(&mut self, record: &EntryRecord) -> Result<(), WalkError> {
        let _cwd = if self.flags.changes_dir() {
            CwdGuard::enter(record.fs_path())
        } else {
            None
        };

        self.level += 1;
        let listing = discover(
            &record.full_path,
            record.fs_path(),
            record.depth + 1,
            &mut self.queue,
            &self.discover,
            &mut self.summary.overlong,
        );
        self.level -= 1;

        if listing? == Listing::Pruned {
            self.summary.pruned += 1;
        }
        Ok(())
    }

    fn report_level(&self, record: &EntryRecord) -> usize {
        match self.depth_mode {
            DepthMode::Nesting => self.level,
            DepthMode::Tree => record.depth,
        }
    }

    fn tally(&mut self, kind: EntryKind) {
        self.summary.visited += 1;
        match kind {
            EntryKind::Directory => self.summary.directories += 1,
            EntryKind::RegularFile => self.summary.files += 1,
            EntryKind::NotStatable => self.summary.not_statable += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Validate `root`, drain its subtree through `visitor`, then report the
/// root itself.
pub(crate) fn run<U, V>(
    root: &Path,
    config: WalkConfig,
    visitor: &mut V,
    user_data: &mut U,
) -> Result<WalkSummary, WalkError>
where
    U: ?Sized,
    V: Visitor<U> + ?Sized,
{
    let start = Instant::now();

    let root_meta = validate_root(root, config.flags)?;
    let fd_limit = resolve_fd_limit(config.fd_hint);

    // Children of a relative root would not resolve once we chdir away.
    // Reported paths still start from `root`.
    let fs_root = if config.flags.changes_dir() {
        absolutize(root)?
    } else {
        root.to_path_buf()
    };

    debug!(
        root = %fs_root.display(),
        flags = ?config.flags,
        fd_limit,
        "starting walk"
    );

    let mut ctx = WalkContext {
        flags:      config.flags,
        depth_mode: config.depth_mode,
        discover:   DiscoverOptions {
            max_path_len: config.max_path_len,
        },
        level:      0,
        queue:      PendingQueue::new(),
        summary:    WalkSummary {
            fd_limit,
            ..WalkSummary::default()
        },
    };

    if discover(
        root,
        &fs_root,
        1,
        &mut ctx.queue,
        &ctx.discover,
        &mut ctx.summary.overlong,
    )? == Listing::Pruned
    {
        ctx.summary.pruned += 1;
    }

    while let Some(mut record) = ctx.queue.pop_front() {
        match stat::fetch(record.fs_path(), ctx.flags) {
            Ok(meta) => record.metadata = Some(meta),
            Err(e) => record.stat_error = Some(e),
        }
        let kind = stat::classify(record.metadata.as_ref());

        if kind == EntryKind::Directory {
            ctx.descend(&record)?;
        }

        let visit = Visit {
            path:     &record.full_path,
            metadata: record.metadata.as_ref(),
            error:    record.stat_error.as_ref(),
            kind,
            ctx:      TraversalCtx {
                level: ctx.report_level(&record),
                base:  record.base(),
            },
            is_root:  false,
        };
        trace!(path = %record.full_path.display(), ?kind, "visit");

        ctx.tally(kind);
        let state = visitor.visit(&visit, user_data);
        drop(record);

        if state == WalkState::Quit {
            debug!(pending = ctx.queue.len(), "walk stopped by visitor");
            ctx.queue.clear();
            ctx.summary.stopped = true;
            ctx.summary.duration = start.elapsed();
            return Ok(ctx.summary);
        }
    }
    ctx.queue.clear();

    let root_visit = Visit {
        path:     root,
        metadata: Some(&root_meta),
        error:    None,
        kind:     EntryKind::Directory,
        ctx:      TraversalCtx {
            level: 0,
            base:  root_base(root),
        },
        is_root:  true,
    };
    ctx.tally(EntryKind::Directory);
    // WalkState is irrelevant after the root visit.
    let _ = visitor.visit(&root_visit, user_data);

    ctx.summary.duration = start.elapsed();
    debug!(
        visited = ctx.summary.visited,
        queued = ctx.queue.enqueued(),
        pruned = ctx.summary.pruned,
        overlong = ctx.summary.overlong.len(),
        "walk complete"
    );
    Ok(ctx.summary)
}

fn validate_root(root: &Path, flags: WalkFlags) -> Result<Metadata, WalkError> {
    if root.as_os_str().is_empty() {
        return Err(WalkError::EmptyPath);
    }
    let meta = stat::fetch(root, flags).map_err(|source| WalkError::RootMetadata {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(WalkError::NotADirectory(root.to_path_buf()));
    }
    Ok(meta)
}

fn absolutize(root: &Path) -> Result<PathBuf, WalkError> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }
    env::current_dir()
        .map(|cwd| cwd.join(root))
        .map_err(|source| WalkError::RootMetadata {
            path: root.to_path_buf(),
            source,
        })
}

fn root_base(root: &Path) -> usize {
    let bytes = root.as_os_str().as_encoded_bytes();
    match root.file_name() {
        Some(name) if bytes.ends_with(name.as_encoded_bytes()) => bytes.len() - name.len(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config() -> WalkConfig {
        WalkConfig {
            flags:        WalkFlags::empty(),
            fd_hint:      0,
            max_path_len: crate::limits::default_max_path_len(),
            depth_mode:   DepthMode::Nesting,
        }
    }

    #[test]
    fn empty_root_is_rejected() {
        let mut calls = 0usize;
        let mut visitor = |_: &Visit<'_>, n: &mut usize| {
            *n += 1;
            WalkState::Continue
        };
        let err = run(Path::new(""), config(), &mut visitor, &mut calls).unwrap_err();
        assert!(matches!(err, WalkError::EmptyPath));
        assert_eq!(calls, 0);
    }

    #[test]
    fn nesting_level_is_restored_before_each_visit() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("a/b/c")).unwrap();

        let mut levels = Vec::new();
        let mut visitor = |v: &Visit<'_>, out: &mut Vec<usize>| {
            out.push(v.ctx().level);
            WalkState::Continue
        };
        run(temp.path(), config(), &mut visitor, &mut levels).unwrap();
        assert_eq!(levels, vec![0, 0, 0, 0]);
    }

    #[test]
    fn root_base_points_at_last_component() {
        assert_eq!(root_base(Path::new("/tmp/root")), "/tmp/".len());
        assert_eq!(root_base(Path::new("root")), 0);
        assert_eq!(root_base(Path::new("/")), 0);
    }
}
