//! # xwalk
//!
//! Directory tree walker with `nftw()`-style callbacks and caller data.
//!
//! xwalk visits every object below a root directory, calling a visitor once
//! per entry with its path, metadata, a [`EntryKind`] tag and a
//! [`TraversalCtx`], plus a `&mut U` the caller threads through the walk.
//! The root is reported last, always as a directory.
//!
//! Discovery is queue-based: each directory is listed once, its children are
//! appended to a FIFO, and the directory handle is closed before anything
//! else is opened. Stack depth and open descriptors stay constant no matter
//! how deep the tree goes.
//!
//! # Quick Start
//!
//! ```rust
//! use xwalk::{EntryKind, Visit, WalkFlags, WalkState};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! std::fs::write(temp.path().join("a.txt"), b"a")?;
//! std::fs::create_dir(temp.path().join("sub"))?;
//! std::fs::write(temp.path().join("sub").join("b.txt"), b"b")?;
//!
//! let mut files = Vec::new();
//! let summary = xwalk::walk(
//!     temp.path(),
//!     &mut |visit: &Visit<'_>, files: &mut Vec<std::path::PathBuf>| {
//!         if visit.kind() == EntryKind::RegularFile {
//!             files.push(visit.path().to_path_buf());
//!         }
//!         WalkState::Continue
//!     },
//!     0,
//!     WalkFlags::empty(),
//!     &mut files,
//! )?;
//!
//! assert_eq!(files.len(), 2);
//! assert_eq!(summary.visited, 4);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```
//!
//! # Caveats
//!
//! - No symlink-cycle detection: without [`WalkFlags::PHYSICAL`] a link back
//!   to an ancestor is followed until paths hit the length limit.
//! - A root of exactly `.` or `..` is reported but not listed. Pass an
//!   absolute path or `./` to walk the current directory.
//! - [`WalkFlags::CHDIR`] changes process-wide state; see [`WalkFlags`].

#![forbid(unsafe_code)]

pub mod engine;

mod builder;
mod cwd;
mod discover;
mod entry;
mod error;
mod flags;
mod limits;
mod queue;
mod results;
mod stat;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::WalkBuilder;
pub use engine::DepthMode;
pub use entry::{EntryKind, TraversalCtx, Visit};
pub use error::WalkError;
pub use flags::WalkFlags;
pub use results::{OverlongPath, WalkSummary};
pub use traits::{Visitor, WalkState};

use std::path::Path;

// ── Entry points ──────────────────────────────────────────────────────────────

/// Walk the tree under `path`, calling `visitor` once per entry and once
/// more for `path` itself.
///
/// `fd_hint` is the legacy `nfds` argument: accepted, resolved against the
/// platform maximum when `<= 0`, and otherwise ignored. `user_data` is
/// handed to every visit unchanged.
///
/// Equivalent to `walker(path).flags(flags).fd_limit(fd_hint).run(visitor, user_data)`.
///
/// # Errors
///
/// See [`WalkBuilder::run`].
pub fn walk<U, V>(
    path: impl AsRef<Path>,
    visitor: &mut V,
    fd_hint: i32,
    flags: WalkFlags,
    user_data: &mut U,
) -> Result<WalkSummary, WalkError>
where
    U: ?Sized,
    V: Visitor<U> + ?Sized,
{
    walker(path.as_ref())
        .flags(flags)
        .fd_limit(fd_hint)
        .run(visitor, user_data)
}

/// Create a new [`WalkBuilder`] rooted at `root`.
pub fn walker(root: impl AsRef<Path>) -> WalkBuilder {
    WalkBuilder::new(root.as_ref())
}
