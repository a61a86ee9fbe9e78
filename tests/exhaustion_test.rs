//! Running out of descriptors mid-walk. The open-file limit and the
//! working directory are process-wide, so everything lives in one test.

#![cfg(unix)]

use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

use nix::errno::Errno;
use nix::sys::resource::{getrlimit, setrlimit, Resource};
use xwalk::{walk, Visit, WalkError, WalkFlags, WalkState};

/// Soft descriptor limit for this process; keeps exhaustion cheap.
const SOFT_LIMIT: nix::libc::rlim_t = 128;

/// Upper bound on files opened while exhausting the table.
const MAX_HELD: usize = 100_000;

/// Visitor state: the first visit opens files until the table is full.
struct Exhauster {
    target: PathBuf,
    held:   Vec<File>,
    seen:   Vec<PathBuf>,
}

impl Exhauster {
    fn new(target: PathBuf) -> Self {
        Self {
            target,
            held: Vec::new(),
            seen: Vec::new(),
        }
    }
}

fn exhaust_on_first_visit(visit: &Visit<'_>, state: &mut Exhauster) -> WalkState {
    state.seen.push(visit.path().to_path_buf());
    if state.seen.len() == 1 {
        while state.held.len() < MAX_HELD {
            match File::open(&state.target) {
                Ok(f) => state.held.push(f),
                Err(e) => {
                    assert_eq!(e.raw_os_error(), Some(Errno::EMFILE as i32));
                    break;
                }
            }
        }
    }
    WalkState::Continue
}

/// Three sibling directories: whichever is visited first has already been
/// listed, and the next one's listing hits the full table.
fn setup_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for d in ["d1", "d2", "d3"] {
        let sub = dir.path().join("root").join(d);
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("f"), "x").unwrap();
    }
    fs::write(dir.path().join("filler"), "x").unwrap();
    dir
}

fn run_exhausted(flags: WalkFlags) {
    let dir = setup_tree();
    let root = dir.path().join("root");
    let before = env::current_dir().unwrap();

    let mut state = Exhauster::new(dir.path().join("filler"));
    let result = walk(&root, &mut exhaust_on_first_visit, 0, flags, &mut state);
    let after = env::current_dir().unwrap();
    state.held.clear();

    let err = match result {
        Ok(summary) => panic!("walk should abort, got {summary:?}"),
        Err(err) => err,
    };
    assert!(err.is_hard(), "{err}");
    assert!(matches!(err, WalkError::Discovery { .. }));
    assert_eq!(err.status(), -1);

    // Only the entry that filled the table was reported; never the root.
    assert_eq!(state.seen.len(), 1);
    assert!(state.seen.iter().all(|p| *p != root));
    assert_eq!(after, before);
}

#[test]
fn descriptor_exhaustion_aborts_walk() {
    let (soft, hard) = getrlimit(Resource::RLIMIT_NOFILE).unwrap();
    setrlimit(Resource::RLIMIT_NOFILE, soft.min(SOFT_LIMIT), hard).unwrap();

    run_exhausted(WalkFlags::empty());
    run_exhausted(WalkFlags::CHDIR);

    setrlimit(Resource::RLIMIT_NOFILE, soft, hard).unwrap();
}
