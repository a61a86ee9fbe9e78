//! Platform limits: the legacy open-descriptor hint and the path length cap.

/// Used when the platform cannot report an open-file maximum.
const FALLBACK_OPEN_MAX: usize = 256;

/// Resolve the legacy `nfds` argument.
///
/// Positive hints are taken as-is. Anything else is replaced with the
/// process open-file maximum. The value is informational only; the walk
/// never holds more than one directory handle open.
pub(crate) fn resolve_fd_limit(hint: i32) -> usize {
    if hint > 0 {
        hint as usize
    } else {
        platform_open_max()
    }
}

#[cfg(unix)]
fn platform_open_max() -> usize {
    use nix::unistd::{sysconf, SysconfVar};

    match sysconf(SysconfVar::OPEN_MAX) {
        Ok(Some(n)) if n > 0 => n as usize,
        _ => FALLBACK_OPEN_MAX,
    }
}

#[cfg(not(unix))]
fn platform_open_max() -> usize {
    FALLBACK_OPEN_MAX
}

/// Longest path the platform accepts, including the trailing NUL.
#[cfg(unix)]
pub(crate) fn default_max_path_len() -> usize {
    nix::libc::PATH_MAX as usize
}

#[cfg(not(unix))]
pub(crate) fn default_max_path_len() -> usize {
    4096
}
