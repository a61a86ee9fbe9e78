use crate::entry::Visit;

/// Tells the walk whether to keep going after a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkState {
    /// Continue with the next pending entry.
    #[default]
    Continue,

    /// Stop the walk. Pending entries are dropped and the root is not
    /// reported.
    Quit,
}

/// Receives one call per visited entry.
///
/// `user_data` is the value passed to [`walk`](crate::walk) or
/// [`WalkBuilder::run`](crate::WalkBuilder::run), threaded through unchanged
/// so a plain `fn` can accumulate state without captures.
///
/// Implemented for every `FnMut(&Visit<'_>, &mut U) -> WalkState`.
///
/// # Example
///
/// ```rust
/// use xwalk::{EntryKind, Visit, Visitor, WalkState};
///
/// struct CountFiles;
///
/// impl Visitor<usize> for CountFiles {
///     fn visit(&mut self, visit: &Visit<'_>, files: &mut usize) -> WalkState {
///         if visit.kind() == EntryKind::RegularFile {
///             *files += 1;
///         }
///         WalkState::Continue
///     }
/// }
/// ```
pub trait Visitor<U: ?Sized> {
    /// Handle one entry.
    ///
    /// Returning [`WalkState::Quit`] ends the walk early. Walks whose
    /// visitor always continues report every entry, then the root.
    fn visit(&mut self, visit: &Visit<'_>, user_data: &mut U) -> WalkState;
}

impl<U, F> Visitor<U> for F
where
    U: ?Sized,
    F: FnMut(&Visit<'_>, &mut U) -> WalkState,
{
    fn visit(&mut self, visit: &Visit<'_>, user_data: &mut U) -> WalkState {
        self(visit, user_data)
    }
}
