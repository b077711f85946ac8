//! Failure reasons for tree operations.
//! Every failure is local: the tree is left exactly as it was before the call.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// An element comparing equal to the inserted one is already in the tree.
    #[error("an equal element is already in the tree")]
    DuplicateKey,
    /// No element compares equal to the given key.
    #[error("no element in the tree compares equal to the key")]
    NotFound,
    /// The tree already holds `limit` elements.
    #[error("the tree is at its size limit of {limit} elements")]
    CapacityExceeded { limit: usize },
    #[error("the tree is empty")]
    EmptyTree,
    /// Tried to set a nonzero limit smaller than the current number of elements.
    #[error("cannot set the size limit to {requested}: the tree holds {len} elements")]
    LimitBelowSize { requested: usize, len: usize },
}

/// An element the tree refused to take, together with the reason.
/// Ownership goes back to the caller; the destructor is never called on it.
#[derive(Error)]
#[error("element rejected: {reason}")]
pub struct Rejected<T> {
    pub element: T,
    pub reason: TreeError,
}

impl<T> Rejected<T> {
    pub(crate) fn new(element: T, reason: TreeError) -> Self {
        Rejected { element, reason }
    }

    /// Takes back the rejected element.
    pub fn into_inner(self) -> T {
        self.element
    }
}

// written by hand so that `T` doesn't have to implement `Debug`
impl<T> std::fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rejected")
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}
