use std::io;

use thiserror::Error;

/// Errors reported by [`AvlTree`](crate::AvlTree).
///
/// A failed operation never leaves the tree in a partially modified state.
#[derive(Debug, Error)]
pub enum AvlTreeError {
    /// `insert` found the key already present. Use `upsert` to overwrite.
    #[error("key is already present in the tree")]
    DuplicateKey,

    /// The dump printer walked a nested list that does not have the
    /// `[left, key, right]` shape produced by `to_nested_list`.
    #[error("malformed nested list: {0}")]
    InternalConsistency(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
