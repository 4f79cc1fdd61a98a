//! An ordered key-value container implemented with an AVL tree.
//!
//! [`AvlTree`] maps keys with a total order to arbitrary payloads. Insert,
//! upsert, delete and find all run in O(log n), and the tree can dump its
//! own shape for debugging.
//!
//! ```
//! use avltree::{AvlTree, AvlTreeError};
//!
//! let mut tree = AvlTree::new();
//! tree.insert(1, "one")?;
//! assert!(matches!(tree.insert(1, "uno"), Err(AvlTreeError::DuplicateKey)));
//! tree.upsert(1, "uno");
//! assert_eq!(tree.get(&1), Some(&"uno"));
//! assert!(tree.is_balanced());
//! # Ok::<(), AvlTreeError>(())
//! ```
//!
//! # Features
//!
//! - `consistency_check`: exposes [`AvlTree::check_consistency`] outside of tests.
//! - `tracing`: logs rotations and ignored operations through the `tracing` crate.

#[macro_use]
mod tracing_helpers;

mod dump;
mod error;
mod node;
mod tree;

pub use dump::{NestedList, Slot};
pub use error::AvlTreeError;
pub use node::Node;
pub use tree::AvlTree;
