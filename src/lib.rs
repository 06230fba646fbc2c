//! # severity-tree
//!
//! An ordered key-value search tree that runs either as a plain binary
//! search tree or as a self-balancing AVL tree, with a pruning range query
//! that works on both.
//!
//! ## Overview
//!
//! - **`OrderedTree`**: one engine, two modes chosen at construction.
//!   Recursive insert and remove, duplicate keys, in-order and level-order
//!   traversal.
//! - **Balancing**: height tracking and the four AVL rotation cases, applied
//!   bottom-up after every mutation when enabled.
//! - **Range queries**: values whose keys fall in a closed interval, in
//!   ascending order, visiting only the subtrees that can contribute.
//! - **Severity keys**: a NaN-free float key for severity-indexed records and
//!   a validated severity interval.
//!
//! ## Feature Flags
//!
//! - `severity` (default): the [`severity`] module.
//!
//! ## Example
//!
//! ```rust
//! use severity_tree::prelude::*;
//!
//! let mut tree = OrderedTree::avl();
//! for (key, value) in [(3, "c"), (1, "a"), (2, "b")] {
//!     tree.insert(key, value);
//! }
//!
//! assert_eq!(tree.write_bfs(), vec![Some(&2), Some(&1), Some(&3)]);
//! assert_eq!(tree.range_query(&1, &2), vec![&"a", &"b"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use severity_tree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::tree::*;

    #[cfg(feature = "severity")]
    pub use crate::severity::*;
}

pub mod tree;

#[cfg(feature = "severity")]
pub mod severity;
