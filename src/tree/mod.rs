//! Ordered search trees.
//!
//! This module provides one engine, [`OrderedTree`], that runs in two modes:
//!
//! - **Plain BST**: insertion and removal never restructure the tree beyond
//!   the splice itself. Sorted input produces a chain.
//! - **AVL**: after every insertion and removal each node on the mutated
//!   path is rebalanced bottom-up, keeping the height within O(log N).
//!
//! The mode is fixed at construction, which keeps a BST-versus-AVL
//! comparison down to a single flag.
//!
//! # Examples
//!
//! ```rust
//! use severity_tree::tree::OrderedTree;
//!
//! let mut plain = OrderedTree::bst();
//! let mut balanced = OrderedTree::avl();
//! for key in 0..1_000 {
//!     plain.insert(key, key * 2);
//!     balanced.insert(key, key * 2);
//! }
//!
//! assert_eq!(plain.height(), 999);
//! assert!(balanced.height() <= 14);
//!
//! // Both answer range queries identically.
//! assert_eq!(plain.range_query(&10, &12), balanced.range_query(&10, &12));
//! assert_eq!(balanced.range_query(&10, &12), vec![&20, &22, &24]);
//! ```
//!
//! # Invariants
//!
//! Between public calls:
//!
//! 1. The in-order key sequence is ascending. In a plain BST every left key
//!    is smaller than its parent and every right key is at least as large.
//!    A rotation may move an equal key to the left side, so a balanced tree
//!    only guarantees `left <= key <= right`.
//! 2. In a balanced tree, sibling heights differ by at most one.
//! 3. In a balanced tree, every stored height is exact.
//!
//! [`OrderedTree::check_invariants`] verifies all three.
//!
//! # Recursion depth
//!
//! `insert`, `remove`, `range_query` and `clone` recurse once per level. That is
//! O(log N) for a balanced tree. A plain BST built from sorted input recurses
//! once per entry, which on the default 8 MiB main-thread stack supports
//! trees in the tens of thousands of entries; spawn a thread with a larger
//! stack for more. Traversals, `size`, `height` and dropping never recurse.

mod balance;
mod invariants;
mod node;
mod ordered_tree;
mod range;
mod traverse;

pub use invariants::InvariantViolation;
pub use node::Node;
pub use ordered_tree::OrderedTree;
pub use range::range_query;
pub use traverse::IntoIter;
pub use traverse::Iter;
