//! The search tree engine.
//!
//! This module provides [`OrderedTree`], an ordered key-value tree that runs
//! either as a plain binary search tree or as a self-balancing AVL tree.
//!
//! # Overview
//!
//! Both modes share one node shape and one set of recursive algorithms.
//! Mutations descend to the affected position and rebuild the path on the
//! way back up: every call takes a subtree by value and returns its
//! replacement. In balanced mode each node on that path is rebalanced before
//! it is handed back to its parent, one level per stack frame, so a rotation
//! lower down is always visible to the level above it.
//!
//! | Operation     | Plain BST | Balanced  |
//! |---------------|-----------|-----------|
//! | `insert`      | O(h)      | O(log N)  |
//! | `remove`      | O(h)      | O(log N)  |
//! | `contains`    | O(h)      | O(log N)  |
//! | `range_query` | O(k + h)  | O(k + log N) |
//! | `size`        | O(N)      | O(N)      |
//! | `height`      | O(N)      | O(N)      |
//!
//! Here h is the height of the tree, which for a plain BST fed sorted input
//! is N - 1.
//!
//! # Duplicate keys
//!
//! Equal keys are allowed. A key that is not less than a node's key descends
//! to the right, so entries with equal keys keep their insertion order in
//! [`OrderedTree::inorder`] and [`OrderedTree::iter`]. Removal therefore
//! matches on the key *and* the value.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use super::balance::balance;
use super::invariants::{self, InvariantViolation};
use super::node::{Link, Node, release};
use super::range::range_query;
use super::traverse::{self, IntoIter, Iter};

/// An ordered key-value tree with optional AVL balancing.
///
/// Whether the tree balances itself is chosen once, at construction, and
/// cannot be changed afterwards. Use [`OrderedTree::bst`] for a plain binary
/// search tree and [`OrderedTree::avl`] for a height-balanced one.
///
/// # Examples
///
/// ```rust
/// use severity_tree::tree::OrderedTree;
///
/// let mut tree = OrderedTree::avl();
/// for key in 1..=6 {
///     tree.insert(key, ());
/// }
///
/// assert_eq!(
///     tree.write_bfs(),
///     vec![Some(&4), Some(&2), Some(&5), Some(&1), Some(&3), None, Some(&6)]
/// );
/// assert_eq!(tree.inorder(), vec![&1, &2, &3, &4, &5, &6]);
/// assert_eq!(tree.height(), 2);
/// ```
#[derive(Clone)]
pub struct OrderedTree<K, V> {
    root: Link<K, V>,
    balanced: bool,
}

impl<K, V> OrderedTree<K, V> {
    /// Creates an empty tree. When `balanced` is `true` every insertion and
    /// removal restores the AVL height-balance condition.
    #[inline]
    #[must_use]
    pub const fn new(balanced: bool) -> Self {
        Self {
            root: None,
            balanced,
        }
    }

    /// Creates an empty plain (unbalanced) binary search tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use severity_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::bst();
    /// for key in 1..=3 {
    ///     tree.insert(key, ());
    /// }
    /// // Sorted input degenerates into a chain.
    /// assert_eq!(tree.write_bfs(), vec![Some(&1), None, Some(&2), None, Some(&3)]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn bst() -> Self {
        Self::new(false)
    }

    /// Creates an empty AVL tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use severity_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::avl();
    /// for key in 1..=3 {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.write_bfs(), vec![Some(&2), Some(&1), Some(&3)]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn avl() -> Self {
        Self::new(true)
    }

    /// Returns `true` if this tree rebalances after every mutation.
    #[inline]
    #[must_use]
    pub const fn is_balancing(&self) -> bool {
        self.balanced
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        log::debug!("clearing tree (balanced: {})", self.balanced);
        release(self.root.take());
    }

    /// Returns `true` if the tree holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Counts the entries.
    ///
    /// # Complexity
    ///
    /// O(N). The count is recomputed on every call.
    #[must_use]
    pub fn size(&self) -> usize {
        traverse::count(self.root())
    }

    /// Returns the height of the tree: -1 when empty, 0 for a single node.
    ///
    /// # Complexity
    ///
    /// O(N). The height is recomputed on every call, in both modes.
    #[must_use]
    pub fn height(&self) -> isize {
        traverse::depth(self.root())
    }

    /// Returns the root node, if any.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Returns all keys in ascending order, duplicates included.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use severity_tree::tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32, ()> =
    ///     [30, 10, 50, 10].into_iter().map(|key| (key, ())).collect();
    /// assert_eq!(tree.inorder(), vec![&10, &10, &30, &50]);
    /// ```
    #[must_use]
    pub fn inorder(&self) -> Vec<&K> {
        traverse::inorder(self.root())
    }

    /// Returns the level-order shape fingerprint of the tree.
    ///
    /// Each visited node contributes its key; each missing child of a visited
    /// node contributes `None`. Trailing `None`s are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use severity_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::avl();
    /// tree.insert(30, ());
    /// tree.insert(50, ());
    /// assert_eq!(tree.write_bfs(), vec![Some(&30), None, Some(&50)]);
    /// ```
    #[must_use]
    pub fn write_bfs(&self) -> Vec<Option<&K>> {
        traverse::write_bfs(self.root())
    }

    /// Returns an in-order iterator over the entries.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root())
    }

    /// Returns an iterator over the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns the entry with the smallest key. Among equal keys this is the
    /// one inserted first.
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key. Among equal keys this is the
    /// one inserted last.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Rebalances `node` if this tree balances, otherwise hands it back.
    #[inline]
    fn restore(node: Box<Node<K, V>>, balanced: bool) -> Box<Node<K, V>> {
        if balanced { balance(node) } else { node }
    }
}

impl<K: Ord, V> OrderedTree<K, V> {
    /// Inserts an entry. Equal keys are kept side by side; the new entry goes
    /// after every existing entry with the same key.
    ///
    /// # Complexity
    ///
    /// O(h), where h is the height of the tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use severity_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::avl();
    /// tree.insert(3, "c");
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    ///
    /// // The left-left case rotates right around 3.
    /// assert_eq!(tree.write_bfs(), vec![Some(&2), Some(&1), Some(&3)]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        self.root = Some(Self::insert_node(self.root.take(), key, value, self.balanced));
    }

    fn insert_node(link: Link<K, V>, key: K, value: V, balanced: bool) -> Box<Node<K, V>> {
        let Some(mut node) = link else {
            return Box::new(Node::leaf(key, value));
        };

        if key < node.key {
            node.left = Some(Self::insert_node(node.left.take(), key, value, balanced));
        } else {
            node.right = Some(Self::insert_node(node.right.take(), key, value, balanced));
        }
        Self::restore(node, balanced)
    }

    /// Returns `true` if some entry has the given key.
    ///
    /// # Complexity
    ///
    /// O(h)
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the value of the first entry with the given key found on the
    /// search path from the root.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use severity_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::bst();
    /// tree.insert("b".to_string(), 2);
    /// tree.insert("a".to_string(), 1);
    ///
    /// assert_eq!(tree.get("a"), Some(&1));
    /// assert_eq!(tree.get("z"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root();
        while let Some(current) = node {
            node = match key.cmp(current.key.borrow()) {
                Ordering::Less => current.left(),
                Ordering::Greater => current.right(),
                Ordering::Equal => return Some(&current.value),
            };
        }
        None
    }

    /// Returns the values whose keys lie in the closed interval
    /// `[min, max]`, in ascending key order.
    ///
    /// See [`range_query`](super::range_query) for the pruning rules.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use severity_tree::tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32, &str> =
    ///     [(7, "g"), (3, "c"), (9, "i"), (5, "e")].into_iter().collect();
    /// assert_eq!(tree.range_query(&4, &8), vec![&"e", &"g"]);
    /// ```
    #[must_use]
    pub fn range_query<Q>(&self, min: &Q, max: &Q) -> Vec<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        range_query(self.root(), min, max)
    }

    /// Verifies the structural invariants of the tree.
    ///
    /// Always checks that the in-order key sequence is ascending. Balanced
    /// trees are additionally checked for exact stored heights and for every
    /// balance factor lying in `[-1, 1]`.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        invariants::check(self.root(), self.balanced)
    }
}

impl<K: Ord, V: PartialEq> OrderedTree<K, V> {
    /// Removes the entry matching both `key` and `value`.
    ///
    /// An entry with the right key but a different value is passed over, so
    /// one of several entries sharing a key can be removed precisely. Returns
    /// `false`, leaving the tree untouched, when no entry matches.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use severity_tree::tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::avl();
    /// for key in [40, 20, 60, 70] {
    ///     tree.insert(key, ());
    /// }
    ///
    /// assert!(tree.remove(&20, &()));
    /// // The right-right case rotates left around 40.
    /// assert_eq!(tree.write_bfs(), vec![Some(&60), Some(&40), Some(&70)]);
    ///
    /// assert!(!tree.remove(&20, &()));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = Self::remove_node(self.root.take(), key, value, self.balanced);
        self.root = root;
        removed
    }

    fn remove_node<Q>(link: Link<K, V>, key: &Q, value: &V, balanced: bool) -> (Link<K, V>, bool)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(mut node) = link else {
            return (None, false);
        };

        let ordering = key.cmp(node.key.borrow());
        let removed = match ordering {
            Ordering::Less => {
                let (left, removed) = Self::remove_node(node.left.take(), key, value, balanced);
                node.left = left;
                removed
            }
            Ordering::Equal if node.value == *value => {
                return (Self::splice(node, balanced), true);
            }
            Ordering::Equal | Ordering::Greater => {
                let (right, removed) = Self::remove_node(node.right.take(), key, value, balanced);
                node.right = right;
                // A rotation can carry an entry with an equal key to the left.
                if !removed && ordering == Ordering::Equal {
                    let (left, removed) =
                        Self::remove_node(node.left.take(), key, value, balanced);
                    node.left = left;
                    removed
                } else {
                    removed
                }
            }
        };

        (Some(Self::restore(node, balanced)), removed)
    }

    /// Unlinks `node` from the tree and returns what takes its place.
    fn splice(mut node: Box<Node<K, V>>, balanced: bool) -> Link<K, V> {
        match (node.left.take(), node.right.take()) {
            (None, only) | (only, None) => only,
            (Some(left), Some(right)) => {
                let (rest, successor) = Self::take_min(right, balanced);
                let (key, value) = successor.into_entry();
                node.key = key;
                node.value = value;
                node.left = Some(left);
                node.right = rest;
                Some(Self::restore(node, balanced))
            }
        }
    }

    /// Detaches the leftmost node of a subtree, rebalancing each level on the
    /// way back up. Returns the remaining subtree and the detached node.
    fn take_min(mut node: Box<Node<K, V>>, balanced: bool) -> (Link<K, V>, Box<Node<K, V>>) {
        match node.left.take() {
            None => {
                let rest = node.right.take();
                (rest, node)
            }
            Some(left) => {
                let (rest, min) = Self::take_min(left, balanced);
                node.left = rest;
                (Some(Self::restore(node, balanced)), min)
            }
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for OrderedTree<K, V> {
    /// An empty AVL tree.
    #[inline]
    fn default() -> Self {
        Self::avl()
    }
}

impl<K, V> Drop for OrderedTree<K, V> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedTree<K, V> {
    /// Collects into a balanced tree.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::avl();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for OrderedTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take())
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

static_assertions::assert_impl_all!(OrderedTree<i32, String>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
