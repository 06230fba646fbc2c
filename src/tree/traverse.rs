//! Read-only traversals and iterators.
//!
//! All traversals use an explicit stack or queue. A plain BST fed sorted
//! input degenerates into a chain as long as the input, and none of these
//! may recurse once per node.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::node::{Link, Node, release};

/// Spine depth kept inline by [`Iter`]. A balanced tree needs a heap
/// allocation only beyond a few million entries.
const INLINE_SPINE: usize = 32;

/// Keys of the subtree in ascending (in-order) sequence.
pub(crate) fn inorder<K, V>(root: Option<&Node<K, V>>) -> Vec<&K> {
    Iter::new(root).map(|(key, _)| key).collect()
}

/// Level-order shape fingerprint of the subtree.
///
/// Every visited node contributes its key followed (one level later) by one
/// slot per child, `None` where the child is missing. Trailing `None` slots
/// are trimmed, so an empty subtree yields an empty vector.
pub(crate) fn write_bfs<K, V>(root: Option<&Node<K, V>>) -> Vec<Option<&K>> {
    let Some(root) = root else {
        return Vec::new();
    };

    let mut queue: VecDeque<Option<&Node<K, V>>> = VecDeque::from([Some(root)]);
    let mut fingerprint = Vec::new();

    while let Some(slot) = queue.pop_front() {
        match slot {
            None => fingerprint.push(None),
            Some(node) => {
                fingerprint.push(Some(&node.key));
                queue.push_back(node.left());
                queue.push_back(node.right());
            }
        }
    }

    while matches!(fingerprint.last(), Some(None)) {
        fingerprint.pop();
    }
    fingerprint
}

/// Number of nodes in the subtree.
pub(crate) fn count<K, V>(root: Option<&Node<K, V>>) -> usize {
    let mut pending: Vec<&Node<K, V>> = root.into_iter().collect();
    let mut total = 0;
    while let Some(node) = pending.pop() {
        total += 1;
        pending.extend(node.left());
        pending.extend(node.right());
    }
    total
}

/// Recomputed height of the subtree; -1 when empty.
pub(crate) fn depth<K, V>(root: Option<&Node<K, V>>) -> isize {
    let mut level: Vec<&Node<K, V>> = root.into_iter().collect();
    let mut height = -1;
    while !level.is_empty() {
        height += 1;
        level = level
            .into_iter()
            .flat_map(|node| node.left().into_iter().chain(node.right()))
            .collect();
    }
    height
}

// =============================================================================
// Borrowing Iterator
// =============================================================================

/// An in-order iterator over the entries of an
/// [`OrderedTree`](super::OrderedTree).
///
/// Entries with equal keys come out in the order they were inserted.
pub struct Iter<'a, K, V> {
    stack: SmallVec<[&'a Node<K, V>; INLINE_SPINE]>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        let mut iter = Self {
            stack: SmallVec::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

// =============================================================================
// Owning Iterator
// =============================================================================

/// An owning in-order iterator over the entries of an
/// [`OrderedTree`](super::OrderedTree).
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        let right = node.right.take();
        self.push_left_spine(right);
        Some(node.into_entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        for node in self.stack.drain(..) {
            release(Some(node));
        }
    }
}
