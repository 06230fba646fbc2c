//! Node representation shared by the plain and the balanced tree.

/// Owning link from a parent to one of its children.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A single entry of an [`OrderedTree`](super::OrderedTree).
///
/// A node owns its two children exclusively. There are no parent links, so
/// every restructuring operation takes a subtree by value and hands back the
/// root of its replacement.
///
/// The read-only accessors exist for inspection: walking the shape of a tree
/// in tests, or feeding a subtree to [`range_query`](super::range_query).
///
/// # Examples
///
/// ```rust
/// use severity_tree::tree::OrderedTree;
///
/// let mut tree = OrderedTree::avl();
/// for key in [1, 2, 3] {
///     tree.insert(key, ());
/// }
///
/// let root = tree.root().unwrap();
/// assert_eq!(root.key(), &2);
/// assert_eq!(root.left().map(|node| *node.key()), Some(1));
/// assert_eq!(root.right().map(|node| *node.key()), Some(3));
/// assert_eq!(root.height(), 1);
/// ```
#[derive(Clone)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) height: isize,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a leaf. A leaf has height 0.
    pub(crate) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 0,
            left: None,
            right: None,
        }
    }

    /// Returns the key stored in this node.
    #[inline]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value stored in this node.
    #[inline]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Returns the left child, if any.
    #[inline]
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Returns the right child, if any.
    #[inline]
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns the stored height of this subtree.
    ///
    /// Heights are only maintained by a balancing tree. In a plain BST this
    /// is always 0; use [`OrderedTree::height`](super::OrderedTree::height)
    /// for a recomputed value.
    #[inline]
    pub const fn height(&self) -> isize {
        self.height
    }

    /// Consumes the node, returning its entry and dropping nothing else.
    ///
    /// Children must have been detached by the caller.
    pub(crate) fn into_entry(self) -> (K, V) {
        debug_assert!(self.left.is_none() && self.right.is_none());
        (self.key, self.value)
    }
}

/// Stored height of an optional subtree; a missing subtree has height -1.
#[inline]
pub(crate) fn height_of<K, V>(link: Option<&Node<K, V>>) -> isize {
    link.map_or(-1, |node| node.height)
}

/// Releases a subtree without recursing, so that a degenerate chain of any
/// length can be dropped on an ordinary thread stack.
pub(crate) fn release<K, V>(link: Link<K, V>) {
    let mut pending: Vec<Box<Node<K, V>>> = link.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_leaf_has_height_zero() {
        let node = Node::leaf(7, "seven");
        assert_eq!(node.height(), 0);
        assert!(node.left().is_none());
        assert!(node.right().is_none());
    }

    #[rstest]
    fn test_height_of_missing_is_minus_one() {
        assert_eq!(height_of::<i32, ()>(None), -1);
        assert_eq!(height_of(Some(&Node::leaf(1, ()))), 0);
    }

    #[rstest]
    fn test_release_long_chain() {
        let mut root: Link<u32, ()> = None;
        for key in 0..100_000 {
            let mut node = Box::new(Node::leaf(key, ()));
            node.right = root.take();
            root = Some(node);
        }
        release(root);
    }
}
