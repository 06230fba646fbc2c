//! Pruned range search over a closed key interval.

use std::borrow::Borrow;

use super::node::Node;

/// Returns the values of every node in `node`'s subtree whose key lies in
/// the closed interval `[min, max]`, in ascending key order.
///
/// The search is a pruned in-order walk. A left subtree is only entered when
/// the current key is at least `min`, and a right subtree only when the
/// current key is at most `max`; by the ordering invariant the skipped
/// subtrees cannot hold a qualifying key. Both comparisons are inclusive, so
/// equal keys parked on either side of a node by a rotation are still found.
///
/// The cost is O(k + h) for k results in a tree of height h. An inverted
/// interval (`min > max`) yields an empty vector.
///
/// The walk recurses once per level, so its depth is bounded by the height
/// of the tree.
///
/// # Examples
///
/// ```rust
/// use severity_tree::tree::{OrderedTree, range_query};
///
/// let tree: OrderedTree<i32, &str> =
///     [(5, "e"), (1, "a"), (3, "c"), (4, "d"), (2, "b")].into_iter().collect();
///
/// assert_eq!(range_query(tree.root(), &2, &4), vec![&"b", &"c", &"d"]);
/// assert!(range_query(tree.root(), &4, &2).is_empty());
/// ```
pub fn range_query<'a, K, V, Q>(node: Option<&'a Node<K, V>>, min: &Q, max: &Q) -> Vec<&'a V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut results = Vec::new();
    if min <= max {
        collect_range(node, min, max, &mut results);
    }
    results
}

fn collect_range<'a, K, V, Q>(
    node: Option<&'a Node<K, V>>,
    min: &Q,
    max: &Q,
    results: &mut Vec<&'a V>,
) where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let Some(node) = node else {
        return;
    };
    let key: &Q = node.key.borrow();

    if key >= min {
        collect_range(node.left(), min, max, results);
    }
    if min <= key && key <= max {
        results.push(&node.value);
    }
    if key <= max {
        collect_range(node.right(), min, max, results);
    }
}
