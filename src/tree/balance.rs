//! AVL rebalancing.
//!
//! Every function here takes ownership of a subtree root and returns the
//! root of the (possibly restructured) replacement. The caller stores the
//! result back into whichever link it came from, which is how rotations
//! propagate without parent pointers.
//!
//! ```text
//!     z                y
//!    / \              / \
//!   T1  y     =>     z   T3
//!      / \          / \
//!     T2  T3       T1  T2
//!        rotate_left(z)
//! ```

use super::node::{Node, height_of};

/// Recomputes `node.height` from its children's stored heights.
#[inline]
pub(crate) fn update_height<K, V>(node: &mut Node<K, V>) {
    node.height = 1 + height_of(node.left()).max(height_of(node.right()));
}

/// Left height minus right height; 0 for a missing node.
#[inline]
pub(crate) fn balance_factor<K, V>(node: Option<&Node<K, V>>) -> isize {
    node.map_or(0, |node| height_of(node.left()) - height_of(node.right()))
}

/// Rotates the subtree to the left around `z`. Requires `z.right`.
pub(crate) fn rotate_left<K, V>(mut z: Box<Node<K, V>>) -> Box<Node<K, V>> {
    debug_assert!(z.right.is_some(), "rotate_left requires a right child");
    let Some(mut y) = z.right.take() else {
        return z;
    };
    log::trace!("rotate left at height {}", z.height);

    z.right = y.left.take();
    update_height(&mut z);
    y.left = Some(z);
    update_height(&mut y);
    y
}

/// Rotates the subtree to the right around `z`. Requires `z.left`.
pub(crate) fn rotate_right<K, V>(mut z: Box<Node<K, V>>) -> Box<Node<K, V>> {
    debug_assert!(z.left.is_some(), "rotate_right requires a left child");
    let Some(mut y) = z.left.take() else {
        return z;
    };
    log::trace!("rotate right at height {}", z.height);

    z.left = y.right.take();
    update_height(&mut z);
    y.right = Some(z);
    update_height(&mut y);
    y
}

/// Restores the AVL condition at `node`, assuming both children already
/// satisfy it.
///
/// Handles the four cases of imbalance:
/// left-left, left-right, right-right and right-left.
pub(crate) fn balance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    update_height(&mut node);
    let factor = balance_factor(Some(&*node));

    if factor > 1 {
        // Left-right: straighten the left child first.
        if balance_factor(node.left()) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if factor < -1 {
        // Right-left: straighten the right child first.
        if balance_factor(node.right()) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}
