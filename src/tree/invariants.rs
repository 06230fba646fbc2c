//! Structural self-checks.

use std::fmt;

use super::balance::balance_factor;
use super::node::{Node, height_of};
use super::traverse::Iter;

/// The first broken structural invariant found by
/// [`OrderedTree::check_invariants`](super::OrderedTree::check_invariants).
///
/// # Examples
///
/// ```rust
/// use severity_tree::tree::InvariantViolation;
///
/// let violation = InvariantViolation::Unbalanced { factor: 2 };
/// assert_eq!(
///     format!("{violation}"),
///     "subtree is unbalanced: balance factor 2 is outside [-1, 1]"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The in-order sequence decreases at `position`.
    OutOfOrder {
        /// Zero-based in-order index of the first key smaller than its
        /// predecessor.
        position: usize,
    },
    /// A node's stored height differs from the height of its subtree.
    StaleHeight {
        /// The height stored in the node.
        stored: isize,
        /// The height recomputed from the children.
        actual: isize,
    },
    /// A node's children differ in height by more than one.
    Unbalanced {
        /// Left height minus right height.
        factor: isize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfOrder { position } => {
                write!(formatter, "keys out of order at in-order position {position}")
            }
            Self::StaleHeight { stored, actual } => write!(
                formatter,
                "stale height: node stores {stored} but its subtree has height {actual}"
            ),
            Self::Unbalanced { factor } => write!(
                formatter,
                "subtree is unbalanced: balance factor {factor} is outside [-1, 1]"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Checks the ordering invariant and, for balanced trees, exact heights and
/// the AVL condition.
pub(crate) fn check<K: Ord, V>(
    root: Option<&Node<K, V>>,
    balanced: bool,
) -> Result<(), InvariantViolation> {
    check_order(root)?;
    if balanced {
        check_heights(root)?;
    }
    Ok(())
}

fn check_order<K: Ord, V>(root: Option<&Node<K, V>>) -> Result<(), InvariantViolation> {
    let mut previous: Option<&K> = None;
    for (position, (key, _)) in Iter::new(root).enumerate() {
        if previous.is_some_and(|previous| key < previous) {
            return Err(InvariantViolation::OutOfOrder { position });
        }
        previous = Some(key);
    }
    Ok(())
}

/// Recurses once per level; only used on balanced trees.
fn check_heights<K, V>(node: Option<&Node<K, V>>) -> Result<(), InvariantViolation> {
    let Some(node) = node else {
        return Ok(());
    };
    check_heights(node.left())?;
    check_heights(node.right())?;

    let actual = 1 + height_of(node.left()).max(height_of(node.right()));
    if node.height != actual {
        return Err(InvariantViolation::StaleHeight {
            stored: node.height,
            actual,
        });
    }

    let factor = balance_factor(Some(node));
    if !(-1..=1).contains(&factor) {
        return Err(InvariantViolation::Unbalanced { factor });
    }
    Ok(())
}
