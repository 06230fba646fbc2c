//! Unit tests for OrderedTree.
//!
//! Shapes are asserted through `write_bfs`, the level-order fingerprint in
//! which missing children appear as `None`.

use rstest::rstest;
use severity_tree::tree::OrderedTree;

fn build(balanced: bool, keys: &[i32]) -> OrderedTree<i32, ()> {
    let mut tree = OrderedTree::new(balanced);
    for &key in keys {
        tree.insert(key, ());
    }
    tree
}

fn shape<V>(tree: &OrderedTree<i32, V>) -> Vec<Option<i32>> {
    tree.write_bfs().into_iter().map(|key| key.copied()).collect()
}

// =============================================================================
// Rotation Shape Tests
// =============================================================================

#[rstest]
#[case::right_right(&[1, 2, 3])]
#[case::left_left(&[3, 2, 1])]
#[case::left_right(&[3, 1, 2])]
#[case::right_left(&[1, 3, 2])]
fn test_three_keys_balance_to_same_shape(#[case] keys: &[i32]) {
    let tree = build(true, keys);
    assert_eq!(shape(&tree), vec![Some(2), Some(1), Some(3)]);
    assert_eq!(tree.check_invariants(), Ok(()));
}

#[rstest]
fn test_sequential_six_keys() {
    let tree = build(true, &[1, 2, 3, 4, 5, 6]);
    assert_eq!(
        shape(&tree),
        vec![Some(4), Some(2), Some(5), Some(1), Some(3), None, Some(6)]
    );
}

#[rstest]
fn test_clear_between_sequences_resets_shape() {
    let mut tree = OrderedTree::avl();
    for keys in [[3, 2, 1], [1, 2, 3], [3, 1, 2], [1, 3, 2]] {
        tree.clear();
        for key in keys {
            tree.insert(key, ());
        }
        assert_eq!(shape(&tree), vec![Some(2), Some(1), Some(3)]);
    }
}

#[rstest]
#[case::right_right(&[1, 2, 3], vec![Some(1), None, Some(2), None, Some(3)])]
#[case::left_left(&[3, 2, 1], vec![Some(3), Some(2), None, Some(1)])]
#[case::left_right(&[3, 1, 2], vec![Some(3), Some(1), None, None, Some(2)])]
fn test_plain_tree_keeps_insertion_shape(
    #[case] keys: &[i32],
    #[case] expected: Vec<Option<i32>>,
) {
    let tree = build(false, keys);
    assert_eq!(shape(&tree), expected);
}

// =============================================================================
// Removal Tests
// =============================================================================

#[rstest]
fn test_remove_rebalances_right_right() {
    let mut tree = build(true, &[40, 20, 60, 70]);
    assert!(tree.remove(&20, &()));

    let root = tree.root().unwrap();
    assert_eq!(root.key(), &60);
    assert_eq!(root.left().map(|node| *node.key()), Some(40));
    assert_eq!(root.right().map(|node| *node.key()), Some(70));
}

#[rstest]
fn test_remove_rebalances_right_left() {
    let mut tree = build(true, &[40, 20, 60, 55]);
    assert!(tree.remove(&20, &()));
    assert_eq!(shape(&tree), vec![Some(55), Some(40), Some(60)]);
}

#[rstest]
fn test_plain_remove_two_children() {
    let mut tree = build(false, &[50, 30, 70, 60, 80, 65]);
    assert!(tree.remove(&50, &()));
    // 60 is the in-order successor; its right child 65 takes its place.
    assert_eq!(
        shape(&tree),
        vec![Some(60), Some(30), Some(70), None, None, Some(65), Some(80)]
    );
}

#[rstest]
fn test_remove_everything(#[values(false, true)] balanced: bool) {
    let keys = [8, 3, 10, 1, 6, 14, 4, 7, 13];
    let mut tree = build(balanced, &keys);
    for key in keys {
        assert!(tree.remove(&key, &()));
        assert!(!tree.contains(&key));
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.height(), -1);
}

#[rstest]
fn test_remove_duplicate_key_needs_exact_value() {
    let mut tree = OrderedTree::avl();
    tree.insert(75, Some("CVE-A"));
    tree.insert(75, None);
    tree.insert(75, Some("CVE-B"));

    // Passing no value only matches an entry whose value is also absent.
    assert!(tree.remove(&75, &None));
    assert!(!tree.remove(&75, &None));
    assert_eq!(
        tree.values().collect::<Vec<_>>(),
        vec![&Some("CVE-A"), &Some("CVE-B")]
    );
}

// =============================================================================
// Traversal Tests
// =============================================================================

#[rstest]
fn test_inorder_grows_sorted() {
    let mut tree = OrderedTree::avl();
    assert!(tree.inorder().is_empty());

    let mut expected = Vec::new();
    for key in [30, 10, 50, 20, 40, 70, 60] {
        tree.insert(key, ());
        expected.push(key);
        expected.sort_unstable();
        let keys: Vec<i32> = tree.inorder().into_iter().copied().collect();
        assert_eq!(keys, expected);
    }
}

#[rstest]
fn test_traversals_are_idempotent(#[values(false, true)] balanced: bool) {
    let tree = build(balanced, &[5, 9, 1, 7, 3, 5, 8]);
    assert_eq!(tree.inorder(), tree.inorder());
    assert_eq!(tree.write_bfs(), tree.write_bfs());
}

#[rstest]
fn test_empty_tree_reads(#[values(false, true)] balanced: bool) {
    let mut tree = build(balanced, &[2, 1, 3]);
    tree.clear();

    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.height(), -1);
    assert!(tree.inorder().is_empty());
    assert!(tree.write_bfs().is_empty());
    assert!(tree.range_query(&0, &10).is_empty());
    assert!(!tree.contains(&2));
    assert!(!tree.remove(&2, &()));
}

#[rstest]
fn test_size_and_height() {
    let plain = build(false, &[1, 2, 3, 4, 5, 6, 7]);
    let balanced = build(true, &[1, 2, 3, 4, 5, 6, 7]);

    assert_eq!(plain.size(), 7);
    assert_eq!(balanced.size(), 7);
    assert_eq!(plain.height(), 6);
    assert_eq!(balanced.height(), 2);
    assert_eq!(balanced.root().map(|node| node.height()), Some(2));
}

// =============================================================================
// Deep Tree Tests
// =============================================================================

#[rstest]
fn test_degenerate_plain_tree() {
    const COUNT: i32 = 10_000;

    // Recursive insertion goes one frame deeper per entry on sorted input.
    let worker = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let mut tree = OrderedTree::bst();
            for key in 0..COUNT {
                tree.insert(key, key);
            }
            assert_eq!(tree.size(), 10_000);
            assert_eq!(tree.height(), 9_999);
            assert_eq!(tree.inorder().len(), 10_000);
            assert_eq!(tree.range_query(&9_990, &COUNT).len(), 10);
            tree
        })
        .unwrap();

    let tree = worker.join().unwrap();
    // Iteration and drop run on this thread's ordinary stack.
    assert_eq!(tree.iter().count(), 10_000);
    drop(tree);
}

#[rstest]
fn test_balanced_tree_stays_shallow() {
    let tree = build(true, &(0..100_000).collect::<Vec<_>>());
    assert_eq!(tree.size(), 100_000);
    // 1.44 * log2(100_000) is roughly 24.
    assert!(tree.height() <= 24);
    assert_eq!(tree.check_invariants(), Ok(()));
}
