//! Rotations and the two rebalancing helpers built on them.
//!
//! Every function consumes the root of a subtree and hands back the root
//! that replaces it. Only the nodes whose children change get their height
//! recomputed; subtrees that are moved as a whole keep their cached heights.

use crate::node::Node;

type BoxedNode<K, V> = Box<Node<K, V>>;

//        node          pivot
//       /    \        /     \
//    pivot    t3 ->  t1     node
//    /   \                 /    \
//   t1    t2              t2     t3
pub(super) fn rotate_right<K, V>(mut node: BoxedNode<K, V>) -> BoxedNode<K, V> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    trace_log!(height = node.height, "rotate right");
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

//     node               pivot
//    /    \             /     \
//   t1    pivot  ->   node     t3
//        /    \      /    \
//       t2     t3   t1     t2
pub(super) fn rotate_left<K, V>(mut node: BoxedNode<K, V>) -> BoxedNode<K, V> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    trace_log!(height = node.height, "rotate left");
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

pub(super) fn rotate_left_right<K, V>(mut node: BoxedNode<K, V>) -> BoxedNode<K, V> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

pub(super) fn rotate_right_left<K, V>(mut node: BoxedNode<K, V>) -> BoxedNode<K, V> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}

/// Restores balance at a node whose left subtree may have become taller
/// (after an insert on the left) or whose right subtree may have become
/// shorter (after a delete on the right).
///
/// Returns the new subtree root and whether the subtree height changed.
pub(super) fn balance_left_heavy<K, V>(mut node: BoxedNode<K, V>) -> (BoxedNode<K, V>, bool) {
    let height_before = node.height;
    if node.is_left_heavy_overflow() {
        let single = node
            .left
            .as_ref()
            .map_or(true, |left| left.left_child_at_least_as_tall());
        node = if single {
            rotate_right(node)
        } else {
            rotate_left_right(node)
        };
    } else {
        node.update_height();
    }
    let changed = node.height != height_before;
    (node, changed)
}

/// Mirror image of [`balance_left_heavy`].
pub(super) fn balance_right_heavy<K, V>(mut node: BoxedNode<K, V>) -> (BoxedNode<K, V>, bool) {
    let height_before = node.height;
    if node.is_right_heavy_overflow() {
        let single = node
            .right
            .as_ref()
            .map_or(true, |right| right.right_child_at_least_as_tall());
        node = if single {
            rotate_left(node)
        } else {
            rotate_right_left(node)
        };
    } else {
        node.update_height();
    }
    let changed = node.height != height_before;
    (node, changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_left() -> BoxedNode<i32, ()> {
        //     3
        //    /
        //   2
        //  /
        // 1
        let mut two = Node::leaf(2, ());
        two.left = Some(Node::leaf(1, ()));
        two.update_height();
        let mut three = Node::leaf(3, ());
        three.left = Some(two);
        three.update_height();
        three
    }

    fn keys(node: &Node<i32, ()>) -> (Option<i32>, i32, Option<i32>) {
        (node.left().map(|n| n.key), node.key, node.right().map(|n| n.key))
    }

    #[test]
    fn test_rotate_right() {
        let root = rotate_right(chain_left());
        assert_eq!(keys(&root), (Some(1), 2, Some(3)));
        assert_eq!(root.height, 2);
        assert_eq!(root.right().map(|n| n.height), Some(1));
    }

    #[test]
    fn test_rotate_left_without_right_child_is_identity() {
        let root = rotate_left(chain_left());
        assert_eq!(keys(&root), (Some(2), 3, None));
        assert_eq!(root.height, 3);
    }

    #[test]
    fn test_rotate_left_right() {
        //   3
        //  /
        // 1
        //  \
        //   2
        let mut one = Node::leaf(1, ());
        one.right = Some(Node::leaf(2, ()));
        one.update_height();
        let mut three = Node::leaf(3, ());
        three.left = Some(one);
        three.update_height();

        let (root, changed) = balance_left_heavy(three);
        assert!(changed);
        assert_eq!(keys(&root), (Some(1), 2, Some(3)));
        assert!(root.is_balanced());
    }

    #[test]
    fn test_rotate_right_left() {
        // 1
        //  \
        //   3
        //  /
        // 2
        let mut three = Node::leaf(3, ());
        three.left = Some(Node::leaf(2, ()));
        three.update_height();
        let mut one = Node::leaf(1, ());
        one.right = Some(three);
        one.update_height();

        let (root, changed) = balance_right_heavy(one);
        assert!(changed);
        assert_eq!(keys(&root), (Some(1), 2, Some(3)));
        assert_eq!(root.height, 2);
    }

    #[test]
    fn test_balance_without_overflow_only_updates_height() {
        let mut two = Node::leaf(2, ());
        two.left = Some(Node::leaf(1, ()));
        // Stale height on purpose: the helper must refresh it.
        let (root, changed) = balance_left_heavy(two);
        assert!(changed);
        assert_eq!(keys(&root), (Some(1), 2, None));
        assert_eq!(root.height, 2);

        let (root, changed) = balance_left_heavy(root);
        assert!(!changed);
        assert_eq!(root.height, 2);
    }
}
