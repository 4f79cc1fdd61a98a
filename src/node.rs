use std::cmp;
use std::fmt;

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A vertex of an [`AvlTree`](crate::AvlTree).
///
/// Each node exclusively owns its children. The cached height counts a
/// leaf as 1 and a missing child as 0.
#[derive(Clone)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    pub(crate) height: usize,
}

impl<K, V> Node<K, V> {
    pub(crate) fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Returns the key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the payload stored in this node.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the height of the subtree rooted at this node (a leaf has height 1).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the left child, if any.
    pub fn left(&self) -> Option<&Node<K, V>> {
        self.left.as_deref()
    }

    /// Returns the right child, if any.
    pub fn right(&self) -> Option<&Node<K, V>> {
        self.right.as_deref()
    }

    /// Height of the left subtree minus height of the right subtree.
    pub fn bias(&self) -> isize {
        self.left_height() as isize - self.right_height() as isize
    }

    /// Returns true if the AVL condition holds at this node.
    pub fn is_balanced(&self) -> bool {
        self.bias().abs() <= 1
    }

    pub(crate) fn left_height(&self) -> usize {
        height_of(&self.left)
    }

    pub(crate) fn right_height(&self) -> usize {
        height_of(&self.right)
    }

    pub(crate) fn update_height(&mut self) {
        self.height = 1 + cmp::max(self.left_height(), self.right_height());
    }

    // A single edit moves a child height by at most one, so an unbalanced
    // node always has a bias of exactly +2 or -2.
    pub(crate) fn is_left_heavy_overflow(&self) -> bool {
        self.bias() == 2
    }

    pub(crate) fn is_right_heavy_overflow(&self) -> bool {
        self.bias() == -2
    }

    pub(crate) fn left_child_at_least_as_tall(&self) -> bool {
        self.bias() >= 0
    }

    pub(crate) fn right_child_at_least_as_tall(&self) -> bool {
        self.bias() <= 0
    }
}

pub(crate) fn height_of<K, V>(link: &Link<K, V>) -> usize {
    match link {
        None => 0,
        Some(node) => node.height,
    }
}

// Describes the node itself; children are only flagged, never recursed into.
impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("has_left", &self.left.is_some())
            .field("has_right", &self.right.is_some())
            .field("height", &self.height)
            .field("bias", &self.bias())
            .finish()
    }
}
