use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};
use std::mem;

use crate::dump::{self, NestedList, Slot};
use crate::error::AvlTreeError;
use crate::node::{Link, Node};

mod rotate;

use rotate::{balance_left_heavy, balance_right_heavy};

/// An ordered key-value container implemented with an AVL tree.
///
/// Every mutation walks down the search path recursively and rebalances
/// the ancestors on the way back up, so the tree height stays within
/// about 1.44 log2(n) at all times.
///
/// The tree does no internal locking. Mutating methods take `&mut self`,
/// so exclusive access during a write is the caller's job (usually the
/// borrow checker does it for you; wrap the tree in a lock to share it
/// between threads).
///
/// ```
/// use avltree::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert(10, "ten").unwrap();
/// tree.insert(20, "twenty").unwrap();
/// tree.insert(30, "thirty").unwrap();
/// assert_eq!(tree.to_nested_list(false, false).unwrap().to_string(), "[[10], 20, [30]]");
/// assert!(tree.insert(20, "again").is_err());
/// tree.delete(&10);
/// assert!(tree.find(&10).is_none());
/// ```
#[derive(Clone)]
pub struct AvlTree<K, V> {
    root: Link<K, V>,
    num_nodes: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OnDuplicate {
    Reject,
    Overwrite,
}

/// Outcome of a recursive edit below some slot.
struct Edit<V> {
    /// Whether the subtree stored in the slot changed height.
    height_changed: bool,
    /// Payload replaced by an upsert or removed by a delete.
    payload: Option<V>,
}

impl<V> Edit<V> {
    fn unchanged(payload: Option<V>) -> Self {
        Self {
            height_changed: false,
            payload,
        }
    }
}

type Balance<K, V> = fn(Box<Node<K, V>>) -> (Box<Node<K, V>>, bool);

impl<K, V> AvlTree<K, V> {
    /// Creates an empty tree.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single node.
    pub fn height(&self) -> usize {
        match &self.root {
            None => 0,
            Some(root) => root.height,
        }
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns true if every node satisfies the AVL balance condition.
    pub fn is_balanced(&self) -> bool {
        fn is_balanced_rec<K, V>(node: &Node<K, V>) -> bool {
            node.left().map_or(true, is_balanced_rec)
                && node.is_balanced()
                && node.right().map_or(true, is_balanced_rec)
        }

        self.root.as_deref().map_or(true, is_balanced_rec)
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    /// Inserts a key-value pair.
    ///
    /// Fails with [`AvlTreeError::DuplicateKey`] if the key is already
    /// present, in which case the tree is left untouched.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), AvlTreeError> {
        Self::insert_into(&mut self.root, key, value, OnDuplicate::Reject)?;
        self.num_nodes += 1;
        Ok(())
    }

    /// Inserts a key-value pair, overwriting the payload if the key exists.
    /// Returns the previous payload in that case.
    pub fn upsert(&mut self, key: K, value: V) -> Option<V> {
        match Self::insert_into(&mut self.root, key, value, OnDuplicate::Overwrite) {
            Ok(Edit { payload: None, .. }) => {
                self.num_nodes += 1;
                None
            }
            Ok(Edit { payload, .. }) => payload,
            // Overwrite never reports a duplicate.
            Err(_) => None,
        }
    }

    /// Removes a key from the tree and returns its payload.
    /// Removing a key that is not present does nothing.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let edit = Self::delete_from(&mut self.root, key);
        if edit.payload.is_some() {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        } else {
            debug_log!("delete of absent key ignored");
        }
        edit.payload
    }

    /// Returns the node holding the key, if any.
    pub fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Equal => break,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        current
    }

    /// Returns a reference to the payload stored under the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the payload stored under the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        None
    }

    /// Returns true if the tree contains the key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Asserts that the internal tree structure is consistent:
    /// keys are strictly ordered, cached heights are exact, every node is
    /// balanced and the node count matches.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        fn check<K: Ord, V>(node: &Node<K, V>, lower: Option<&K>, upper: Option<&K>) -> (usize, usize) {
            if let Some(lower) = lower {
                assert!(node.key > *lower);
            }
            if let Some(upper) = upper {
                assert!(node.key < *upper);
            }

            let (left_height, left_nodes) = match node.left() {
                None => (0, 0),
                Some(left) => check(left, lower, Some(&node.key)),
            };
            let (right_height, right_nodes) = match node.right() {
                None => (0, 0),
                Some(right) => check(right, Some(&node.key), upper),
            };

            // Check height
            assert_eq!(node.height, 1 + left_height.max(right_height));

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            (node.height, left_nodes + right_nodes + 1)
        }

        let num_nodes = match self.root.as_deref() {
            None => 0,
            Some(root) => check(root, None, None).1,
        };
        assert_eq!(num_nodes, self.num_nodes);
    }

    fn insert_into(
        slot: &mut Link<K, V>,
        key: K,
        value: V,
        on_duplicate: OnDuplicate,
    ) -> Result<Edit<V>, AvlTreeError> {
        let Some(node) = slot else {
            *slot = Some(Node::leaf(key, value));
            return Ok(Edit {
                height_changed: true,
                payload: None,
            });
        };

        let (edit, balance): (Edit<V>, Balance<K, V>) = match key.cmp(&node.key) {
            Ordering::Less => (
                Self::insert_into(&mut node.left, key, value, on_duplicate)?,
                balance_left_heavy as Balance<K, V>,
            ),
            Ordering::Greater => (
                Self::insert_into(&mut node.right, key, value, on_duplicate)?,
                balance_right_heavy as Balance<K, V>,
            ),
            Ordering::Equal => {
                if on_duplicate == OnDuplicate::Reject {
                    debug_log!("insert rejected duplicate key");
                    return Err(AvlTreeError::DuplicateKey);
                }
                let previous = mem::replace(&mut node.value, value);
                return Ok(Edit::unchanged(Some(previous)));
            }
        };

        Ok(Self::rebalance_slot(slot, edit, balance))
    }

    fn delete_from<Q>(slot: &mut Link<K, V>, key: &Q) -> Edit<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(node) = slot else {
            return Edit::unchanged(None);
        };

        // Shrinking one side can only overload the other side.
        let (edit, balance): (Edit<V>, Balance<K, V>) = match key.cmp(node.key.borrow()) {
            Ordering::Less => (Self::delete_from(&mut node.left, key), balance_right_heavy as Balance<K, V>),
            Ordering::Greater => (Self::delete_from(&mut node.right, key), balance_left_heavy as Balance<K, V>),
            Ordering::Equal => match node.left.take() {
                None => {
                    let Some(mut removed) = slot.take() else {
                        return Edit::unchanged(None);
                    };
                    *slot = removed.right.take();
                    return Edit {
                        height_changed: true,
                        payload: Some(removed.value),
                    };
                }
                Some(left) => {
                    let (left, predecessor, height_changed) = Self::remove_max(left);
                    let Node {
                        key: predecessor_key,
                        value: predecessor_value,
                        ..
                    } = *predecessor;
                    node.left = left;
                    node.key = predecessor_key;
                    let removed = mem::replace(&mut node.value, predecessor_value);
                    (
                        Edit {
                            height_changed,
                            payload: Some(removed),
                        },
                        balance_right_heavy as Balance<K, V>,
                    )
                }
            },
        };

        Self::rebalance_slot(slot, edit, balance)
    }

    /// Detaches the maximum node of a subtree by walking its right spine.
    /// Returns the remaining subtree, the detached node (with no children)
    /// and whether the remaining subtree is shorter than before.
    fn remove_max(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>, bool) {
        match node.right.take() {
            None => {
                let rest = node.left.take();
                (rest, node, true)
            }
            Some(right) => {
                let (right, max, shrunk) = Self::remove_max(right);
                node.right = right;
                if !shrunk {
                    return (Some(node), max, false);
                }
                let (node, changed) = balance_left_heavy(node);
                (Some(node), max, changed)
            }
        }
    }

    fn rebalance_slot(slot: &mut Link<K, V>, edit: Edit<V>, balance: Balance<K, V>) -> Edit<V> {
        if !edit.height_changed {
            return edit;
        }
        match slot.take() {
            None => Edit::unchanged(edit.payload),
            Some(node) => {
                let (node, height_changed) = balance(node);
                *slot = Some(node);
                Edit {
                    height_changed,
                    payload: edit.payload,
                }
            }
        }
    }
}

impl<K, V> AvlTree<K, V> {
    /// Returns the shape of the tree as nested `[left, key, right]` lists,
    /// or `None` if the tree is empty.
    ///
    /// With `include_absent` every list has three slots and a missing child
    /// shows up as [`Slot::Absent`]; otherwise missing children are left out.
    /// With `include_full_node_info` the key slot holds the node's `Debug`
    /// description instead of the key.
    pub fn to_nested_list(
        &self,
        include_absent: bool,
        include_full_node_info: bool,
    ) -> Option<NestedList<'_, K>>
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        if include_full_node_info {
            dump::build(&self.root, include_absent, &|node| Slot::Node(format!("{:?}", node)))
        } else {
            dump::build(&self.root, include_absent, &|node| Slot::Key(&node.key))
        }
    }

    /// Writes an indented dump of the tree to standard output.
    pub fn print(&self, include_full_node_info: bool) -> Result<(), AvlTreeError>
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_dump(&mut out, include_full_node_info)?;
        out.flush()?;
        Ok(())
    }

    /// Writes an indented dump of the tree to `out`.
    pub fn write_dump<W: Write>(&self, out: &mut W, include_full_node_info: bool) -> Result<(), AvlTreeError>
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        match self.to_nested_list(true, include_full_node_info) {
            None => {
                writeln!(out, "(empty)")?;
                Ok(())
            }
            Some(list) => dump::write_nested(&list, out),
        }
    }
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V> fmt::Debug for AvlTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match dump::build(&self.root, false, &|node| Slot::Key(&node.key)) {
            None => write!(f, "AvlTree []"),
            Some(list) => write!(f, "AvlTree {}", list),
        }
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.upsert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
