//! Debug views of the tree shape.

use std::fmt;
use std::io::Write;

use crate::error::AvlTreeError;
use crate::node::{Link, Node};

/// One `[left, key, right]` level of a tree dump.
///
/// Lists produced without absent markers omit missing children, so a leaf
/// is a single-slot list. Lists produced with markers always have three.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NestedList<'a, K> {
    pub slots: Vec<Slot<'a, K>>,
}

/// An entry of a [`NestedList`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<'a, K> {
    /// A missing child.
    Absent,
    /// The key of the node at this level.
    Key(&'a K),
    /// The full description of the node at this level.
    Node(String),
    /// A child subtree.
    Subtree(NestedList<'a, K>),
}

const LABELS: [&str; 3] = ["left ", "value", "right"];

pub(crate) fn build<'a, K, V>(
    link: &'a Link<K, V>,
    include_absent: bool,
    label: &dyn Fn(&'a Node<K, V>) -> Slot<'a, K>,
) -> Option<NestedList<'a, K>> {
    let node = link.as_deref()?;
    let mut slots = Vec::with_capacity(3);
    push_child(&mut slots, build(&node.left, include_absent, label), include_absent);
    slots.push(label(node));
    push_child(&mut slots, build(&node.right, include_absent, label), include_absent);
    Some(NestedList { slots })
}

fn push_child<'a, K>(slots: &mut Vec<Slot<'a, K>>, child: Option<NestedList<'a, K>>, include_absent: bool) {
    match child {
        Some(list) => slots.push(Slot::Subtree(list)),
        None if include_absent => slots.push(Slot::Absent),
        None => {}
    }
}

/// Writes `list` as an indented `left :` / `value:` / `right:` listing,
/// one space of indentation per level.
///
/// `list` must have the three-slot shape produced with absent markers;
/// anything else fails with [`AvlTreeError::InternalConsistency`].
pub(crate) fn write_nested<K: fmt::Debug, W: Write>(list: &NestedList<'_, K>, out: &mut W) -> Result<(), AvlTreeError> {
    write_level(list, out, 0)
}

fn write_level<K: fmt::Debug, W: Write>(
    list: &NestedList<'_, K>,
    out: &mut W,
    depth: usize,
) -> Result<(), AvlTreeError> {
    if list.slots.len() != LABELS.len() {
        return Err(AvlTreeError::InternalConsistency(format!(
            "expected 3 slots at depth {}, found {}",
            depth,
            list.slots.len()
        )));
    }

    let indent = " ".repeat(depth);
    for (index, slot) in list.slots.iter().enumerate() {
        let label = LABELS[index];
        let is_key_slot = index == 1;
        match slot {
            Slot::Subtree(child) if !is_key_slot => {
                writeln!(out, "{}{}:", indent, label)?;
                write_level(child, out, depth + 1)?;
            }
            Slot::Absent if !is_key_slot => writeln!(out, "{}{}: _", indent, label)?,
            Slot::Key(key) if is_key_slot => writeln!(out, "{}{}: {:?}", indent, label, key)?,
            Slot::Node(description) if is_key_slot => writeln!(out, "{}{}: {}", indent, label, description)?,
            _ => {
                return Err(AvlTreeError::InternalConsistency(format!(
                    "unexpected entry in {} slot at depth {}",
                    label.trim_end(),
                    depth
                )))
            }
        }
    }
    Ok(())
}

impl<K: fmt::Debug> fmt::Display for NestedList<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, slot) in self.slots.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match slot {
                Slot::Absent => write!(f, "_")?,
                Slot::Key(key) => write!(f, "{:?}", key)?,
                Slot::Node(description) => write!(f, "{}", description)?,
                Slot::Subtree(child) => write!(f, "{}", child)?,
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: &i32) -> NestedList<'_, i32> {
        NestedList {
            slots: vec![Slot::Absent, Slot::Key(key), Slot::Absent],
        }
    }

    #[test]
    fn test_display() {
        let (ten, twenty) = (10, 20);
        let list = NestedList {
            slots: vec![Slot::Subtree(leaf(&ten)), Slot::Key(&twenty), Slot::Absent],
        };
        assert_eq!(list.to_string(), "[[_, 10, _], 20, _]");
    }

    #[test]
    fn test_write_nested() {
        let (ten, twenty) = (10, 20);
        let list = NestedList {
            slots: vec![Slot::Subtree(leaf(&ten)), Slot::Key(&twenty), Slot::Absent],
        };
        let mut out = Vec::new();
        write_nested(&list, &mut out).unwrap();
        let expected = "left :\n left : _\n value: 10\n right: _\nvalue: 20\nright: _\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_write_nested_rejects_short_list() {
        let ten = 10;
        let list = NestedList {
            slots: vec![Slot::Key(&ten)],
        };
        let result = write_nested(&list, &mut Vec::<u8>::new());
        assert!(matches!(result, Err(AvlTreeError::InternalConsistency(_))));
    }

    #[test]
    fn test_write_nested_rejects_misplaced_entries() {
        let (ten, twenty) = (10, 20);
        let key_in_child_slot = NestedList {
            slots: vec![Slot::Key(&ten), Slot::Key(&twenty), Slot::Absent],
        };
        assert!(matches!(
            write_nested(&key_in_child_slot, &mut Vec::<u8>::new()),
            Err(AvlTreeError::InternalConsistency(_))
        ));

        let absent_key = NestedList::<i32> {
            slots: vec![Slot::Absent, Slot::Absent, Slot::Absent],
        };
        assert!(matches!(
            write_nested(&absent_key, &mut Vec::<u8>::new()),
            Err(AvlTreeError::InternalConsistency(_))
        ));
    }
}
