//! Trie node type

use super::ValueBox;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A node in the copy-on-write trie
///
/// Children are indexed by the next character of the key and held by `Arc`,
/// so many parents across many versions may point at one child instance.
/// A node terminates a stored key iff `value` is present.
///
/// Once a node is reachable from a published [`Trie`](super::Trie) it is
/// never mutated again; `Clone` yields an exclusive duplicate (children map
/// copied, child nodes and value shared by reference) for path copying.
#[derive(Clone, Debug, Default)]
pub struct Node {
    pub(crate) children: BTreeMap<char, Arc<Node>>,
    pub(crate) value: Option<ValueBox>,
}

impl Node {
    /// Create a node with no children and no value
    pub fn empty() -> Self {
        Node::default()
    }

    /// Look up the child for the next key character
    pub fn child(&self, ch: char) -> Option<&Arc<Node>> {
        self.children.get(&ch)
    }

    /// Number of children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether this node terminates a stored key
    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// Whether this node carries neither children nor a value
    ///
    /// Such a node must never stay reachable from a published trie; remove
    /// prunes them.
    pub fn is_dead(&self) -> bool {
        self.children.is_empty() && self.value.is_none()
    }

    /// The value stored at this node, if any
    pub fn value(&self) -> Option<&ValueBox> {
        self.value.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_node_is_dead() {
        let node = Node::empty();
        assert!(node.is_dead());
        assert!(!node.is_terminal());
        assert_eq!(node.child_count(), 0);
    }

    #[test]
    fn test_clone_shares_children() {
        let mut node = Node::empty();
        node.children.insert('a', Arc::new(Node::empty()));

        let copy = node.clone();
        assert!(Arc::ptr_eq(
            node.child('a').unwrap(),
            copy.child('a').unwrap()
        ));
    }

    #[test]
    fn test_clone_copies_value_node() {
        let mut node = Node::empty();
        node.value = Some(ValueBox::new(5u8));

        let copy = node.clone();
        assert!(copy.is_terminal());
        assert_eq!(copy.value().unwrap().downcast_ref::<u8>(), Some(&5));
    }
}
