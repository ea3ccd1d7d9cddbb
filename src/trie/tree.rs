//! Persistent trie implementation

use super::{Node, ValueBox};
use std::any::Any;
use std::str::Chars;
use std::sync::Arc;

/// An immutable string-keyed trie with copy-on-write updates
///
/// A `Trie` is just a handle to a root node (or nothing, for the empty trie).
/// `put` and `remove` return a new `Trie` that shares every node off the
/// mutated path with the original; the original is never changed. Cloning a
/// `Trie` copies one pointer.
///
/// Equality compares root identity, not content: two tries are equal iff they
/// hold the same root node instance. This is what makes "remove of a missing
/// key changed nothing" detectable in O(1).
#[derive(Clone, Debug, Default)]
pub struct Trie {
    root: Option<Arc<Node>>,
}

impl Trie {
    /// Create an empty trie
    pub fn new() -> Self {
        Trie { root: None }
    }

    /// Whether the trie stores no keys at all
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Get the value stored under `key`
    ///
    /// Returns `None` if the key is absent, or if it was stored under a type
    /// other than `T`. Walks O(|key|) nodes and never mutates.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.lookup(key)?.value()?.downcast_ref()
    }

    /// Get a shared handle to the value stored under `key`
    ///
    /// Same absence rules as [`get`](Self::get); the returned `Arc` keeps the
    /// value alive independently of this trie.
    pub fn get_shared<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.lookup(key)?.value()?.shared()
    }

    /// Whether `key` is bound to a value of any type
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some_and(Node::is_terminal)
    }

    /// Return a new trie with `key` bound to `value`
    ///
    /// Clones only the nodes on the key's path; everything else is shared
    /// with `self`. An existing binding is overwritten, and the new value may
    /// be of a different type than the old one. The empty key binds a value
    /// to the root node.
    pub fn put<T: Any + Send + Sync>(&self, key: &str, value: T) -> Trie {
        let root = put_node(self.root.as_deref(), key.chars(), ValueBox::new(value));
        Trie {
            root: Some(Arc::new(root)),
        }
    }

    /// Return a new trie with `key` unbound
    ///
    /// If `key` is absent (broken path or valueless terminal) the result
    /// holds the same root as `self`, so callers can detect the no-op by
    /// equality. Otherwise the path is cloned, the terminal node loses its
    /// value (or is unlinked entirely if it has no children), and ancestors
    /// left childless and valueless are pruned away.
    pub fn remove(&self, key: &str) -> Trie {
        let root = match &self.root {
            Some(root) => root,
            None => return self.clone(),
        };
        match remove_node(root, key.chars()) {
            Removal::NotFound => self.clone(),
            Removal::Pruned => Trie { root: None },
            Removal::Replaced(node) => Trie {
                root: Some(Arc::new(node)),
            },
        }
    }

    /// Walk the key path, returning the terminal node if the path exists
    fn lookup(&self, key: &str) -> Option<&Node> {
        let mut node = self.root.as_deref()?;
        for ch in key.chars() {
            node = node.child(ch)?.as_ref();
        }
        Some(node)
    }
}

impl PartialEq for Trie {
    fn eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for Trie {}

/// Copy-on-write insert: clone `node`, recurse down the remaining key,
/// re-link each cloned child into its cloned parent, and install `value` at
/// the end of the key while preserving whatever children sit there.
fn put_node(node: Option<&Node>, mut key: Chars<'_>, value: ValueBox) -> Node {
    let mut copy = node.cloned().unwrap_or_default();
    match key.next() {
        None => {
            copy.value = Some(value);
            copy
        }
        Some(ch) => {
            let child = copy.children.get(&ch).map(|c| c.as_ref());
            let new_child = put_node(child, key, value);
            copy.children.insert(ch, Arc::new(new_child));
            copy
        }
    }
}

/// Outcome of removing a key below a node
enum Removal {
    /// Path broke or the terminal had no value; caller keeps the old node
    NotFound,
    /// The node became childless and valueless; the parent must unlink it
    Pruned,
    /// A fresh replacement node for this position
    Replaced(Node),
}

/// Copy-on-write delete. `Pruned` bubbling up is the pruning walk: each
/// ancestor that would be left dead vanishes with its child, and the first
/// ancestor still carrying children or its own value stops the cascade.
fn remove_node(node: &Node, mut key: Chars<'_>) -> Removal {
    match key.next() {
        None => {
            if !node.is_terminal() {
                return Removal::NotFound;
            }
            if node.children.is_empty() {
                Removal::Pruned
            } else {
                Removal::Replaced(Node {
                    children: node.children.clone(),
                    value: None,
                })
            }
        }
        Some(ch) => {
            let child = match node.child(ch) {
                Some(child) => child,
                None => return Removal::NotFound,
            };
            match remove_node(child, key) {
                Removal::NotFound => Removal::NotFound,
                Removal::Pruned => {
                    let mut copy = node.clone();
                    copy.children.remove(&ch);
                    if copy.is_dead() {
                        Removal::Pruned
                    } else {
                        Removal::Replaced(copy)
                    }
                }
                Removal::Replaced(new_child) => {
                    let mut copy = node.clone();
                    copy.children.insert(ch, Arc::new(new_child));
                    Removal::Replaced(copy)
                }
            }
        }
    }
}
