//! Copy-on-write trie with structural sharing
//!
//! This implements a persistent trie where:
//! - Each mutation returns a new `Trie` and leaves the old one untouched
//! - Unchanged subtrees are shared between versions by reference
//! - Only the O(|key|) nodes on the mutated path are newly allocated

mod node;
mod tree;
mod value;

pub use node::Node;
pub use tree::Trie;
pub use value::ValueBox;
