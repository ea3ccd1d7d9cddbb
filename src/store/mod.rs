//! Multi-version store over the copy-on-write trie
//!
//! The store keeps an append-only list of trie snapshots. Writers are
//! serialized and publish a new snapshot per change; readers resolve a
//! version to an immutable snapshot and walk it without holding any lock.

mod guard;
mod trie_store;

pub use guard::ValueGuard;
pub use trie_store::TrieStore;
