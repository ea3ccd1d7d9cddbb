//! # samsara_db
//!
//! An in-memory multi-version trie store with copy-on-write snapshots.
//!
//! samsara_db keeps every historical version of a string-keyed trie alive
//! through structural sharing: a write clones only the nodes on the key's
//! path and shares everything else with the prior version. A thread-safe
//! store serializes writers and hands readers consistent snapshots addressed
//! by dense version numbers.
//!
//! ## Core Concepts
//!
//! - **Trie**: an immutable value; `put`/`remove` return a new trie sharing
//!   all untouched subtrees with the original
//! - **Versions**: each published write becomes the next version; old
//!   versions stay readable forever
//! - **Type-erased values**: a key stores a value of any `Send + Sync` type;
//!   reading it back under the wrong type comes back absent
//! - **Guards**: a read pins the snapshot it came from, so the value outlives
//!   any later writes
//!
//! ## Example
//!
//! ```
//! use samsara_db::TrieStore;
//!
//! let store = TrieStore::new();
//! let version = store.put("cat", 1u32);
//! assert_eq!(version, 1);
//!
//! let guard = store.get::<u32>("cat").unwrap();
//! assert_eq!(*guard, 1);
//!
//! // version 0 predates the write
//! assert!(store.get_at::<u32>("cat", 0).is_none());
//! ```

pub mod store;
pub mod trie;

mod error;

pub use error::{Error, Result};
pub use store::{TrieStore, ValueGuard};
pub use trie::{Node, Trie, ValueBox};
