//! Read guard tying a value to the snapshot it came from

use crate::trie::Trie;
use std::ops::Deref;
use std::sync::Arc;

/// A value read from the store, pinned to the snapshot that produced it
///
/// The guard owns the snapshot it was resolved against, so the value stays
/// alive for the guard's whole life no matter how many newer versions the
/// store publishes in the meantime. Dereferences to the value.
pub struct ValueGuard<T> {
    snapshot: Trie,
    version: usize,
    value: Arc<T>,
}

impl<T> ValueGuard<T> {
    pub(crate) fn new(snapshot: Trie, version: usize, value: Arc<T>) -> Self {
        ValueGuard {
            snapshot,
            version,
            value,
        }
    }

    /// The snapshot this value was read from
    pub fn snapshot(&self) -> &Trie {
        &self.snapshot
    }

    /// The version number this value was read from
    pub fn version(&self) -> usize {
        self.version
    }
}

impl<T> Deref for ValueGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}
