//! Thread-safe multi-version wrapper around the trie

use super::ValueGuard;
use crate::trie::Trie;
use crate::{Error, Result};
use parking_lot::{Mutex, RwLock};
use std::any::Any;

/// A thread-safe store of historical trie versions
///
/// Version numbers index an append-only snapshot list; version 0 always
/// exists and is the empty trie. A version, once issued, resolves to the same
/// snapshot forever.
///
/// Concurrency follows a two-lock discipline: `write_lock` serializes the
/// whole read-modify-append body of [`put`](Self::put) and
/// [`remove`](Self::remove), while `snapshots` is locked only long enough to
/// copy a snapshot out or append one. The expensive path-copy work runs with
/// no lock held, so readers are never stalled behind a writer for more than
/// a pointer copy.
pub struct TrieStore {
    /// Serializes writers; held for the full body of put/remove
    write_lock: Mutex<()>,
    /// The version history; index = version number
    snapshots: RwLock<Vec<Trie>>,
}

impl TrieStore {
    /// Create a store whose version 0 is the empty trie
    pub fn new() -> Self {
        TrieStore {
            write_lock: Mutex::new(()),
            snapshots: RwLock::new(vec![Trie::new()]),
        }
    }

    /// Look up `key` in the latest version
    ///
    /// Returns `None` if the key is absent or stored under a different type.
    /// The returned guard pins the snapshot it was resolved against, so the
    /// value stays valid across any later writes.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<ValueGuard<T>> {
        let (snapshot, version) = {
            let snapshots = self.snapshots.read();
            (snapshots.last()?.clone(), snapshots.len() - 1)
        };
        // the trie walk happens with no lock held
        let value = snapshot.get_shared::<T>(key)?;
        Some(ValueGuard::new(snapshot, version, value))
    }

    /// Look up `key` in a specific version
    ///
    /// Also returns `None` when `version` exceeds
    /// [`current_version`](Self::current_version); use
    /// [`snapshot`](Self::snapshot) to surface that case as an error.
    pub fn get_at<T: Any + Send + Sync>(&self, key: &str, version: usize) -> Option<ValueGuard<T>> {
        let snapshot = {
            let snapshots = self.snapshots.read();
            snapshots.get(version)?.clone()
        };
        let value = snapshot.get_shared::<T>(key)?;
        Some(ValueGuard::new(snapshot, version, value))
    }

    /// Bind `key` to `value`, publishing a new version
    ///
    /// Returns the new version number. The version becomes visible to
    /// readers atomically, once the append completes.
    pub fn put<T: Any + Send + Sync>(&self, key: &str, value: T) -> usize {
        let _writer = self.write_lock.lock();

        let current = self.read_latest();
        // path copying runs outside the snapshot-list lock
        let next = current.put(key, value);

        let mut snapshots = self.snapshots.write();
        snapshots.push(next);
        snapshots.len() - 1
    }

    /// Unbind `key`, publishing a new version if it was present
    ///
    /// Removing an absent key is a no-op: nothing is appended and the
    /// current latest version number is returned unchanged.
    pub fn remove(&self, key: &str) -> usize {
        let _writer = self.write_lock.lock();

        let current = self.read_latest();
        let next = current.remove(key);

        // same root means the key was absent; identity check, not deep compare
        if next == current {
            return self.snapshots.read().len() - 1;
        }

        let mut snapshots = self.snapshots.write();
        snapshots.push(next);
        snapshots.len() - 1
    }

    /// The index of the latest snapshot
    pub fn current_version(&self) -> usize {
        self.snapshots.read().len() - 1
    }

    /// A snapshot of the latest version
    pub fn latest(&self) -> Trie {
        self.read_latest()
    }

    /// The snapshot for `version`, or an error if the version does not exist
    pub fn snapshot(&self, version: usize) -> Result<Trie> {
        let snapshots = self.snapshots.read();
        snapshots
            .get(version)
            .cloned()
            .ok_or(Error::VersionOutOfRange {
                requested: version,
                latest: snapshots.len() - 1,
            })
    }

    fn read_latest(&self) -> Trie {
        // version 0 is seeded in new(), so the list is never empty
        self.snapshots.read().last().cloned().unwrap_or_default()
    }
}

impl Default for TrieStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_version_zero_empty() {
        let store = TrieStore::new();
        assert_eq!(store.current_version(), 0);
        assert!(store.latest().is_empty());
        assert!(store.get::<u32>("anything").is_none());
    }

    #[test]
    fn test_put_increments_version_by_one() {
        let store = TrieStore::new();
        assert_eq!(store.put("a", 1u32), 1);
        assert_eq!(store.put("b", 2u32), 2);
        assert_eq!(store.put("a", 3u32), 3);
        assert_eq!(store.current_version(), 3);
    }

    #[test]
    fn test_old_versions_stay_fixed() {
        let store = TrieStore::new();
        let v1 = store.put("cat", 1u32);
        assert_eq!(v1, 1);

        // version 0 predates "cat" and never sees it
        assert!(store.get_at::<u32>("cat", 0).is_none());
        assert_eq!(store.get_at::<u32>("cat", 1).as_deref(), Some(&1));

        store.put("cat", 2u32);
        assert_eq!(store.get_at::<u32>("cat", 1).as_deref(), Some(&1));
        assert_eq!(store.get::<u32>("cat").as_deref(), Some(&2));
    }

    #[test]
    fn test_remove_missing_key_keeps_version() {
        let store = TrieStore::new();
        store.put("cat", 1u32);

        assert_eq!(store.remove("dog"), 1);
        assert_eq!(store.current_version(), 1);

        assert_eq!(store.remove("cat"), 2);
        assert_eq!(store.current_version(), 2);
        // a second remove of the same key is a no-op again
        assert_eq!(store.remove("cat"), 2);
    }

    #[test]
    fn test_get_version_out_of_range() {
        let store = TrieStore::new();
        store.put("cat", 1u32);
        assert!(store.get_at::<u32>("cat", 2).is_none());
    }

    #[test]
    fn test_snapshot_out_of_range_errors() {
        let store = TrieStore::new();
        let err = store.snapshot(5).unwrap_err();
        match err {
            Error::VersionOutOfRange { requested, latest } => {
                assert_eq!(requested, 5);
                assert_eq!(latest, 0);
            }
        }
        assert!(store.snapshot(0).is_ok());
    }

    #[test]
    fn test_type_mismatch_reads_as_absent() {
        let store = TrieStore::new();
        store.put("x", "hello".to_string());
        assert!(store.get::<u32>("x").is_none());
        assert_eq!(
            store.get::<String>("x").as_deref().map(String::as_str),
            Some("hello")
        );
    }

    #[test]
    fn test_guard_survives_later_writes() {
        let store = TrieStore::new();
        store.put("k", 10u32);

        let guard = store.get::<u32>("k").unwrap();
        assert_eq!(guard.version(), 1);

        for i in 0..100u32 {
            store.put("k", i);
        }
        store.remove("k");

        // the guard still reads the version it was resolved against
        assert_eq!(*guard, 10);
        assert_eq!(guard.snapshot().get::<u32>("k"), Some(&10));
    }

    #[test]
    fn test_guard_snapshot_pins_version() {
        let store = TrieStore::new();
        store.put("a", 1u32);
        store.put("b", 2u32);

        let guard = store.get_at::<u32>("a", 1).unwrap();
        store.remove("a");

        // version 1 had "a" but not "b"
        assert_eq!(guard.snapshot().get::<u32>("a"), Some(&1));
        assert_eq!(guard.snapshot().get::<u32>("b"), None);
    }
}
