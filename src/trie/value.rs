//! Type-erased value storage

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A shared, immutable, type-tagged payload stored at a trie node
///
/// Values of arbitrary static type live behind one handle; retrieval checks
/// the runtime type and reports a mismatch as "absent" rather than faulting.
/// Cloning a `ValueBox` shares the payload, it never deep-copies.
#[derive(Clone)]
pub struct ValueBox {
    inner: Arc<dyn Any + Send + Sync>,
}

impl ValueBox {
    /// Box a value for storage in a trie
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        ValueBox {
            inner: Arc::new(value),
        }
    }

    /// Borrow the payload as `T`, or `None` if it was stored as another type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Get a typed shared handle to the payload, or `None` on type mismatch
    ///
    /// The returned `Arc` keeps the payload alive independently of any trie.
    pub fn shared<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast().ok()
    }
}

impl fmt::Debug for ValueBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueBox")
            .field(&self.inner.type_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_matching_type() {
        let boxed = ValueBox::new(42u32);
        assert_eq!(boxed.downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn test_downcast_wrong_type() {
        let boxed = ValueBox::new("hello".to_string());
        assert_eq!(boxed.downcast_ref::<u32>(), None);
        assert_eq!(
            boxed.downcast_ref::<String>().map(String::as_str),
            Some("hello")
        );
    }

    #[test]
    fn test_shared_handle_outlives_box() {
        let boxed = ValueBox::new(vec![1, 2, 3]);
        let shared = boxed.shared::<Vec<i32>>().unwrap();
        drop(boxed);
        assert_eq!(*shared, vec![1, 2, 3]);
    }

    #[test]
    fn test_clone_shares_payload() {
        let a = ValueBox::new(7i64);
        let b = a.clone();
        let pa: *const i64 = a.downcast_ref::<i64>().unwrap();
        let pb: *const i64 = b.downcast_ref::<i64>().unwrap();
        assert_eq!(pa, pb);
    }
}
