//! Write-through cell binding a single store key to UI-friendly state.
//!
//! [`SecureCell`] mirrors the ergonomics of declarative UI state: it loads
//! once at construction, serves reads from memory, and persists writes in the
//! background of the caller's attention. By design it swallows store errors
//! on both paths; callers that need failure visibility use
//! [`SecureCell::try_set`] or the store directly.

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::backend::SecretBackend;
use crate::domain::error::Result;
use crate::domain::store::{Codec, JsonCodec, SecretStore, SecretStoring};

struct CellInner<T, B: SecretBackend, C: Codec> {
    store: Rc<SecretStore<B, C>>,
    key: String,
    value: RefCell<T>,
}

/// An observable mutable cell over one secret key.
///
/// Reads never hit the store; writes update the cached value first and then
/// write through, so the cached and persisted values can diverge silently
/// when a write fails. Confined to a single execution context (`!Send`).
pub struct SecureCell<T, B: SecretBackend, C: Codec = JsonCodec> {
    inner: Rc<CellInner<T, B, C>>,
}

impl<T, B: SecretBackend, C: Codec> Clone for SecureCell<T, B, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, B, C> SecureCell<T, B, C>
where
    T: Clone + Serialize + DeserializeOwned,
    B: SecretBackend,
    C: Codec,
{
    /// Load the key's value, falling back to `default` on any failure.
    ///
    /// "Never written" and "failed to read" are indistinguishable here; both
    /// yield the default.
    pub fn new(store: Rc<SecretStore<B, C>>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = store.get(&key).unwrap_or(default);
        Self {
            inner: Rc::new(CellInner {
                store,
                key,
                value: RefCell::new(value),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// The cached value; no store round-trip.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Update the cache and write through, discarding any store failure.
    pub fn set(&self, value: T) {
        if let Err(err) = self.try_set(value) {
            debug!(key = %self.inner.key, error = %err, "discarding failed write-through");
        }
    }

    /// Like [`set`](Self::set), but surfaces the write-through result. The
    /// cache is updated either way.
    pub fn try_set(&self, value: T) -> Result<()> {
        self.inner.value.replace(value);
        let value = self.inner.value.borrow();
        self.inner.store.set(&*value, &self.inner.key)
    }

    /// Two-way accessor pair for UI layers that bind through closures.
    pub fn binding(&self) -> (impl Fn() -> T, impl Fn(T)) {
        let reader = self.clone();
        let writer = self.clone();
        (move || reader.get(), move |value| writer.set(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backend::{BackendError, ItemQuery};
    use crate::domain::config::StoreConfig;
    use crate::domain::error::ErrorKind;
    use crate::infrastructure::MemoryBackend;

    fn test_store() -> Rc<SecretStore<MemoryBackend>> {
        Rc::new(SecretStore::new(
            MemoryBackend::new(),
            "strongbox-tests",
            StoreConfig::default(),
        ))
    }

    #[test]
    fn test_default_when_never_written() {
        let store = test_store();
        let score = SecureCell::new(store, "score", 0u32);
        assert_eq!(score.get(), 0);
    }

    #[test]
    fn test_write_persists_across_cell_lifetimes() {
        let store = test_store();

        let score = SecureCell::new(Rc::clone(&store), "score", 0u32);
        score.set(5);
        assert_eq!(score.get(), 5);
        drop(score);

        let fresh = SecureCell::new(store, "score", 0u32);
        assert_eq!(fresh.get(), 5);
    }

    #[test]
    fn test_unreadable_value_falls_back_to_default() {
        let store = test_store();
        store.set(&"not a number".to_string(), "score").unwrap();

        // Decode failure is swallowed, same as a missing record.
        let score = SecureCell::new(store, "score", 0u32);
        assert_eq!(score.get(), 0);
    }

    #[test]
    fn test_binding_accessor_pair() {
        let store = test_store();
        let cell = SecureCell::new(Rc::clone(&store), "name", String::new());

        let (read, write) = cell.binding();
        write("alice".to_string());
        assert_eq!(read(), "alice");
        assert_eq!(store.get::<String>("name").unwrap(), "alice");
    }

    /// Backend where every operation fails, to observe the swallowing paths.
    struct BrokenBackend;

    impl SecretBackend for BrokenBackend {
        fn add(&self, _: &ItemQuery<'_>, _: &[u8]) -> std::result::Result<(), BackendError> {
            Err(BackendError::Other {
                status: Some(-1),
                message: "facility unavailable".into(),
            })
        }

        fn update(&self, _: &ItemQuery<'_>, _: &[u8]) -> std::result::Result<(), BackendError> {
            Err(BackendError::Other {
                status: Some(-1),
                message: "facility unavailable".into(),
            })
        }

        fn delete(&self, _: &ItemQuery<'_>) -> std::result::Result<(), BackendError> {
            Err(BackendError::Other {
                status: Some(-1),
                message: "facility unavailable".into(),
            })
        }

        fn find(
            &self,
            _: &ItemQuery<'_>,
            _: bool,
        ) -> std::result::Result<Option<Vec<u8>>, BackendError> {
            Err(BackendError::Other {
                status: Some(-1),
                message: "facility unavailable".into(),
            })
        }
    }

    #[test]
    fn test_failed_write_through_keeps_cached_value() {
        let store = Rc::new(SecretStore::new(
            BrokenBackend,
            "strongbox-tests",
            StoreConfig::default(),
        ));
        let cell = SecureCell::new(Rc::clone(&store), "score", 0u32);

        // set swallows the failure but the cache moves on.
        cell.set(5);
        assert_eq!(cell.get(), 5);

        // try_set surfaces it, cache still updated.
        let err = cell.try_set(9).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceError);
        assert_eq!(err.status(), Some(-1));
        assert_eq!(cell.get(), 9);
    }
}
