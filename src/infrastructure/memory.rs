use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::backend::{BackendError, ItemQuery, SecretBackend};
use crate::domain::config::Accessibility;

#[derive(Debug, Clone)]
struct StoredItem {
    payload: Vec<u8>,
    accessibility: Accessibility,
    synchronizable: bool,
}

/// In-process backend with the same duplicate/not-found semantics as the
/// real facility. Backs the test suite and serves as a mock for callers
/// that must not touch the OS store.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: Mutex<HashMap<(String, String), StoredItem>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), StoredItem>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn record_key(query: &ItemQuery<'_>) -> (String, String) {
    (query.service.to_string(), query.account.to_string())
}

impl SecretBackend for MemoryBackend {
    fn add(&self, query: &ItemQuery<'_>, payload: &[u8]) -> Result<(), BackendError> {
        let mut items = self.lock();
        let key = record_key(query);
        if items.contains_key(&key) {
            return Err(BackendError::DuplicateItem);
        }
        items.insert(
            key,
            StoredItem {
                payload: payload.to_vec(),
                accessibility: query.accessibility,
                synchronizable: query.synchronizable,
            },
        );
        Ok(())
    }

    fn update(&self, query: &ItemQuery<'_>, payload: &[u8]) -> Result<(), BackendError> {
        let mut items = self.lock();
        // Payload only; write-time attributes stay as they were.
        match items.get_mut(&record_key(query)) {
            Some(item) => {
                item.payload = payload.to_vec();
                Ok(())
            }
            None => Err(BackendError::NotFound),
        }
    }

    fn delete(&self, query: &ItemQuery<'_>) -> Result<(), BackendError> {
        match self.lock().remove(&record_key(query)) {
            Some(_) => Ok(()),
            None => Err(BackendError::NotFound),
        }
    }

    fn find(
        &self,
        query: &ItemQuery<'_>,
        want_payload: bool,
    ) -> Result<Option<Vec<u8>>, BackendError> {
        match self.lock().get(&record_key(query)) {
            Some(item) if want_payload => Ok(Some(item.payload.clone())),
            Some(_) => Ok(None),
            None => Err(BackendError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::StoreConfig;

    fn query<'a>(account: &'a str, config: &StoreConfig) -> ItemQuery<'a> {
        ItemQuery {
            service: "svc",
            account,
            accessibility: config.accessibility,
            synchronizable: config.synchronizable,
        }
    }

    #[test]
    fn test_add_twice_reports_duplicate() {
        let backend = MemoryBackend::new();
        let config = StoreConfig::default();
        backend.add(&query("a", &config), b"one").unwrap();

        let err = backend.add(&query("a", &config), b"two").unwrap_err();
        assert!(matches!(err, BackendError::DuplicateItem));
    }

    #[test]
    fn test_update_missing_reports_not_found() {
        let backend = MemoryBackend::new();
        let err = backend
            .update(&query("a", &StoreConfig::default()), b"x")
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound));
    }

    #[test]
    fn test_find_presence_probe_returns_no_payload() {
        let backend = MemoryBackend::new();
        let config = StoreConfig::default();
        backend.add(&query("a", &config), b"bytes").unwrap();

        assert_eq!(backend.find(&query("a", &config), false).unwrap(), None);
        assert_eq!(
            backend.find(&query("a", &config), true).unwrap(),
            Some(b"bytes".to_vec())
        );
    }

    #[test]
    fn test_records_are_scoped_by_service() {
        let backend = MemoryBackend::new();
        let config = StoreConfig::default();
        backend.add(&query("a", &config), b"bytes").unwrap();

        let other = ItemQuery {
            service: "other-svc",
            account: "a",
            accessibility: config.accessibility,
            synchronizable: config.synchronizable,
        };
        assert!(matches!(
            backend.find(&other, true).unwrap_err(),
            BackendError::NotFound
        ));
    }

    #[test]
    fn test_update_keeps_write_time_attributes() {
        let backend = MemoryBackend::new();
        let insert = ItemQuery {
            service: "svc",
            account: "a",
            accessibility: Accessibility::AfterFirstUnlock,
            synchronizable: true,
        };
        backend.add(&insert, b"one").unwrap();

        // Update arrives with different attributes; only the payload moves.
        let update = ItemQuery {
            service: "svc",
            account: "a",
            accessibility: Accessibility::WhenUnlocked,
            synchronizable: false,
        };
        backend.update(&update, b"two").unwrap();

        let items = backend.lock();
        let item = items.get(&("svc".to_string(), "a".to_string())).unwrap();
        assert_eq!(item.payload, b"two");
        assert_eq!(item.accessibility, Accessibility::AfterFirstUnlock);
        assert!(item.synchronizable);
    }
}
