use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use keyring::Entry;
use tracing::debug;

use crate::domain::backend::{BackendError, ItemQuery, SecretBackend};
use crate::domain::config::StoreConfig;
use crate::domain::store::SecretStore;

/// Backend over the OS credential facility (macOS Keychain, Windows
/// Credential Manager, Secret Service on Linux) via the keyring crate.
///
/// Payloads are arbitrary bytes but the facility speaks passwords, so they
/// travel base64-wrapped. The facility exposes no separate insert and update
/// primitives either; `add` and `update` synthesize the duplicate/not-found
/// statuses from a preceding lookup, which keeps the two-step upsert
/// observable but not race-free. The query's accessibility and sync
/// attributes are treated as advisory here: the keyring API exposes no way
/// to apply them.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeychainBackend;

impl KeychainBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SecretStore<KeychainBackend> {
    /// The common case: a keychain-backed store. Pass `None` to derive the
    /// service namespace from the running executable's name.
    pub fn keychain(service: Option<&str>, config: StoreConfig) -> Self {
        match service {
            Some(service) => SecretStore::new(KeychainBackend::new(), service, config),
            None => SecretStore::with_default_service(KeychainBackend::new(), config),
        }
    }
}

fn entry(query: &ItemQuery<'_>) -> Result<Entry, BackendError> {
    Entry::new(query.service, query.account).map_err(map_err)
}

fn map_err(err: keyring::Error) -> BackendError {
    match err {
        keyring::Error::NoEntry => BackendError::NotFound,
        other => BackendError::Other {
            status: None,
            message: other.to_string(),
        },
    }
}

impl SecretBackend for KeychainBackend {
    fn add(&self, query: &ItemQuery<'_>, payload: &[u8]) -> Result<(), BackendError> {
        let entry = entry(query)?;
        match entry.get_password() {
            Ok(_) => Err(BackendError::DuplicateItem),
            Err(keyring::Error::NoEntry) => {
                debug!(
                    service = query.service,
                    account = query.account,
                    "adding keychain item"
                );
                entry.set_password(&BASE64.encode(payload)).map_err(map_err)
            }
            Err(err) => Err(map_err(err)),
        }
    }

    fn update(&self, query: &ItemQuery<'_>, payload: &[u8]) -> Result<(), BackendError> {
        let entry = entry(query)?;
        match entry.get_password() {
            Ok(_) => {
                debug!(
                    service = query.service,
                    account = query.account,
                    "updating keychain item"
                );
                entry.set_password(&BASE64.encode(payload)).map_err(map_err)
            }
            Err(keyring::Error::NoEntry) => Err(BackendError::NotFound),
            Err(err) => Err(map_err(err)),
        }
    }

    fn delete(&self, query: &ItemQuery<'_>) -> Result<(), BackendError> {
        entry(query)?.delete_password().map_err(map_err)
    }

    fn find(
        &self,
        query: &ItemQuery<'_>,
        want_payload: bool,
    ) -> Result<Option<Vec<u8>>, BackendError> {
        let entry = entry(query)?;
        // The facility has no attributes-only probe; a presence check still
        // retrieves the password and discards it.
        let stored = entry.get_password().map_err(map_err)?;
        if !want_payload {
            return Ok(None);
        }
        BASE64
            .decode(stored.trim())
            .map(Some)
            .map_err(|e| {
                BackendError::UnexpectedPayload(format!("stored payload is not valid base64: {e}"))
            })
    }
}
