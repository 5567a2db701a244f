use thiserror::Error;

use super::config::Accessibility;

/// Query descriptor identifying one secret record in the host facility.
///
/// Every backend primitive takes one of these; the (service, account) pair is
/// the record key, the remaining fields are write-time attributes.
#[derive(Debug, Clone, Copy)]
pub struct ItemQuery<'a> {
    pub service: &'a str,
    pub account: &'a str,
    pub accessibility: Accessibility,
    pub synchronizable: bool,
}

/// Non-success status reported by a backend primitive.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Item already exists")]
    DuplicateItem,

    #[error("Item not found")]
    NotFound,

    #[error("Payload shape violated the backend contract: {0}")]
    UnexpectedPayload(String),

    #[error("{message}")]
    Other {
        status: Option<i32>,
        message: String,
    },
}

/// The four primitives of the host secret facility.
///
/// There is deliberately no upsert: callers that want insert-or-update issue
/// `add` and fall back to `update` on [`BackendError::DuplicateItem`]. The
/// two-step sequence is not atomic against concurrent writers to the same
/// key; the last write wins.
pub trait SecretBackend: Send + Sync {
    /// Insert a new record. Fails with `DuplicateItem` if the key exists.
    fn add(&self, query: &ItemQuery<'_>, payload: &[u8]) -> Result<(), BackendError>;

    /// Replace the payload of an existing record, leaving its write-time
    /// attributes untouched. Fails with `NotFound` if the key is absent.
    fn update(&self, query: &ItemQuery<'_>, payload: &[u8]) -> Result<(), BackendError>;

    /// Remove a record. Fails with `NotFound` if the key is absent.
    fn delete(&self, query: &ItemQuery<'_>) -> Result<(), BackendError>;

    /// Look up a record. Returns its payload when `want_payload` is set,
    /// `Ok(None)` for a presence-only probe. Fails with `NotFound` if the
    /// key is absent.
    fn find(
        &self,
        query: &ItemQuery<'_>,
        want_payload: bool,
    ) -> Result<Option<Vec<u8>>, BackendError>;
}
