use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::backend::{BackendError, ItemQuery, SecretBackend};
use super::config::StoreConfig;
use super::error::{Result, StoreError};

/// Pluggable serializer pair turning typed values into byte payloads.
pub trait Codec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>>;
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;

    /// Whether `bytes` is this codec's encoding of an absent value.
    fn is_null(&self, bytes: &[u8]) -> bool;
}

/// Default codec: JSON via serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| StoreError::EncodingFailed(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::DecodingError(e.to_string()))
    }

    fn is_null(&self, bytes: &[u8]) -> bool {
        bytes == b"null"
    }
}

/// Typed CRUD over one namespace of the host secret facility.
///
/// Mock implementations back tests; [`SecretStore`] is the real one.
pub trait SecretStoring {
    fn set<T: Serialize>(&self, value: &T, key: &str) -> Result<()>;
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T>;
    fn delete(&self, key: &str) -> Result<()>;

    /// Never errors: any non-success status counts as "does not exist".
    fn exists(&self, key: &str) -> bool;
}

/// A typed secret store scoped to a single service namespace.
///
/// Values are encoded through the codec (JSON by default) and handed to the
/// backend as opaque byte payloads. The namespace and storage policy are
/// fixed at construction and applied to every operation.
pub struct SecretStore<B: SecretBackend, C: Codec = JsonCodec> {
    backend: B,
    codec: C,
    service: String,
    config: StoreConfig,
}

impl<B: SecretBackend> SecretStore<B> {
    pub fn new(backend: B, service: impl Into<String>, config: StoreConfig) -> Self {
        Self::with_codec(backend, JsonCodec, service, config)
    }

    /// Build a store whose namespace is derived from the running executable's
    /// name, for callers that don't need an explicit service identifier.
    pub fn with_default_service(backend: B, config: StoreConfig) -> Self {
        Self::new(backend, default_service(), config)
    }
}

impl<B: SecretBackend, C: Codec> SecretStore<B, C> {
    pub fn with_codec(backend: B, codec: C, service: impl Into<String>, config: StoreConfig) -> Self {
        Self {
            backend,
            codec,
            service: service.into(),
            config,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn query<'a>(&'a self, account: &'a str) -> ItemQuery<'a> {
        ItemQuery {
            service: &self.service,
            account,
            accessibility: self.config.accessibility,
            synchronizable: self.config.synchronizable,
        }
    }
}

impl<B: SecretBackend, C: Codec> SecretStoring for SecretStore<B, C> {
    fn set<T: Serialize>(&self, value: &T, key: &str) -> Result<()> {
        let payload = self.codec.encode(value)?;
        if self.codec.is_null(&payload) {
            return Err(StoreError::BadData);
        }

        let query = self.query(key);
        match self.backend.add(&query, &payload) {
            Ok(()) => {
                debug!(key, "inserted item");
                Ok(())
            }
            // The facility has no atomic upsert, so a duplicate falls
            // through to an update-in-place with the same bytes.
            Err(BackendError::DuplicateItem) => match self.backend.update(&query, &payload) {
                Ok(()) => {
                    debug!(key, "updated existing item");
                    Ok(())
                }
                Err(BackendError::NotFound) => Err(StoreError::ItemNotFound),
                Err(err) => Err(service_error(err)),
            },
            Err(err) => Err(service_error(err)),
        }
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        match self.backend.find(&self.query(key), true) {
            Ok(Some(payload)) => self.codec.decode(&payload),
            Ok(None) => Err(StoreError::UnexpectedData(
                "backend reported success but returned no payload".to_string(),
            )),
            Err(BackendError::NotFound) => Err(StoreError::ItemNotFound),
            Err(BackendError::UnexpectedPayload(msg)) => Err(StoreError::UnexpectedData(msg)),
            Err(err) => Err(service_error(err)),
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        match self.backend.delete(&self.query(key)) {
            Ok(()) => {
                debug!(key, "deleted item");
                Ok(())
            }
            Err(BackendError::NotFound) => Err(StoreError::ItemNotFound),
            Err(_) => Err(StoreError::Unknown),
        }
    }

    fn exists(&self, key: &str) -> bool {
        self.backend.find(&self.query(key), false).is_ok()
    }
}

fn service_error(err: BackendError) -> StoreError {
    match err {
        BackendError::Other { status, message } => StoreError::ServiceError { status, message },
        other => StoreError::ServiceError {
            status: None,
            message: other.to_string(),
        },
    }
}

fn default_service() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
