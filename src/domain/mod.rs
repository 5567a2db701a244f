pub mod backend;
pub mod config;
pub mod error;
pub mod store;

pub use backend::{BackendError, ItemQuery, SecretBackend};
pub use config::{Accessibility, StoreConfig};
pub use error::{ErrorKind, Result, StoreError};
pub use store::{Codec, JsonCodec, SecretStore, SecretStoring};
