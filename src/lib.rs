//! Typed secret storage over the operating system's credential facility.
//!
//! `strongbox` wraps the host secret store (macOS Keychain, Windows
//! Credential Manager, Secret Service on Linux) behind a small typed
//! get/set/delete API. Values are serialized to JSON by default; persistence
//! and at-rest encryption belong entirely to the host store.
//!
//! ```no_run
//! use strongbox::{SecretStore, SecretStoring, StoreConfig};
//!
//! let store = SecretStore::keychain(Some("com.example.myapp"), StoreConfig::default());
//! store.set(&"tok-123".to_string(), "api_token")?;
//! let token: String = store.get("api_token")?;
//! # Ok::<(), strongbox::StoreError>(())
//! ```
//!
//! Tests and keychain-less environments swap in [`MemoryBackend`]:
//!
//! ```
//! use strongbox::{MemoryBackend, SecretStore, SecretStoring, StoreConfig};
//!
//! let store = SecretStore::new(MemoryBackend::new(), "demo", StoreConfig::default());
//! store.set(&42u32, "answer")?;
//! assert_eq!(store.get::<u32>("answer")?, 42);
//! # Ok::<(), strongbox::StoreError>(())
//! ```
//!
//! For UI state, [`SecureCell`] binds one key to an in-memory value that
//! loads on creation and writes through on every change.

pub mod binding;
pub mod domain;
pub mod infrastructure;

pub use binding::SecureCell;
pub use domain::{
    Accessibility, BackendError, Codec, ErrorKind, ItemQuery, JsonCodec, Result, SecretBackend,
    SecretStore, SecretStoring, StoreConfig, StoreError,
};
pub use infrastructure::{KeychainBackend, MemoryBackend};
