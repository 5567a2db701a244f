use serde::{Deserialize, Serialize};

/// When a stored secret may be read, relative to device lock state.
///
/// Mirrors the accessibility tiers of platform credential stores. Backends
/// that cannot express a tier treat it as advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    WhenUnlocked,
    AfterFirstUnlock,
    #[default]
    WhenUnlockedThisDeviceOnly,
    AfterFirstUnlockThisDeviceOnly,
    WhenPasscodeSetThisDeviceOnly,
}

/// Storage policy applied to every write of a store.
///
/// Immutable once a store is constructed with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    pub accessibility: Accessibility,
    pub synchronizable: bool,
}

impl StoreConfig {
    pub fn new(accessibility: Accessibility, synchronizable: bool) -> Self {
        Self {
            accessibility,
            synchronizable,
        }
    }
}
