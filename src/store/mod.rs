//! Secret store backends
//!
//! The rest of the crate only sees the [`SecretStore`] and [`StoreItem`]
//! capabilities; concrete backends live in submodules.

use std::time::Duration;

use indexmap::IndexMap;

use crate::error::Result;

#[cfg(test)]
pub mod memory;
#[cfg(target_os = "linux")]
pub mod secret_service;

/// One entry held by the backend.
///
/// `label` and `attributes` are cheap and always available. `secret` performs
/// backend I/O and may block on an access-control prompt.
pub trait StoreItem {
    fn label(&self) -> &str;

    fn attributes(&self) -> &IndexMap<String, String>;

    /// Raw secret bytes; empty for an empty secret.
    fn secret(&self) -> Result<Vec<u8>>;
}

/// A source of [`StoreItem`]s.
pub trait SecretStore {
    /// Enumerate every entry once, in backend order.
    fn enumerate(&self) -> Result<Vec<Box<dyn StoreItem>>>;
}

/// Connection settings for the platform backend
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Collection alias to browse (e.g. `default`, `session`)
    pub collection: String,
    /// Timeout applied to every backend call
    pub timeout: Duration,
}

/// Connect to the platform secret store
#[cfg(target_os = "linux")]
pub fn connect(options: &StoreOptions) -> Result<Box<dyn SecretStore>> {
    let store = secret_service::SecretServiceStore::connect(options)?;
    Ok(Box::new(store))
}

#[cfg(not(target_os = "linux"))]
pub fn connect(_options: &StoreOptions) -> Result<Box<dyn SecretStore>> {
    Err(crate::error::KeyviewError::backend_unavailable(
        "the freedesktop Secret Service is only available on Linux",
    ))
}
