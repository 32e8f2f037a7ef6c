//! Snapshot of the secret store, normalized for display
//!
//! The store is enumerated exactly once. Each entry becomes a [`DisplayRecord`]
//! and the records are sorted case-insensitively by identifier; that order is
//! fixed for the rest of the process.

use indexmap::IndexMap;

use crate::error::Result;
use crate::store::{SecretStore, StoreItem};

/// Identifier used when an entry carries nothing displayable
pub const UNKNOWN_ITEM: &str = "Unknown Item";

/// One row of the master list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    /// Never empty
    pub identifier: String,
    /// May be empty
    pub username: String,
    /// Index of the backing entry in [`ItemRepository`]
    source: usize,
}

/// Owns the enumerated entries and the sorted master list
pub struct ItemRepository {
    items: Vec<Box<dyn StoreItem>>,
    records: Vec<DisplayRecord>,
}

impl ItemRepository {
    /// Enumerate the store and build the sorted master list.
    ///
    /// Enumeration failures are returned as-is; there is no retry.
    pub fn load(store: &dyn SecretStore) -> Result<Self> {
        let items = store.enumerate()?;

        let mut records: Vec<DisplayRecord> = items
            .iter()
            .enumerate()
            .map(|(source, item)| DisplayRecord {
                identifier: derive_identifier(item.label(), item.attributes()),
                username: item.attributes().get("username").cloned().unwrap_or_default(),
                source,
            })
            .collect();

        // Stable: equal keys keep enumeration order
        records.sort_by_cached_key(|record| record.identifier.to_lowercase());

        tracing::debug!("Loaded {} items from the secret store", records.len());

        Ok(Self { items, records })
    }

    /// The master list, in display order
    pub fn records(&self) -> &[DisplayRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&DisplayRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The backend entry a record was built from
    pub fn source(&self, record: &DisplayRecord) -> &dyn StoreItem {
        self.items[record.source].as_ref()
    }
}

/// Derive the display identifier of an entry.
///
/// Precedence: `label` (suffixed with `: <application>` when present, or just
/// the application when the label is empty), then `app_id`, then
/// `description`, then [`UNKNOWN_ITEM`].
pub fn derive_identifier(label: &str, attributes: &IndexMap<String, String>) -> String {
    let non_empty = |key: &str| {
        attributes
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    };

    let mut identifier = label.to_string();
    if let Some(application) = non_empty("application") {
        if !identifier.is_empty() {
            identifier.push_str(": ");
        }
        identifier.push_str(application);
    }
    if !identifier.is_empty() {
        return identifier;
    }

    non_empty("app_id")
        .or_else(|| non_empty("description"))
        .unwrap_or(UNKNOWN_ITEM)
        .to_string()
}
