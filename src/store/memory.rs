//! In-memory store used by tests

use std::cell::Cell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{KeyviewError, Result};
use crate::store::{SecretStore, StoreItem};

#[derive(Debug, Clone)]
pub struct MemoryEntry {
    pub label: String,
    pub attributes: IndexMap<String, String>,
    pub secret: Vec<u8>,
    pub fail_fetch: bool,
}

impl MemoryEntry {
    pub fn new(label: &str, attributes: &[(&str, &str)], secret: &[u8]) -> Self {
        Self {
            label: label.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            secret: secret.to_vec(),
            fail_fetch: false,
        }
    }

    /// Make `secret()` fail for this entry
    pub fn failing(mut self) -> Self {
        self.fail_fetch = true;
        self
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<MemoryEntry>,
    unavailable: bool,
    fetches: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new(entries: Vec<MemoryEntry>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    /// A store whose enumeration always fails
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    /// Shared counter of `secret()` calls across all enumerated items
    pub fn fetch_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.fetches)
    }
}

impl SecretStore for MemoryStore {
    fn enumerate(&self) -> Result<Vec<Box<dyn StoreItem>>> {
        if self.unavailable {
            return Err(KeyviewError::backend_unavailable("memory store is offline"));
        }
        Ok(self
            .entries
            .iter()
            .cloned()
            .map(|entry| {
                Box::new(MemoryItem {
                    entry,
                    fetches: Rc::clone(&self.fetches),
                }) as Box<dyn StoreItem>
            })
            .collect())
    }
}

struct MemoryItem {
    entry: MemoryEntry,
    fetches: Rc<Cell<usize>>,
}

impl StoreItem for MemoryItem {
    fn label(&self) -> &str {
        &self.entry.label
    }

    fn attributes(&self) -> &IndexMap<String, String> {
        &self.entry.attributes
    }

    fn secret(&self) -> Result<Vec<u8>> {
        self.fetches.set(self.fetches.get() + 1);
        if self.entry.fail_fetch {
            return Err(KeyviewError::SecretFetchFailed {
                label: self.entry.label.clone(),
                details: "item is locked".to_string(),
            });
        }
        Ok(self.entry.secret.clone())
    }
}
