//! Full detail of one entry, fetched when the overlay opens

use indexmap::IndexMap;

use crate::error::Result;
use crate::store::StoreItem;

/// Placeholder shown for a zero-length secret
pub const EMPTY_SECRET: &str = "<empty>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretDetail {
    pub label: String,
    /// Display form of the secret, see [`render_secret`]
    pub secret: String,
    pub attributes: IndexMap<String, String>,
}

impl SecretDetail {
    /// Fetch the secret from the backend and build the detail.
    ///
    /// Always goes to the backend; nothing is cached between calls.
    pub fn fetch(item: &dyn StoreItem) -> Result<Self> {
        let bytes = item.secret()?;
        Ok(Self {
            label: item.label().to_string(),
            secret: render_secret(&bytes),
            attributes: item.attributes().clone(),
        })
    }

    /// `key: value` lines in attribute order
    pub fn attribute_lines(&self) -> Vec<String> {
        self.attributes
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect()
    }
}

/// Render secret bytes for display.
///
/// UTF-8 text is shown as-is, empty secrets as `<empty>`, anything else as a
/// lowercase hex dump.
pub fn render_secret(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return EMPTY_SECRET.to_string();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            tracing::debug!("Secret is not UTF-8 ({}), rendering as hex", e);
            format!("<binary data: {}>", hex::encode(bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SecretStore;
    use crate::store::memory::{MemoryEntry, MemoryStore};

    #[test]
    fn test_render_utf8() {
        assert_eq!(render_secret(b"hunter2"), "hunter2");
        assert_eq!(render_secret("pässwörd".as_bytes()), "pässwörd");
    }

    #[test]
    fn test_render_binary_as_hex() {
        assert_eq!(render_secret(b"\xff\xfe"), "<binary data: fffe>");
        assert_eq!(render_secret(b"\x00\xAB\xff"), "<binary data: 00abff>");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_secret(b""), "<empty>");
    }

    #[test]
    fn test_fetch_builds_detail() {
        let store = MemoryStore::new(vec![MemoryEntry::new(
            "Bank",
            &[("application", "web"), ("username", "bob")],
            b"s3cret",
        )]);
        let items = store.enumerate().unwrap();

        let detail = SecretDetail::fetch(items[0].as_ref()).unwrap();
        assert_eq!(detail.label, "Bank");
        assert_eq!(detail.secret, "s3cret");
        assert_eq!(
            detail.attribute_lines(),
            vec!["application: web".to_string(), "username: bob".to_string()]
        );
    }

    #[test]
    fn test_fetch_propagates_backend_error() {
        let store = MemoryStore::new(vec![MemoryEntry::new("Locked", &[], b"x").failing()]);
        let items = store.enumerate().unwrap();

        assert!(SecretDetail::fetch(items[0].as_ref()).is_err());
    }
}
