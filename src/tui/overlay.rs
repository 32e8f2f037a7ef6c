//! Reveal overlay: a single-slot view of one entry with a masked secret
//!
//! ```text
//! Closed --open--> MaskedOpen <--toggle--> RevealedOpen
//!   ^                  |                        |
//!   +------close-------+------------close-------+
//! ```

use crate::detail::SecretDetail;
use crate::error::Result;

/// What the secret line shows while masked
pub const SECRET_MASK: &str = "****";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    MaskedOpen,
    RevealedOpen,
}

/// Text content of an open overlay. Absent sections are `None`/empty and are
/// not rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayText {
    pub label: Option<String>,
    pub secret: Option<String>,
    pub attributes: Vec<String>,
}

#[derive(Debug)]
struct OpenOverlay {
    detail: SecretDetail,
    revealed: bool,
}

#[derive(Debug, Default)]
pub struct RevealOverlay {
    slot: Option<OpenOverlay>,
}

impl RevealOverlay {
    pub fn state(&self) -> OverlayState {
        match &self.slot {
            None => OverlayState::Closed,
            Some(open) if open.revealed => OverlayState::RevealedOpen,
            Some(_) => OverlayState::MaskedOpen,
        }
    }

    pub fn is_open(&self) -> bool {
        self.slot.is_some()
    }

    /// Open the overlay in the masked state.
    ///
    /// A no-op returning `Ok(false)` while any overlay is already open; `fetch`
    /// is not called in that case. A failed fetch leaves the overlay closed.
    pub fn open<F>(&mut self, fetch: F) -> Result<bool>
    where
        F: FnOnce() -> Result<SecretDetail>,
    {
        if self.slot.is_some() {
            tracing::debug!("Overlay already open, ignoring open request");
            return Ok(false);
        }
        let detail = fetch()?;
        tracing::debug!("Opening overlay for '{}'", detail.label);
        self.slot = Some(OpenOverlay {
            detail,
            revealed: false,
        });
        Ok(true)
    }

    /// Flip between masked and revealed; no backend access
    pub fn toggle_visibility(&mut self) {
        if let Some(open) = &mut self.slot {
            open.revealed = !open.revealed;
        }
    }

    /// Close and drop the fetched detail
    pub fn close(&mut self) {
        if self.slot.take().is_some() {
            tracing::debug!("Overlay closed");
        }
    }

    /// Current text, `None` while closed
    pub fn text(&self) -> Option<OverlayText> {
        let open = self.slot.as_ref()?;
        let detail = &open.detail;

        let label = Some(detail.label.clone()).filter(|label| !label.is_empty());
        let secret = if open.revealed {
            detail.secret.clone()
        } else {
            SECRET_MASK.to_string()
        };

        Some(OverlayText {
            label,
            secret: Some(secret),
            attributes: detail.attribute_lines(),
        })
    }
}
