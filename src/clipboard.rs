//! Copy contact details to the system clipboard.

use std::str::FromStr;
use thiserror::Error;

use crate::config::ProfileConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("unknown copy target '{0}', expected email or phone")]
    UnknownTarget(String),
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Email,
    Phone,
}

impl CopyTarget {
    pub fn value(self, profile: &ProfileConfig) -> &str {
        match self {
            CopyTarget::Email => &profile.email,
            CopyTarget::Phone => &profile.phone,
        }
    }

    /// Toast shown once the value is on the clipboard
    pub fn confirmation(self) -> &'static str {
        match self {
            CopyTarget::Email => "Email copied!",
            CopyTarget::Phone => "WhatsApp copied!",
        }
    }
}

impl FromStr for CopyTarget {
    type Err = ClipboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "email" => Ok(CopyTarget::Email),
            "phone" | "whatsapp" => Ok(CopyTarget::Phone),
            other => Err(ClipboardError::UnknownTarget(other.to_string())),
        }
    }
}

/// Lazily connected system clipboard. A failed connection is retried on the
/// next copy.
#[derive(Default)]
pub struct Clipboard {
    #[cfg(not(target_arch = "wasm32"))]
    inner: Option<arboard::Clipboard>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put the selected profile value on the clipboard and return the
    /// confirmation message.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn copy(
        &mut self,
        target: CopyTarget,
        profile: &ProfileConfig,
    ) -> Result<&'static str, ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ClipboardError::Unavailable("not connected".to_string()));
        };

        clipboard
            .set_text(target.value(profile))
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        log::debug!("Copied {:?} to clipboard", target);
        Ok(target.confirmation())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn copy(
        &mut self,
        _target: CopyTarget,
        _profile: &ProfileConfig,
    ) -> Result<&'static str, ClipboardError> {
        Err(ClipboardError::Unavailable("not supported on this target".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_pick_profile_values() {
        let profile = ProfileConfig::default();
        assert_eq!(CopyTarget::Email.value(&profile), "ifran@ashari.tech");
        assert_eq!(CopyTarget::Phone.value(&profile), "082271598281");
    }

    #[test]
    fn confirmations_match_page_wording() {
        assert_eq!(CopyTarget::Email.confirmation(), "Email copied!");
        assert_eq!(CopyTarget::Phone.confirmation(), "WhatsApp copied!");
    }

    #[test]
    fn target_names_parse() {
        assert_eq!("email".parse::<CopyTarget>(), Ok(CopyTarget::Email));
        assert_eq!("whatsapp".parse::<CopyTarget>(), Ok(CopyTarget::Phone));
        assert_eq!(
            "fax".parse::<CopyTarget>(),
            Err(ClipboardError::UnknownTarget("fax".to_string()))
        );
    }
}
