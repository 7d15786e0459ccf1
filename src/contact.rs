//! Contact form and outgoing links (mail client, WhatsApp, CV).

use thiserror::Error;
use urlencoding::encode;

use crate::config::ProfileConfig;

pub const WHATSAPP_GREETING: &str = "Halo Izzat, saya lihat portfoliomu. Boleh tanya-tanya?";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in required fields")]
    MissingRequired,
    #[error("CV link not available yet")]
    CvUnavailable,
    #[error("failed to open {url}: {reason}")]
    Launch { url: String, reason: String },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Build the `mailto:` URL that hands the message to the mail client.
    /// Name and email are required after trimming; the message may be empty.
    pub fn submit(&self, profile: &ProfileConfig) -> Result<String, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() {
            return Err(ContactError::MissingRequired);
        }

        let subject = format!("Portfolio Contact - {name}");
        let body = format!(
            "Nama: {name}\nEmail: {email}\n\nPesan:\n{message}\n\n(Opsional) Kontak cepat via WhatsApp: https://wa.me/{}\n",
            profile.phone_intl
        );

        Ok(format!(
            "mailto:{}?subject={}&body={}",
            profile.email,
            encode(&subject),
            encode(&body)
        ))
    }
}

pub fn whatsapp_link(profile: &ProfileConfig, greeting: &str) -> String {
    format!("https://wa.me/{}?text={}", profile.phone_intl, encode(greeting))
}

/// `None` while the CV has not been published (`#` or empty).
pub fn cv_link(profile: &ProfileConfig) -> Option<&str> {
    match profile.cv_url.trim() {
        "" | "#" => None,
        url => Some(url),
    }
}

/// Hand a URL to the system handler: the mail client for `mailto:`, the
/// browser for everything else.
#[cfg(not(target_arch = "wasm32"))]
pub fn launch(url: &str) -> Result<(), ContactError> {
    open::that(url).map_err(|e| ContactError::Launch {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(target_arch = "wasm32")]
pub fn launch(url: &str) -> Result<(), ContactError> {
    Err(ContactError::Launch {
        url: url.to_string(),
        reason: "no URL handler on this target".to_string(),
    })
}

/// Open the published CV in the browser.
pub fn open_cv(profile: &ProfileConfig) -> Result<(), ContactError> {
    let url = cv_link(profile).ok_or(ContactError::CvUnavailable)?;
    launch(url)
}

/// Label/URL pairs for the social section
pub fn social_links(profile: &ProfileConfig) -> Vec<(&'static str, String)> {
    let mut links = vec![
        ("GitHub", profile.github.clone()),
        ("LinkedIn", profile.linkedin.clone()),
        ("WhatsApp", whatsapp_link(profile, WHATSAPP_GREETING)),
    ];
    if let Some(cv) = cv_link(profile) {
        links.push(("CV", cv.to_string()));
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_name_and_email() {
        let profile = ProfileConfig::default();
        let form = ContactForm::new("  ", "me@example.com", "hi");
        assert_eq!(form.submit(&profile), Err(ContactError::MissingRequired));

        let form = ContactForm::new("Ana", "", "hi");
        assert_eq!(form.submit(&profile), Err(ContactError::MissingRequired));
    }

    #[test]
    fn mailto_encodes_subject_and_body() {
        let profile = ProfileConfig::default();
        let form = ContactForm::new(" Ana Lee ", "ana@example.com", "Hello there");
        let url = form.submit(&profile).unwrap();

        assert!(url.starts_with("mailto:ifran@ashari.tech?subject=Portfolio%20Contact%20-%20Ana%20Lee&body="));
        assert!(url.contains("Nama%3A%20Ana%20Lee%0AEmail%3A%20ana%40example.com"));
        assert!(url.contains("Pesan%3A%0AHello%20there"));
        assert!(url.contains("wa.me%2F6282271598281"));
    }

    #[test]
    fn whatsapp_link_encodes_greeting() {
        let link = whatsapp_link(&ProfileConfig::default(), "Halo, apa kabar?");
        assert_eq!(link, "https://wa.me/6282271598281?text=Halo%2C%20apa%20kabar%3F");
    }

    #[test]
    fn cv_placeholder_is_unavailable() {
        let mut profile = ProfileConfig::default();
        assert_eq!(cv_link(&profile), None);
        assert_eq!(social_links(&profile).len(), 3);

        profile.cv_url = "https://example.com/cv.pdf".to_string();
        assert_eq!(cv_link(&profile), Some("https://example.com/cv.pdf"));
        assert_eq!(social_links(&profile).last().unwrap().0, "CV");
    }

    #[test]
    fn unpublished_cv_is_never_launched() {
        let mut profile = ProfileConfig::default();
        assert_eq!(open_cv(&profile), Err(ContactError::CvUnavailable));

        profile.cv_url = "  ".to_string();
        assert_eq!(open_cv(&profile), Err(ContactError::CvUnavailable));
        assert_eq!(ContactError::CvUnavailable.to_string(), "CV link not available yet");
    }
}
