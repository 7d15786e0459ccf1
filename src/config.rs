//! Site configuration
//!
//! Values are read once at startup. Lookup order:
//! 1. `PORTFOLIO_CONFIG` (may come from `.env`) pointing at a JSON file
//! 2. `portfolio.json` in the working directory
//! 3. Built-in defaults
//!
//! Every unit receives only its own section.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::color::{self, ColorError};

pub const CONFIG_ENV: &str = "PORTFOLIO_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "portfolio.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("typing.words must contain at least one phrase")]
    NoPhrases,
    #[error("particles.colors must not be empty")]
    EmptyPalette,
    #[error("invalid palette entry: {0}")]
    Palette(#[from] ColorError),
    #[error("{0} must be finite, non-negative and ordered low..high")]
    BadRange(&'static str),
    #[error("glow.ease must be in (0, 1], got {0}")]
    BadEase(f32),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub typing: TypingConfig,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub glow: GlowConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

impl SiteConfig {
    /// Load from the environment-selected file, the working-directory file,
    /// or fall back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from(path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::load_from(local);
        }

        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SiteConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::info!("Loaded site config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typing.words.is_empty() {
            return Err(ConfigError::NoPhrases);
        }

        let p = &self.particles;
        if p.count > 0 && p.colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        for entry in &p.colors {
            color::parse_hex(entry)?;
        }
        check_range("particles.size_range", p.size_range)?;
        check_range("particles.opacity_range", p.opacity_range)?;
        check_range("particles.drift_speed", [0.0, p.drift_speed])?;
        check_range("glow.radius", [0.0, self.glow.radius])?;
        color::parse_hex(&self.glow.color)?;

        if !(self.glow.ease > 0.0 && self.glow.ease <= 1.0) {
            return Err(ConfigError::BadEase(self.glow.ease));
        }
        Ok(())
    }
}

fn check_range(name: &'static str, [lo, hi]: [f32; 2]) -> Result<(), ConfigError> {
    if lo.is_finite() && hi.is_finite() && lo >= 0.0 && lo <= hi {
        Ok(())
    } else {
        Err(ConfigError::BadRange(name))
    }
}

/// Contact details shown on the page and used for outgoing links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfileConfig {
    pub email: String,
    pub phone: String,
    /// Phone in international form, no leading `+`, for wa.me links
    pub phone_intl: String,
    pub github: String,
    pub linkedin: String,
    /// `#` or empty means not published yet
    pub cv_url: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            email: "ifran@ashari.tech".to_string(),
            phone: "082271598281".to_string(),
            phone_intl: "6282271598281".to_string(),
            github: "https://github.com/AndiIzzat".to_string(),
            linkedin: "https://www.linkedin.com/in/andi-izzat-7329b630a/".to_string(),
            cv_url: "#".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypingConfig {
    pub words: Vec<String>,
    pub type_speed_ms: u64,
    pub delete_speed_ms: u64,
    pub pause_time_ms: u64,
    /// Gap between a fully deleted phrase and the next one
    pub transition_ms: u64,
}

impl TypingConfig {
    pub fn type_speed(&self) -> Duration {
        Duration::from_millis(self.type_speed_ms)
    }

    pub fn delete_speed(&self) -> Duration {
        Duration::from_millis(self.delete_speed_ms)
    }

    pub fn pause_time(&self) -> Duration {
        Duration::from_millis(self.pause_time_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            words: ["captivate", "inspire", "stand out", "connect"]
                .into_iter()
                .map(String::from)
                .collect(),
            type_speed_ms: 100,
            delete_speed_ms: 50,
            pause_time_ms: 2000,
            transition_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Hex colors, picked uniformly per particle
    pub colors: Vec<String>,
    /// Diameter in pixels, `[min, max]`
    pub size_range: [f32; 2],
    pub opacity_range: [f32; 2],
    /// Each velocity component is drawn from `[-drift_speed, drift_speed]` px/frame
    pub drift_speed: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            colors: vec![
                "#6366f1".to_string(),
                "#8b5cf6".to_string(),
                "#a855f7".to_string(),
            ],
            size_range: [2.0, 6.0],
            opacity_range: [0.1, 0.6],
            drift_speed: 0.25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlowConfig {
    /// Fraction of the remaining distance covered each frame
    pub ease: f32,
    /// Below this viewport width the glow never mounts
    pub min_viewport_width: f32,
    pub radius: f32,
    pub color: String,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            ease: 0.1,
            min_viewport_width: 768.0,
            radius: 200.0,
            color: "#8b5cf6".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "A. Izzat Shafran Ashari".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn default_typing_matches_page() {
        let typing = TypingConfig::default();
        assert_eq!(typing.words.len(), 4);
        assert_eq!(typing.type_speed(), Duration::from_millis(100));
        assert_eq!(typing.delete_speed(), Duration::from_millis(50));
        assert_eq!(typing.pause_time(), Duration::from_millis(2000));
        assert_eq!(typing.transition(), Duration::from_millis(300));
    }

    #[test]
    fn empty_word_list_is_rejected() {
        let mut config = SiteConfig::default();
        config.typing.words.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoPhrases)));
    }

    #[test]
    fn empty_palette_is_fine_without_particles() {
        let mut config = SiteConfig::default();
        config.particles.colors.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPalette)));

        config.particles.count = 0;
        config.validate().unwrap();
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut config = SiteConfig::default();
        config.particles.size_range = [6.0, 2.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadRange("particles.size_range"))
        ));
    }

    #[test]
    fn bad_palette_entry_is_rejected() {
        let mut config = SiteConfig::default();
        config.particles.colors.push("purple".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Palette(_))));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "typing": { "words": ["hi"] }, "particles": { "count": 3 } }"#;
        let config: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.typing.words, vec!["hi".to_string()]);
        assert_eq!(config.typing.pause_time_ms, 2000);
        assert_eq!(config.particles.count, 3);
        assert_eq!(config.particles.colors.len(), 3);
        assert_eq!(config.profile, ProfileConfig::default());
    }
}
