//! Light/dark theme and its on-disk preference.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("unknown theme '{0}'")]
    Unknown(String),
    #[error("theme preference I/O at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Toast text announcing this theme
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark mode",
            Theme::Light => "Light mode",
        }
    }

    /// Clear color, linear RGBA
    pub fn background(self) -> [f64; 4] {
        match self {
            Theme::Dark => [0.003, 0.003, 0.006, 1.0],
            Theme::Light => [0.93, 0.95, 0.97, 1.0],
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        })
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(ThemeError::Unknown(other.to_string())),
        }
    }
}

/// Persists the theme as a single word in a text file
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/portfolio-fx/theme`, if the platform has a config dir
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("portfolio-fx").join("theme")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Theme>, ThemeError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => content.parse().map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ThemeError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    pub fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        let io_err = |source| ThemeError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, theme.to_string()).map_err(io_err)
    }
}
