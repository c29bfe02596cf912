//! Configuration management.
//!
//! Settings load from a TOML file (`quotewise.toml` in the working
//! directory, or the user config directory) with serde defaults for
//! every section, so a missing file or a partial file both work.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{FamilyProfile, WeightVector};
use crate::narrator::NarratorConfig;

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Text extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Minimum non-whitespace characters for a page's text layer to
    /// count as content; thinner pages go through OCR.
    #[serde(default = "default_min_chars_per_page")]
    pub min_chars_per_page: usize,
    /// Rasterization DPI for the OCR fallback.
    #[serde(default = "default_ocr_dpi")]
    pub ocr_dpi: u32,
    /// Tesseract language setting.
    #[serde(default = "default_tesseract_lang")]
    pub tesseract_lang: String,
}

fn default_min_chars_per_page() -> usize {
    50
}
fn default_ocr_dpi() -> u32 {
    300
}
fn default_tesseract_lang() -> String {
    "eng".to_string()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_chars_per_page: default_min_chars_per_page(),
            ocr_dpi: default_ocr_dpi(),
            tesseract_lang: default_tesseract_lang(),
        }
    }
}

/// Top-level application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Family and claims-assumption context.
    #[serde(default)]
    pub profile: FamilyProfile,
    /// Ranking weights.
    #[serde(default)]
    pub weights: WeightVector,
    /// Text extraction settings.
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Narrator service settings.
    #[serde(default)]
    pub narrator: NarratorConfig,
}

impl Settings {
    /// Load settings from an explicit path, or from the first
    /// discovered config file, or defaults when none exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => Some(expand_path(path)),
            None => discover_config_path(),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Expand `~` in a user-supplied path.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

/// Look for a config file in the conventional locations.
fn discover_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("quotewise.toml");
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("quotewise").join("config.toml");
    user.exists().then_some(user)
}
