//! # Configuration Module
//!
//! Loads `kingdom.toml`-style configuration: the application name, colour
//! overrides for the editor highlighter and terminal behaviour. Every section
//! and field is optional and falls back to the defaults below.
//!
//! ```toml
//! [app]
//! name = "Kingdom IDE"
//!
//! [editor.colors]
//! keyword = "#569CD6"
//! comment = "#608B4E"
//!
//! [terminal]
//! history_limit = 500
//! carry_partial_escapes = true
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::handlers::errors::{IdeError, IdeResult};
use crate::models::HighlightKind;
use crate::theme::{EditorPalette, Rgb};

/// Main application configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub editor: EditorSettings,
    pub terminal: TerminalSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "Kingdom IDE".to_string(),
        }
    }
}

/// Code editor settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Colour overrides keyed by highlight kind name (`keyword`,
    /// `control_keyword`, `string`, ...).
    pub colors: BTreeMap<String, Rgb>,
}

impl EditorSettings {
    /// The default palette with the configured overrides applied.
    pub fn palette(&self) -> IdeResult<EditorPalette> {
        let mut palette = EditorPalette::DARK_PLUS;
        for (name, color) in &self.colors {
            let kind = HighlightKind::from_name(name).ok_or_else(|| {
                IdeError::config(format!("Unknown highlight kind '{}' in [editor.colors]", name))
            })?;
            palette.set_color(kind, *color);
        }
        Ok(palette)
    }
}

/// Embedded terminal settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// Maximum commands kept in history, 0 for no limit.
    pub history_limit: usize,
    /// Hold back escape sequences split across output reads.
    pub carry_partial_escapes: bool,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            history_limit: 0,
            carry_partial_escapes: true,
        }
    }
}

pub fn default_config() -> AppConfig {
    AppConfig::default()
}

pub fn parse_config(content: &str) -> IdeResult<AppConfig> {
    let config: AppConfig = toml::from_str(content)?;
    // Surface bad colour names at load time rather than at first use.
    config.editor.palette()?;
    Ok(config)
}

pub fn load_config(path: impl AsRef<Path>) -> IdeResult<AppConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Like [`load_config`], but any failure falls back to the defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> AppConfig {
    let path = path.as_ref();
    match load_config(path) {
        Ok(config) => config,
        Err(IdeError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("{} not found, using default configuration", path.display());
            default_config()
        }
        Err(e) => {
            log::warn!("Error loading {}: {}, using default configuration", path.display(), e);
            default_config()
        }
    }
}
