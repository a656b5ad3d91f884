//! # App Module
//!
//! [`IdeContext`] is built once from configuration and passed to whatever
//! needs the highlighter or a terminal. There is no global instance.

use std::path::Path;
use std::sync::Arc;

use crate::config::{load_config, AppConfig};
use crate::handlers::errors::IdeResult;
use crate::highlighter::Highlighter;
use crate::services::{CommandHistory, HighlightedDocument, TerminalSession};
use crate::terminal::AnsiParser;
use crate::theme::EditorPalette;

pub struct IdeContext {
    config: AppConfig,
    palette: EditorPalette,
    highlighter: Arc<Highlighter>,
}

impl IdeContext {
    /// Resolves the palette and compiles the highlighter. Fails on an unknown
    /// colour key or a pattern that does not compile.
    pub fn new(config: AppConfig) -> IdeResult<Self> {
        let palette = config.editor.palette()?;
        let highlighter = Arc::new(Highlighter::new(palette)?);
        log::info!("Initialized {} context", config.app.name);
        Ok(Self {
            config,
            palette,
            highlighter,
        })
    }

    pub fn from_config_file(path: impl AsRef<Path>) -> IdeResult<Self> {
        Self::new(load_config(path)?)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn palette(&self) -> &EditorPalette {
        &self.palette
    }

    pub fn highlighter(&self) -> Arc<Highlighter> {
        Arc::clone(&self.highlighter)
    }

    /// Opens a highlighted document sharing this context's highlighter.
    pub fn open_document(&self, text: &str) -> HighlightedDocument {
        HighlightedDocument::from_text(self.highlighter(), text)
    }

    pub fn new_terminal_session(&self) -> TerminalSession {
        let settings = &self.config.terminal;
        TerminalSession::new(
            AnsiParser::with_carry_over(settings.carry_partial_escapes),
            CommandHistory::with_limit(settings.history_limit),
        )
    }
}
