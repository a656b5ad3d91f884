// Modules
pub mod app;
pub mod config;
pub mod handlers;
pub mod highlighter;
pub mod models;
pub mod services;
pub mod terminal;
pub mod theme;
pub mod utils;

#[cfg(test)]
mod tests;

pub use app::IdeContext;
pub use handlers::errors::{IdeError, IdeResult};
pub use handlers::{handle_key, KeyOutcome};
pub use highlighter::{Highlighter, StyleRule};
pub use models::{AnsiColor, AnsiRun, HighlightKind, LineHighlight, LineState, StyledSpan};
pub use services::{CommandHistory, ConsoleInput, HighlightedDocument, TerminalSession};
pub use terminal::{parse, strip_ansi_codes, AnsiParser};
