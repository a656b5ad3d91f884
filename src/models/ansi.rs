use serde::{Deserialize, Serialize};

use crate::theme::{ansi_to_rgb, Rgb};

/// The eight basic SGR foreground colours (codes 30-37).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl AnsiColor {
    /// Looks up a foreground SGR code. Returns `None` for reset and for
    /// every code outside 30-37.
    pub fn from_sgr(code: u32) -> Option<Self> {
        match code {
            30 => Some(AnsiColor::Black),
            31 => Some(AnsiColor::Red),
            32 => Some(AnsiColor::Green),
            33 => Some(AnsiColor::Yellow),
            34 => Some(AnsiColor::Blue),
            35 => Some(AnsiColor::Magenta),
            36 => Some(AnsiColor::Cyan),
            37 => Some(AnsiColor::White),
            _ => None,
        }
    }

    pub fn rgb(self) -> Rgb {
        ansi_to_rgb(self)
    }
}

/// A run of terminal output sharing one foreground colour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnsiRun {
    pub text: String,
    pub foreground: Option<AnsiColor>,
}

impl AnsiRun {
    pub fn new(text: impl Into<String>, foreground: Option<AnsiColor>) -> Self {
        Self {
            text: text.into(),
            foreground,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }
}
