//! # Theme Module
//!
//! Colour palettes for the editor highlighter and the embedded terminal.
//! The editor uses a dark "Dark+"-like palette; the terminal maps the eight
//! basic SGR colours onto plain RGB primaries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::handlers::errors::IdeError;
use crate::models::{AnsiColor, HighlightKind, TextStyle};

/// A 24-bit RGB colour, written as `#rrggbb` in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(value: &str) -> Result<Self, IdeError> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdeError::invalid_color(value));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| IdeError::invalid_color(value))
        };
        Ok(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = IdeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = IdeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Foreground colours for each highlight category of the code editor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorPalette {
    /// Declaration keywords and literals (`def`, `class`, `True`, ...)
    pub keyword: Rgb,
    /// Flow-control and import keywords (`if`, `return`, `import`, ...)
    pub control_keyword: Rgb,
    pub builtin: Rgb,
    pub class_name: Rgb,
    pub function_name: Rgb,
    pub string: Rgb,
    pub number: Rgb,
    pub docstring: Rgb,
    pub decorator: Rgb,
    pub symbol: Rgb,
    pub multiline_string: Rgb,
    pub comment: Rgb,
}

impl EditorPalette {
    pub const DARK_PLUS: Self = Self {
        keyword: Rgb::from_rgb(0x56, 0x9C, 0xD6),          // #569CD6
        control_keyword: Rgb::from_rgb(0xC5, 0x86, 0xC0),  // #C586C0
        builtin: Rgb::from_rgb(0xDC, 0xDC, 0xAA),          // #DCDCAA
        class_name: Rgb::from_rgb(0x4E, 0xC9, 0xB0),       // #4EC9B0
        function_name: Rgb::from_rgb(0xDC, 0xDC, 0xAA),    // #DCDCAA
        string: Rgb::from_rgb(0xCE, 0x91, 0x78),           // #CE9178
        number: Rgb::from_rgb(0xB5, 0xCE, 0xA8),           // #B5CEA8
        docstring: Rgb::from_rgb(0x6A, 0x99, 0x55),        // #6A9955
        decorator: Rgb::from_rgb(0xC5, 0x86, 0xC0),        // #C586C0
        symbol: Rgb::from_rgb(0xFF, 0xBC, 0x05),           // #FFBC05
        multiline_string: Rgb::from_rgb(0xCE, 0x91, 0x78), // #CE9178
        comment: Rgb::from_rgb(0x6A, 0x99, 0x55),          // #6A9955
    };

    pub fn color(&self, kind: HighlightKind) -> Rgb {
        match kind {
            HighlightKind::Keyword => self.keyword,
            HighlightKind::ControlKeyword => self.control_keyword,
            HighlightKind::Builtin => self.builtin,
            HighlightKind::ClassName => self.class_name,
            HighlightKind::FunctionName => self.function_name,
            HighlightKind::String => self.string,
            HighlightKind::Number => self.number,
            HighlightKind::Docstring => self.docstring,
            HighlightKind::Decorator => self.decorator,
            HighlightKind::Symbol => self.symbol,
            HighlightKind::MultilineString => self.multiline_string,
            HighlightKind::Comment => self.comment,
        }
    }

    pub fn set_color(&mut self, kind: HighlightKind, color: Rgb) {
        let slot = match kind {
            HighlightKind::Keyword => &mut self.keyword,
            HighlightKind::ControlKeyword => &mut self.control_keyword,
            HighlightKind::Builtin => &mut self.builtin,
            HighlightKind::ClassName => &mut self.class_name,
            HighlightKind::FunctionName => &mut self.function_name,
            HighlightKind::String => &mut self.string,
            HighlightKind::Number => &mut self.number,
            HighlightKind::Docstring => &mut self.docstring,
            HighlightKind::Decorator => &mut self.decorator,
            HighlightKind::Symbol => &mut self.symbol,
            HighlightKind::MultilineString => &mut self.multiline_string,
            HighlightKind::Comment => &mut self.comment,
        };
        *slot = color;
    }

    /// Full text style for a category: colour plus the weight/slant the
    /// editor uses for it.
    pub fn style(&self, kind: HighlightKind) -> TextStyle {
        let (bold, italic) = match kind {
            HighlightKind::Keyword
            | HighlightKind::ControlKeyword
            | HighlightKind::ClassName
            | HighlightKind::FunctionName => (true, false),
            HighlightKind::Builtin | HighlightKind::Comment => (false, true),
            _ => (false, false),
        };
        TextStyle {
            foreground: self.color(kind),
            bold,
            italic,
        }
    }
}

impl Default for EditorPalette {
    fn default() -> Self {
        Self::DARK_PLUS
    }
}

/// Maps a basic SGR colour to the terminal's display colour.
pub fn ansi_to_rgb(color: AnsiColor) -> Rgb {
    match color {
        AnsiColor::Black => Rgb::from_rgb(0x00, 0x00, 0x00),
        AnsiColor::Red => Rgb::from_rgb(0xFF, 0x00, 0x00),
        AnsiColor::Green => Rgb::from_rgb(0x00, 0xFF, 0x00),
        AnsiColor::Yellow => Rgb::from_rgb(0xFF, 0xFF, 0x00),
        AnsiColor::Blue => Rgb::from_rgb(0x00, 0x00, 0xFF),
        AnsiColor::Magenta => Rgb::from_rgb(0xFF, 0x00, 0xFF),
        AnsiColor::Cyan => Rgb::from_rgb(0x00, 0xFF, 0xFF),
        AnsiColor::White => Rgb::from_rgb(0xFF, 0xFF, 0xFF),
    }
}
