use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::theme::Rgb;

/// Lexical category assigned to a highlighted span.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    Keyword,
    ControlKeyword,
    Builtin,
    ClassName,
    FunctionName,
    String,
    Number,
    Docstring,
    Decorator,
    Symbol,
    MultilineString,
    Comment,
}

impl HighlightKind {
    pub const ALL: [HighlightKind; 12] = [
        HighlightKind::Keyword,
        HighlightKind::ControlKeyword,
        HighlightKind::Builtin,
        HighlightKind::ClassName,
        HighlightKind::FunctionName,
        HighlightKind::String,
        HighlightKind::Number,
        HighlightKind::Docstring,
        HighlightKind::Decorator,
        HighlightKind::Symbol,
        HighlightKind::MultilineString,
        HighlightKind::Comment,
    ];

    /// The snake_case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            HighlightKind::Keyword => "keyword",
            HighlightKind::ControlKeyword => "control_keyword",
            HighlightKind::Builtin => "builtin",
            HighlightKind::ClassName => "class_name",
            HighlightKind::FunctionName => "function_name",
            HighlightKind::String => "string",
            HighlightKind::Number => "number",
            HighlightKind::Docstring => "docstring",
            HighlightKind::Decorator => "decorator",
            HighlightKind::Symbol => "symbol",
            HighlightKind::MultilineString => "multiline_string",
            HighlightKind::Comment => "comment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextStyle {
    pub foreground: Rgb,
    pub bold: bool,
    pub italic: bool,
}

/// Whether a line ends inside an unterminated triple-quoted string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Normal,
    InMultilineString,
}

impl LineState {
    pub fn as_u8(self) -> u8 {
        match self {
            LineState::Normal => 0,
            LineState::InMultilineString => 1,
        }
    }
}

impl From<u8> for LineState {
    /// Any non-zero value is treated as "inside a string".
    fn from(value: u8) -> Self {
        if value == 0 {
            LineState::Normal
        } else {
            LineState::InMultilineString
        }
    }
}

/// A styled region of one line. `start` and `len` are UTF-8 byte offsets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyledSpan {
    pub start: usize,
    pub len: usize,
    pub kind: HighlightKind,
    pub style: TextStyle,
}

impl StyledSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The slice of `line` this span covers.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.range()]
    }
}

/// Result of highlighting a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LineHighlight {
    pub spans: Vec<StyledSpan>,
    pub next_state: LineState,
}

impl LineHighlight {
    /// Kind of the span covering byte `offset`, if any.
    pub fn kind_at(&self, offset: usize) -> Option<HighlightKind> {
        self.spans
            .iter()
            .find(|span| span.range().contains(&offset))
            .map(|span| span.kind)
    }
}
