//! # Highlighter Module
//!
//! Line-oriented Python syntax highlighting driven by an ordered table of
//! regular expressions.
//!
//! Each call to [`Highlighter::highlight`] looks at exactly one line plus the
//! [`LineState`] carried out of the previous line, so a caller that owns the
//! text (see [`crate::services::HighlightedDocument`]) must feed lines in
//! document order.
//!
//! ```rust
//! use kingdom_ide_core::highlighter::Highlighter;
//! use kingdom_ide_core::models::{HighlightKind, LineState};
//! use kingdom_ide_core::theme::EditorPalette;
//!
//! let highlighter = Highlighter::new(EditorPalette::DARK_PLUS).unwrap();
//! let result = highlighter.highlight("def foo():", LineState::Normal);
//! assert_eq!(result.kind_at(0), Some(HighlightKind::Keyword));
//! assert_eq!(result.kind_at(4), Some(HighlightKind::FunctionName));
//! ```

use std::ops::Range;

use regex::Regex;

use crate::handlers::errors::{IdeError, IdeResult};
use crate::models::{HighlightKind, LineHighlight, LineState, StyledSpan};
use crate::theme::EditorPalette;

const DECLARATION_KEYWORDS: &[&str] = &[
    "class", "def", "self", "True", "False", "None", "is", "not", "or", "and",
];

const CONTROL_KEYWORDS: &[&str] = &[
    "import", "from", "if", "else", "elif", "while", "for", "return", "try", "except", "with",
    "break", "pass", "finally", "raise", "assert", "global", "nonlocal", "async", "await", "in",
];

const BUILTINS: &[&str] = &[
    "abs", "all", "any", "ascii", "bin", "bool", "breakpoint", "bytearray", "bytes", "callable",
    "chr", "classmethod", "compile", "complex", "delattr", "dict", "dir", "divmod", "enumerate",
    "eval", "exec", "filter", "float", "format", "frozenset", "getattr", "globals", "hasattr",
    "hash", "help", "hex", "id", "input", "int", "isinstance", "issubclass", "iter", "len", "list",
    "locals", "map", "max", "memoryview", "min", "next", "object", "oct", "open", "ord", "pow",
    "print", "property", "range", "repr", "reversed", "round", "set", "setattr", "slice",
    "sorted", "staticmethod", "str", "sum", "super", "tuple", "type", "vars", "zip", "__import__",
];

const TRIPLE_DOUBLE: &str = "\"\"\"";
const TRIPLE_SINGLE: &str = "'''";

/// Same-line string literals, honouring backslash escapes. Used only to
/// decide whether a `#` is inside a string.
const STRING_LITERAL: &str = r#""[^"\\]*(\\.[^"\\]*)*"|'[^'\\]*(\\.[^'\\]*)*'"#;

/// The default Python rule table, in application order.
pub fn python_rules() -> Vec<(String, HighlightKind)> {
    vec![
        (
            format!(r"\b(?:{})\b", DECLARATION_KEYWORDS.join("|")),
            HighlightKind::Keyword,
        ),
        (
            format!(r"\b(?:{})\b", CONTROL_KEYWORDS.join("|")),
            HighlightKind::ControlKeyword,
        ),
        (
            format!(r"\b({})\b\s*\(", BUILTINS.join("|")),
            HighlightKind::Builtin,
        ),
        (r"\bclass\s+(\w+)".to_string(), HighlightKind::ClassName),
        (r"\bdef\b".to_string(), HighlightKind::Keyword),
        (r"\bdef\s+(\w+)".to_string(), HighlightKind::FunctionName),
        (r#""[^"]*""#.to_string(), HighlightKind::String),
        (r"'[^']*'".to_string(), HighlightKind::String),
        (r"\b\d+\b".to_string(), HighlightKind::Number),
        (r#""""[^"]*""""#.to_string(), HighlightKind::Docstring),
        (r"'''[^']*'''".to_string(), HighlightKind::Docstring),
        (r"@\w+".to_string(), HighlightKind::Decorator),
        (r"[()\[\]]".to_string(), HighlightKind::Symbol),
    ]
}

/// A compiled pattern and the category it paints.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pattern: Regex,
    kind: HighlightKind,
}

impl StyleRule {
    pub fn new(pattern: &str, kind: HighlightKind) -> IdeResult<Self> {
        let pattern =
            Regex::new(pattern).map_err(|source| IdeError::invalid_pattern(pattern, source))?;
        Ok(Self { pattern, kind })
    }

    pub fn kind(&self) -> HighlightKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Paints every match into `cells`. Patterns with capture groups paint
    /// only the groups that participated in the match.
    fn apply(&self, line: &str, cells: &mut [Option<HighlightKind>]) {
        let has_groups = self.pattern.captures_len() > 1;
        for caps in self.pattern.captures_iter(line) {
            if has_groups {
                for group in caps.iter().skip(1).flatten() {
                    paint(cells, group.range(), self.kind);
                }
            } else if let Some(whole) = caps.get(0) {
                paint(cells, whole.range(), self.kind);
            }
        }
    }
}

pub struct Highlighter {
    rules: Vec<StyleRule>,
    string_literal: Regex,
    palette: EditorPalette,
}

impl Highlighter {
    /// Builds the Python highlighter. Fails only if a pattern does not
    /// compile.
    pub fn new(palette: EditorPalette) -> IdeResult<Self> {
        Self::with_rules(python_rules(), palette)
    }

    pub fn with_rules<I, S>(rules: I, palette: EditorPalette) -> IdeResult<Self>
    where
        I: IntoIterator<Item = (S, HighlightKind)>,
        S: AsRef<str>,
    {
        let rules = rules
            .into_iter()
            .map(|(pattern, kind)| StyleRule::new(pattern.as_ref(), kind))
            .collect::<IdeResult<Vec<_>>>()?;
        let string_literal = Regex::new(STRING_LITERAL)
            .map_err(|source| IdeError::invalid_pattern(STRING_LITERAL, source))?;
        log::debug!("Compiled highlighter with {} rules", rules.len());
        Ok(Self {
            rules,
            string_literal,
            palette,
        })
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn palette(&self) -> &EditorPalette {
        &self.palette
    }

    /// Highlights one line given the state carried out of the line above.
    pub fn highlight(&self, line: &str, previous_state: LineState) -> LineHighlight {
        if line.is_empty() {
            return LineHighlight {
                spans: Vec::new(),
                next_state: previous_state,
            };
        }

        let mut cells: Vec<Option<HighlightKind>> = vec![None; line.len()];
        for rule in &self.rules {
            rule.apply(line, &mut cells);
        }

        // Only one delimiter kind is resolved per line; ''' is tried when """
        // produced nothing.
        let multiline = match_multiline(line, TRIPLE_DOUBLE, previous_state)
            .or_else(|| match_multiline(line, TRIPLE_SINGLE, previous_state));

        let mut string_ranges = Vec::new();
        let mut next_state = LineState::Normal;
        if let Some((range, state)) = multiline {
            paint(&mut cells, range.clone(), HighlightKind::MultilineString);
            string_ranges.push(range);
            next_state = state;
        }
        string_ranges.extend(self.string_literal.find_iter(line).map(|m| m.range()));

        let comment_start = line
            .match_indices('#')
            .map(|(pos, _)| pos)
            .find(|pos| !string_ranges.iter().any(|range| range.contains(pos)));
        if let Some(start) = comment_start {
            paint(&mut cells, start..line.len(), HighlightKind::Comment);
        }

        LineHighlight {
            spans: self.collect_spans(&cells),
            next_state,
        }
    }

    /// Collapses per-byte categories into maximal runs.
    fn collect_spans(&self, cells: &[Option<HighlightKind>]) -> Vec<StyledSpan> {
        let mut spans: Vec<StyledSpan> = Vec::new();
        let mut start = 0;
        while start < cells.len() {
            let current = cells[start];
            let mut end = start + 1;
            while end < cells.len() && cells[end] == current {
                end += 1;
            }
            if let Some(kind) = current {
                spans.push(StyledSpan {
                    start,
                    len: end - start,
                    kind,
                    style: self.palette.style(kind),
                });
            }
            start = end;
        }
        spans
    }
}

fn paint(cells: &mut [Option<HighlightKind>], range: Range<usize>, kind: HighlightKind) {
    let end = range.end.min(cells.len());
    for cell in &mut cells[range.start.min(end)..end] {
        *cell = Some(kind);
    }
}

/// Finds the triple-quoted string touching this line, if any, and the state
/// it leaves behind.
fn match_multiline(
    line: &str,
    delimiter: &str,
    previous_state: LineState,
) -> Option<(Range<usize>, LineState)> {
    let (start, search_from) = match previous_state {
        LineState::InMultilineString => (0, 0),
        LineState::Normal => {
            let open = line.find(delimiter)?;
            (open, open + delimiter.len())
        }
    };

    match line[search_from..].find(delimiter) {
        Some(close) => Some((
            start..search_from + close + delimiter.len(),
            LineState::Normal,
        )),
        None => Some((start..line.len(), LineState::InMultilineString)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighter() -> Highlighter {
        Highlighter::new(EditorPalette::DARK_PLUS).unwrap()
    }

    fn spans_of(line: &str, state: LineState) -> Vec<(String, HighlightKind)> {
        highlighter()
            .highlight(line, state)
            .spans
            .iter()
            .map(|span| (span.text(line).to_string(), span.kind))
            .collect()
    }

    #[test]
    fn test_python_rules_compile() {
        let highlighter = highlighter();
        assert_eq!(highlighter.rules().len(), python_rules().len());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = Highlighter::with_rules(
            vec![("(unclosed", HighlightKind::Keyword)],
            EditorPalette::DARK_PLUS,
        );
        match result {
            Err(IdeError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("pattern should not compile"),
        }
    }

    #[test]
    fn test_empty_line_keeps_state() {
        let highlighter = highlighter();
        let normal = highlighter.highlight("", LineState::Normal);
        assert!(normal.spans.is_empty());
        assert_eq!(normal.next_state, LineState::Normal);

        let inside = highlighter.highlight("", LineState::InMultilineString);
        assert!(inside.spans.is_empty());
        assert_eq!(inside.next_state, LineState::InMultilineString);
    }

    #[test]
    fn test_class_name_captured() {
        let spans = spans_of("class Foo(Base):", LineState::Normal);
        assert_eq!(spans[0], ("class".to_string(), HighlightKind::Keyword));
        assert_eq!(spans[1], ("Foo".to_string(), HighlightKind::ClassName));
        assert!(spans.contains(&("(".to_string(), HighlightKind::Symbol)));
    }

    #[test]
    fn test_builtin_requires_call() {
        let call = spans_of("print (x)", LineState::Normal);
        assert_eq!(call[0], ("print".to_string(), HighlightKind::Builtin));

        let bare = spans_of("print", LineState::Normal);
        assert!(bare.is_empty());
    }

    #[test]
    fn test_later_rule_wins() {
        // "in" inside a string is repainted by the string rule.
        let spans = spans_of("x = 'in'", LineState::Normal);
        assert_eq!(spans, vec![("'in'".to_string(), HighlightKind::String)]);
    }

    #[test]
    fn test_decorator_and_number() {
        let spans = spans_of("@cache 42", LineState::Normal);
        assert_eq!(
            spans,
            vec![
                ("@cache".to_string(), HighlightKind::Decorator),
                ("42".to_string(), HighlightKind::Number),
            ]
        );
    }

    #[test]
    fn test_same_line_docstring_is_multiline_string() {
        let line = r#"    """one liner""""#;
        let result = highlighter().highlight(line, LineState::Normal);
        assert_eq!(result.next_state, LineState::Normal);
        assert_eq!(result.spans.len(), 1);
        assert_eq!(result.spans[0].start, 4);
        assert_eq!(result.spans[0].end(), line.len());
        assert_eq!(result.spans[0].kind, HighlightKind::MultilineString);
    }

    #[test]
    fn test_single_quote_delimiter() {
        let result = highlighter().highlight("x = '''open", LineState::Normal);
        assert_eq!(result.next_state, LineState::InMultilineString);
        assert_eq!(result.kind_at(4), Some(HighlightKind::MultilineString));
        assert_eq!(result.kind_at(10), Some(HighlightKind::MultilineString));
    }

    #[test]
    fn test_hash_inside_multiline_string() {
        let result = highlighter().highlight("# not a comment\"\"\" # real", LineState::InMultilineString);
        assert_eq!(result.next_state, LineState::Normal);
        assert_eq!(result.kind_at(0), Some(HighlightKind::MultilineString));
        assert_eq!(result.kind_at(19), Some(HighlightKind::Comment));
    }

    #[test]
    fn test_escaped_quote_keeps_string_open() {
        let line = r#"s = "a \" # b"  # c"#;
        let result = highlighter().highlight(line, LineState::Normal);
        let comment = result
            .spans
            .iter()
            .find(|span| span.kind == HighlightKind::Comment)
            .unwrap();
        assert_eq!(comment.text(line), "# c");
    }

    #[test]
    fn test_multibyte_text() {
        let line = "s = 'héllo' # ünïcode";
        let result = highlighter().highlight(line, LineState::Normal);
        let texts: Vec<&str> = result.spans.iter().map(|span| span.text(line)).collect();
        assert_eq!(texts, vec!["'héllo'", "# ünïcode"]);
    }
}
