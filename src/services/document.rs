use std::ops::Range;
use std::sync::Arc;

use crate::handlers::errors::{IdeError, IdeResult};
use crate::highlighter::Highlighter;
use crate::models::{LineHighlight, LineState};

/// Lines of an open source file together with their highlighting.
///
/// Line `i` is highlighted with the state carried out of line `i - 1`
/// (line 0 starts `Normal`). After an edit, lines are re-highlighted from the
/// edited line downwards until a line's carry-out state matches what was
/// cached for it, at which point nothing further down can change.
pub struct HighlightedDocument {
    highlighter: Arc<Highlighter>,
    lines: Vec<String>,
    highlights: Vec<LineHighlight>,
}

impl HighlightedDocument {
    pub fn new(highlighter: Arc<Highlighter>) -> Self {
        Self::from_text(highlighter, "")
    }

    pub fn from_text(highlighter: Arc<Highlighter>, text: &str) -> Self {
        let mut document = Self {
            highlighter,
            lines: Vec::new(),
            highlights: Vec::new(),
        };
        document.set_text(text);
        document
    }

    /// Replaces the whole content. `\n` and `\r\n` both end a line; a
    /// document always has at least one (possibly empty) line.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        self.highlights = vec![LineHighlight::default(); self.lines.len()];
        self.rehighlight_from(0, self.lines.len());
        log::debug!("Highlighted document of {} lines", self.lines.len());
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_highlight(&self, index: usize) -> Option<&LineHighlight> {
        self.highlights.get(index)
    }

    /// State entering line `index`.
    pub fn state_before(&self, index: usize) -> LineState {
        index
            .checked_sub(1)
            .and_then(|prev| self.highlights.get(prev))
            .map(|highlight| highlight.next_state)
            .unwrap_or_default()
    }

    /// State leaving line `index`.
    pub fn state_after(&self, index: usize) -> Option<LineState> {
        self.highlights.get(index).map(|highlight| highlight.next_state)
    }

    /// Carry-out state of every line, in order.
    pub fn states(&self) -> Vec<LineState> {
        self.highlights
            .iter()
            .map(|highlight| highlight.next_state)
            .collect()
    }

    /// Replaces one line. Returns the lines whose highlighting was redone.
    pub fn replace_line(&mut self, index: usize, text: &str) -> IdeResult<Range<usize>> {
        if index >= self.lines.len() {
            return Err(IdeError::line_out_of_range(index, self.lines.len()));
        }
        self.lines[index] = text.to_string();
        Ok(self.rehighlight_from(index, index + 1))
    }

    /// Inserts a line before `index` (`index == line_count()` appends).
    pub fn insert_line(&mut self, index: usize, text: &str) -> IdeResult<Range<usize>> {
        if index > self.lines.len() {
            return Err(IdeError::line_out_of_range(index, self.lines.len()));
        }
        // The placeholder passes the old carry-in straight through, so the
        // walk below continues only if the new line changes it.
        let placeholder = LineHighlight {
            spans: Vec::new(),
            next_state: self.state_before(index),
        };
        self.lines.insert(index, text.to_string());
        self.highlights.insert(index, placeholder);
        Ok(self.rehighlight_from(index, index + 1))
    }

    /// Removes a line. Removing the only line leaves one empty line.
    pub fn remove_line(&mut self, index: usize) -> IdeResult<Range<usize>> {
        if index >= self.lines.len() {
            return Err(IdeError::line_out_of_range(index, self.lines.len()));
        }
        if self.lines.len() == 1 {
            return self.replace_line(0, "");
        }
        self.lines.remove(index);
        self.highlights.remove(index);
        if index == self.lines.len() {
            return Ok(index..index);
        }
        Ok(self.rehighlight_from(index, index + 1))
    }

    /// Re-highlights `start..` and always at least `start..forced_end`.
    fn rehighlight_from(&mut self, start: usize, forced_end: usize) -> Range<usize> {
        let mut state = self.state_before(start);
        for index in start..self.lines.len() {
            let highlight = self.highlighter.highlight(&self.lines[index], state);
            let unchanged = highlight.next_state == self.highlights[index].next_state;
            state = highlight.next_state;
            self.highlights[index] = highlight;
            if index + 1 >= forced_end && unchanged {
                return start..index + 1;
            }
        }
        start..self.lines.len()
    }
}
