//! # Terminal Module
//!
//! Interprets the output of the embedded terminal's child process: SGR colour
//! escapes (`ESC [ <codes> m`) become colour changes, everything else is kept
//! as text.
//!
//! Parsing is lenient. A sequence that is not a well-formed SGR sequence is
//! passed through as literal text, introducer included, so no input can make
//! the parser fail.
//!
//! ```rust
//! use kingdom_ide_core::models::{AnsiColor, AnsiRun};
//! use kingdom_ide_core::terminal::parse;
//!
//! let runs = parse("\x1b[31mHello\x1b[0m World");
//! assert_eq!(runs, vec![
//!     AnsiRun::new("Hello", Some(AnsiColor::Red)),
//!     AnsiRun::plain(" World"),
//! ]);
//! ```

use crate::models::{AnsiColor, AnsiRun};

const ESC: char = '\u{1b}';
const CSI_INTRODUCER: &str = "\u{1b}[";

/// Longest parameter list accepted before a sequence is given up on.
const MAX_SEQUENCE_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnsiState {
    /// Plain text
    Normal,
    /// ESC seen, waiting for `[`
    Escape,
    /// Inside `ESC [`, accumulating parameters
    CsiSequence,
}

/// Accumulates text under the active colour and cuts a new run whenever the
/// colour actually changes.
struct RunBuilder {
    runs: Vec<AnsiRun>,
    text: String,
    color: Option<AnsiColor>,
}

impl RunBuilder {
    fn new(color: Option<AnsiColor>) -> Self {
        Self {
            runs: Vec::new(),
            text: String::new(),
            color,
        }
    }

    fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn set_color(&mut self, color: Option<AnsiColor>) {
        if color != self.color {
            self.cut();
            self.color = color;
        }
    }

    fn cut(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        match self.runs.last_mut() {
            Some(last) if last.foreground == self.color => last.text.push_str(&text),
            _ => self.runs.push(AnsiRun::new(text, self.color)),
        }
    }

    fn finish(mut self) -> (Vec<AnsiRun>, Option<AnsiColor>) {
        self.cut();
        (self.runs, self.color)
    }
}

/// Incremental SGR interpreter for one terminal.
///
/// The active colour survives between [`AnsiParser::feed`] calls. With
/// carry-over enabled (the default), an escape sequence cut off at the end of
/// a chunk is held back and completed by the next chunk.
#[derive(Debug, Clone)]
pub struct AnsiParser {
    state: AnsiState,
    sequence_buffer: String,
    current_color: Option<AnsiColor>,
    carry_partial_escapes: bool,
    /// Trailing bytes of a UTF-8 character cut off by the last read
    utf8_buffer: Vec<u8>,
}

impl Default for AnsiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiParser {
    pub fn new() -> Self {
        Self::with_carry_over(true)
    }

    pub fn with_carry_over(carry_partial_escapes: bool) -> Self {
        Self {
            state: AnsiState::Normal,
            sequence_buffer: String::new(),
            current_color: None,
            carry_partial_escapes,
            utf8_buffer: Vec::new(),
        }
    }

    pub fn current_color(&self) -> Option<AnsiColor> {
        self.current_color
    }

    /// True while an incomplete escape sequence is being held back.
    pub fn has_pending_escape(&self) -> bool {
        self.state != AnsiState::Normal
    }

    /// Forgets the active colour and any held-back sequence.
    pub fn reset(&mut self) {
        self.state = AnsiState::Normal;
        self.sequence_buffer.clear();
        self.current_color = None;
        self.utf8_buffer.clear();
    }

    /// Interprets one chunk of already decoded process output. Raw pipe
    /// reads should go through [`AnsiParser::feed_bytes`] instead.
    pub fn feed(&mut self, chunk: &str) -> Vec<AnsiRun> {
        let mut out = RunBuilder::new(self.current_color);
        for ch in chunk.chars() {
            self.process_char(ch, &mut out);
        }
        if !self.carry_partial_escapes {
            self.flush_partial(&mut out);
        } else if self.has_pending_escape() {
            log::trace!("Holding back partial escape sequence across chunk boundary");
        }
        let (runs, color) = out.finish();
        self.current_color = color;
        runs
    }

    /// Interprets one raw read from the process pipe.
    ///
    /// A UTF-8 character split across reads is held back until its remaining
    /// bytes arrive. Invalid bytes decode to U+FFFD.
    pub fn feed_bytes(&mut self, chunk: &[u8]) -> Vec<AnsiRun> {
        self.utf8_buffer.extend_from_slice(chunk);
        let mut decoded = String::with_capacity(self.utf8_buffer.len());
        let mut rest = 0;
        loop {
            match std::str::from_utf8(&self.utf8_buffer[rest..]) {
                Ok(valid) => {
                    decoded.push_str(valid);
                    rest = self.utf8_buffer.len();
                    break;
                }
                Err(e) => {
                    let valid_end = rest + e.valid_up_to();
                    if let Ok(valid) = std::str::from_utf8(&self.utf8_buffer[rest..valid_end]) {
                        decoded.push_str(valid);
                    }
                    match e.error_len() {
                        Some(len) => {
                            decoded.push(char::REPLACEMENT_CHARACTER);
                            rest = valid_end + len;
                        }
                        None => {
                            rest = valid_end;
                            break;
                        }
                    }
                }
            }
        }
        self.utf8_buffer.drain(..rest);
        self.feed(&decoded)
    }

    /// Emits a held-back partial sequence as literal text. Call when the
    /// output stream ends.
    pub fn finish(&mut self) -> Vec<AnsiRun> {
        let mut out = RunBuilder::new(self.current_color);
        if !self.utf8_buffer.is_empty() {
            self.utf8_buffer.clear();
            self.flush_partial(&mut out);
            out.push(char::REPLACEMENT_CHARACTER);
        }
        self.flush_partial(&mut out);
        let (runs, color) = out.finish();
        self.current_color = color;
        runs
    }

    fn process_char(&mut self, ch: char, out: &mut RunBuilder) {
        match self.state {
            AnsiState::Normal => {
                if ch == ESC {
                    self.state = AnsiState::Escape;
                } else {
                    out.push(ch);
                }
            }
            AnsiState::Escape => {
                if ch == '[' {
                    self.state = AnsiState::CsiSequence;
                    self.sequence_buffer.clear();
                } else {
                    self.state = AnsiState::Normal;
                    out.push(ESC);
                    self.process_char(ch, out);
                }
            }
            AnsiState::CsiSequence => {
                if ch == 'm' {
                    self.state = AnsiState::Normal;
                    let params = std::mem::take(&mut self.sequence_buffer);
                    out.set_color(resolve_sgr(&params));
                } else if (ch.is_ascii_digit() || ch == ';')
                    && self.sequence_buffer.len() < MAX_SEQUENCE_LEN
                {
                    self.sequence_buffer.push(ch);
                } else {
                    self.abort_sequence(out);
                    self.process_char(ch, out);
                }
            }
        }
    }

    /// Gives up on the current sequence and writes it out verbatim.
    fn abort_sequence(&mut self, out: &mut RunBuilder) {
        log::trace!(
            "Passing through malformed escape sequence {:?}",
            self.sequence_buffer
        );
        self.state = AnsiState::Normal;
        out.push_str(CSI_INTRODUCER);
        out.push_str(&std::mem::take(&mut self.sequence_buffer));
    }

    fn flush_partial(&mut self, out: &mut RunBuilder) {
        match self.state {
            AnsiState::Normal => {}
            AnsiState::Escape => {
                self.state = AnsiState::Normal;
                out.push(ESC);
            }
            AnsiState::CsiSequence => self.abort_sequence(out),
        }
    }
}

/// Resolves a complete SGR parameter list to the resulting foreground.
///
/// Codes apply left to right and each one either sets a colour (30-37) or
/// resets, so only the last code decides the outcome. An empty list is a
/// reset.
fn resolve_sgr(params: &str) -> Option<AnsiColor> {
    params
        .rsplit(';')
        .next()
        .and_then(|code| code.parse::<u32>().ok())
        .and_then(AnsiColor::from_sgr)
}

/// Interprets a self-contained chunk. Partial sequences at the end are
/// treated as text.
pub fn parse(chunk: &str) -> Vec<AnsiRun> {
    AnsiParser::with_carry_over(false).feed(chunk)
}

/// Removes every CSI sequence (any final byte) from `input`.
pub fn strip_ansi_codes(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC && chars.peek() == Some(&'[') {
            chars.next();
            while let Some(next_ch) = chars.next() {
                if next_ch.is_ascii_alphabetic() || next_ch == '~' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Concatenated text of `runs`, colours dropped.
pub fn runs_to_plain_text(runs: &[AnsiRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}
