pub mod errors;

use crate::models::{HistoryDirection, KeyInput};
use crate::services::TerminalSession;

/// What a key press did to the terminal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A command was sent to the process.
    Submitted(String),
    /// The pending line was replaced from history.
    Recalled(String),
    /// The pending line changed.
    Edited,
    Cleared,
    Interrupted,
    /// Nothing happened (empty Enter, Backspace at column 0, empty history).
    Ignored,
}

// Terminal key handling

pub fn handle_key(session: &mut TerminalSession, key: KeyInput) -> KeyOutcome {
    log::debug!("Terminal key: {:?}", key);
    match key {
        KeyInput::Enter => session
            .submit_input()
            .map_or(KeyOutcome::Ignored, KeyOutcome::Submitted),
        KeyInput::Up => recall(session, HistoryDirection::Older),
        KeyInput::Down => recall(session, HistoryDirection::Newer),
        KeyInput::Backspace => {
            if session.input_mut().backspace() {
                KeyOutcome::Edited
            } else {
                KeyOutcome::Ignored
            }
        }
        KeyInput::Char(ch) if ch.is_control() => KeyOutcome::Ignored,
        KeyInput::Char(ch) => {
            session.input_mut().insert_char(ch);
            KeyOutcome::Edited
        }
        KeyInput::Text(text) => {
            let printable: String = text.chars().filter(|ch| !ch.is_control()).collect();
            if printable.is_empty() {
                return KeyOutcome::Ignored;
            }
            session.input_mut().insert_str(&printable);
            KeyOutcome::Edited
        }
        KeyInput::ClearScreen => {
            session.clear_screen();
            KeyOutcome::Cleared
        }
        KeyInput::Interrupt => {
            session.interrupt();
            KeyOutcome::Interrupted
        }
    }
}

fn recall(session: &mut TerminalSession, direction: HistoryDirection) -> KeyOutcome {
    session
        .recall(direction)
        .map_or(KeyOutcome::Ignored, KeyOutcome::Recalled)
}
