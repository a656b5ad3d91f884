use crate::models::HistoryDirection;
use crate::services::history::CommandHistory;

/// The terminal's pending input line and the history it feeds.
#[derive(Debug, Clone, Default)]
pub struct ConsoleInput {
    pending: String,
    history: CommandHistory,
}

impl ConsoleInput {
    pub fn new(history: CommandHistory) -> Self {
        Self {
            pending: String::new(),
            history,
        }
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn insert_char(&mut self, ch: char) {
        self.pending.push(ch);
    }

    pub fn insert_str(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Deletes the last character. Returns false at column 0.
    pub fn backspace(&mut self) -> bool {
        self.pending.pop().is_some()
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Commits the pending line to history and hands it back. An empty line
    /// is not a command.
    pub fn submit(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let command = std::mem::take(&mut self.pending);
        self.history.submit(&command);
        Some(command)
    }

    /// Replaces the pending line with the recalled command.
    pub fn recall(&mut self, direction: HistoryDirection) -> Option<&str> {
        let command = self.history.navigate(direction)?.to_string();
        self.pending = command;
        Some(&self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut input = ConsoleInput::default();
        input.insert_str("lsx");
        assert!(input.backspace());
        assert_eq!(input.pending(), "ls");
        input.clear_pending();
        assert!(!input.backspace());
    }

    #[test]
    fn test_submit_clears_pending() {
        let mut input = ConsoleInput::default();
        assert_eq!(input.submit(), None);
        input.insert_str("pwd");
        assert_eq!(input.submit().as_deref(), Some("pwd"));
        assert_eq!(input.pending(), "");
        assert_eq!(input.history().commands(), vec!["pwd"]);
    }

    #[test]
    fn test_recall_replaces_pending() {
        let mut input = ConsoleInput::default();
        input.insert_str("ls");
        input.submit();
        input.insert_str("half typed");
        assert_eq!(input.recall(HistoryDirection::Older), Some("ls"));
        assert_eq!(input.pending(), "ls");
    }
}
