use std::collections::VecDeque;

use crate::models::{HistoryDirection, HistoryEntry};

/// Submitted terminal commands plus a recall cursor.
///
/// The cursor ranges over `[0, len]`; `len` means "past the newest entry",
/// which is where every submission leaves it. Recall clamps at both ends.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: VecDeque<HistoryEntry>,
    cursor: usize,
    /// Maximum number of entries kept, 0 for no limit.
    limit: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Records a command. Empty commands are ignored and leave the cursor
    /// where it was.
    pub fn submit(&mut self, command: &str) -> bool {
        if command.is_empty() {
            return false;
        }
        self.entries.push_back(HistoryEntry::new(command));
        if self.limit > 0 {
            while self.entries.len() > self.limit {
                self.entries.pop_front();
            }
        }
        self.cursor = self.entries.len();
        log::debug!("History now holds {} commands", self.entries.len());
        true
    }

    /// Moves the cursor one step and returns the command under it. Does
    /// nothing on an empty history.
    pub fn navigate(&mut self, direction: HistoryDirection) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        let target = self.cursor as isize + direction.step();
        self.cursor = target.clamp(0, last as isize) as usize;
        self.entries
            .get(self.cursor)
            .map(|entry| entry.command.as_str())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn commands(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.command.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
