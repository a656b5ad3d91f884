use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submitted terminal command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub command: String,
    pub submitted_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            submitted_at: Utc::now(),
        }
    }
}

/// Direction of a history recall. `Older` is the Up key, `Newer` is Down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HistoryDirection {
    Older,
    Newer,
}

impl HistoryDirection {
    pub fn step(self) -> isize {
        match self {
            HistoryDirection::Older => -1,
            HistoryDirection::Newer => 1,
        }
    }
}

impl TryFrom<i32> for HistoryDirection {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(HistoryDirection::Older),
            1 => Ok(HistoryDirection::Newer),
            other => Err(other),
        }
    }
}

/// Key events delivered by the terminal input widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyInput {
    Char(char),
    Text(String),
    Backspace,
    Enter,
    Up,
    Down,
    /// Ctrl+L
    ClearScreen,
    /// Ctrl+C
    Interrupt,
}
