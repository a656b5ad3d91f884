#[cfg(test)]
mod tests {
    use crate::models::HistoryDirection;
    use crate::services::CommandHistory;

    fn history_of(commands: &[&str]) -> CommandHistory {
        let mut history = CommandHistory::new();
        for command in commands {
            history.submit(command);
        }
        history
    }

    #[test]
    fn test_walk_back_and_clamp() {
        let mut history = history_of(&["ls", "pwd"]);
        assert_eq!(history.cursor(), 2);

        assert_eq!(history.navigate(HistoryDirection::Older), Some("pwd"));
        assert_eq!(history.cursor(), 1);

        assert_eq!(history.navigate(HistoryDirection::Older), Some("ls"));
        assert_eq!(history.cursor(), 0);

        assert_eq!(history.navigate(HistoryDirection::Older), Some("ls"));
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_walk_forward_clamps_at_newest() {
        let mut history = history_of(&["ls", "pwd"]);
        assert_eq!(history.navigate(HistoryDirection::Newer), Some("pwd"));
        assert_eq!(history.cursor(), 1);

        history.navigate(HistoryDirection::Older);
        assert_eq!(history.navigate(HistoryDirection::Newer), Some("pwd"));
        assert_eq!(history.navigate(HistoryDirection::Newer), Some("pwd"));
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_direction_from_step() {
        assert_eq!(HistoryDirection::try_from(-1), Ok(HistoryDirection::Older));
        assert_eq!(HistoryDirection::try_from(1), Ok(HistoryDirection::Newer));
        assert_eq!(HistoryDirection::try_from(0), Err(0));
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let history = history_of(&["a", "", "b", "c"]);
        assert_eq!(history.commands(), vec!["a", "b", "c"]);
        let times: Vec<_> = history.entries().map(|entry| entry.submitted_at).collect();
        assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_clear() {
        let mut history = history_of(&["a"]);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.navigate(HistoryDirection::Older), None);
    }
}
