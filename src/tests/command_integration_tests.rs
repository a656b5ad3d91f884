#[cfg(test)]
mod tests {
    use crate::app::IdeContext;
    use crate::config::AppConfig;
    use crate::handlers::{handle_key, KeyOutcome};
    use crate::models::{AnsiColor, AnsiRun, KeyInput};
    use crate::services::TerminalSession;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn create_test_session() -> (TerminalSession, Rc<RefCell<Vec<String>>>) {
        let context = IdeContext::new(AppConfig::default()).expect("Failed to build context");
        let mut session = context.new_terminal_session();
        let written = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&written);
        session.on_command(move |line| sink.borrow_mut().push(line.to_string()));
        (session, written)
    }

    fn type_text(session: &mut TerminalSession, text: &str) {
        for ch in text.chars() {
            handle_key(session, KeyInput::Char(ch));
        }
    }

    #[test]
    fn test_enter_submits_typed_command() {
        let (mut session, written) = create_test_session();
        type_text(&mut session, "echo hi");

        let outcome = handle_key(&mut session, KeyInput::Enter);
        assert_eq!(outcome, KeyOutcome::Submitted("echo hi".to_string()));
        assert_eq!(*written.borrow(), vec!["echo hi\n".to_string()]);
        assert_eq!(session.input().pending(), "");
    }

    #[test]
    fn test_enter_on_empty_line_is_ignored() {
        let (mut session, written) = create_test_session();
        assert_eq!(handle_key(&mut session, KeyInput::Enter), KeyOutcome::Ignored);
        assert!(written.borrow().is_empty());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_up_down_recall() {
        let (mut session, _) = create_test_session();
        for command in ["ls", "pwd"] {
            type_text(&mut session, command);
            handle_key(&mut session, KeyInput::Enter);
        }

        assert_eq!(
            handle_key(&mut session, KeyInput::Up),
            KeyOutcome::Recalled("pwd".to_string())
        );
        assert_eq!(
            handle_key(&mut session, KeyInput::Up),
            KeyOutcome::Recalled("ls".to_string())
        );
        assert_eq!(
            handle_key(&mut session, KeyInput::Up),
            KeyOutcome::Recalled("ls".to_string())
        );
        assert_eq!(
            handle_key(&mut session, KeyInput::Down),
            KeyOutcome::Recalled("pwd".to_string())
        );
        assert_eq!(session.input().pending(), "pwd");
    }

    #[test]
    fn test_up_with_no_history_is_ignored() {
        let (mut session, _) = create_test_session();
        type_text(&mut session, "draft");
        assert_eq!(handle_key(&mut session, KeyInput::Up), KeyOutcome::Ignored);
        assert_eq!(session.input().pending(), "draft");
    }

    #[test]
    fn test_recalled_command_can_be_edited_and_resubmitted() {
        let (mut session, written) = create_test_session();
        type_text(&mut session, "git stat");
        handle_key(&mut session, KeyInput::Enter);

        handle_key(&mut session, KeyInput::Up);
        type_text(&mut session, "us");
        handle_key(&mut session, KeyInput::Enter);

        assert_eq!(written.borrow().last().unwrap(), "git status\n");
        assert_eq!(session.history().commands(), vec!["git stat", "git status"]);
    }

    #[test]
    fn test_backspace_and_control_chars() {
        let (mut session, _) = create_test_session();
        assert_eq!(handle_key(&mut session, KeyInput::Backspace), KeyOutcome::Ignored);
        type_text(&mut session, "lsx");
        assert_eq!(handle_key(&mut session, KeyInput::Backspace), KeyOutcome::Edited);
        assert_eq!(handle_key(&mut session, KeyInput::Char('\u{7}')), KeyOutcome::Ignored);
        assert_eq!(
            handle_key(&mut session, KeyInput::Text(" -l\t".to_string())),
            KeyOutcome::Edited
        );
        assert_eq!(session.input().pending(), "ls -l");
    }

    #[test]
    fn test_clear_and_interrupt_notify_handlers() {
        let (mut session, _) = create_test_session();
        let events = Rc::new(RefCell::new(Vec::new()));
        let on_clear = Rc::clone(&events);
        let on_interrupt = Rc::clone(&events);
        session.on_clear(move || on_clear.borrow_mut().push("clear"));
        session.on_interrupt(move || on_interrupt.borrow_mut().push("interrupt"));

        assert_eq!(handle_key(&mut session, KeyInput::ClearScreen), KeyOutcome::Cleared);
        assert_eq!(handle_key(&mut session, KeyInput::Interrupt), KeyOutcome::Interrupted);
        assert_eq!(*events.borrow(), vec!["clear", "interrupt"]);
    }

    #[test]
    fn test_output_and_input_are_independent() {
        let (mut session, _) = create_test_session();
        type_text(&mut session, "make");
        let runs = session.receive_output("\x1b[33mbuilding\x1b[0m...");
        assert_eq!(
            runs,
            vec![
                AnsiRun::new("building", Some(AnsiColor::Yellow)),
                AnsiRun::plain("..."),
            ]
        );
        assert_eq!(session.input().pending(), "make");
    }
}
