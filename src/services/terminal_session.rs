use crate::models::{AnsiRun, HistoryDirection};
use crate::services::console::ConsoleInput;
use crate::services::history::CommandHistory;
use crate::terminal::AnsiParser;

pub type OutputCallback = Box<dyn FnMut(&[AnsiRun])>;
pub type CommandCallback = Box<dyn FnMut(&str)>;
pub type SignalCallback = Box<dyn FnMut()>;

/// One embedded terminal: decodes what the child process prints and manages
/// what the user types.
///
/// The session never touches the child process itself. Whoever owns the
/// process registers callbacks: `on_command` receives each submitted line
/// (newline included) to write to the process, `on_output` receives decoded
/// output runs for display.
pub struct TerminalSession {
    parser: AnsiParser,
    input: ConsoleInput,
    output_handlers: Vec<OutputCallback>,
    command_handlers: Vec<CommandCallback>,
    clear_handlers: Vec<SignalCallback>,
    interrupt_handlers: Vec<SignalCallback>,
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new(AnsiParser::new(), CommandHistory::new())
    }
}

impl TerminalSession {
    pub fn new(parser: AnsiParser, history: CommandHistory) -> Self {
        Self {
            parser,
            input: ConsoleInput::new(history),
            output_handlers: Vec::new(),
            command_handlers: Vec::new(),
            clear_handlers: Vec::new(),
            interrupt_handlers: Vec::new(),
        }
    }

    pub fn on_output(&mut self, handler: impl FnMut(&[AnsiRun]) + 'static) {
        self.output_handlers.push(Box::new(handler));
    }

    pub fn on_command(&mut self, handler: impl FnMut(&str) + 'static) {
        self.command_handlers.push(Box::new(handler));
    }

    pub fn on_clear(&mut self, handler: impl FnMut() + 'static) {
        self.clear_handlers.push(Box::new(handler));
    }

    pub fn on_interrupt(&mut self, handler: impl FnMut() + 'static) {
        self.interrupt_handlers.push(Box::new(handler));
    }

    pub fn input(&self) -> &ConsoleInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut ConsoleInput {
        &mut self.input
    }

    pub fn history(&self) -> &CommandHistory {
        self.input.history()
    }

    /// Decodes a chunk read from the process and hands the runs to every
    /// output handler.
    pub fn receive_output(&mut self, chunk: &str) -> Vec<AnsiRun> {
        let runs = self.parser.feed(chunk);
        self.dispatch_output(&runs);
        runs
    }

    /// Same as [`TerminalSession::receive_output`] for undecoded pipe reads.
    pub fn receive_output_bytes(&mut self, chunk: &[u8]) -> Vec<AnsiRun> {
        let runs = self.parser.feed_bytes(chunk);
        self.dispatch_output(&runs);
        runs
    }

    /// Flushes a partial escape sequence left over when the process output
    /// ends.
    pub fn flush_output(&mut self) -> Vec<AnsiRun> {
        let runs = self.parser.finish();
        self.dispatch_output(&runs);
        runs
    }

    /// Commits the pending line. Returns the command without its newline.
    pub fn submit_input(&mut self) -> Option<String> {
        let command = self.input.submit()?;
        let line = format!("{command}\n");
        log::info!("Submitting terminal command: {}", command);
        for handler in &mut self.command_handlers {
            handler(&line);
        }
        Some(command)
    }

    pub fn recall(&mut self, direction: HistoryDirection) -> Option<String> {
        self.input.recall(direction).map(str::to_string)
    }

    pub fn clear_screen(&mut self) {
        log::debug!("Clearing terminal display");
        for handler in &mut self.clear_handlers {
            handler();
        }
    }

    pub fn interrupt(&mut self) {
        log::info!("Interrupt requested for terminal process");
        for handler in &mut self.interrupt_handlers {
            handler();
        }
    }

    fn dispatch_output(&mut self, runs: &[AnsiRun]) {
        if runs.is_empty() {
            return;
        }
        for handler in &mut self.output_handlers {
            handler(runs);
        }
    }
}
