pub mod console;
pub mod document;
pub mod history;
pub mod terminal_session;

pub use console::*;
pub use document::*;
pub use history::*;
pub use terminal_session::*;
