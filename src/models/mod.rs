pub mod ansi;
pub mod style;
pub mod terminal;

pub use ansi::*;
pub use style::*;
pub use terminal::*;
