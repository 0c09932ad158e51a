pub mod line_reader;
pub mod render;
pub mod terminal;
pub mod traits;

pub use line_reader::LineReader;
pub use terminal::TerminalInterface;
pub use traits::{is_affirmative, Interface};
