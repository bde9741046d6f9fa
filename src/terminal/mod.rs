pub mod backend;
pub mod input_event;

pub use backend::Terminal;
pub use input_event::{
    CursorPos, KeyCode, KeyEvent, KeyModifiers, MouseClick, TerminalEvent, TerminalSize,
};
