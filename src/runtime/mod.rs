pub mod debounce;
pub mod key_bindings;
pub mod runner;

pub use debounce::{DebounceEdge, Debouncer};
pub use key_bindings::{Command, KeyBinding, KeyBindings};
pub use runner::{RunOutcome, Runtime, Session};
