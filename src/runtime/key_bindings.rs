use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Front-end commands that bypass the widget entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Command>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent) -> Option<Command> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Command::Exit);
        self.bind(KeyBinding::key(KeyCode::Esc), Command::Exit);
        self.bind(KeyBinding::key(KeyCode::Enter), Command::Submit);
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, KeyBinding, KeyBindings};
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn defaults_cover_exit_and_submit() {
        let bindings = KeyBindings::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(bindings.resolve(ctrl_c), Some(Command::Exit));
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::Enter)),
            Some(Command::Submit)
        );
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Char('c'))), None);
    }

    #[test]
    fn unbind_releases_key_to_widget() {
        let mut bindings = KeyBindings::new();
        bindings.unbind(&KeyBinding::key(KeyCode::Esc));
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Esc)), None);
    }
}
