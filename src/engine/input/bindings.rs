// Key binding table

use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Maps keys to commands
///
/// A key drives at most one command; a command may have several keys.
#[derive(Debug, Clone)]
pub struct KeyBindings<A> {
    /// Mapping from keys to commands
    bindings: HashMap<KeyCode, A>,
}

impl<A> Default for KeyBindings<A> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<A: Copy> KeyBindings<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from a list of bindings; later entries win
    pub fn from_bindings(bindings: impl IntoIterator<Item = (KeyCode, A)>) -> Self {
        let mut table = Self::new();
        for (key, command) in bindings {
            table.bind(key, command);
        }
        table
    }

    /// Bind a key to a command. Returns what the key did before.
    pub fn bind(&mut self, key: KeyCode, command: A) -> Option<A> {
        self.bindings.insert(key, command)
    }

    /// Get the command bound to a key
    pub fn command(&self, key: KeyCode) -> Option<A> {
        self.bindings.get(&key).copied()
    }

    /// Every binding, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, A)> + '_ {
        self.bindings.iter().map(|(key, command)| (*key, *command))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Cmd {
        Punch,
        Kick,
    }

    #[test]
    fn test_bind_and_lookup() {
        let mut table = KeyBindings::new();
        assert!(table.is_empty());
        assert_eq!(table.bind(KeyCode::KeyP, Cmd::Punch), None);

        assert_eq!(table.command(KeyCode::KeyP), Some(Cmd::Punch));
        assert_eq!(table.command(KeyCode::KeyK), None);
    }

    #[test]
    fn test_rebind_key() {
        let mut table = KeyBindings::new();
        table.bind(KeyCode::KeyP, Cmd::Punch);
        let previous = table.bind(KeyCode::KeyP, Cmd::Kick);

        assert_eq!(previous, Some(Cmd::Punch));
        assert_eq!(table.command(KeyCode::KeyP), Some(Cmd::Kick));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_several_keys_per_command() {
        let table = KeyBindings::from_bindings([
            (KeyCode::KeyP, Cmd::Punch),
            (KeyCode::Numpad1, Cmd::Punch),
            (KeyCode::KeyK, Cmd::Kick),
        ]);

        let punch_keys: Vec<KeyCode> = table
            .iter()
            .filter(|(_, command)| *command == Cmd::Punch)
            .map(|(key, _)| key)
            .collect();
        assert_eq!(punch_keys.len(), 2);
        assert!(punch_keys.contains(&KeyCode::KeyP));
        assert!(punch_keys.contains(&KeyCode::Numpad1));
    }

    #[test]
    fn test_later_binding_wins() {
        let table = KeyBindings::from_bindings([
            (KeyCode::KeyP, Cmd::Punch),
            (KeyCode::KeyP, Cmd::Kick),
        ]);

        assert_eq!(table.command(KeyCode::KeyP), Some(Cmd::Kick));
        assert_eq!(table.len(), 1);
    }
}
