//! Keybinding service: key chord to command mapping.

use crate::core::event::Key;
use crate::core::Command;
use crossterm::event::KeyCode;
use rustc_hash::FxHashMap;

pub struct KeybindingService {
    bindings: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn empty() -> Self {
        Self {
            bindings: FxHashMap::default(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut bindings = FxHashMap::default();

        // file
        bindings.insert(Key::ctrl(KeyCode::Char('o')), Command::Open);
        bindings.insert(Key::ctrl(KeyCode::Char('s')), Command::Save);

        // edit
        bindings.insert(Key::ctrl(KeyCode::Char('f')), Command::Find);
        bindings.insert(Key::ctrl(KeyCode::Char('h')), Command::ReplaceAll);
        bindings.insert(Key::ctrl(KeyCode::Char('a')), Command::SelectAll);
        bindings.insert(Key::ctrl(KeyCode::Char('c')), Command::Copy);

        // media
        bindings.insert(Key::ctrl(KeyCode::Char('g')), Command::InsertImage);

        // system
        bindings.insert(Key::ctrl(KeyCode::Char('q')), Command::Quit);

        Self { bindings }
    }

    pub fn get(&self, key: &Key) -> Option<&Command> {
        self.bindings.get(key)
    }

    pub fn bind(&mut self, key: Key, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &Key) -> Option<Command> {
        self.bindings.remove(key)
    }

    pub fn keys_for_command(&self, command: &Command) -> Vec<Key> {
        self.bindings
            .iter()
            .filter(|(_, cmd)| *cmd == command)
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn is_bound(&self, key: &Key) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}
