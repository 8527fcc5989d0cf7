//! Key bindings with attached help text.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// Help metadata for a binding: the key label and what it does.
#[derive(Debug, Clone, Default)]
pub struct Help {
    /// Short key label, e.g. `"space"`.
    pub key: String,
    /// One-line description, e.g. `"play/pause"`.
    pub desc: String,
}

/// A set of keys bound to one action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The key codes that trigger this binding.
    pub keys: Vec<KeyCode>,
    /// Help entry shown for this binding.
    pub help: Help,
    /// A disabled binding never matches and is hidden from help.
    pub disabled: bool,
}

impl Binding {
    /// Creates a binding for the given keys.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: Help::default(),
            disabled: false,
        }
    }

    /// Attaches help text to the binding.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether the key message triggers this binding.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        !self.disabled && self.keys.contains(&key_msg.key)
    }
}

/// Implemented by component keymaps so help views can enumerate bindings.
pub trait KeyMap {
    /// Bindings for the single-line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// Binding columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_binding_matches_any_of_its_keys() {
        let binding = Binding::new(vec![KeyCode::Char(' '), KeyCode::Char('p')]);
        assert!(binding.matches(&press(KeyCode::Char(' '))));
        assert!(binding.matches(&press(KeyCode::Char('p'))));
        assert!(!binding.matches(&press(KeyCode::Char('q'))));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut binding = Binding::new(vec![KeyCode::Enter]);
        binding.set_enabled(false);
        assert!(!binding.matches(&press(KeyCode::Enter)));
    }

    #[test]
    fn test_with_help() {
        let binding = Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset");
        assert_eq!(binding.help.key, "r");
        assert_eq!(binding.help.desc, "reset");
    }
}
