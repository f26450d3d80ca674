//! Keyboard bindings for the terminal preview.

use crate::model::{Key, KeyAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to preview actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers take part in the lookup; press/repeat kind
    /// and keyboard state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Direct page jumps
        for digit in 1..=9u8 {
            bindings.insert(
                KeyEvent::new(KeyCode::Char(char::from(b'0' + digit)), KeyModifiers::NONE),
                KeyAction::Site(Key::Digit(digit)),
            );
        }

        // Page stepping
        bindings.insert(
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            KeyAction::Site(Key::ArrowDown),
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            KeyAction::Site(Key::ArrowUp),
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyAction::Site(Key::Escape),
        );

        // Controls the site exposes as clickable elements
        bindings.insert(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            KeyAction::OpenDetail,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            KeyAction::CloseDetail,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE),
            KeyAction::BackToHero,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE),
            KeyAction::ToggleLanguage,
        );

        // Application controls
        bindings.insert(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    #[test]
    fn digits_map_to_site_digit_keys() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE);

        assert_eq!(bindings.get(key_event), Some(KeyAction::Site(Key::Digit(3))));
    }

    #[test]
    fn zero_is_unbound() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new(KeyCode::Char('0'), KeyModifiers::NONE);

        assert_eq!(bindings.get(key_event), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(bindings.get(key_event), Some(KeyAction::Quit));
    }

    #[test]
    fn repeat_events_use_the_same_binding() {
        let bindings = KeyBindings::default();
        let key_event =
            KeyEvent::new_with_kind(KeyCode::Down, KeyModifiers::NONE, KeyEventKind::Repeat);

        assert_eq!(
            bindings.get(key_event),
            Some(KeyAction::Site(Key::ArrowDown))
        );
    }
}
