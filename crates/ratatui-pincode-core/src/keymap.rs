use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// Editing/focus keys understood by [`crate::pin_input::PinInput`].
///
/// Printable characters are always treated as text; these bindings only cover the command keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinBindings {
    pub delete_last: Vec<KeyEvent>,
    pub clear: Vec<KeyEvent>,
    pub blur: Vec<KeyEvent>,
}

impl Default for PinBindings {
    fn default() -> Self {
        Self {
            delete_last: vec![KeyEvent::new(KeyCode::Backspace)],
            clear: vec![key_ctrl('u')],
            blur: vec![KeyEvent::new(KeyCode::Esc)],
        }
    }
}

impl PinBindings {
    pub fn is_delete_last(&self, key: &KeyEvent) -> bool {
        matches_any(&self.delete_last, key)
    }

    pub fn is_clear(&self, key: &KeyEvent) -> bool {
        matches_any(&self.clear, key)
    }

    pub fn is_blur(&self, key: &KeyEvent) -> bool {
        matches_any(&self.blur, key)
    }
}

fn matches_any(patterns: &[KeyEvent], key: &KeyEvent) -> bool {
    patterns.iter().any(|p| key_event_matches(p, key))
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && pattern.modifiers == event.modifiers
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_match_exact_modifiers() {
        let b = PinBindings::default();
        assert!(b.is_clear(&key_ctrl('u')));
        assert!(!b.is_clear(&key_char('u')));
        assert!(b.is_delete_last(&KeyEvent::new(KeyCode::Backspace)));
        assert!(!b.is_delete_last(
            &KeyEvent::new(KeyCode::Backspace).with_modifiers(KeyModifiers::ctrl())
        ));
    }
}
