// Unitype Pressed Key State
// Keys held on the virtual device, in press order

use crate::{Action, Key};

/// Keys currently held down on the output device.
///
/// Keeps press order so that held keys can be released last-pressed-first
/// and pressed again in their original order.
#[derive(Debug, Clone, Default)]
pub struct PressedKeyState {
    pressed: Vec<Key>,
}

impl PressedKeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press; pressing a held key again is a no-op
    pub fn add(&mut self, key: Key) {
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
    }

    pub fn remove(&mut self, key: Key) {
        self.pressed.retain(|k| *k != key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Held keys, oldest press first
    pub fn get_all(&self) -> Vec<Key> {
        self.pressed.clone()
    }

    /// Whether a physical event must be written out after the composer
    /// has seen it.
    ///
    /// Passed-through events always are. A consumed release still goes out
    /// when its press went out earlier, so a key pressed before a
    /// composition started is never left held down.
    pub fn must_forward(&self, key: Key, action: Action, consumed: bool) -> bool {
        !consumed || (action == Action::Release && self.is_pressed(key))
    }

    /// Track an event that was written out
    pub fn record(&mut self, key: Key, action: Action) {
        match action {
            Action::Press => self.add(key),
            Action::Release => self.remove(key),
            Action::Repeat => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_add_remove() {
        let mut state = PressedKeyState::new();
        let key = Key::A;

        assert!(!state.is_pressed(key));
        state.add(key);
        assert!(state.is_pressed(key));
        state.remove(key);
        assert!(!state.is_pressed(key));
    }

    #[test]
    fn test_state_keeps_press_order() {
        let mut state = PressedKeyState::new();
        state.add(Key::LEFT_SHIFT);
        state.add(Key::LEFT_CTRL);
        state.add(Key::A);
        state.remove(Key::LEFT_CTRL);
        state.add(Key::LEFT_CTRL);

        assert_eq!(state.get_all(), vec![Key::LEFT_SHIFT, Key::A, Key::LEFT_CTRL]);
    }

    #[test]
    fn test_state_duplicate_add() {
        let mut state = PressedKeyState::new();
        state.add(Key::A);
        state.add(Key::A);

        assert_eq!(state.get_all(), vec![Key::A]);
    }

    #[test]
    fn test_state_remove_nonexistent() {
        let mut state = PressedKeyState::new();
        state.remove(Key::A);
        assert!(state.get_all().is_empty());
    }

    #[test]
    fn test_record_ignores_repeat() {
        let mut state = PressedKeyState::new();
        state.record(Key::A, Action::Repeat);
        assert!(!state.is_pressed(Key::A));
        state.record(Key::A, Action::Press);
        state.record(Key::A, Action::Repeat);
        assert!(state.is_pressed(Key::A));
        state.record(Key::A, Action::Release);
        assert!(!state.is_pressed(Key::A));
    }

    #[test]
    fn test_must_forward_passthrough() {
        let state = PressedKeyState::new();
        for action in [Action::Press, Action::Repeat, Action::Release] {
            assert!(state.must_forward(Key::A, action, false));
        }
    }

    #[test]
    fn test_consumed_release_of_held_key_is_forwarded() {
        let mut state = PressedKeyState::new();
        state.add(Key::KEY_5);

        assert!(state.must_forward(Key::KEY_5, Action::Release, true));
        assert!(!state.must_forward(Key::KEY_5, Action::Repeat, true));
        assert!(!state.must_forward(Key::KEY_6, Action::Release, true));
        assert!(!state.must_forward(Key::KEY_6, Action::Press, true));
    }
}
