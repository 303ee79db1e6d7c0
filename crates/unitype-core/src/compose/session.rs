// Unitype Composition Session
// Modifier flags and accumulator owned by a single composer

/// Whether the session is collecting hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Composing,
}

/// State of the one long-lived composition session.
///
/// Mutated in place by every key event. `accumulator` is only meaningful
/// while composing and is zero otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompositionSession {
    pub(crate) ctrl_held: bool,
    pub(crate) shift_held: bool,
    // Never set by any transition; kept for the terminator guard.
    pub(crate) activation_key_held: bool,
    pub(crate) phase: Phase,
    pub(crate) accumulator: u32,
}

impl CompositionSession {
    /// Create an idle session with no modifiers held
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_composing(&self) -> bool {
        self.phase == Phase::Composing
    }

    pub fn ctrl_held(&self) -> bool {
        self.ctrl_held
    }

    pub fn shift_held(&self) -> bool {
        self.shift_held
    }

    pub fn activation_key_held(&self) -> bool {
        self.activation_key_held
    }

    pub fn accumulator(&self) -> u32 {
        self.accumulator
    }

    /// Both modifiers of the activation gesture are down
    pub(crate) fn gesture_modifiers_held(&self) -> bool {
        self.ctrl_held && self.shift_held
    }

    /// Composing with nothing held, so Enter/Space act as terminators
    pub(crate) fn accepts_terminator(&self) -> bool {
        self.is_composing() && !self.ctrl_held && !self.shift_held && !self.activation_key_held
    }

    pub(crate) fn begin(&mut self) {
        self.phase = Phase::Composing;
    }

    /// End the session, returning to idle with an empty accumulator
    pub(crate) fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.accumulator = 0;
    }

    /// Take the accumulated value and end the session in one step
    pub(crate) fn take(&mut self) -> u32 {
        let value = self.accumulator;
        self.reset();
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = CompositionSession::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.ctrl_held());
        assert!(!session.shift_held());
        assert!(!session.activation_key_held());
        assert_eq!(session.accumulator(), 0);
    }

    #[test]
    fn test_take_resets() {
        let mut session = CompositionSession::new();
        session.begin();
        session.accumulator = 0x41;
        assert_eq!(session.take(), 0x41);
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.accumulator(), 0);
    }

    #[test]
    fn test_reset_keeps_modifiers() {
        let mut session = CompositionSession::new();
        session.ctrl_held = true;
        session.shift_held = true;
        session.begin();
        session.reset();
        assert!(session.ctrl_held());
        assert!(session.shift_held());
    }

    #[test]
    fn test_accepts_terminator() {
        let mut session = CompositionSession::new();
        assert!(!session.accepts_terminator());
        session.begin();
        assert!(session.accepts_terminator());
        session.shift_held = true;
        assert!(!session.accepts_terminator());
    }
}
