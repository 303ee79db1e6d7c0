// Unitype Composition State Machine
// Decides, per key transition, whether to consume it and whether to commit

use crate::classify::{hex_value, is_hex_digit_key, is_terminator_key};
use crate::config::ComposerConfig;
use crate::{Key, Modifier};

use super::session::{CompositionSession, Phase};

/// Key that, released while Ctrl and Shift are held, starts a composition.
pub const ACTIVATION_KEY: Key = Key::U;

/// What the caller must do with one key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Hide the event from every other consumer of the input stream
    pub consumed: bool,
    /// Codepoint to synthesize, if this event finished a composition
    pub commit: Option<u32>,
}

impl Outcome {
    pub const PASS: Outcome = Outcome {
        consumed: false,
        commit: None,
    };

    pub const CONSUME: Outcome = Outcome {
        consumed: true,
        commit: None,
    };

    fn pass_and_commit(value: u32) -> Self {
        Self {
            consumed: false,
            commit: Some(value),
        }
    }

    fn consume_and_commit(value: u32) -> Self {
        Self {
            consumed: true,
            commit: Some(value),
        }
    }
}

/// The composition state machine.
///
/// Feed it every key-down and key-up in the order the system observed them.
/// It never blocks and never fails; an unexpected key while composing just
/// abandons the partial codepoint.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    session: CompositionSession,
    config: ComposerConfig,
}

impl Composer {
    pub fn new(config: ComposerConfig) -> Self {
        Self {
            session: CompositionSession::new(),
            config,
        }
    }

    pub fn session(&self) -> &CompositionSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Handle a key-down (or autorepeat) transition
    pub fn key_down(&mut self, key: Key) -> Outcome {
        let s = &mut self.session;
        let outcome = match Modifier::from_key(key) {
            Some(Modifier::Control) => {
                s.ctrl_held = true;
                Outcome::PASS
            }
            Some(Modifier::Shift) => {
                s.shift_held = true;
                Outcome::PASS
            }
            // Hide the gesture's U; activation waits for its release.
            _ if key == ACTIVATION_KEY && s.gesture_modifiers_held() => Outcome::CONSUME,
            // Digits accumulate on release; the press only has to stay invisible.
            _ if s.is_composing() && is_hex_digit_key(key) => Outcome::CONSUME,
            _ if s.accepts_terminator() && is_terminator_key(key) => Outcome::CONSUME,
            _ => Outcome::PASS,
        };

        log::trace!("down {} -> {:?} ({:?})", key, outcome, s.phase());
        outcome
    }

    /// Handle a key-up transition
    pub fn key_up(&mut self, key: Key) -> Outcome {
        let max_value = self.config.max_value();
        let s = &mut self.session;
        let outcome = match Modifier::from_key(key) {
            Some(Modifier::Control) => {
                s.ctrl_held = false;
                if s.is_composing() && s.shift_held && s.accumulator > 0 {
                    Outcome::pass_and_commit(s.take())
                } else {
                    Outcome::PASS
                }
            }
            Some(Modifier::Shift) => {
                s.shift_held = false;
                if s.is_composing() && s.ctrl_held && s.accumulator > 0 {
                    Outcome::pass_and_commit(s.take())
                } else {
                    Outcome::PASS
                }
            }
            _ if key == ACTIVATION_KEY && s.gesture_modifiers_held() => {
                if !s.is_composing() {
                    log::debug!("composition started");
                }
                s.begin();
                Outcome::CONSUME
            }
            _ if s.accepts_terminator() && is_terminator_key(key) => {
                Outcome::consume_and_commit(s.take())
            }
            _ if s.is_composing() => match hex_value(key) {
                Some(digit) => {
                    // accumulator <= max_value <= 0x10FFFF here, so this cannot overflow
                    s.accumulator = s.accumulator * 16 + u32::from(digit);
                    if s.accumulator > max_value {
                        log::debug!(
                            "accumulator 0x{:X} passed max 0x{:X}, committing early",
                            s.accumulator,
                            max_value
                        );
                        Outcome::consume_and_commit(s.take())
                    } else {
                        Outcome::CONSUME
                    }
                }
                None => {
                    log::debug!(
                        "composition aborted by {} (discarding 0x{:X})",
                        key,
                        s.accumulator
                    );
                    s.reset();
                    Outcome::PASS
                }
            },
            _ => Outcome::PASS,
        };

        if let Some(value) = outcome.commit {
            log::debug!("commit U+{:04X}", value);
        }
        log::trace!("up {} -> {:?} ({:?})", key, outcome, s.phase());
        outcome
    }
}
