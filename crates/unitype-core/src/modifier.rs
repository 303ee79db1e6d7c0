// Unitype Modifier Keys
// Maps physical modifier keys (both sides) to the modifier they drive

use std::fmt;

use crate::Key;

/// A keyboard modifier, independent of which side of the keyboard it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Control,
    Shift,
    Alt,
    Meta,
}

impl Modifier {
    /// Get the modifier driven by a physical key, if any
    pub fn from_key(key: Key) -> Option<Modifier> {
        match key {
            Key::LEFT_CTRL | Key::RIGHT_CTRL => Some(Modifier::Control),
            Key::LEFT_SHIFT | Key::RIGHT_SHIFT => Some(Modifier::Shift),
            Key::LEFT_ALT | Key::RIGHT_ALT => Some(Modifier::Alt),
            Key::LEFT_META | Key::RIGHT_META => Some(Modifier::Meta),
            _ => None,
        }
    }

    /// Check if a key is any modifier
    pub fn is_key_modifier(key: Key) -> bool {
        is_key_modifier_code(key.code())
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modifier::Control => "Ctrl",
            Modifier::Shift => "Shift",
            Modifier::Alt => "Alt",
            Modifier::Meta => "Meta",
        };
        write!(f, "{}", name)
    }
}

const MODIFIER_KEY_CODES: &[u16] = &[
    29, 97, // L_CONTROL, R_CONTROL
    56, 100, // L_ALT, R_ALT
    42, 54, // L_SHIFT, R_SHIFT
    125, 126, // L_META, R_META
];

/// Check if a key code is a modifier without building a [`Key`]
#[inline]
pub const fn is_key_modifier_code(code: u16) -> bool {
    let mut i = 0;
    while i < MODIFIER_KEY_CODES.len() {
        if MODIFIER_KEY_CODES[i] == code {
            return true;
        }
        i += 1;
    }
    false
}
