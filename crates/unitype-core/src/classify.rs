// Unitype Key Classifier
// Maps raw key codes to hexadecimal digit values

use crate::Key;

/// Check if a key is one of the main-row digits 0-9 or the letters A-F.
///
/// Numpad digits are not hex digit keys.
pub fn is_hex_digit_key(key: Key) -> bool {
    hex_value(key).is_some()
}

/// The 0-15 value of a hex digit key, `None` for every other key.
///
/// Linux key codes are not laid out in hex order (KEY_0 follows KEY_9, and
/// the A-F letters are scattered across the QWERTY rows), so the mapping is
/// spelled out per key.
pub fn hex_value(key: Key) -> Option<u8> {
    let value = match key {
        Key::KEY_0 => 0,
        Key::KEY_1 => 1,
        Key::KEY_2 => 2,
        Key::KEY_3 => 3,
        Key::KEY_4 => 4,
        Key::KEY_5 => 5,
        Key::KEY_6 => 6,
        Key::KEY_7 => 7,
        Key::KEY_8 => 8,
        Key::KEY_9 => 9,
        Key::A => 10,
        Key::B => 11,
        Key::C => 12,
        Key::D => 13,
        Key::E => 14,
        Key::F => 15,
        _ => return None,
    };
    Some(value)
}

/// The key that types a hex digit value, `None` above 15
pub fn key_for_hex_digit(value: u8) -> Option<Key> {
    const HEX_KEYS: [Key; 16] = [
        Key::KEY_0,
        Key::KEY_1,
        Key::KEY_2,
        Key::KEY_3,
        Key::KEY_4,
        Key::KEY_5,
        Key::KEY_6,
        Key::KEY_7,
        Key::KEY_8,
        Key::KEY_9,
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
    ];
    HEX_KEYS.get(usize::from(value)).copied()
}

/// Check if a key finishes a composition when pressed without modifiers
pub fn is_terminator_key(key: Key) -> bool {
    matches!(key, Key::ENTER | Key::SPACE)
}
