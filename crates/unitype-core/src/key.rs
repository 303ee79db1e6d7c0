// Unitype Key Type
// A single key code from Linux input-event-codes.h

use std::fmt;
use std::str::FromStr;

/// Represents a single keyboard key code.
///
/// This is a newtype wrapper around u16 for type safety.
/// The numeric values match Linux input-event-codes.h definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Key(pub u16);

impl Key {
    pub const ESC: Key = Key(1);
    pub const KEY_1: Key = Key(2);
    pub const KEY_2: Key = Key(3);
    pub const KEY_3: Key = Key(4);
    pub const KEY_4: Key = Key(5);
    pub const KEY_5: Key = Key(6);
    pub const KEY_6: Key = Key(7);
    pub const KEY_7: Key = Key(8);
    pub const KEY_8: Key = Key(9);
    pub const KEY_9: Key = Key(10);
    pub const KEY_0: Key = Key(11);
    pub const E: Key = Key(18);
    pub const U: Key = Key(22);
    pub const ENTER: Key = Key(28);
    pub const LEFT_CTRL: Key = Key(29);
    pub const A: Key = Key(30);
    pub const D: Key = Key(32);
    pub const F: Key = Key(33);
    pub const G: Key = Key(34);
    pub const LEFT_SHIFT: Key = Key(42);
    pub const Z: Key = Key(44);
    pub const C: Key = Key(46);
    pub const B: Key = Key(48);
    pub const RIGHT_SHIFT: Key = Key(54);
    pub const LEFT_ALT: Key = Key(56);
    pub const SPACE: Key = Key(57);
    pub const KPENTER: Key = Key(96);
    pub const RIGHT_CTRL: Key = Key(97);
    pub const RIGHT_ALT: Key = Key(100);
    pub const LEFT_META: Key = Key(125);
    pub const RIGHT_META: Key = Key(126);

    /// Get the raw numeric code value
    pub fn code(self) -> u16 {
        self.0
    }

    /// Get the name of this key
    pub fn name(self) -> &'static str {
        key_name(self.0)
    }
}

impl From<u16> for Key {
    fn from(code: u16) -> Self {
        Key(code)
    }
}

impl From<Key> for u16 {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        key_from_name(s).ok_or_else(|| format!("Unknown key: {}", s))
    }
}

/// Key codes and their canonical names, sorted by code.
///
/// Covers the main keyboard block; anything else displays as UNKNOWN.
const KEY_NAMES: &[(u16, &str)] = &[
    (0, "RESERVED"),
    (1, "ESC"),
    (2, "KEY_1"),
    (3, "KEY_2"),
    (4, "KEY_3"),
    (5, "KEY_4"),
    (6, "KEY_5"),
    (7, "KEY_6"),
    (8, "KEY_7"),
    (9, "KEY_8"),
    (10, "KEY_9"),
    (11, "KEY_0"),
    (12, "MINUS"),
    (13, "EQUAL"),
    (14, "BACKSPACE"),
    (15, "TAB"),
    (16, "Q"),
    (17, "W"),
    (18, "E"),
    (19, "R"),
    (20, "T"),
    (21, "Y"),
    (22, "U"),
    (23, "I"),
    (24, "O"),
    (25, "P"),
    (26, "LEFT_BRACE"),
    (27, "RIGHT_BRACE"),
    (28, "ENTER"),
    (29, "LEFT_CTRL"),
    (30, "A"),
    (31, "S"),
    (32, "D"),
    (33, "F"),
    (34, "G"),
    (35, "H"),
    (36, "J"),
    (37, "K"),
    (38, "L"),
    (39, "SEMICOLON"),
    (40, "APOSTROPHE"),
    (41, "GRAVE"),
    (42, "LEFT_SHIFT"),
    (43, "BACKSLASH"),
    (44, "Z"),
    (45, "X"),
    (46, "C"),
    (47, "V"),
    (48, "B"),
    (49, "N"),
    (50, "M"),
    (51, "COMMA"),
    (52, "DOT"),
    (53, "SLASH"),
    (54, "RIGHT_SHIFT"),
    (56, "LEFT_ALT"),
    (57, "SPACE"),
    (58, "CAPSLOCK"),
    (59, "F1"),
    (60, "F2"),
    (61, "F3"),
    (62, "F4"),
    (63, "F5"),
    (64, "F6"),
    (65, "F7"),
    (66, "F8"),
    (67, "F9"),
    (68, "F10"),
    (69, "NUMLOCK"),
    (70, "SCROLLLOCK"),
    (87, "F11"),
    (88, "F12"),
    (96, "KPENTER"),
    (97, "RIGHT_CTRL"),
    (99, "SYSRQ"),
    (100, "RIGHT_ALT"),
    (102, "HOME"),
    (103, "UP"),
    (104, "PAGE_UP"),
    (105, "LEFT"),
    (106, "RIGHT"),
    (107, "END"),
    (108, "DOWN"),
    (109, "PAGE_DOWN"),
    (110, "INSERT"),
    (111, "DELETE"),
    (119, "PAUSE"),
    (125, "LEFT_META"),
    (126, "RIGHT_META"),
    (127, "COMPOSE"),
    (139, "MENU"),
    (161, "EJECTCD"),
];

/// Extra spellings accepted by [`key_from_name`].
const KEY_ALIASES: &[(&str, u16)] = &[
    ("ESCAPE", 1),
    ("1", 2),
    ("2", 3),
    ("3", 4),
    ("4", 5),
    ("5", 6),
    ("6", 7),
    ("7", 8),
    ("8", 9),
    ("9", 10),
    ("0", 11),
    ("PRINT", 99),
    ("PRTSCR", 99),
];

/// Display name for a key code
pub fn key_name(code: u16) -> &'static str {
    KEY_NAMES
        .binary_search_by_key(&code, |(c, _)| *c)
        .map(|idx| KEY_NAMES[idx].1)
        .unwrap_or("UNKNOWN")
}

/// Try to parse a key name to a key code
pub fn key_from_name(name: &str) -> Option<Key> {
    let name_upper = name.to_uppercase();
    KEY_NAMES
        .iter()
        .find(|(_, n)| *n == name_upper)
        .map(|(code, _)| *code)
        .or_else(|| {
            KEY_ALIASES
                .iter()
                .find(|(n, _)| *n == name_upper)
                .map(|(_, code)| *code)
        })
        .map(Key::from)
}
