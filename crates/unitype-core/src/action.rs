// Unitype Key Actions
// Press, release and autorepeat as evdev reports them

use std::fmt;

/// Direction of a key transition as read from a grabbed device.
///
/// Discriminants are the evdev `EV_KEY` values, so an event read from a
/// keyboard converts with [`Action::from_i32`] and is written back to the
/// virtual device with [`Action::to_i32`] unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Action {
    Release = 0,
    Press = 1,
    Repeat = 2,
}

impl Action {
    /// Whether the composer sees this as a key-down. Kernel autorepeat
    /// counts, so a held digit stays hidden while composing.
    pub fn is_pressed(self) -> bool {
        matches!(self, Action::Press | Action::Repeat)
    }

    /// Decode an `EV_KEY` value; anything but 0, 1, 2 is not a key transition
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Action::Release),
            1 => Some(Action::Press),
            2 => Some(Action::Repeat),
            _ => None,
        }
    }

    /// `EV_KEY` value to write to uinput
    pub fn to_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Release => write!(f, "release"),
            Action::Press => write!(f, "press"),
            Action::Repeat => write!(f, "repeat"),
        }
    }
}
