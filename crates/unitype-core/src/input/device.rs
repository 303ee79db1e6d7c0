// Unitype Input Layer - Device Detection
// Decide which input devices can drive a composition

use std::collections::HashSet;

use crate::classify::is_hex_digit_key;
use crate::Key;

/// Name prefix of the uinput device unitype writes to.
///
/// Devices carrying it are never grabbed, or synthesized output would loop
/// back into the composer.
pub const VIRTUAL_DEVICE_PREFIX: &str = "Unitype (virtual)";

/// Device capabilities extracted from an evdev device
#[derive(Debug, Clone)]
pub struct DeviceCapabilities {
    /// Whether the device supports EV_KEY events
    pub has_ev_key: bool,
    /// Supported key codes
    pub supported_keys: HashSet<u16>,
}

impl DeviceCapabilities {
    pub fn new(has_ev_key: bool, supported_keys: impl IntoIterator<Item = u16>) -> Self {
        Self {
            has_ev_key,
            supported_keys: supported_keys.into_iter().collect(),
        }
    }

    /// Check if a specific key is supported
    pub fn supports_key(&self, key: Key) -> bool {
        self.supported_keys.contains(&key.code())
    }
}

/// Keys needed to activate and finish a composition, besides the hex digits.
const GESTURE_KEYS: &[Key] = &[Key::LEFT_CTRL, Key::LEFT_SHIFT, Key::U, Key::ENTER, Key::SPACE];

/// Determine if a device is a keyboard that can type a full composition:
/// it reports EV_KEY, has the Ctrl+Shift+U gesture keys and both terminators,
/// and has every 0-9/A-F key.
///
/// Mice, power buttons and media remotes fail this check.
pub fn is_keyboard(capabilities: &DeviceCapabilities) -> bool {
    if !capabilities.has_ev_key {
        return false;
    }

    let gesture_present = GESTURE_KEYS.iter().all(|key| capabilities.supports_key(*key));
    let hex_present = capabilities
        .supported_keys
        .iter()
        .filter(|code| is_hex_digit_key(Key::from(**code)))
        .count()
        == 16;

    gesture_present && hex_present
}

/// Check if a device name marks unitype's own virtual device
pub fn is_virtual_device(name: &str) -> bool {
    name.contains(VIRTUAL_DEVICE_PREFIX)
}
