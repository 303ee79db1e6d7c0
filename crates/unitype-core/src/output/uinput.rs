// Unitype uinput Output Layer
// Re-emits passed-through keys and types composed characters

use evdev::{EventType, InputEvent};

use super::state::PressedKeyState;
use crate::classify::key_for_hex_digit;
use crate::compose::UnicodeSink;
use crate::input::VIRTUAL_DEVICE_PREFIX;
use crate::{Action, Key, Modifier};

/// Error types for uinput operations
#[derive(Debug, thiserror::Error)]
pub enum UInputError {
    #[error("Failed to create virtual device: {0}")]
    DeviceCreation(String),

    #[error("Failed to write event: {0}")]
    WriteError(String),

    #[error("Not a Unicode scalar value: 0x{0:X}")]
    InvalidCodepoint(u32),
}

/// Keys that type `codepoint` as lower-case hex, most significant digit first.
///
/// Surrogates and values above U+10FFFF are rejected: they are not
/// characters, and there is no way to type half of a surrogate pair.
pub fn unicode_hex_keys(codepoint: u32) -> Result<Vec<Key>, UInputError> {
    if char::from_u32(codepoint).is_none() {
        return Err(UInputError::InvalidCodepoint(codepoint));
    }

    let keys = format!("{:x}", codepoint)
        .chars()
        .filter_map(|c| c.to_digit(16))
        .filter_map(|digit| key_for_hex_digit(digit as u8))
        .collect();
    Ok(keys)
}

/// Virtual uinput keyboard that the rest of the desktop reads from.
///
/// Every event unitype lets through is written here, so it also tracks
/// which keys it is holding down.
pub struct VirtualDevice {
    device: evdev::uinput::VirtualDevice,
    pressed_keys: PressedKeyState,
    pressed_modifiers: PressedKeyState,
    key_delay_ms: u64,
}

impl VirtualDevice {
    /// Create a new virtual uinput device
    pub fn new() -> Result<Self, UInputError> {
        use evdev::uinput::VirtualDeviceBuilder;
        use evdev::AttributeSet;

        // Everything a grabbed keyboard might need passed through
        let mut keys = AttributeSet::new();
        for code in 0..256u16 {
            keys.insert(evdev::Key::new(code));
        }

        let name = format!("{} Keyboard", VIRTUAL_DEVICE_PREFIX);
        let device = VirtualDeviceBuilder::new()
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?
            .name(&name)
            .with_keys(&keys)
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?
            .build()
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?;

        Ok(Self {
            device,
            pressed_keys: PressedKeyState::new(),
            pressed_modifiers: PressedKeyState::new(),
            key_delay_ms: 0,
        })
    }

    /// Pause between synthesized key events, for applications that drop
    /// keys arriving with no gap
    pub fn set_key_delay(&mut self, key_delay_ms: u64) {
        self.key_delay_ms = key_delay_ms;
    }

    fn write_key_event(&mut self, key: Key, action: Action) -> Result<(), UInputError> {
        let key_event = InputEvent::new(EventType::KEY, key.code(), action.to_i32());
        // SYN event is required for the kernel to process the key event
        let syn_event = InputEvent::new(EventType::SYNCHRONIZATION, 0, 0);

        self.device
            .emit(&[key_event, syn_event])
            .map_err(|e: std::io::Error| UInputError::WriteError(e.to_string()))?;

        if Modifier::is_key_modifier(key) {
            self.pressed_modifiers.record(key, action);
        } else {
            self.pressed_keys.record(key, action);
        }

        Ok(())
    }

    /// Pass a physical key event through unchanged
    pub fn forward(&mut self, key: Key, action: Action) -> Result<(), UInputError> {
        self.write_key_event(key, action)
    }

    /// Send a synthesized key event, paced by the configured delay
    pub fn send_key_action(&mut self, key: Key, action: Action) -> Result<(), UInputError> {
        self.write_key_event(key, action)?;
        if self.key_delay_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(self.key_delay_ms));
        }
        Ok(())
    }

    fn tap_key(&mut self, key: Key) -> Result<(), UInputError> {
        self.send_key_action(key, Action::Press)?;
        self.send_key_action(key, Action::Release)?;
        Ok(())
    }

    /// Type a Unicode character via the input method's Ctrl+Shift+U entry.
    ///
    /// Modifiers held on this device are released first and pressed again
    /// afterwards, so the user's own Ctrl/Shift don't leak into the entry.
    pub fn send_unicode(&mut self, codepoint: u32) -> Result<(), UInputError> {
        let digits = unicode_hex_keys(codepoint)?;

        let held_modifiers = self.pressed_modifiers.get_all();
        for modifier in held_modifiers.iter().rev() {
            self.send_key_action(*modifier, Action::Release)?;
        }

        self.send_key_action(Key::LEFT_CTRL, Action::Press)?;
        self.send_key_action(Key::LEFT_SHIFT, Action::Press)?;
        self.tap_key(Key::U)?;
        self.send_key_action(Key::LEFT_SHIFT, Action::Release)?;
        self.send_key_action(Key::LEFT_CTRL, Action::Release)?;

        for key in digits {
            self.tap_key(key)?;
        }
        self.tap_key(Key::ENTER)?;

        for modifier in &held_modifiers {
            self.send_key_action(*modifier, Action::Press)?;
        }

        Ok(())
    }

    /// Release all pressed keys (for shutdown)
    pub fn release_all(&mut self) -> Result<(), UInputError> {
        for key in self.pressed_keys.get_all().into_iter().rev() {
            self.write_key_event(key, Action::Release)?;
        }
        for key in self.pressed_modifiers.get_all().into_iter().rev() {
            self.write_key_event(key, Action::Release)?;
        }
        Ok(())
    }

    /// Whether a physical event must reach this device, given the
    /// composer's decision. See [`PressedKeyState::must_forward`].
    pub fn must_forward(&self, key: Key, action: Action, consumed: bool) -> bool {
        let state = if Modifier::is_key_modifier(key) {
            &self.pressed_modifiers
        } else {
            &self.pressed_keys
        };
        state.must_forward(key, action, consumed)
    }

    /// Release everything and destroy the device
    pub fn close(mut self) -> Result<(), UInputError> {
        self.release_all()
    }
}

impl UnicodeSink for VirtualDevice {
    fn commit(&mut self, codepoint: u32) {
        if codepoint == 0 {
            // Terminator right after activation: nothing was typed.
            log::debug!("empty composition, nothing to type");
            return;
        }
        match self.send_unicode(codepoint) {
            Ok(()) => log::info!("typed U+{:04X}", codepoint),
            Err(e) => log::warn!("could not type U+{:04X}: {}", codepoint, e),
        }
    }
}
