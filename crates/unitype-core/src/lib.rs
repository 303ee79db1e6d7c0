// Unitype Core Library
// Ctrl+Shift+U hex codepoint composition over grabbed keyboards

pub mod action;
pub mod autostart;
pub mod classify;
pub mod compose;
pub mod config;
pub mod input;
pub mod key;
pub mod modifier;
pub mod output;

#[cfg(feature = "linux-input")]
pub mod event;

pub use action::Action;
pub use autostart::InstallError;
pub use classify::{hex_value, is_hex_digit_key};
pub use compose::{
    ComposeHandler, Composer, CompositionSession, KeyHandler, Outcome, Phase, UnicodeSink,
};
pub use config::{ComposerConfig, ConfigError};
pub use input::{is_keyboard, is_virtual_device, DeviceCapabilities, DeviceFilter};
pub use key::Key;
pub use modifier::Modifier;
pub use output::PressedKeyState;

#[cfg(feature = "linux-input")]
pub use event::{EventLoop, EventLoopError, EventLoopResult, KeyEvent};

#[cfg(feature = "linux-input")]
pub use output::{UInputError, VirtualDevice};
