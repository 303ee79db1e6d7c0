// Unitype Output Layer
// Virtual keyboard that passed-through and synthesized keys are written to

mod state;

#[cfg(feature = "linux-input")]
mod uinput;

pub use state::PressedKeyState;

#[cfg(feature = "linux-input")]
pub use uinput::{unicode_hex_keys, UInputError, VirtualDevice};
