// Unitype Event Handling
// evdev event source for the composer

pub mod r#loop;

pub use r#loop::{DeviceInfo, EventLoop, EventLoopError, EventLoopResult, KeyEvent};
