// Unitype Input Layer
// Device detection and filtering logic

mod device;
mod filter;

pub use device::{is_keyboard, is_virtual_device, DeviceCapabilities, VIRTUAL_DEVICE_PREFIX};
pub use filter::DeviceFilter;
