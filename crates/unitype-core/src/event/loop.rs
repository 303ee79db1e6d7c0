// Unitype Event Source
// Grabs physical keyboards through evdev so that unitype sees every key first

use std::os::unix::io::AsRawFd;

use evdev::{Device, EventType};

use crate::input::{is_keyboard, is_virtual_device, DeviceCapabilities, DeviceFilter};
use crate::{Action, Key};

/// Result type for event loop operations
pub type EventLoopResult<T> = Result<T, EventLoopError>;

/// Errors that can occur in event loop
#[derive(Debug, thiserror::Error)]
pub enum EventLoopError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Device information for listing devices
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub index: usize,
    pub name: String,
    pub path: Option<String>,
}

/// One key transition read from a grabbed device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub action: Action,
    pub device_name: String,
}

/// Source of key events from grabbed keyboards.
///
/// While grabbed, no other process receives events from these devices;
/// whatever unitype does not forward to its virtual device is consumed.
/// Devices are ungrabbed on drop, including during panic unwinding, so the
/// keyboard never stays captured after unitype exits.
pub struct EventLoop {
    devices: Vec<Device>,
    poll_fds: Vec<libc::pollfd>,
    grabbed: bool,
}

impl EventLoop {
    /// Open the devices selected by `filter` and grab them
    pub fn new_grabbed(filter: &DeviceFilter) -> EventLoopResult<Self> {
        let mut devices = Self::find_keyboards(filter)?;

        // A previous instance may have died while holding a grab.
        for device in &mut devices {
            let _ = device.ungrab();
        }

        for device in &mut devices {
            device.grab()?;
            log::debug!("grabbed {}", device.name().unwrap_or("Unknown"));
        }

        let poll_fds = Self::create_poll_fds(&devices);
        Ok(Self {
            devices,
            poll_fds,
            grabbed: true,
        })
    }

    fn create_poll_fds(devices: &[Device]) -> Vec<libc::pollfd> {
        devices
            .iter()
            .map(|d| libc::pollfd {
                fd: d.as_raw_fd(),
                events: libc::POLLIN,
                revents: 0,
            })
            .collect()
    }

    /// Ungrab all devices (called on shutdown)
    pub fn ungrab_all(&mut self) {
        if self.grabbed {
            for device in &mut self.devices {
                let _ = device.ungrab();
            }
            self.grabbed = false;
        }
    }

    /// List keyboards that could drive a composition, for `--list-devices`
    pub fn list_devices() -> EventLoopResult<Vec<DeviceInfo>> {
        let devices_info: Vec<DeviceInfo> = evdev::enumerate()
            .filter(|(_, device)| Self::is_keyboard_device(device))
            .enumerate()
            .map(|(index, (path, device))| DeviceInfo {
                index,
                name: device.name().unwrap_or("Unknown").to_string(),
                path: path.to_str().map(|s| s.to_string()),
            })
            .collect();

        if devices_info.is_empty() {
            return Err(EventLoopError::DeviceNotFound(
                "No keyboard devices found".to_string(),
            ));
        }

        Ok(devices_info)
    }

    fn find_keyboards(filter: &DeviceFilter) -> EventLoopResult<Vec<Device>> {
        let mut keyboards = Vec::new();

        for (path, device) in evdev::enumerate() {
            let device_name = device.name().unwrap_or("Unknown");
            let device_path = path.to_str().unwrap_or_default();
            let is_keyboard = Self::is_keyboard_device(&device);
            let is_virtual = is_virtual_device(device_name);

            if filter.matches(device_name, device_path, is_keyboard, is_virtual) {
                log::debug!("selected {} ({})", device_name, device_path);
                keyboards.push(device);
            }
        }

        if keyboards.is_empty() {
            let reason = if filter.is_autodetect() {
                "No keyboard devices found".to_string()
            } else {
                format!("No device matches {:?}", filter.names())
            };
            return Err(EventLoopError::DeviceNotFound(reason));
        }

        Ok(keyboards)
    }

    fn capabilities(device: &Device) -> DeviceCapabilities {
        let keys = device
            .supported_keys()
            .map(|keys| keys.iter().map(|k| k.code()).collect::<Vec<u16>>())
            .unwrap_or_default();
        DeviceCapabilities::new(device.supported_events().contains(EventType::KEY), keys)
    }

    fn is_keyboard_device(device: &Device) -> bool {
        !is_virtual_device(device.name().unwrap_or("")) && is_keyboard(&Self::capabilities(device))
    }

    /// Wait up to `timeout_ms` for key events (-1 blocks indefinitely).
    ///
    /// Events come back in the order each device reported them, devices in
    /// grab order. Non-key events (SYN, MSC, LED) are dropped here.
    /// A poll interrupted by a signal returns no events rather than an error.
    pub fn poll_key_events(&mut self, timeout_ms: i32) -> EventLoopResult<Vec<KeyEvent>> {
        let mut events = Vec::new();

        let poll_result = unsafe {
            libc::poll(
                self.poll_fds.as_mut_ptr(),
                self.poll_fds.len() as libc::nfds_t,
                timeout_ms,
            )
        };

        if poll_result < 0 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINTR) {
                return Ok(events);
            }
            return Err(EventLoopError::Io(err));
        }

        if poll_result == 0 {
            return Ok(events);
        }

        for (i, device) in self.devices.iter_mut().enumerate() {
            if self.poll_fds[i].revents & libc::POLLIN == 0 {
                continue;
            }
            let device_name = device.name().unwrap_or("Unknown").to_string();
            let fetched = match device.fetch_events() {
                Ok(fetched) => fetched,
                Err(e) => {
                    log::warn!("reading {} failed: {}", device_name, e);
                    continue;
                }
            };
            for event in fetched {
                if event.event_type() != EventType::KEY {
                    continue;
                }
                let Some(action) = Action::from_i32(event.value()) else {
                    continue;
                };
                events.push(KeyEvent {
                    key: Key::from(event.code()),
                    action,
                    device_name: device_name.clone(),
                });
            }
        }

        Ok(events)
    }

    /// Get the names of all grabbed devices
    pub fn device_names(&self) -> Vec<String> {
        self.devices
            .iter()
            .map(|d| d.name().unwrap_or("Unknown").to_string())
            .collect()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        self.ungrab_all();
    }
}
