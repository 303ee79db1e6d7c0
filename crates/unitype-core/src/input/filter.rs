// Unitype Input Layer - Device Filtering
// Which devices to grab: explicit names/paths, or autodetected keyboards

/// Device selection requested on the command line.
///
/// An empty filter autodetects keyboards. A non-empty one grabs exactly the
/// listed devices, matched by name or `/dev/input/eventN` path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    names: Vec<String>,
}

impl DeviceFilter {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Filter that autodetects keyboards
    pub fn autodetect() -> Self {
        Self::default()
    }

    pub fn is_autodetect(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check if a device should be grabbed.
    ///
    /// Explicit matches win over detection, so a listed device is used even
    /// if it doesn't look like a keyboard. Our own virtual device is never
    /// used; grabbing it would feed synthesized keys back into the composer.
    pub fn matches(
        &self,
        device_name: &str,
        device_path: &str,
        is_keyboard: bool,
        is_virtual: bool,
    ) -> bool {
        if is_virtual {
            return false;
        }

        if !self.is_autodetect() {
            return self
                .names
                .iter()
                .any(|name| device_path == name || device_name == name);
        }

        is_keyboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_by_path() {
        let filter = DeviceFilter::new(vec!["/dev/input/event0".to_string()]);
        assert!(filter.matches("Logitech Keyboard", "/dev/input/event0", true, false));
    }

    #[test]
    fn test_matches_by_name() {
        let filter = DeviceFilter::new(vec!["Logitech Keyboard".to_string()]);
        assert!(filter.matches("Logitech Keyboard", "/dev/input/event5", true, false));
    }

    #[test]
    fn test_no_match_when_filtered() {
        let filter = DeviceFilter::new(vec!["Specific Device".to_string()]);
        assert!(!filter.matches("Other Device", "/dev/input/event1", true, false));
    }

    #[test]
    fn test_explicit_match_skips_keyboard_check() {
        let filter = DeviceFilter::new(vec!["Macro Pad".to_string()]);
        assert!(filter.matches("Macro Pad", "/dev/input/event7", false, false));
    }

    #[test]
    fn test_autodetect_keyboard() {
        let filter = DeviceFilter::autodetect();
        assert!(filter.is_autodetect());
        assert!(filter.matches("Generic Keyboard", "/dev/input/event0", true, false));
        assert!(!filter.matches("Generic Mouse", "/dev/input/event1", false, false));
    }

    #[test]
    fn test_virtual_device_never_matches() {
        let filter = DeviceFilter::autodetect();
        assert!(!filter.matches("Unitype (virtual) Keyboard", "/dev/input/event2", true, true));

        let explicit = DeviceFilter::new(vec!["Unitype (virtual) Keyboard".to_string()]);
        assert!(!explicit.matches("Unitype (virtual) Keyboard", "/dev/input/event2", true, true));
    }
}
