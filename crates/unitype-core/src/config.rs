// Unitype Composer Configuration
// Runtime options for the composition state machine

/// Largest Unicode scalar value.
pub const MAX_SCALAR_VALUE: u32 = 0x10FFFF;

/// Default overflow threshold: one UTF-16 code unit.
///
/// An accumulator that grows past this commits on the digit that crossed it.
pub const DEFAULT_MAX_VALUE: u32 = 0xFFFF;

/// Errors raised while building a [`ComposerConfig`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid hex value '{0}'")]
    InvalidHex(String),

    #[error("Max value 0x{0:X} is above U+10FFFF")]
    MaxValueTooLarge(u32),

    #[error("Max value must be non-zero")]
    MaxValueZero,
}

/// Options for [`Composer`](crate::compose::Composer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerConfig {
    max_value: u32,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_value: DEFAULT_MAX_VALUE,
        }
    }
}

impl ComposerConfig {
    /// Create a config with the default overflow threshold
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overflow threshold.
    ///
    /// Values above [`MAX_SCALAR_VALUE`] are rejected so that
    /// `accumulator * 16 + 15` can never overflow a `u32`.
    pub fn with_max_value(mut self, max_value: u32) -> Result<Self, ConfigError> {
        if max_value == 0 {
            return Err(ConfigError::MaxValueZero);
        }
        if max_value > MAX_SCALAR_VALUE {
            return Err(ConfigError::MaxValueTooLarge(max_value));
        }
        self.max_value = max_value;
        Ok(self)
    }

    /// Get the overflow threshold
    pub fn max_value(&self) -> u32 {
        self.max_value
    }
}

/// Parse a hex number with or without a `0x` / `U+` prefix
pub fn parse_hex(text: &str) -> Result<u32, ConfigError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix("U+"))
        .or_else(|| trimmed.strip_prefix("u+"))
        .unwrap_or(trimmed);
    u32::from_str_radix(digits, 16).map_err(|_| ConfigError::InvalidHex(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_max_value() {
        assert_eq!(ComposerConfig::default().max_value(), 0xFFFF);
        assert_eq!(ComposerConfig::new(), ComposerConfig::default());
    }

    #[test]
    fn test_with_max_value() {
        let config = ComposerConfig::new().with_max_value(0x10FFFF).unwrap();
        assert_eq!(config.max_value(), 0x10FFFF);
    }

    #[test]
    fn test_with_max_value_rejects_out_of_range() {
        assert_eq!(
            ComposerConfig::new().with_max_value(0x110000),
            Err(ConfigError::MaxValueTooLarge(0x110000))
        );
        assert_eq!(
            ComposerConfig::new().with_max_value(0),
            Err(ConfigError::MaxValueZero)
        );
    }

    #[test]
    fn test_parse_hex_prefixes() {
        assert_eq!(parse_hex("FFFF"), Ok(0xFFFF));
        assert_eq!(parse_hex("0x10ffff"), Ok(0x10FFFF));
        assert_eq!(parse_hex("U+1F600"), Ok(0x1F600));
        assert_eq!(parse_hex(" 2a "), Ok(0x2A));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert_eq!(
            parse_hex("xyz"),
            Err(ConfigError::InvalidHex("xyz".to_string()))
        );
        assert!(parse_hex("").is_err());
    }
}
