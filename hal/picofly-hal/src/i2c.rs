//! I2C bus configuration
//!
//! Bus transfers go through `embedded_hal_async::i2c::I2c`; this module only
//! carries the settings the board needs to bring the bus up.

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}

/// Check whether a 7-bit address falls in one of the reserved ranges
///
/// `0x00..=0x07` and `0x78..=0x7F` are reserved by the I2C specification,
/// anything above `0x7F` is not a 7-bit address at all.
pub const fn is_reserved_address(address: u8) -> bool {
    address < 0x08 || address > 0x77
}
