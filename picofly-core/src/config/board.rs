//! Board configuration
//!
//! Pin assignments, bus settings and panel geometry for a Raspberry Pi Pico
//! with a 16x2 LCD backpack on I2C0.

use picofly_display::Hd44780Config;
use picofly_hal::i2c::{is_reserved_address, I2cConfig};

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Same pin assigned to two functions
    PinConflict(u8),
    /// I2C address outside the usable 7-bit range
    InvalidAddress(u8),
    /// Panel has zero rows/columns or more than 4 rows
    InvalidGeometry,
    /// Indicator half-period of zero
    InvalidBlinkPeriod,
}

/// Indicator blink timing while the host is disconnected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkConfig {
    /// Time the indicator stays on (ms)
    pub on_ms: u32,
    /// Time the indicator stays off (ms)
    pub off_ms: u32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            on_ms: 400,
            off_ms: 400,
        }
    }
}

impl BlinkConfig {
    /// Length of one on/off cycle (ms)
    pub const fn period_ms(&self) -> u32 {
        self.on_ms + self.off_ms
    }
}

/// USB device identity reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsbIdentity {
    /// Vendor ID
    pub vid: u16,
    /// Product ID
    pub pid: u16,
    /// Manufacturer string
    pub manufacturer: &'static str,
    /// Product string
    pub product: &'static str,
    /// Serial number string
    pub serial_number: &'static str,
    /// Maximum bus current (mA)
    pub max_power_ma: u16,
}

impl Default for UsbIdentity {
    fn default() -> Self {
        Self {
            // pid.codes test VID/PID
            vid: 0x1209,
            pid: 0x0001,
            manufacturer: "Picofly",
            product: "Picofly Link Bridge",
            serial_number: "00000001",
            max_power_ma: 100,
        }
    }
}

/// Complete board description
///
/// The firmware takes its peripherals by type (`PIN_25`, `PIN_0`, `PIN_1`),
/// so the pin numbers here describe that wiring and must match it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Onboard status LED
    pub indicator_pin: u8,
    /// Display bus settings
    pub i2c: I2cConfig,
    /// Display bus data pin
    pub sda_pin: u8,
    /// Display bus clock pin
    pub scl_pin: u8,
    /// Character display
    pub lcd: Hd44780Config,
    /// Indicator timing
    pub blink: BlinkConfig,
    /// USB identity
    pub usb: UsbIdentity,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            indicator_pin: 25,
            i2c: I2cConfig::FAST,
            sda_pin: 0,
            scl_pin: 1,
            lcd: Hd44780Config::LCD1602,
            blink: BlinkConfig::default(),
            usb: UsbIdentity::default(),
        }
    }
}

impl BoardConfig {
    /// Validate pin assignments, bus address and panel geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pins = [self.indicator_pin, self.sda_pin, self.scl_pin];
        for (i, &pin) in pins.iter().enumerate() {
            if pin >= GPIO_COUNT {
                return Err(ConfigError::InvalidPin(pin));
            }
            if pins[..i].contains(&pin) {
                return Err(ConfigError::PinConflict(pin));
            }
        }

        if is_reserved_address(self.lcd.address) {
            return Err(ConfigError::InvalidAddress(self.lcd.address));
        }

        if self.lcd.cols == 0 || self.lcd.rows == 0 || self.lcd.rows > 4 {
            return Err(ConfigError::InvalidGeometry);
        }

        if self.blink.on_ms == 0 || self.blink.off_ms == 0 {
            return Err(ConfigError::InvalidBlinkPeriod);
        }

        Ok(())
    }
}
