//! HD44780 character LCD driver
//!
//! Drives an HD44780-compatible controller in 4-bit mode through a PCF8574
//! I2C port expander ("LCD backpack"). Expander bit layout:
//!
//! ```text
//! P7 P6 P5 P4 │ P3        │ P2 │ P1 │ P0
//! D7 D6 D5 D4 │ backlight │ E  │ RW │ RS
//! ```

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::backend::{rom_code, CharDisplay, DisplayError};

/// Default PCF8574 backpack address
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// DDRAM start address of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Expander control bits
mod pin {
    pub const RS: u8 = 0x01;
    #[allow(dead_code)]
    pub const RW: u8 = 0x02;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// HD44780 instructions
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const ENTRY_INCREMENT: u8 = 0x02;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const TWO_LINES: u8 = 0x08;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// Panel geometry and cursor style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hd44780Config {
    /// 7-bit I2C address of the backpack
    pub address: u8,
    /// Columns per row
    pub cols: u8,
    /// Number of rows (1-4)
    pub rows: u8,
    /// Show an underline cursor
    pub cursor: bool,
    /// Blink the cursor cell
    pub blink: bool,
}

impl Default for Hd44780Config {
    fn default() -> Self {
        Self::LCD1602
    }
}

impl Hd44780Config {
    /// 16x2 panel on a 0x27 backpack, blinking cursor
    pub const LCD1602: Self = Self {
        address: DEFAULT_ADDRESS,
        cols: 16,
        rows: 2,
        cursor: true,
        blink: true,
    };

    fn display_control(&self) -> u8 {
        let mut flags = cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON;
        if self.cursor {
            flags |= cmd::CURSOR_ON;
        }
        if self.blink {
            flags |= cmd::BLINK_ON;
        }
        flags
    }

    fn function_set(&self) -> u8 {
        // 4-bit bus, 5x8 font
        if self.rows > 1 {
            cmd::FUNCTION_SET | cmd::TWO_LINES
        } else {
            cmd::FUNCTION_SET
        }
    }
}

/// HD44780 driver over a PCF8574 backpack
///
/// The backlight bit is set on every expander write.
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    config: Hd44780Config,
    initialized: bool,
    /// Cursor position (col, row) as tracked by the driver
    cursor: (u8, u8),
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a new driver; call [`Hd44780::init`] before use
    pub fn new(i2c: I2C, delay: D, config: Hd44780Config) -> Self {
        Self {
            i2c,
            delay,
            config,
            initialized: false,
            cursor: (0, 0),
        }
    }

    /// Run the power-on initialization sequence
    ///
    /// Forces the controller into 4-bit mode regardless of its previous
    /// state, then applies the configured geometry and cursor style and
    /// clears the panel.
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        if self.config.rows == 0 || self.config.rows as usize > ROW_OFFSETS.len() {
            return Err(DisplayError::InvalidCoordinates);
        }

        // Wait for Vcc to settle after power-on
        self.delay.delay_ms(50).await;

        // Three "8-bit mode" nibbles resynchronise the bus, then switch to 4-bit
        self.write_nibble(0x30, 0).await?;
        self.delay.delay_us(4500).await;
        self.write_nibble(0x30, 0).await?;
        self.delay.delay_us(4500).await;
        self.write_nibble(0x30, 0).await?;
        self.delay.delay_us(150).await;
        self.write_nibble(0x20, 0).await?;

        self.initialized = true;

        self.command(self.config.function_set()).await?;
        self.command(self.config.display_control()).await?;
        self.clear_panel().await?;
        self.command(cmd::ENTRY_MODE_SET | cmd::ENTRY_INCREMENT).await
    }

    /// Whether [`Hd44780::init`] has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Release the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Latch the upper four bits of `value` with an enable pulse
    async fn write_nibble(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        let bits = (value & 0xF0) | mode | pin::BACKLIGHT;
        self.i2c
            .write(self.config.address, &[bits | pin::EN, bits])
            .await
            .map_err(|_| DisplayError::Communication)
    }

    /// Send a full byte as two nibbles in one bus transfer
    async fn send(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        let base = mode | pin::BACKLIGHT;
        let high = (value & 0xF0) | base;
        let low = (value << 4) | base;
        self.i2c
            .write(
                self.config.address,
                &[high | pin::EN, high, low | pin::EN, low],
            )
            .await
            .map_err(|_| DisplayError::Communication)?;

        // Most instructions complete in 37µs
        self.delay.delay_us(50).await;
        Ok(())
    }

    async fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, 0).await
    }

    async fn clear_panel(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR_DISPLAY).await?;
        // Clear takes up to 1.52ms
        self.delay.delay_ms(2).await;
        self.cursor = (0, 0);
        Ok(())
    }
}

impl<I2C, D> CharDisplay for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    async fn clear(&mut self) -> Result<(), DisplayError> {
        self.clear_panel().await
    }

    async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= self.config.cols || row >= self.config.rows {
            return Err(DisplayError::InvalidCoordinates);
        }
        let addr = ROW_OFFSETS
            .get(row as usize)
            .and_then(|offset| offset.checked_add(col))
            .filter(|&addr| addr < cmd::SET_DDRAM_ADDR)
            .ok_or(DisplayError::InvalidCoordinates)?;
        self.command(cmd::SET_DDRAM_ADDR | addr).await?;
        self.cursor = (col, row);
        Ok(())
    }

    async fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        for ch in text.chars() {
            if self.cursor.0 >= self.config.cols {
                break;
            }
            self.send(rom_code(ch), pin::RS).await?;
            self.cursor.0 += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation};
    use heapless::Vec;

    /// Mock backpack recording every byte written to the expander
    struct MockBus {
        address: Option<u8>,
        bytes: Vec<u8, 512>,
        fail: bool,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                address: None,
                bytes: Vec::new(),
                fail: false,
            }
        }

        /// Decode latched nibbles (falling edge of E) into (rs, byte) pairs,
        /// skipping the four single-nibble resync writes of init
        fn decoded(&self, skip_nibbles: usize) -> Vec<(bool, u8), 128> {
            let mut nibbles: Vec<(bool, u8), 256> = Vec::new();
            let mut prev_en = false;
            for &b in &self.bytes {
                let en = b & pin::EN != 0;
                if prev_en && !en {
                    nibbles.push((b & pin::RS != 0, b >> 4)).unwrap();
                }
                prev_en = en;
            }

            let mut out = Vec::new();
            for pair in nibbles[skip_nibbles..].chunks(2) {
                out.push((pair[0].0, (pair[0].1 << 4) | pair[1].1)).unwrap();
            }
            out
        }
    }

    impl ErrorType for MockBus {
        type Error = ErrorKind;
    }

    impl I2c for MockBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.address = Some(address);
            for op in operations {
                if let Operation::Write(data) = op {
                    self.bytes.extend_from_slice(data).unwrap();
                }
            }
            Ok(())
        }
    }

    /// Mock delay accumulating requested time
    struct MockDelay {
        elapsed_ns: u64,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.elapsed_ns += ns as u64;
        }
    }

    fn lcd() -> Hd44780<MockBus, MockDelay> {
        Hd44780::new(
            MockBus::new(),
            MockDelay { elapsed_ns: 0 },
            Hd44780Config::LCD1602,
        )
    }

    #[test]
    fn test_init_sequence() {
        let mut lcd = lcd();
        block_on(lcd.init()).unwrap();
        assert!(lcd.is_initialized());

        let (bus, delay) = lcd.release();
        assert_eq!(bus.address, Some(0x27));

        // Resync nibbles: 0x3, 0x3, 0x3, 0x2 with backlight on
        assert_eq!(&bus.bytes[..8], &[0x3C, 0x38, 0x3C, 0x38, 0x3C, 0x38, 0x2C, 0x28]);

        let cmds = bus.decoded(4);
        assert_eq!(
            cmds.as_slice(),
            &[
                (false, 0x28), // 4-bit, 2 lines, 5x8
                (false, 0x0F), // display on, cursor on, blink on
                (false, 0x01), // clear
                (false, 0x06), // increment, no shift
            ]
        );

        // Power-on wait plus resync and clear delays
        assert!(delay.elapsed_ns >= 61_150_000);
    }

    #[test]
    fn test_cursor_style_follows_config() {
        let config = Hd44780Config {
            cursor: false,
            blink: false,
            ..Hd44780Config::LCD1602
        };
        let mut lcd = Hd44780::new(MockBus::new(), MockDelay { elapsed_ns: 0 }, config);
        block_on(lcd.init()).unwrap();

        let (bus, _) = lcd.release();
        assert_eq!(bus.decoded(4)[1], (false, 0x0C));
    }

    #[test]
    fn test_write_sends_data_bytes() {
        let mut lcd = lcd();
        block_on(lcd.init()).unwrap();
        block_on(lcd.write_str("ok")).unwrap();

        let (bus, _) = lcd.release();
        let decoded = bus.decoded(4);
        assert_eq!(&decoded[4..], &[(true, b'o'), (true, b'k')]);
    }

    #[test]
    fn test_data_nibble_encoding() {
        let mut lcd = lcd();
        block_on(lcd.init()).unwrap();
        let before = lcd.i2c.bytes.len();
        block_on(lcd.write_str("r")).unwrap();

        // 'r' = 0x72: high nibble 0x7, low nibble 0x2, RS and backlight set
        assert_eq!(&lcd.i2c.bytes[before..], &[0x7D, 0x79, 0x2D, 0x29]);
    }

    #[test]
    fn test_set_cursor_second_row() {
        let mut lcd = lcd();
        block_on(lcd.init()).unwrap();
        block_on(lcd.set_cursor(0, 1)).unwrap();
        block_on(lcd.set_cursor(5, 0)).unwrap();

        let (bus, _) = lcd.release();
        let decoded = bus.decoded(4);
        assert_eq!(&decoded[4..], &[(false, 0xC0), (false, 0x85)]);
    }

    #[test]
    fn test_set_cursor_out_of_range() {
        let mut lcd = lcd();
        block_on(lcd.init()).unwrap();
        assert_eq!(
            block_on(lcd.set_cursor(16, 0)),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(
            block_on(lcd.set_cursor(0, 2)),
            Err(DisplayError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_write_clips_to_row() {
        let mut lcd = lcd();
        block_on(lcd.init()).unwrap();
        block_on(lcd.set_cursor(14, 0)).unwrap();
        block_on(lcd.write_str("abcd")).unwrap();

        let (bus, _) = lcd.release();
        let decoded = bus.decoded(4);
        // set_cursor + two characters
        assert_eq!(&decoded[5..], &[(true, b'a'), (true, b'b')]);
    }

    #[test]
    fn test_clear_homes_cursor() {
        let mut lcd = lcd();
        block_on(lcd.init()).unwrap();
        block_on(lcd.write_str("abc")).unwrap();
        block_on(lcd.clear()).unwrap();
        assert_eq!(lcd.cursor, (0, 0));
    }

    #[test]
    fn test_requires_init() {
        let mut lcd = lcd();
        assert_eq!(
            block_on(lcd.write_str("x")),
            Err(DisplayError::NotInitialized)
        );
    }

    #[test]
    fn test_bus_error_maps_to_communication() {
        let mut bus = MockBus::new();
        bus.fail = true;
        let mut lcd = Hd44780::new(bus, MockDelay { elapsed_ns: 0 }, Hd44780Config::LCD1602);
        assert_eq!(block_on(lcd.init()), Err(DisplayError::Communication));
        assert!(!lcd.is_initialized());
    }

    #[test]
    fn test_rows_beyond_controller_rejected() {
        let config = Hd44780Config {
            rows: 5,
            ..Hd44780Config::LCD1602
        };
        let mut lcd = Hd44780::new(MockBus::new(), MockDelay { elapsed_ns: 0 }, config);

        assert_eq!(
            block_on(lcd.set_cursor(0, 4)),
            Err(DisplayError::InvalidCoordinates)
        );
        assert!(lcd.i2c.bytes.is_empty());
    }

    #[test]
    fn test_wide_panel_column_past_ddram_rejected() {
        let config = Hd44780Config {
            cols: 200,
            ..Hd44780Config::LCD1602
        };
        let mut lcd = Hd44780::new(MockBus::new(), MockDelay { elapsed_ns: 0 }, config);
        block_on(lcd.init()).unwrap();

        assert_eq!(
            block_on(lcd.set_cursor(0x40, 1)),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(
            block_on(lcd.set_cursor(199, 0)),
            Err(DisplayError::InvalidCoordinates)
        );
    }
}
