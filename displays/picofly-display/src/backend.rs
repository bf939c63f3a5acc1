//! Display backend trait
//!
//! Defines the interface for character displays.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Character display
///
/// Text is written at the cursor, which advances one column per character.
/// Characters that would fall past the last column are dropped.
#[allow(async_fn_in_trait)]
pub trait CharDisplay {
    /// Clear the entire display and home the cursor to (0, 0)
    async fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `col`: Column number (0-based)
    /// - `row`: Row number (0-based)
    async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write text at the cursor
    async fn write_str(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Move the cursor then write text
    async fn write_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(col, row).await?;
        self.write_str(text).await
    }
}

/// Map a character to the panel's ROM
///
/// The A00 character ROM matches ASCII for printable characters; anything
/// else is shown as `?`.
pub(crate) fn rom_code(ch: char) -> u8 {
    if ch == ' ' || ch.is_ascii_graphic() {
        ch as u8
    } else {
        b'?'
    }
}
