//! In-memory character screen
//!
//! Mirrors what a 16x2 panel would show. Used wherever the bridge needs a
//! display without hardware behind it, and by the host tests.

use crate::backend::{rom_code, CharDisplay, DisplayError};

/// Number of character rows on the panel
pub const SCREEN_ROWS: usize = 2;

/// Number of character columns on the panel
pub const SCREEN_COLS: usize = 16;

/// Screen buffer for a text-mode display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    /// Current display content, space padded
    cells: [[u8; SCREEN_COLS]; SCREEN_ROWS],
    /// Cursor position (col, row)
    cursor: (u8, u8),
    /// Number of clears since creation
    clears: u32,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new blank screen
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; SCREEN_COLS]; SCREEN_ROWS],
            cursor: (0, 0),
            clears: 0,
        }
    }

    /// Get the content of a row with trailing blanks removed
    pub fn line(&self, row: usize) -> Option<&str> {
        let cells = self.cells.get(row)?;
        // Cells only ever hold printable ASCII
        core::str::from_utf8(cells).ok().map(str::trim_end)
    }

    /// Get all rows, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        (0..SCREEN_ROWS).filter_map(|row| self.line(row))
    }

    /// Current cursor position (col, row)
    pub fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// Number of times the screen has been cleared
    pub fn clear_count(&self) -> u32 {
        self.clears
    }

    /// Whether every cell is blank
    pub fn is_blank(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c == b' ')
    }

    fn put(&mut self, text: &str) {
        let (mut col, row) = (self.cursor.0 as usize, self.cursor.1 as usize);
        for ch in text.chars() {
            if col >= SCREEN_COLS {
                break;
            }
            self.cells[row][col] = rom_code(ch);
            col += 1;
        }
        self.cursor.0 = col as u8;
    }
}

impl CharDisplay for Screen {
    async fn clear(&mut self) -> Result<(), DisplayError> {
        self.cells = [[b' '; SCREEN_COLS]; SCREEN_ROWS];
        self.cursor = (0, 0);
        self.clears = self.clears.wrapping_add(1);
        Ok(())
    }

    async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col as usize >= SCREEN_COLS || row as usize >= SCREEN_ROWS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.cursor = (col, row);
        Ok(())
    }

    async fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        self.put(text);
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                defmt::write!(f, " | ");
            }
            defmt::write!(f, "{}", line);
        }
        defmt::write!(f, "]");
    }
}
