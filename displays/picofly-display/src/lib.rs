//! Character display support for the link bridge
//!
//! This crate provides:
//! - `CharDisplay` trait for text-mode displays addressed by (column, row)
//! - `Hd44780` driver for HD44780 controllers behind a PCF8574 I2C backpack
//! - `Screen`, an in-memory display that mirrors what a panel would show
//!
//! # Architecture
//!
//! The bridge only ever talks to `CharDisplay`. On the Pico that is the
//! HD44780 driver running over `embedded-hal-async` I2C; on the host the
//! `Screen` stands in for the panel.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod hd44780;
pub mod screen;

// Re-export key types
pub use backend::{CharDisplay, DisplayError};
pub use hd44780::{Hd44780, Hd44780Config};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
