//! Configuration types
//!
//! The bridge has no config file; the board is described by typed constants
//! that the firmware reads at startup.

pub mod board;

pub use board::*;
