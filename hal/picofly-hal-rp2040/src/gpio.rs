//! GPIO outputs
//!
//! Wraps embassy-rp's `Output` so the board-agnostic core can drive it.

use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::Peri;
use picofly_hal::OutputPin;

/// Status indicator LED (active high)
pub struct Indicator<'d> {
    pin: Output<'d>,
}

impl<'d> Indicator<'d> {
    /// Configure `pin` as an output, initially off
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Output::new(pin, Level::Low),
        }
    }
}

impl OutputPin for Indicator<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
