//! USB device task
//!
//! Runs the embassy-usb device state machine and logs bus events.

use defmt::*;
use embassy_usb::{Handler, UsbDevice};

use picofly_hal_rp2040::usb::UsbDriver;

/// Logs USB device state changes
pub struct UsbStateHandler {
    configured: bool,
}

impl UsbStateHandler {
    /// Create a handler for an unconfigured device
    pub const fn new() -> Self {
        Self { configured: false }
    }
}

impl Handler for UsbStateHandler {
    fn enabled(&mut self, enabled: bool) {
        if enabled {
            debug!("USB enabled");
        } else {
            info!("USB disabled");
        }
    }

    fn reset(&mut self) {
        trace!("USB bus reset");
        self.configured = false;
    }

    fn addressed(&mut self, addr: u8) {
        trace!("USB address {}", addr);
    }

    fn configured(&mut self, configured: bool) {
        if configured && !self.configured {
            info!("USB configured");
        }
        self.configured = configured;
    }

    fn suspended(&mut self, suspended: bool) {
        trace!("USB suspended: {}", suspended);
    }
}

/// USB device task - must run for the host link to make progress
#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) {
    info!("USB task started");
    device.run().await;
}
