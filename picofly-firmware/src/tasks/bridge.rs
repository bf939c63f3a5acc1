//! Bridge task
//!
//! Waits for the host, then answers pings forever. Every outcome is logged;
//! nothing is reported back to the host except replies.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;

use picofly_core::{Bridge, BridgeError};
use picofly_display::Hd44780;
use picofly_hal::LinkError;
use picofly_hal_rp2040::gpio::Indicator;
use picofly_hal_rp2040::usb::UsbLink;

/// Concrete bridge for the Pico board
pub type FirmwareBridge = Bridge<
    UsbLink<'static>,
    Hd44780<I2c<'static, I2C0, Async>, Delay>,
    Indicator<'static>,
    Delay,
>;

/// Bridge task - the request loop
#[embassy_executor::task]
pub async fn bridge_task(mut bridge: FirmwareBridge) {
    info!("Bridge task started, waiting for host");

    match bridge.wait_for_link().await {
        Ok(cycles) => info!("Host connected after {} blink cycles", cycles),
        Err(e) => warn!("Host connected, display not updated: {:?}", e),
    }
    info!("State: {:?}", bridge.state());

    loop {
        match bridge.serve_once().await {
            Ok(Some(exchange)) => {
                debug!(
                    "read {} -> reply {=u32:#010x}",
                    exchange.request.value, exchange.reply.hash
                );
                if let Some(e) = exchange.display_error {
                    warn!("Display update failed: {:?}", e);
                }
            }
            Ok(None) => {
                trace!("Incomplete request discarded");
            }
            Err(BridgeError::Link(LinkError::Disconnected)) => {
                debug!("Host closed the link");
            }
            Err(e) => {
                warn!("Request loop error: {:?}", e);
            }
        }
    }
}
