//! Link monitor
//!
//! Blinks the status indicator until the host opens the link. The monitor
//! only polls connection status; it never reads from the link.

use embedded_hal_async::delay::DelayNs;
use picofly_hal::{LinkStatus, OutputPin};

use crate::config::BlinkConfig;

/// Status indicator driver for the disconnected phase
pub struct LinkMonitor<P, D> {
    indicator: P,
    delay: D,
    blink: BlinkConfig,
}

impl<P, D> LinkMonitor<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a monitor; the indicator starts off
    pub fn new(mut indicator: P, delay: D, blink: BlinkConfig) -> Self {
        indicator.set_low();
        Self {
            indicator,
            delay,
            blink,
        }
    }

    /// Blink until `link` reports a connection
    ///
    /// Status is polled before each on/off cycle, so a link that is already
    /// open returns immediately without touching the indicator. The
    /// indicator is left off on return.
    ///
    /// Returns the number of completed blink cycles.
    pub async fn wait_for_connection<L>(&mut self, link: &L) -> u32
    where
        L: LinkStatus + ?Sized,
    {
        let mut cycles: u32 = 0;

        while !link.is_connected() {
            self.indicator.set_high();
            self.delay.delay_ms(self.blink.on_ms).await;
            self.indicator.set_low();
            self.delay.delay_ms(self.blink.off_ms).await;
            cycles = cycles.wrapping_add(1);
        }

        if self.indicator.is_set_high() {
            self.indicator.set_low();
        }

        cycles
    }

    /// Current indicator state
    pub fn indicator_on(&self) -> bool {
        self.indicator.is_set_high()
    }
}
