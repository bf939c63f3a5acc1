//! Picofly - USB link bridge firmware
//!
//! Main firmware binary for the Raspberry Pi Pico. Blinks the onboard LED
//! until a host opens the USB serial port, then answers every 4-byte ping
//! with its hash while echoing the traffic on a 2x16 I2C character LCD.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, USB};
use embassy_rp::usb::Driver;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use picofly_core::config::BoardConfig;
use picofly_core::{Bridge, LinkMonitor};
use picofly_display::Hd44780;
use picofly_hal_rp2040::gpio::Indicator;

mod tasks;

use tasks::{bridge_task, usb_task, UsbStateHandler};

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
    I2C0_IRQ => embassy_rp::i2c::InterruptHandler<I2C0>;
});

// USB event handler (must live forever for the device)
static USB_HANDLER: StaticCell<UsbStateHandler> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Picofly firmware starting...");

    let board = BoardConfig::default();
    if let Err(e) = board.validate() {
        error!("Board configuration invalid: {:?}", e);
    }

    // Peripherals below are taken by type; the board description must agree
    defmt::debug_assert_eq!(board.indicator_pin, 25);
    defmt::debug_assert_eq!(board.sda_pin, 0);
    defmt::debug_assert_eq!(board.scl_pin, 1);

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Status LED (GPIO25), owned by the link monitor
    let indicator = Indicator::new(p.PIN_25);
    let monitor = LinkMonitor::new(indicator, Delay, board.blink);
    info!(
        "Indicator on GPIO{}: {}ms on / {}ms off",
        board.indicator_pin, board.blink.on_ms, board.blink.off_ms
    );

    // Character LCD on I2C0 (SDA=GPIO0, SCL=GPIO1)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = board.i2c.frequency;
    let bus = I2c::new_async(p.I2C0, p.PIN_1, p.PIN_0, Irqs, i2c_config);
    let mut lcd = Hd44780::new(bus, Delay, board.lcd);
    match lcd.init().await {
        Ok(()) => info!(
            "LCD initialized at {=u8:#04x} ({}x{}, {} Hz)",
            board.lcd.address, board.lcd.cols, board.lcd.rows, board.i2c.frequency
        ),
        Err(e) => error!("LCD init failed: {:?}", e),
    }

    // USB CDC-ACM host link
    let driver = Driver::new(p.USB, Irqs);
    let handler = USB_HANDLER.init(UsbStateHandler::new());
    let (device, link) = picofly_hal_rp2040::usb::build(driver, &board.usb, Some(handler));
    info!(
        "USB CDC-ACM configured ({=u16:#06x}:{=u16:#06x})",
        board.usb.vid, board.usb.pid
    );

    // Spawn tasks
    unwrap!(spawner.spawn(usb_task(device)));
    unwrap!(spawner.spawn(bridge_task(Bridge::new(link, lcd, monitor))));

    info!("All tasks spawned");
}
