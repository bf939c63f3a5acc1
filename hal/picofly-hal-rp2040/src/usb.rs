//! USB CDC-ACM host link
//!
//! The Pico enumerates as a virtual serial port. The host "connects" by
//! opening the port, which asserts DTR.
//!
//! [`CdcPipe`] exposes the class endpoints as packets; [`UsbLink`] wraps it
//! in `picofly_hal::PacketLink` for buffering and write chunking.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Handler, UsbDevice};
use picofly_core::config::UsbIdentity;
use picofly_hal::{LinkError, LinkStatus, PacketLink, PacketPipe, MAX_PACKET_SIZE};
use static_cell::StaticCell;

/// USB driver type for the RP2040
pub type UsbDriver = Driver<'static, USB>;

/// Host link over USB
pub type UsbLink<'d> = PacketLink<CdcPipe<'d>>;

/// Map an endpoint error to a link error
pub fn link_error(e: EndpointError) -> LinkError {
    match e {
        EndpointError::BufferOverflow => LinkError::BufferOverflow,
        EndpointError::Disabled => LinkError::Disconnected,
    }
}

/// Packet endpoints of a CDC-ACM interface
pub struct CdcPipe<'d> {
    class: CdcAcmClass<'d, Driver<'d, USB>>,
}

impl<'d> CdcPipe<'d> {
    /// Wrap a CDC-ACM class
    pub fn new(class: CdcAcmClass<'d, Driver<'d, USB>>) -> Self {
        Self { class }
    }
}

impl LinkStatus for CdcPipe<'_> {
    fn is_connected(&self) -> bool {
        self.class.dtr()
    }
}

impl PacketPipe for CdcPipe<'_> {
    fn max_packet_size(&self) -> usize {
        self.class.max_packet_size() as usize
    }

    async fn wait_connection(&mut self) {
        self.class.wait_connection().await;
    }

    async fn read_packet(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        self.class.read_packet(buf).await.map_err(link_error)
    }

    async fn write_packet(&mut self, data: &[u8]) -> Result<(), LinkError> {
        self.class.write_packet(data).await.map_err(link_error)
    }
}

/// Build the USB device and its CDC-ACM link
///
/// Must be called once; descriptor buffers live in static cells. The
/// returned device must be run (`UsbDevice::run`) for the link to work.
pub fn build(
    driver: UsbDriver,
    identity: &UsbIdentity,
    handler: Option<&'static mut dyn Handler>,
) -> (UsbDevice<'static, UsbDriver>, UsbLink<'static>) {
    static CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static MSOS_DESC: StaticCell<[u8; 128]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
    static CDC_STATE: StaticCell<State<'static>> = StaticCell::new();

    let mut config = embassy_usb::Config::new(identity.vid, identity.pid);
    config.manufacturer = Some(identity.manufacturer);
    config.product = Some(identity.product);
    config.serial_number = Some(identity.serial_number);
    config.max_power = identity.max_power_ma;
    config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESC.init([0; 256]),
        BOS_DESC.init([0; 256]),
        MSOS_DESC.init([0; 128]),
        CONTROL_BUF.init([0; 64]),
    );

    if let Some(handler) = handler {
        builder.handler(handler);
    }

    let class = CdcAcmClass::new(
        &mut builder,
        CDC_STATE.init(State::new()),
        MAX_PACKET_SIZE as u16,
    );
    let device = builder.build();

    (device, PacketLink::new(CdcPipe::new(class)))
}
