//! Embassy async tasks
//!
//! The bridge task is the single control loop; the USB task only runs the
//! device stack underneath the host link.

pub mod bridge;
pub mod usb;

pub use bridge::{bridge_task, FirmwareBridge};
pub use usb::{usb_task, UsbStateHandler};
