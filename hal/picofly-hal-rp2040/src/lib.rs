//! RP2040-specific HAL for the link bridge firmware
//!
//! This crate provides RP2040 implementations of the shared `picofly-hal`
//! traits:
//!
//! - Status indicator on a GPIO output (implements `picofly_hal::OutputPin`)
//! - USB CDC-ACM endpoints (implement `picofly_hal::PacketPipe`; the
//!   buffered `UsbLink` is the `picofly_hal::SerialLink`)

#![no_std]

pub mod gpio;
pub mod usb;

// Re-export shared traits from picofly-hal for convenience
pub use picofly_hal::{LinkStatus, OutputPin as OutputPinTrait, SerialLink};
