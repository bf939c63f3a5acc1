//! Picofly Hardware Abstraction Layer
//!
//! This crate defines the hardware seams of the link bridge. Chip-specific
//! crates implement them, and the board-agnostic core is written against
//! them so it can be exercised on the host with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  picofly-core / picofly-firmware        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picofly-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ picofly-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Status indicator output
//! - [`link::LinkStatus`], [`link::SerialLink`] - Host byte stream
//! - [`packet::PacketPipe`] - Packet endpoints, turned into a byte stream by
//!   [`packet::PacketLink`]
//!
//! The display bus uses `embedded-hal-async`'s I2C trait directly; only its
//! configuration lives here ([`i2c::I2cConfig`]).

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod link;
pub mod packet;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use i2c::I2cConfig;
pub use link::{LinkError, LinkStatus, SerialLink};
pub use packet::{PacketLink, PacketPipe, MAX_PACKET_SIZE};
