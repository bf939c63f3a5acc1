//! Host link protocol
//!
//! The host and the bridge exchange fixed-size, unframed messages over the
//! USB serial link:
//!
//! ```text
//! host → device   ┌──────────────────────┐
//!                 │ value: u32 LE (4B)   │
//!                 └──────────────────────┘
//! device → host   ┌──────────────────────┐
//!                 │ hash(value) LE (4B)  │
//!                 └──────────────────────┘
//! ```
//!
//! There is no start byte, length prefix or checksum. The reply lets the
//! host verify that the device really processed its request.

#![no_std]
#![deny(unsafe_code)]

pub mod hash;
pub mod ping;

pub use hash::{ping_hash, ping_hash_bytes, HASH_MULTIPLIER, HASH_SEED};
pub use ping::{PingError, PingReply, PingRequest, PING_SIZE};
