//! Ping request and reply messages

use crate::hash::ping_hash;

/// Size of a request and of a reply on the wire
pub const PING_SIZE: usize = 4;

/// Errors decoding a ping from received bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PingError {
    /// Fewer than [`PING_SIZE`] bytes arrived
    Incomplete {
        /// Number of bytes received
        received: usize,
    },
    /// More than [`PING_SIZE`] bytes were supplied
    Oversized {
        /// Number of bytes received
        received: usize,
    },
}

/// Numeric ping sent by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PingRequest {
    /// Value chosen by the host
    pub value: u32,
}

impl PingRequest {
    /// Create a request for a value
    pub const fn new(value: u32) -> Self {
        Self { value }
    }

    /// Decode a request from exactly [`PING_SIZE`] received bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, PingError> {
        let raw: [u8; PING_SIZE] = match bytes.len() {
            PING_SIZE => [bytes[0], bytes[1], bytes[2], bytes[3]],
            n if n < PING_SIZE => return Err(PingError::Incomplete { received: n }),
            n => return Err(PingError::Oversized { received: n }),
        };

        Ok(Self {
            value: u32::from_le_bytes(raw),
        })
    }

    /// Encode this request for the wire
    pub const fn encode(&self) -> [u8; PING_SIZE] {
        self.value.to_le_bytes()
    }

    /// Build the reply the device sends for this request
    pub const fn reply(&self) -> PingReply {
        PingReply {
            hash: ping_hash(self.value),
        }
    }
}

/// Hashed reply sent back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PingReply {
    /// Hash of the request value
    pub hash: u32,
}

impl PingReply {
    /// Encode this reply for the wire
    pub const fn encode(&self) -> [u8; PING_SIZE] {
        self.hash.to_le_bytes()
    }
}
