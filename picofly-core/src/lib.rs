//! Board-agnostic core logic for the link bridge firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Board configuration types and validation
//! - Bridge state machine (waiting for the host, serving requests)
//! - Link monitor (status indicator while the host is away)
//! - Request loop step: read a ping, show it, reply with its hash

#![no_std]
#![deny(unsafe_code)]

pub mod bridge;
pub mod config;
pub mod link;
pub mod state;

pub use bridge::{Bridge, BridgeError, Exchange};
pub use link::LinkMonitor;
pub use state::{BridgeState, LinkEvent};

#[cfg(test)]
mod testing;
