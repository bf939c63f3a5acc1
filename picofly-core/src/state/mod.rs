//! Bridge state machine
//!
//! The bridge waits for the host once, then serves requests forever.

pub mod events;
pub mod machine;

pub use events::LinkEvent;
pub use machine::BridgeState;
