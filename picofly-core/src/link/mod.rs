//! Host link supervision

pub mod monitor;

pub use monitor::LinkMonitor;
