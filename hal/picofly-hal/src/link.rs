//! Host link abstractions
//!
//! The link is a point-to-point byte stream to the host (USB CDC-ACM on the
//! Pico). Connection status is owned by the transport and only polled here.

/// Errors reported by a serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Host went away mid-transfer
    Disconnected,
    /// Transport returned more data than fits in its buffer
    BufferOverflow,
}

/// Connection status of a link
pub trait LinkStatus {
    /// Whether the host side currently has the link open
    fn is_connected(&self) -> bool;
}

/// Bidirectional host byte stream
///
/// Reads return whatever is available in one transfer, up to `buf.len()`.
/// A short (or empty) read is not an error.
#[allow(async_fn_in_trait)]
pub trait SerialLink: LinkStatus {
    /// Read up to `buf.len()` bytes, waiting until at least one transfer
    /// completes
    ///
    /// Returns the number of bytes written into `buf`.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError>;

    /// Write all of `data` to the host
    async fn write_all(&mut self, data: &[u8]) -> Result<(), LinkError>;
}
