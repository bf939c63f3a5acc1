//! Packet-framed links
//!
//! USB bulk endpoints move data in packets of up to [`MAX_PACKET_SIZE`]
//! bytes. [`PacketLink`] turns such an endpoint into a [`SerialLink`]:
//!
//! - The unread remainder of a packet is kept, so several requests sent in
//!   one host write are consumed in order.
//! - Writes are split into packets; a final full packet is followed by a
//!   zero-length packet so the host flushes the transfer.
//! - Buffered bytes are dropped when the endpoint reports a disconnect.

use crate::link::{LinkError, LinkStatus, SerialLink};

/// Full-speed bulk packet size
pub const MAX_PACKET_SIZE: usize = 64;

/// Packet endpoint pair of a transport
#[allow(async_fn_in_trait)]
pub trait PacketPipe: LinkStatus {
    /// Largest packet the endpoints accept
    fn max_packet_size(&self) -> usize;

    /// Wait until the transport is configured by the host
    async fn wait_connection(&mut self);

    /// Receive one packet into `buf`, returning its length
    async fn read_packet(&mut self, buf: &mut [u8]) -> Result<usize, LinkError>;

    /// Send one packet of at most [`PacketPipe::max_packet_size`] bytes
    async fn write_packet(&mut self, data: &[u8]) -> Result<(), LinkError>;
}

/// Byte stream over a packet pipe
pub struct PacketLink<P> {
    pipe: P,
    /// Last received packet
    packet: [u8; MAX_PACKET_SIZE],
    /// Unread range of `packet`
    start: usize,
    end: usize,
}

impl<P: PacketPipe> PacketLink<P> {
    /// Wrap a packet pipe with an empty receive buffer
    pub fn new(pipe: P) -> Self {
        Self {
            pipe,
            packet: [0; MAX_PACKET_SIZE],
            start: 0,
            end: 0,
        }
    }

    /// Bytes received but not yet read
    pub fn buffered(&self) -> usize {
        self.end - self.start
    }

    /// Get the underlying pipe
    pub fn pipe(&self) -> &P {
        &self.pipe
    }

    fn packet_size(&self) -> usize {
        self.pipe.max_packet_size().clamp(1, MAX_PACKET_SIZE)
    }

    /// Drop buffered bytes if the host went away
    fn check<T>(&mut self, result: Result<T, LinkError>) -> Result<T, LinkError> {
        if let Err(LinkError::Disconnected) = result {
            self.start = 0;
            self.end = 0;
        }
        result
    }
}

impl<P: PacketPipe> LinkStatus for PacketLink<P> {
    fn is_connected(&self) -> bool {
        self.pipe.is_connected()
    }
}

impl<P: PacketPipe> SerialLink for PacketLink<P> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        if self.start == self.end {
            // Blocks while the host has the device unconfigured
            self.pipe.wait_connection().await;
            let size = self.packet_size();
            let result = self.pipe.read_packet(&mut self.packet[..size]).await;
            let n = self.check(result)?.min(size);
            self.start = 0;
            self.end = n;
        }

        let n = self.buffered().min(buf.len());
        buf[..n].copy_from_slice(&self.packet[self.start..self.start + n]);
        self.start += n;
        Ok(n)
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<(), LinkError> {
        let max = self.packet_size();

        for chunk in data.chunks(max) {
            let result = self.pipe.write_packet(chunk).await;
            self.check(result)?;
        }

        if !data.is_empty() && data.len() % max == 0 {
            let result = self.pipe.write_packet(&[]).await;
            self.check(result)?;
        }

        Ok(())
    }
}
