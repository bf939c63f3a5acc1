//! Link bridge
//!
//! Owns every hardware handle the application touches and runs one step of
//! the request loop at a time:
//!
//! ```text
//! WaitingForConnection ──(host opens link)──► Serving ─┐
//!        ▲ blink indicator                      ▲      │ read 4 bytes
//!        └──────────────┘                       └──────┘ show, reply
//! ```
//!
//! The firmware drives it with [`Bridge::wait_for_link`] once and then
//! [`Bridge::serve_once`] forever, logging each outcome.

use core::fmt::Write as _;

use embedded_hal_async::delay::DelayNs;
use heapless::String;
use picofly_display::{CharDisplay, DisplayError};
use picofly_hal::{LinkError, OutputPin, SerialLink};
use picofly_protocol::{PingReply, PingRequest, PING_SIZE};

use crate::link::LinkMonitor;
use crate::state::{BridgeState, LinkEvent};

/// Shown once the host has opened the link
pub const WAITING_TEXT: &str = "waiting";

/// Shown on the second row after a reply went out
pub const SENT_REPLY_TEXT: &str = "sent reply";

/// Longest first-row text: "read: " plus ten digits
const READ_LINE_LEN: usize = 16;

/// Errors from a bridge step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Host link failed
    Link(LinkError),
    /// Display failed
    Display(DisplayError),
    /// Requests are only read once the host has connected
    NotServing,
}

impl From<LinkError> for BridgeError {
    fn from(e: LinkError) -> Self {
        BridgeError::Link(e)
    }
}

impl From<DisplayError> for BridgeError {
    fn from(e: DisplayError) -> Self {
        BridgeError::Display(e)
    }
}

/// One answered request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Exchange {
    /// Request received from the host
    pub request: PingRequest,
    /// Reply written back
    pub reply: PingReply,
    /// First display failure during the exchange, if any
    ///
    /// The reply is sent regardless of display health.
    pub display_error: Option<DisplayError>,
}

/// Format the first display row for a request value
pub fn read_line(value: u32) -> String<READ_LINE_LEN> {
    let mut line = String::new();
    // "read: 4294967295" is exactly 16 characters
    let _ = write!(line, "read: {}", value);
    line
}

/// The link bridge
pub struct Bridge<L, S, P, D> {
    link: L,
    display: S,
    monitor: LinkMonitor<P, D>,
    state: BridgeState,
    exchanges: u32,
}

impl<L, S, P, D> Bridge<L, S, P, D>
where
    L: SerialLink,
    S: CharDisplay,
    P: OutputPin,
    D: DelayNs,
{
    /// Create a bridge in the `WaitingForConnection` state
    pub fn new(link: L, display: S, monitor: LinkMonitor<P, D>) -> Self {
        Self {
            link,
            display,
            monitor,
            state: BridgeState::WaitingForConnection,
            exchanges: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Number of requests answered so far
    pub fn exchanges(&self) -> u32 {
        self.exchanges
    }

    /// Wait for the host, then switch to serving
    ///
    /// Blinks the indicator until the link reports a connection, then
    /// clears the display and shows the waiting prompt. Does nothing once
    /// serving. Returns the number of blink cycles.
    pub async fn wait_for_link(&mut self) -> Result<u32, BridgeError> {
        if self.state.is_serving() {
            return Ok(0);
        }

        let cycles = self.monitor.wait_for_connection(&self.link).await;
        self.state = self.state.transition(LinkEvent::Connected);

        self.display.clear().await?;
        self.display.write_str(WAITING_TEXT).await?;

        Ok(cycles)
    }

    /// Run one request loop iteration
    ///
    /// Reads up to one request from the link. Fewer than [`PING_SIZE`]
    /// bytes (including none) are discarded without touching the display
    /// or the link and `Ok(None)` is returned; the caller retries at once.
    ///
    /// A complete request is shown as `read: <value>` on a cleared display,
    /// answered with its hash, then confirmed on the second row.
    pub async fn serve_once(&mut self) -> Result<Option<Exchange>, BridgeError> {
        if !self.state.is_serving() {
            return Err(BridgeError::NotServing);
        }

        let mut buf = [0u8; PING_SIZE];
        let n = self.link.read(&mut buf).await?.min(PING_SIZE);

        let request = match PingRequest::decode(&buf[..n]) {
            Ok(request) => request,
            Err(_) => return Ok(None),
        };

        let shown = self.show_request(&request).await;

        let reply = request.reply();
        self.link.write_all(&reply.encode()).await?;

        let confirmed = self.display.write_at(0, 1, SENT_REPLY_TEXT).await;

        self.exchanges = self.exchanges.wrapping_add(1);

        Ok(Some(Exchange {
            request,
            reply,
            display_error: shown.and(confirmed).err(),
        }))
    }

    async fn show_request(&mut self, request: &PingRequest) -> Result<(), DisplayError> {
        self.display.clear().await?;
        self.display.write_str(&read_line(request.value)).await
    }

    /// Get the display
    pub fn display(&self) -> &S {
        &self.display
    }

    /// Whether the status indicator is lit
    pub fn indicator_on(&self) -> bool {
        self.monitor.indicator_on()
    }
}
