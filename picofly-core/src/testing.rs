//! Shared mocks for host tests
//!
//! Every mock writes into one `EventLog` so tests can assert the order of
//! side effects across the indicator, the link and the display.

use core::cell::{Cell, RefCell};

use embedded_hal_async::delay::DelayNs;
use heapless::{Deque, String, Vec};
use picofly_display::{CharDisplay, DisplayError, Screen};
use picofly_hal::{LinkError, LinkStatus, OutputPin, SerialLink};

/// Observable side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Led(bool),
    WaitNs(u64),
    Read,
    LinkWrite(Vec<u8, 8>),
    Clear,
    Cursor(u8, u8),
    Text(String<16>),
}

impl Event {
    pub fn text(s: &str) -> Self {
        let mut text = String::new();
        for ch in s.chars() {
            if text.push(ch).is_err() {
                break;
            }
        }
        Event::Text(text)
    }

    pub fn link_write(data: &[u8]) -> Self {
        Event::LinkWrite(Vec::from_slice(data).unwrap())
    }
}

pub struct EventLog {
    events: RefCell<Vec<Event, 256>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn push(&self, event: Event) {
        self.events.borrow_mut().push(event).unwrap();
    }

    pub fn events(&self) -> Vec<Event, 256> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

pub struct LoggedPin<'a> {
    log: &'a EventLog,
    high: bool,
}

impl<'a> LoggedPin<'a> {
    pub fn new(log: &'a EventLog) -> Self {
        Self { log, high: false }
    }
}

impl OutputPin for LoggedPin<'_> {
    fn set_high(&mut self) {
        self.high = true;
        self.log.push(Event::Led(true));
    }

    fn set_low(&mut self) {
        self.high = false;
        self.log.push(Event::Led(false));
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

pub struct LoggedDelay<'a> {
    log: &'a EventLog,
}

impl<'a> LoggedDelay<'a> {
    pub fn new(log: &'a EventLog) -> Self {
        Self { log }
    }
}

impl DelayNs for LoggedDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::WaitNs(ns as u64));
    }
}

/// Link that connects after a number of polls and replays queued reads
pub struct ScriptedLink<'a> {
    log: &'a EventLog,
    connect_after: u32,
    polls: Cell<u32>,
    reads: Deque<Vec<u8, 8>, 16>,
    write_error: Option<LinkError>,
}

impl<'a> ScriptedLink<'a> {
    pub fn connected_after(log: &'a EventLog, polls: u32) -> Self {
        Self {
            log,
            connect_after: polls,
            polls: Cell::new(0),
            reads: Deque::new(),
            write_error: None,
        }
    }

    pub fn connected(log: &'a EventLog) -> Self {
        Self::connected_after(log, 0)
    }

    /// Queue the bytes returned by the next read
    pub fn queue_read(&mut self, data: &[u8]) {
        self.reads.push_back(Vec::from_slice(data).unwrap()).unwrap();
    }

    pub fn fail_writes(&mut self, error: LinkError) {
        self.write_error = Some(error);
    }

    pub fn polls(&self) -> u32 {
        self.polls.get()
    }
}

impl LinkStatus for ScriptedLink<'_> {
    fn is_connected(&self) -> bool {
        let n = self.polls.get();
        self.polls.set(n + 1);
        n >= self.connect_after
    }
}

impl SerialLink for ScriptedLink<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        self.log.push(Event::Read);
        match self.reads.pop_front() {
            Some(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                Ok(n)
            }
            None => Ok(0),
        }
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<(), LinkError> {
        if let Some(e) = self.write_error {
            return Err(e);
        }
        self.log.push(Event::link_write(data));
        Ok(())
    }
}

/// In-memory screen that logs every operation
pub struct LoggedScreen<'a> {
    log: &'a EventLog,
    pub screen: Screen,
    pub fail: bool,
}

impl<'a> LoggedScreen<'a> {
    pub fn new(log: &'a EventLog) -> Self {
        Self {
            log,
            screen: Screen::new(),
            fail: false,
        }
    }

    fn check(&self) -> Result<(), DisplayError> {
        if self.fail {
            Err(DisplayError::Communication)
        } else {
            Ok(())
        }
    }
}

impl CharDisplay for LoggedScreen<'_> {
    async fn clear(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.log.push(Event::Clear);
        self.screen.clear().await
    }

    async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        self.check()?;
        self.log.push(Event::Cursor(col, row));
        self.screen.set_cursor(col, row).await
    }

    async fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        self.check()?;
        self.log.push(Event::text(text));
        self.screen.write_str(text).await
    }
}
