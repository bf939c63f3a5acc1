//! State machine definition

use super::events::LinkEvent;

/// Bridge states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeState {
    /// Host has not opened the link yet; indicator blinking
    #[default]
    WaitingForConnection,
    /// Answering pings; never left once entered
    Serving,
}

impl BridgeState {
    /// Check if requests may be read in this state
    pub fn is_serving(&self) -> bool {
        matches!(self, BridgeState::Serving)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use BridgeState::*;
        use LinkEvent::*;

        match (self, event) {
            (WaitingForConnection, Connected) => Serving,

            // Never left: reads block until the host reopens the link
            (Serving, Connected) => Serving,
        }
    }
}
