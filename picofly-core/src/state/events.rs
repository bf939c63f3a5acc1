//! Events that trigger state transitions

/// Events observed on the host link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Link monitor saw the host open the link
    Connected,
}
