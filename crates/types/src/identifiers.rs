//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

/// Peer identity.
///
/// Unique within a simulation run and immutable for the lifetime of a peer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerId(String);

impl PeerId {
    /// Create a peer identity from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the underlying name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PeerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u/{}", self.0)
    }
}

/// Lamport-style logical clock value.
///
/// A peer's clock only ever moves forward: by one on send, or to the larger
/// of two values on receive.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LogicalClock(pub u64);

impl LogicalClock {
    /// Clock value of a freshly created peer.
    pub const ZERO: Self = LogicalClock(0);

    /// Get the next clock value.
    pub fn next(self) -> Self {
        LogicalClock(self.0.saturating_add(1))
    }

    /// Max-merge with an observed clock value.
    pub fn merge(self, observed: LogicalClock) -> Self {
        self.max(observed)
    }

    /// Number of clock values skipped between `self` and an incoming value.
    ///
    /// Returns `None` when `incoming <= self + 1`, otherwise the count of
    /// intermediate values never observed (`incoming - self - 1`, always >= 1).
    pub fn gap_to(self, incoming: LogicalClock) -> Option<NonZeroU64> {
        incoming
            .0
            .checked_sub(self.0)
            .and_then(|delta| delta.checked_sub(1))
            .and_then(NonZeroU64::new)
    }

    /// Get the raw value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LogicalClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_next_and_merge() {
        let c = LogicalClock::ZERO;
        assert_eq!(c.next(), LogicalClock(1));
        assert_eq!(LogicalClock(3).merge(LogicalClock(7)), LogicalClock(7));
        assert_eq!(LogicalClock(7).merge(LogicalClock(3)), LogicalClock(7));
    }

    #[test]
    fn test_gap_to() {
        // Next expected value or anything older is not a gap
        assert_eq!(LogicalClock(5).gap_to(LogicalClock(6)), None);
        assert_eq!(LogicalClock(5).gap_to(LogicalClock(5)), None);
        assert_eq!(LogicalClock(5).gap_to(LogicalClock(2)), None);

        assert_eq!(LogicalClock(5).gap_to(LogicalClock(9)), NonZeroU64::new(3));
        assert_eq!(LogicalClock(0).gap_to(LogicalClock(2)), NonZeroU64::new(1));
    }

    #[test]
    fn test_clock_saturates() {
        assert_eq!(LogicalClock(u64::MAX).next(), LogicalClock(u64::MAX));
    }

    #[test]
    fn test_peer_id_display() {
        let id = PeerId::from("A");
        assert_eq!(id.to_string(), "u/A");
        assert_eq!(id.as_str(), "A");
        assert!(PeerId::from("A") < PeerId::from("B"));
    }
}
