//! Receipt reported for each delivered envelope.

use pvtp_types::{Content, LogicalClock, PeerId};
use std::num::NonZeroU64;

/// What a peer observed when it accepted an envelope.
///
/// This is the reporting hook for whoever drives the network: who sent what,
/// and how many updates the receiver inferred it never saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Sender identity.
    pub from: PeerId,
    /// Receiver identity.
    pub to: PeerId,
    /// Received content.
    pub content: Content,
    /// Clock carried by the envelope, for peers that stamp messages.
    pub clock: Option<LogicalClock>,
    /// Number of lost messages, if a gap was detected.
    pub lost: Option<NonZeroU64>,
}

impl Receipt {
    /// Receipt for an unstamped message.
    pub fn plain(from: PeerId, to: PeerId, content: Content) -> Self {
        Self {
            from,
            to,
            content,
            clock: None,
            lost: None,
        }
    }

    /// Lost message count, zero when no gap was detected.
    pub fn lost_count(&self) -> u64 {
        self.lost.map_or(0, NonZeroU64::get)
    }
}
