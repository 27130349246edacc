//! Logical-clock peer.
//!
//! Wraps a [`BasePeer`] and adds Lamport-style causal tracking:
//!
//! - **send**: increment the clock, then stamp the outgoing content with the
//!   new value
//! - **receive**: compare the incoming clock against the local clock *before*
//!   merging. Anything beyond `local + 1` means updates were never seen.
//!   Then max-merge and acknowledge according to the [`ReplyPolicy`].

use crate::BasePeer;
use pvtp_core::{Outbox, Peer, Receipt, RoutingError};
use pvtp_types::{Content, Envelope, LogicalClock, PeerId, Stamped};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// When a clock peer answers a received message with an acknowledgement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyPolicy {
    /// Acknowledge everything except acknowledgements.
    #[default]
    AckNonTerminal,

    /// Acknowledge every receipt, acknowledgements included.
    ///
    /// Every delivery produces a new envelope, so the bus never drains.
    AckEverything,

    /// Never reply.
    Silent,
}

impl ReplyPolicy {
    /// Whether receiving `content` should trigger an acknowledgement.
    pub fn should_reply(&self, content: &Content) -> bool {
        match self {
            ReplyPolicy::AckNonTerminal => content.expects_reply(),
            ReplyPolicy::AckEverything => true,
            ReplyPolicy::Silent => false,
        }
    }
}

/// Running counters for a clock peer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerStats {
    /// Envelopes sent (acknowledgements included).
    pub sent: u64,
    /// Envelopes accepted.
    pub received: u64,
    /// Sum of all reported gap sizes.
    pub lost: u64,
}

/// Peer that stamps its messages with a logical clock and detects gaps.
#[derive(Debug, Clone)]
pub struct ClockPeer {
    base: BasePeer,
    clock: LogicalClock,
    reply_policy: ReplyPolicy,
    stats: PeerStats,
}

impl ClockPeer {
    /// Create a peer with its clock at zero.
    pub fn new(id: PeerId) -> Self {
        Self {
            base: BasePeer::new(id),
            clock: LogicalClock::ZERO,
            reply_policy: ReplyPolicy::default(),
            stats: PeerStats::default(),
        }
    }

    /// Create a peer whose clock already reads `clock`.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn at_clock(id: PeerId, clock: LogicalClock) -> Self {
        Self {
            clock,
            ..Self::new(id)
        }
    }

    /// Set the reply policy.
    pub fn with_reply_policy(mut self, policy: ReplyPolicy) -> Self {
        self.reply_policy = policy;
        self
    }

    pub fn id(&self) -> &PeerId {
        self.base.id()
    }

    /// Current logical clock.
    pub fn clock(&self) -> LogicalClock {
        self.clock
    }

    pub fn reply_policy(&self) -> ReplyPolicy {
        self.reply_policy
    }

    pub fn stats(&self) -> PeerStats {
        self.stats
    }

    /// Tick the clock and send `content` stamped with the new value.
    ///
    /// Returns the clock value carried by the envelope.
    pub fn send(
        &mut self,
        destination: PeerId,
        content: Content,
        outbox: &mut dyn Outbox<Stamped>,
    ) -> LogicalClock {
        self.clock = self.clock.next();
        self.stats.sent += 1;
        self.base
            .send(destination, Stamped::new(self.clock, content), outbox);
        self.clock
    }
}

impl Peer for ClockPeer {
    type Message = Stamped;

    fn id(&self) -> &PeerId {
        self.base.id()
    }

    fn receive(
        &mut self,
        envelope: Envelope<Stamped>,
        outbox: &mut dyn Outbox<Stamped>,
    ) -> Result<Receipt, RoutingError> {
        self.base.accept(&envelope)?;
        let (source, destination, Stamped { clock: incoming, content }) = envelope.into_parts();

        // Gap is measured against the clock as it was before this receipt.
        let lost = self.clock.gap_to(incoming);
        if let Some(lost) = lost {
            warn!(
                peer = %destination,
                from = %source,
                local = self.clock.get(),
                incoming = incoming.get(),
                lost = lost.get(),
                "[{}] {} messages lost",
                destination,
                lost
            );
            self.stats.lost += lost.get();
        }

        self.clock = self.clock.merge(incoming);
        self.stats.received += 1;

        if self.reply_policy.should_reply(&content) {
            let stamped = self.send(source.clone(), Content::Ack, outbox);
            debug!(peer = %destination, to = %source, clock = stamped.get(), "acknowledged");
        }

        Ok(Receipt {
            from: source,
            to: destination,
            content,
            clock: Some(incoming),
            lost,
        })
    }
}
