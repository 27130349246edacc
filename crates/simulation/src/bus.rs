//! Message bus with order-free delivery.

use crate::{DeliveryError, PeerDirectory};
use pvtp_core::{Outbox, Receipt};
use pvtp_types::Envelope;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, trace};

/// Counters for bus activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BusStats {
    /// Envelopes pushed.
    pub pushed: u64,
    /// Envelopes removed from the pending set and handed to a peer lookup.
    pub delivered: u64,
    /// Completed `deliver_all` rounds.
    pub rounds: u64,
    /// Largest pending set observed.
    pub peak_pending: usize,
}

/// Buffer of sent-but-undelivered envelopes.
///
/// Envelopes carry no order while pending. Each delivery step removes one
/// chosen uniformly at random, *before* the destination handler runs, so any
/// reply the handler pushes waits for a later step.
///
/// The bus is single-threaded; it is driven by whoever owns it.
#[derive(Debug)]
pub struct MessageBus<M> {
    pending: Vec<Envelope<M>>,
    rng: ChaCha8Rng,
    stats: BusStats,
}

impl<M> MessageBus<M> {
    /// Create an empty bus whose delivery order is derived from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            pending: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            stats: BusStats::default(),
        }
    }

    /// Number of envelopes waiting for delivery.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Envelopes waiting for delivery. The iteration order means nothing.
    pub fn pending(&self) -> impl Iterator<Item = &Envelope<M>> {
        self.pending.iter()
    }

    pub fn stats(&self) -> BusStats {
        self.stats
    }

    /// Deliver one pending envelope, chosen uniformly at random.
    ///
    /// Returns `Ok(None)` without doing anything when nothing is pending.
    /// The chosen envelope is gone from the bus whatever the outcome.
    pub fn deliver_one(
        &mut self,
        peers: &mut dyn PeerDirectory<M>,
    ) -> Result<Option<Receipt>, DeliveryError> {
        if self.pending.is_empty() {
            return Ok(None);
        }

        let index = self.rng.gen_range(0..self.pending.len());
        let envelope = self.pending.swap_remove(index);
        self.stats.delivered += 1;

        debug!(
            from = %envelope.source(),
            to = %envelope.destination(),
            remaining = self.pending.len(),
            "Delivering envelope"
        );

        let peer = peers
            .peer_mut(envelope.destination())
            .ok_or_else(|| DeliveryError::UnknownPeer(envelope.destination().clone()))?;
        let receipt = peer.receive(envelope, self)?;
        Ok(Some(receipt))
    }

    /// Deliver one round: exactly as many envelopes as are pending now.
    ///
    /// Envelopes pushed by handlers during the round stay pending for the
    /// next one, so a round always terminates even when every receipt
    /// produces a reply.
    pub fn deliver_all(
        &mut self,
        peers: &mut dyn PeerDirectory<M>,
    ) -> Result<Vec<Receipt>, DeliveryError> {
        let count = self.pending.len();
        let mut receipts = Vec::with_capacity(count);

        for _ in 0..count {
            if let Some(receipt) = self.deliver_one(peers)? {
                receipts.push(receipt);
            }
        }

        self.stats.rounds += 1;
        trace!(round = self.stats.rounds, delivered = count, "Round complete");
        Ok(receipts)
    }

    /// Deliver until nothing is pending.
    ///
    /// Does not return if the peers keep replying to each other. Use
    /// [`deliver_until_idle`](Self::deliver_until_idle) to bound it.
    pub fn deliver_forever(
        &mut self,
        peers: &mut dyn PeerDirectory<M>,
    ) -> Result<u64, DeliveryError> {
        let mut steps = 0;
        while self.deliver_one(peers)?.is_some() {
            steps += 1;
        }
        Ok(steps)
    }

    /// Deliver until nothing is pending or `max_steps` deliveries were made.
    ///
    /// Returns the number of deliveries.
    pub fn deliver_until_idle(
        &mut self,
        peers: &mut dyn PeerDirectory<M>,
        max_steps: u64,
    ) -> Result<u64, DeliveryError> {
        let mut steps = 0;
        while steps < max_steps && self.deliver_one(peers)?.is_some() {
            steps += 1;
        }
        Ok(steps)
    }
}

impl<M> Outbox<M> for MessageBus<M> {
    fn push(&mut self, envelope: Envelope<M>) {
        trace!(
            from = %envelope.source(),
            to = %envelope.destination(),
            "Buffering envelope"
        );
        self.pending.push(envelope);
        self.stats.pushed += 1;
        self.stats.peak_pending = self.stats.peak_pending.max(self.pending.len());
    }
}
