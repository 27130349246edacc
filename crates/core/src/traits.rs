//! Core traits for peers and outboxes.

use crate::{Receipt, RoutingError};
use pvtp_types::{Envelope, PeerId};

/// Sink for outgoing envelopes.
///
/// The message bus is the production implementation. `Vec<Envelope<M>>`
/// implements it too, which is handy for driving a single peer in isolation.
pub trait Outbox<M> {
    /// Buffer an envelope for later delivery. Always succeeds.
    fn push(&mut self, envelope: Envelope<M>);
}

impl<M> Outbox<M> for Vec<Envelope<M>> {
    fn push(&mut self, envelope: Envelope<M>) {
        Vec::push(self, envelope);
    }
}

/// A network participant that can be handed envelopes.
///
/// # Guarantees
///
/// - **Synchronous**: `receive` runs to completion before returning
/// - **No re-entrancy**: envelopes sent from `receive` are only buffered in
///   the outbox, never delivered within the same call
/// - **Routing check**: an envelope whose destination is not [`Peer::id`] is
///   rejected with [`RoutingError`] and leaves the peer untouched
pub trait Peer {
    /// Payload type this peer speaks on the wire.
    type Message;

    /// Identity of this peer.
    fn id(&self) -> &PeerId;

    /// Handle a delivered envelope.
    ///
    /// # Arguments
    ///
    /// * `envelope` - The delivered envelope, moved out of the bus
    /// * `outbox` - Where any replies are buffered
    fn receive(
        &mut self,
        envelope: Envelope<Self::Message>,
        outbox: &mut dyn Outbox<Self::Message>,
    ) -> Result<Receipt, RoutingError>;
}
