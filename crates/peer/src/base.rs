//! Plain peer without clock tracking.

use pvtp_core::{Outbox, Peer, Receipt, RoutingError};
use pvtp_types::{Content, Envelope, PeerId};
use std::fmt;
use tracing::{info, trace};

/// A network participant with an identity and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePeer {
    id: PeerId,
}

impl BasePeer {
    pub fn new(id: PeerId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &PeerId {
        &self.id
    }

    /// Wrap `payload` in an envelope from this peer and buffer it.
    pub fn send<M: fmt::Display>(
        &self,
        destination: PeerId,
        payload: M,
        outbox: &mut dyn Outbox<M>,
    ) {
        trace!(peer = %self.id, to = %destination, %payload, "send");
        outbox.push(Envelope::new(self.id.clone(), destination, payload));
    }

    /// Validate the destination and report the arrival.
    ///
    /// Nothing is logged for a misaddressed envelope; the error is returned
    /// before any reporting happens.
    pub fn accept<M: fmt::Display>(&self, envelope: &Envelope<M>) -> Result<(), RoutingError> {
        RoutingError::check(&self.id, envelope.source(), envelope.destination())?;
        info!(
            peer = %self.id,
            from = %envelope.source(),
            "[{}] received from {}: {}",
            self.id,
            envelope.source(),
            envelope.payload()
        );
        Ok(())
    }
}

impl Peer for BasePeer {
    type Message = Content;

    fn id(&self) -> &PeerId {
        &self.id
    }

    fn receive(
        &mut self,
        envelope: Envelope<Content>,
        _outbox: &mut dyn Outbox<Content>,
    ) -> Result<Receipt, RoutingError> {
        self.accept(&envelope)?;
        let (source, destination, content) = envelope.into_parts();
        Ok(Receipt::plain(source, destination, content))
    }
}
