//! Messages carried by the bus.

use crate::{LogicalClock, PeerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit of transfer between peers.
///
/// Built exactly once per send and never mutated afterwards. The bus owns it
/// while it is pending; delivery moves it into the destination's handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<M> {
    source: PeerId,
    destination: PeerId,
    payload: M,
}

impl<M> Envelope<M> {
    /// Create a new envelope.
    pub fn new(source: PeerId, destination: PeerId, payload: M) -> Self {
        Self {
            source,
            destination,
            payload,
        }
    }

    /// Sending peer.
    pub fn source(&self) -> &PeerId {
        &self.source
    }

    /// Peer this envelope is addressed to.
    pub fn destination(&self) -> &PeerId {
        &self.destination
    }

    /// Carried payload.
    pub fn payload(&self) -> &M {
        &self.payload
    }

    /// Split the envelope into `(source, destination, payload)`.
    pub fn into_parts(self) -> (PeerId, PeerId, M) {
        (self.source, self.destination, self.payload)
    }
}

impl<M: fmt::Display> fmt::Display for Envelope<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} {}", self.source, self.destination, self.payload)
    }
}

/// Application content exchanged by peers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Content {
    /// Arbitrary application text. Expects an acknowledgement.
    Text(String),

    /// Fixed acknowledgement. Terminal: never acknowledged in turn.
    Ack,
}

impl Content {
    /// Text carried by every acknowledgement.
    pub const ACK_TEXT: &'static str = "hi too !";

    /// Create text content.
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    /// Whether receiving this content calls for an acknowledgement.
    pub fn expects_reply(&self) -> bool {
        !matches!(self, Content::Ack)
    }

    /// Human-readable form of the content.
    pub fn as_str(&self) -> &str {
        match self {
            Content::Text(text) => text,
            Content::Ack => Self::ACK_TEXT,
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.as_str())
    }
}

/// Content stamped with the sender's logical clock at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamped {
    pub clock: LogicalClock,
    pub content: Content,
}

impl Stamped {
    pub fn new(clock: LogicalClock, content: Content) -> Self {
        Self { clock, content }
    }
}

impl fmt::Display for Stamped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.clock, self.content)
    }
}
