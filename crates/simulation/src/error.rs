//! Error types for delivery.

use pvtp_core::RoutingError;
use pvtp_types::PeerId;
use thiserror::Error;

/// Errors while delivering an envelope.
///
/// Both variants point at a broken setup rather than a network condition;
/// the delivery call that hits one stops and returns it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// No peer with the destination identity is registered.
    #[error("No peer registered as {0}")]
    UnknownPeer(PeerId),

    /// The peer rejected the envelope as not addressed to it.
    #[error("Routing violation: {0}")]
    Routing(#[from] RoutingError),
}

/// A peer with this identity is already registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Peer {0} is already registered")]
pub struct DuplicatePeerError(pub PeerId);
