//! Error types for the simulator.

use pvtp_simulation::{DeliveryError, DuplicatePeerError};
use thiserror::Error;

/// Errors while setting up or driving a simulation.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// The configuration names no peers.
    #[error("Simulation needs at least one peer")]
    EmptyPeerSet,

    /// The same name appears twice in the configuration.
    #[error("Peer name {0:?} appears more than once")]
    DuplicatePeerName(String),

    /// Registering a peer failed.
    #[error(transparent)]
    DuplicatePeer(#[from] DuplicatePeerError),

    /// Delivery failed. Always a setup or routing bug.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
