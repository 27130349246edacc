//! Core traits for the peer network.
//!
//! The bus and the peers only meet through two narrow seams:
//!
//! - [`Outbox`]: where a peer puts the envelopes it sends
//! - [`Peer`]: how the bus hands a delivered envelope to its destination
//!
//! A peer never sees the bus itself, and the bus never sees peer state.

mod error;
mod receipt;
mod traits;

pub use error::RoutingError;
pub use receipt::Receipt;
pub use traits::{Outbox, Peer};
