//! Core types for the logical-clock peer network.
//!
//! Everything that flows between peers lives here: the identity that names a
//! peer, the Lamport-style clock each peer keeps, and the envelope the message
//! bus carries from a source to a destination.

mod identifiers;
mod message;

pub use identifiers::{LogicalClock, PeerId};
pub use message::{Content, Envelope, Stamped};
