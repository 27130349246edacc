//! Peer state machines.
//!
//! Two peers share the same send/receive contract:
//!
//! - [`BasePeer`] sends raw [`Content`](pvtp_types::Content) and reports
//!   arrivals. It is also the building block the clock peer wraps.
//! - [`ClockPeer`] stamps every send with its logical clock, detects gaps in
//!   the clocks it receives, max-merges, and acknowledges.
//!
//! # Receive pipeline of a clock peer
//!
//! ```text
//! envelope ─► routing check ─► gap check (pre-merge clock) ─► merge ─► ack?
//! ```
//!
//! All work is synchronous. Replies are pushed to the outbox and delivered in
//! a later bus step.

mod base;
mod clock;

pub use base::BasePeer;
pub use clock::{ClockPeer, PeerStats, ReplyPolicy};
