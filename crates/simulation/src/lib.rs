//! Message bus for the logical-clock peer network.
//!
//! The bus models an unordered network: it buffers every sent envelope and
//! delivers them one at a time, picking uniformly at random among whatever is
//! pending. Given the same seed and the same pushes it picks the same order
//! every run.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 MessageBus                   │
//! │                                              │
//! │  pending: Vec<Envelope<M>>  (order ignored)  │
//! │  rng:     ChaCha8Rng        (seeded)         │
//! └──────────────┬───────────────────────────────┘
//!                │ deliver_one: remove random envelope
//!                ▼
//! ┌──────────────────────────────────────────────┐
//! │  PeerDirectory ─► peer.receive(env, bus)     │
//! │  replies are pushed back onto the bus and    │
//! │  wait for a later step                       │
//! └──────────────────────────────────────────────┘
//! ```

mod bus;
mod directory;
mod error;

pub use bus::{BusStats, MessageBus};
pub use directory::{PeerDirectory, PeerTable};
pub use error::{DeliveryError, DuplicatePeerError};
