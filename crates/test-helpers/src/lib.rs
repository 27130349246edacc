//! Test helpers for the peer network.
//!
//! Shared fixtures so tests across crates build peers, envelopes, and
//! directories the same way.

use pvtp_core::Peer;
use pvtp_peer::{ClockPeer, ReplyPolicy};
use pvtp_simulation::{PeerDirectory, PeerTable};
use pvtp_types::{Content, Envelope, LogicalClock, PeerId, Stamped};

/// Identities for a list of names.
pub fn peer_ids(names: &[&str]) -> Vec<PeerId> {
    names.iter().map(|name| PeerId::from(*name)).collect()
}

/// Fresh clock peers (clock 0) with the given reply policy.
pub fn clock_peers(names: &[&str], policy: ReplyPolicy) -> Vec<ClockPeer> {
    peer_ids(names)
        .into_iter()
        .map(|id| ClockPeer::new(id).with_reply_policy(policy))
        .collect()
}

/// Directory of fresh clock peers, registered in the order given.
pub fn clock_table(names: &[&str], policy: ReplyPolicy) -> PeerTable<ClockPeer> {
    let mut table = PeerTable::new();
    for peer in clock_peers(names, policy) {
        table
            .insert(peer)
            .expect("fixture names must be unique");
    }
    table
}

/// Clock peer whose clock already reads `clock`.
pub fn clock_peer_at(name: &str, clock: u64, policy: ReplyPolicy) -> ClockPeer {
    ClockPeer::at_clock(PeerId::from(name), LogicalClock(clock)).with_reply_policy(policy)
}

/// Stamped envelope with text content.
pub fn stamped_envelope(from: &str, to: &str, clock: u64, text: &str) -> Envelope<Stamped> {
    Envelope::new(
        PeerId::from(from),
        PeerId::from(to),
        Stamped::new(LogicalClock(clock), Content::text(text)),
    )
}

/// Directory that hands every envelope to the same peer, whatever its
/// destination. Used to provoke routing violations.
pub struct MisroutingDirectory<P> {
    pub peer: P,
}

impl<P> MisroutingDirectory<P> {
    pub fn new(peer: P) -> Self {
        Self { peer }
    }
}

impl<P: Peer> PeerDirectory<P::Message> for MisroutingDirectory<P> {
    fn peer_mut(&mut self, _id: &PeerId) -> Option<&mut dyn Peer<Message = P::Message>> {
        Some(&mut self.peer as &mut dyn Peer<Message = P::Message>)
    }
}
