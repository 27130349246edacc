//! Lookup of peers by identity.

use crate::DuplicatePeerError;
use indexmap::IndexMap;
use pvtp_core::Peer;
use pvtp_types::PeerId;

/// Resolves a destination identity to the peer that handles it.
///
/// This is all the bus knows about peers.
pub trait PeerDirectory<M> {
    /// Get the peer registered under `id`.
    fn peer_mut(&mut self, id: &PeerId) -> Option<&mut dyn Peer<Message = M>>;
}

/// Peers keyed by identity, in registration order.
#[derive(Debug, Clone)]
pub struct PeerTable<P> {
    peers: IndexMap<PeerId, P>,
}

impl<P: Peer> PeerTable<P> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            peers: IndexMap::new(),
        }
    }

    /// Register a peer under its own identity.
    ///
    /// Identities are unique: a second peer with the same identity is
    /// rejected and the first one stays registered.
    pub fn insert(&mut self, peer: P) -> Result<(), DuplicatePeerError> {
        let id = peer.id().clone();
        if self.peers.contains_key(&id) {
            return Err(DuplicatePeerError(id));
        }
        self.peers.insert(id, peer);
        Ok(())
    }

    pub fn get(&self, id: &PeerId) -> Option<&P> {
        self.peers.get(id)
    }

    pub fn get_mut(&mut self, id: &PeerId) -> Option<&mut P> {
        self.peers.get_mut(id)
    }

    /// Peer registered at `index` (registration order).
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut P> {
        self.peers.get_index_mut(index).map(|(_, peer)| peer)
    }

    pub fn contains(&self, id: &PeerId) -> bool {
        self.peers.contains_key(id)
    }

    /// Identities in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &PeerId> {
        self.peers.keys()
    }

    /// Peers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.peers.values()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

impl<P: Peer> Default for PeerTable<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Peer> PeerDirectory<P::Message> for PeerTable<P> {
    fn peer_mut(&mut self, id: &PeerId) -> Option<&mut dyn Peer<Message = P::Message>> {
        self.peers
            .get_mut(id)
            .map(|peer| peer as &mut dyn Peer<Message = P::Message>)
    }
}
