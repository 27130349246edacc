//! Simulation driver.

use crate::{PeerReport, SimulationReport, SimulatorConfig, SimulatorError};
use pvtp_core::Receipt;
use pvtp_peer::ClockPeer;
use pvtp_simulation::{MessageBus, PeerTable};
use pvtp_types::{Content, PeerId, Stamped};
use tracing::{debug, info};

/// Owns a bus and a set of clock peers and advances them in rounds.
///
/// Pacing (sleeping between rounds) is left to the caller.
pub struct Simulator {
    config: SimulatorConfig,
    bus: MessageBus<Stamped>,
    peers: PeerTable<ClockPeer>,
    rounds_run: usize,
}

impl Simulator {
    /// Create the bus and one clock peer per configured name.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulatorError> {
        config.validate()?;

        let mut peers = PeerTable::new();
        for name in &config.peers {
            peers.insert(
                ClockPeer::new(PeerId::new(name.as_str())).with_reply_policy(config.reply_policy),
            )?;
        }

        info!(
            peers = peers.len(),
            seed = config.seed,
            policy = ?config.reply_policy,
            "Simulator created"
        );

        Ok(Self {
            bus: MessageBus::new(config.seed),
            peers,
            config,
            rounds_run: 0,
        })
    }

    /// Opening move: the first peer greets every peer, itself included,
    /// then one envelope is delivered.
    pub fn bootstrap(&mut self) -> Result<Option<Receipt>, SimulatorError> {
        let ids: Vec<PeerId> = self.peers.ids().cloned().collect();
        let greeting = Content::text(self.config.greeting.as_str());

        let Some(first) = self.peers.get_index_mut(0) else {
            return Err(SimulatorError::EmptyPeerSet);
        };
        for id in ids {
            first.send(id, greeting.clone(), &mut self.bus);
        }
        debug!(pending = self.bus.pending_len(), "Greeting broadcast");

        Ok(self.bus.deliver_one(&mut self.peers)?)
    }

    /// Deliver one round (everything pending when the round starts).
    pub fn run_round(&mut self) -> Result<Vec<Receipt>, SimulatorError> {
        let receipts = self.bus.deliver_all(&mut self.peers)?;
        self.rounds_run += 1;

        let lost: u64 = receipts.iter().map(Receipt::lost_count).sum();
        debug!(
            round = self.rounds_run,
            delivered = receipts.len(),
            lost,
            pending = self.bus.pending_len(),
            "Round finished"
        );
        Ok(receipts)
    }

    /// Run `rounds` rounds back to back.
    ///
    /// Returns the total number of deliveries.
    pub fn run(&mut self, rounds: usize) -> Result<usize, SimulatorError> {
        let mut delivered = 0;
        for _ in 0..rounds {
            delivered += self.run_round()?.len();
        }
        Ok(delivered)
    }

    /// Deliver until the bus is empty or the configured step cap is hit.
    pub fn drain(&mut self) -> Result<u64, SimulatorError> {
        let steps = self
            .bus
            .deliver_until_idle(&mut self.peers, self.config.max_steps_per_drain)?;
        if !self.bus.is_empty() {
            info!(
                steps,
                pending = self.bus.pending_len(),
                "Drain stopped at step cap"
            );
        }
        Ok(steps)
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn bus(&self) -> &MessageBus<Stamped> {
        &self.bus
    }

    pub fn peers(&self) -> &PeerTable<ClockPeer> {
        &self.peers
    }

    pub fn peer(&self, id: &PeerId) -> Option<&ClockPeer> {
        self.peers.get(id)
    }

    /// Rounds completed so far.
    pub fn rounds_run(&self) -> usize {
        self.rounds_run
    }

    /// Snapshot of every peer and of the bus.
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            seed: self.config.seed,
            rounds: self.rounds_run,
            pending: self.bus.pending_len(),
            bus: self.bus.stats(),
            peers: self
                .peers
                .iter()
                .map(|peer| PeerReport {
                    id: peer.id().clone(),
                    clock: peer.clock(),
                    stats: peer.stats(),
                })
                .collect(),
        }
    }
}
