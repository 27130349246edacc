//! End-of-run summary.

use pvtp_peer::PeerStats;
use pvtp_simulation::BusStats;
use pvtp_types::{LogicalClock, PeerId};
use serde::Serialize;

/// State of one peer at report time.
#[derive(Debug, Clone, Serialize)]
pub struct PeerReport {
    pub id: PeerId,
    pub clock: LogicalClock,
    pub stats: PeerStats,
}

/// Snapshot of a simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Seed the bus was created with.
    pub seed: u64,
    /// Rounds completed.
    pub rounds: usize,
    /// Envelopes still waiting for delivery.
    pub pending: usize,
    pub bus: BusStats,
    /// Peers in creation order.
    pub peers: Vec<PeerReport>,
}

impl SimulationReport {
    /// Sum of every gap reported by every peer.
    pub fn total_lost(&self) -> u64 {
        self.peers.iter().map(|p| p.stats.lost).sum()
    }

    pub fn total_received(&self) -> u64 {
        self.peers.iter().map(|p| p.stats.received).sum()
    }

    /// Highest clock any peer reached.
    pub fn max_clock(&self) -> LogicalClock {
        self.peers
            .iter()
            .map(|p| p.clock)
            .max()
            .unwrap_or(LogicalClock::ZERO)
    }

    /// Print a human-readable summary to stdout.
    pub fn print(&self) {
        println!();
        println!("Simulation report (seed {})", self.seed);
        println!("  rounds:     {}", self.rounds);
        println!(
            "  envelopes:  {} pushed, {} delivered, {} pending (peak {})",
            self.bus.pushed, self.bus.delivered, self.pending, self.bus.peak_pending
        );
        println!("  lost total: {}", self.total_lost());
        println!();
        println!("  {:<10} {:>8} {:>8} {:>8} {:>8}", "peer", "clock", "sent", "recv", "lost");
        for peer in &self.peers {
            println!(
                "  {:<10} {:>8} {:>8} {:>8} {:>8}",
                peer.id.to_string(),
                peer.clock.get(),
                peer.stats.sent,
                peer.stats.received,
                peer.stats.lost
            );
        }
    }
}
