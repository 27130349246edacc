//! Configuration types for the simulator.

use crate::SimulatorError;
use pvtp_peer::ReplyPolicy;
use std::collections::BTreeSet;
use std::time::Duration;

/// Configuration for a simulation run.
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Peer names, in creation order. The first one sends the greeting.
    pub peers: Vec<String>,

    /// Random seed for the bus delivery order.
    pub seed: u64,

    /// Number of delivery rounds to run after bootstrap.
    pub rounds: usize,

    /// How peers acknowledge what they receive.
    pub reply_policy: ReplyPolicy,

    /// Content of the opening broadcast.
    pub greeting: String,

    /// Wall-clock pause between rounds. Only the binary sleeps; the library
    /// never does.
    pub round_interval: Duration,

    /// Upper bound on deliveries for a single drain.
    pub max_steps_per_drain: u64,
}

impl SimulatorConfig {
    /// Create a configuration for the given peer names.
    pub fn new<I, S>(peers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            peers: peers.into_iter().map(Into::into).collect(),
            seed: 12345,
            rounds: 10,
            reply_policy: ReplyPolicy::default(),
            greeting: "hi!".to_string(),
            round_interval: Duration::from_secs(1),
            max_steps_per_drain: 10_000,
        }
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of rounds.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the reply policy used by every peer.
    pub fn with_reply_policy(mut self, policy: ReplyPolicy) -> Self {
        self.reply_policy = policy;
        self
    }

    /// Set the greeting text.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Set the pause between rounds.
    pub fn with_round_interval(mut self, interval: Duration) -> Self {
        self.round_interval = interval;
        self
    }

    /// Set the delivery cap for a single drain.
    pub fn with_max_steps_per_drain(mut self, max_steps: u64) -> Self {
        self.max_steps_per_drain = max_steps;
        self
    }

    /// Check the peer set: at least one peer, no repeated names.
    pub fn validate(&self) -> Result<(), SimulatorError> {
        if self.peers.is_empty() {
            return Err(SimulatorError::EmptyPeerSet);
        }
        let mut seen = BTreeSet::new();
        for name in &self.peers {
            if !seen.insert(name.as_str()) {
                return Err(SimulatorError::DuplicatePeerName(name.clone()));
            }
        }
        Ok(())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new(["A", "B", "C", "D", "E", "F", "G"])
    }
}
