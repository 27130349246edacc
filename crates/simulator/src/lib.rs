//! Round-based driver for the logical-clock peer network.
//!
//! Everything the bus and the peers leave to the outside lives here: creating
//! the peer set, the opening broadcast, advancing the network round by round,
//! and summarizing what every peer saw.
//!
//! # Example
//!
//! ```ignore
//! use pvtp_simulator::{Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig::default().with_seed(7).with_rounds(5);
//! let mut simulator = Simulator::new(config)?;
//! simulator.bootstrap()?;
//! simulator.run(5)?;
//!
//! let report = simulator.report();
//! println!("lost: {}", report.total_lost());
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod runner;

pub use config::SimulatorConfig;
pub use error::SimulatorError;
pub use report::{PeerReport, SimulationReport};
pub use runner::Simulator;
