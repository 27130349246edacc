//! Logical-clock network simulator CLI
//!
//! Creates a set of clock peers, has the first one greet everybody, then
//! advances the network one delivery round at a time.

use clap::Parser;
use pvtp_peer::ReplyPolicy;
use pvtp_simulator::{Simulator, SimulatorConfig};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pvtp-sim")]
#[command(about = "Simulate logical-clock peers over an unordered message bus")]
#[command(version)]
struct Cli {
    /// Peer names (comma-separated). The first one sends the greeting.
    #[arg(short, long, value_delimiter = ',', default_value = "A,B,C,D,E,F,G")]
    peers: Vec<String>,

    /// Seed for the delivery order
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Number of delivery rounds after the greeting
    #[arg(short, long, default_value = "10")]
    rounds: usize,

    /// Reply policy (ack-non-terminal, ack-everything, silent)
    #[arg(long, default_value = "ack-non-terminal")]
    reply_policy: String,

    /// Pause between rounds in milliseconds
    #[arg(long, default_value = "1000")]
    interval_ms: u64,

    /// Content of the opening broadcast
    #[arg(long, default_value = "hi!")]
    greeting: String,

    /// Stop early once nothing is left to deliver
    #[arg(long)]
    stop_when_idle: bool,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_reply_policy(s: &str) -> Result<ReplyPolicy, String> {
    match s.to_lowercase().as_str() {
        "ack-non-terminal" | "default" => Ok(ReplyPolicy::AckNonTerminal),
        "ack-everything" | "always" => Ok(ReplyPolicy::AckEverything),
        "silent" | "none" => Ok(ReplyPolicy::Silent),
        _ => Err(format!("Unknown reply policy: {}", s)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SimulatorConfig::new(cli.peers)
        .with_seed(cli.seed)
        .with_rounds(cli.rounds)
        .with_reply_policy(parse_reply_policy(&cli.reply_policy)?)
        .with_greeting(cli.greeting)
        .with_round_interval(Duration::from_millis(cli.interval_ms));

    let mut simulator = Simulator::new(config)?;
    simulator.bootstrap()?;

    let interval = simulator.config().round_interval;
    for _ in 0..simulator.config().rounds {
        if cli.stop_when_idle && simulator.bus().is_empty() {
            break;
        }
        simulator.run_round()?;
        std::thread::sleep(interval);
    }

    let report = simulator.report();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }

    Ok(())
}
