//! Deferred Acceptance - Binary Entry Point
//!
//! Runs a small services marketplace through the engine and prints the
//! matching, the run statistics and the receipt.
//!
//! Set `RUST_LOG=debug` to see per-round logs.

use deferred_acceptance::{
    verify_stability, ClientSpec, ConfigError, MatchConfig, MatchingEngine, ProviderSpec,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    println!("===========================================");
    println!("  Deferred Acceptance - Marketplace Demo");
    println!("===========================================");
    println!();

    let providers = vec![
        ProviderSpec::new("E1", 2, ["C2", "C1", "C3", "C4", "C5"]),
        ProviderSpec::new("E2", 2, ["C3", "C5", "C1", "C4", "C2"]),
        ProviderSpec::new("E3", 1, ["C1", "C2", "C5", "C3", "C4"]),
    ];
    let clients = vec![
        ClientSpec::new("C1", ["E1", "E2", "E3"]),
        ClientSpec::new("C2", ["E1", "E3", "E2"]),
        ClientSpec::new("C3", ["E2", "E1", "E3"]),
        ClientSpec::new("C4", ["E1", "E2", "E3"]),
        ClientSpec::new("C5", ["E2", "E3", "E1"]),
    ];

    let engine = MatchingEngine::with_config(MatchConfig::default().with_history(true))?;
    let (market, result) = engine.solve(providers, clients)?;

    println!("Rounds:");
    for round in &result.history {
        println!(
            "  #{:<3} proposals: {:>3}  rejections: {:>3}",
            round.round,
            round.proposals.len(),
            round.rejections.len()
        );
    }
    println!();

    println!("Matching:");
    for (provider, clients) in result.matching.by_provider() {
        println!("  {:<4} -> {:?}", provider, clients);
    }
    for client in result.matching.unmatched_clients() {
        println!("  {:<4} -> (unmatched)", client);
    }
    for (provider, seats) in result.matching.open_seats() {
        println!("  {:<4} has {} open seat(s)", provider, seats);
    }
    println!();

    let report = verify_stability(&market);
    println!("Stable:       {}", report.is_stable());
    println!("Proposals:    {}", result.proposals);
    println!("Elapsed:      {:.2?}", result.elapsed);
    println!("State root:   {}", result.receipt.state_root_hex());
    match ssz_rs::serialize(&result.receipt) {
        Ok(bytes) => println!("Receipt:      {} bytes (SSZ)", bytes.len()),
        Err(e) => println!("Receipt:      failed to serialize: {:?}", e),
    }

    Ok(())
}
