//! Post-hoc checks on a market's current relation.
//!
//! [`verify_stability`] reports every blocking pair together with any broken
//! structural invariant (over-capacity, unacceptable pair, holder mismatch).
//! It reads the market only and can be run after any engine run, or on a
//! relation built by hand in tests.

use serde::{Deserialize, Serialize};

use crate::market::Market;

/// A client and provider that would both rather be matched to each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockingPair {
    pub client: String,
    pub provider: String,
}

/// A broken structural invariant of the relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Violation {
    /// Provider holds more clients than its capacity.
    OverCapacity { provider: String, held: usize, capacity: u32 },
    /// Pair is matched but one side does not list the other.
    Unacceptable { client: String, provider: String },
    /// Provider's holding set and client's holder disagree.
    Inconsistent { client: String, provider: String },
}

/// Outcome of [`verify_stability`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StabilityReport {
    /// Blocking pairs in client arena order
    pub blocking_pairs: Vec<BlockingPair>,

    /// Structural violations
    pub violations: Vec<Violation>,
}

impl StabilityReport {
    /// No blocking pair and no violation.
    pub fn is_stable(&self) -> bool {
        self.blocking_pairs.is_empty() && self.violations.is_empty()
    }
}

/// Check the market's current relation.
///
/// A pair (c, p) blocks when both list each other, c strictly prefers p to
/// its current outcome (any listed provider beats unmatched), and p either
/// has a free seat or strictly prefers c to the worst client it holds.
pub fn verify_stability(market: &Market) -> StabilityReport {
    let providers = market.providers();
    let clients = market.clients();
    let mut report = StabilityReport::default();

    for (provider_key, provider) in providers.iter() {
        let held = provider.holding().len();
        if held > provider.capacity as usize {
            report.violations.push(Violation::OverCapacity {
                provider: provider.id.clone(),
                held,
                capacity: provider.capacity,
            });
        }
        for client_key in provider.held_clients() {
            let client = &clients[client_key];
            if client.held_by() != Some(provider_key) {
                report.violations.push(Violation::Inconsistent {
                    client: client.id.clone(),
                    provider: provider.id.clone(),
                });
            }
        }
    }

    for (client_key, client) in clients.iter() {
        let current = client.held_by();

        if let Some(holder) = current {
            let provider = &providers[holder];
            if !provider.holding().contains(client_key) {
                report.violations.push(Violation::Inconsistent {
                    client: client.id.clone(),
                    provider: provider.id.clone(),
                });
            }
            if !provider.accepts(client_key) || client.rank_of(holder).is_none() {
                report.violations.push(Violation::Unacceptable {
                    client: client.id.clone(),
                    provider: provider.id.clone(),
                });
            }
        }

        // Only providers ranked above the current holder can block.
        for &provider_key in client.preferences.iter() {
            if Some(provider_key) == current {
                break;
            }
            let provider = &providers[provider_key];
            let Some(rank) = provider.rank_of(client_key) else {
                continue;
            };
            let blocks = provider.has_vacancy()
                || provider.holding().worst().is_some_and(|(worst, _)| rank < worst);
            if blocks {
                report.blocking_pairs.push(BlockingPair {
                    client: client.id.clone(),
                    provider: provider.id.clone(),
                });
            }
        }
    }

    report
}
