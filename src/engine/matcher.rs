//! Deferred Acceptance round loop (client-proposing).
//!
//! ## Round Structure
//!
//! 1. **Propose**: every free client proposes to the best provider it has
//!    not yet proposed to, and its cursor moves past that provider.
//! 2. **Resolve**: each provider that received proposals keeps the top
//!    `capacity` of (held ∪ proposers) by its own ranking. This phase only
//!    reads the arena, so providers can be resolved in any order or in
//!    parallel.
//! 3. **Apply**: holding sets are replaced and every released client goes
//!    back to free if it has providers left, otherwise it is exhausted.
//!
//! The loop stops once no client is free. Every proposal advances a cursor,
//! so rounds and proposals are both bounded by the sum of client list
//! lengths.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use slab::Slab;
use tracing::{debug, info, Level};

use crate::config::MatchConfig;
use crate::error::ConfigError;
use crate::market::{Market, ProviderNode, Resolution};
use crate::types::{
    ClientSpec, MatchReceipt, Matching, Proposal, ProposalOutcome, ProviderSpec, Rejection,
    RoundRecord,
};

/// Result of running the engine to fixpoint.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Final stable, client-optimal matching
    pub matching: Matching,

    /// Rounds executed
    pub rounds: usize,

    /// Proposals sent
    pub proposals: usize,

    /// Per-round records (empty unless history is enabled)
    pub history: Vec<RoundRecord>,

    /// Run summary with state root
    pub receipt: MatchReceipt,

    /// Wall time of the run
    pub elapsed: Duration,
}

impl MatchResult {
    /// Whether every client ended up matched.
    pub fn all_matched(&self) -> bool {
        self.matching.unmatched_clients().is_empty()
    }
}

/// Runs Deferred Acceptance over a [`Market`].
///
/// The engine holds configuration only; all run state lives in the market.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: MatchConfig,
}

impl MatchingEngine {
    /// Engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a validated configuration.
    pub fn with_config(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Build a market from records with this engine's tie policy and run it.
    ///
    /// The market is returned alongside the result so callers can inspect
    /// the frozen arena or verify stability.
    pub fn solve(
        &self,
        providers: Vec<ProviderSpec>,
        clients: Vec<ClientSpec>,
    ) -> Result<(Market, MatchResult), ConfigError> {
        let mut market = Market::build(providers, clients, &self.config)?;
        let result = self.run(&mut market);
        Ok((market, result))
    }

    /// Run the market to fixpoint.
    ///
    /// Provisional state is reset first, so running twice on the same market
    /// gives the same result.
    pub fn run(&self, market: &mut Market) -> MatchResult {
        let start = Instant::now();
        let span = tracing::span!(
            Level::INFO,
            "engine.run",
            providers = market.provider_count(),
            clients = market.client_count()
        );
        let _guard = span.enter();

        market.reset();

        let mut free: Vec<usize> = market
            .clients()
            .iter()
            .filter(|(_, c)| c.has_remaining())
            .map(|(key, _)| key)
            .collect();

        let mut rounds = 0usize;
        let mut proposals = 0usize;
        let mut history = Vec::new();

        while !free.is_empty() {
            rounds += 1;
            let mut record = self.config.record_history.then(|| RoundRecord::new(rounds));
            let (providers, clients) = market.arenas_mut();

            // Propose
            let mut buckets: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
            let mut next_free = Vec::new();
            let mut round_proposals = 0usize;

            for &client in &free {
                let Some(provider) = clients[client].next_candidate() else {
                    continue;
                };
                round_proposals += 1;

                let considered = providers[provider].accepts(client);
                if considered {
                    buckets.entry(provider).or_default().push(client);
                } else if clients[client].has_remaining() {
                    next_free.push(client);
                }

                if let Some(record) = record.as_mut() {
                    record.proposals.push(Proposal {
                        client: clients[client].id.clone(),
                        provider: providers[provider].id.clone(),
                        outcome: if considered {
                            ProposalOutcome::Considered
                        } else {
                            ProposalOutcome::Unacceptable
                        },
                    });
                }
            }
            proposals += round_proposals;

            // Resolve
            let buckets: Vec<(usize, Vec<usize>)> = buckets.into_iter().collect();
            let resolutions = self.resolve_round(providers, &buckets);

            // Apply
            let mut rejections = 0usize;
            for Resolution {
                provider,
                kept,
                rejected,
            } in resolutions
            {
                for &(_, client) in &kept {
                    clients[client].hold(provider);
                }
                for client in rejected {
                    clients[client].release();
                    rejections += 1;
                    if clients[client].has_remaining() {
                        next_free.push(client);
                    }
                    if let Some(record) = record.as_mut() {
                        record.rejections.push(Rejection {
                            client: clients[client].id.clone(),
                            provider: providers[provider].id.clone(),
                        });
                    }
                }
                providers[provider].held.replace(kept);
            }

            if let Some(record) = record {
                history.push(record);
            }

            next_free.sort_unstable();
            next_free.dedup();
            debug!(
                round = rounds,
                proposals = round_proposals,
                rejections,
                free = next_free.len(),
                "round_complete"
            );
            free = next_free;
        }

        let matching = market.matching();
        let receipt = MatchReceipt::new(
            rounds as u64,
            proposals as u64,
            matching.matched_count() as u64,
            matching.unmatched_clients().len() as u64,
            matching.total_open_seats(),
            market.compute_state_root(),
        );
        let elapsed = start.elapsed();

        info!(
            rounds,
            proposals,
            matched = receipt.matched_clients,
            unmatched = receipt.unmatched_clients,
            elapsed_micros = elapsed.as_micros() as u64,
            "match_complete"
        );

        MatchResult {
            matching,
            rounds,
            proposals,
            history,
            receipt,
            elapsed,
        }
    }

    fn resolve_round(
        &self,
        providers: &Slab<ProviderNode>,
        buckets: &[(usize, Vec<usize>)],
    ) -> Vec<Resolution> {
        if self.config.parallel {
            resolve_parallel(providers, buckets)
        } else {
            resolve_sequential(providers, buckets)
        }
    }
}

fn resolve_sequential(
    providers: &Slab<ProviderNode>,
    buckets: &[(usize, Vec<usize>)],
) -> Vec<Resolution> {
    buckets
        .iter()
        .map(|(provider, proposers)| providers[*provider].resolve(*provider, proposers))
        .collect()
}

/// Providers only read their own node and their own proposals, so buckets
/// are independent. `collect` keeps bucket order, so the apply phase sees
/// the same sequence as the sequential path.
#[cfg(feature = "parallel")]
fn resolve_parallel(
    providers: &Slab<ProviderNode>,
    buckets: &[(usize, Vec<usize>)],
) -> Vec<Resolution> {
    use rayon::prelude::*;

    buckets
        .par_iter()
        .map(|(provider, proposers)| providers[*provider].resolve(*provider, proposers))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn resolve_parallel(
    providers: &Slab<ProviderNode>,
    buckets: &[(usize, Vec<usize>)],
) -> Vec<Resolution> {
    resolve_sequential(providers, buckets)
}

// ============================================================================
// Unit Tests
// ============================================================================
