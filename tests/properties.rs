//! Property tests over seeded random markets.
//!
//! Small markets are checked against an exhaustive enumeration of every
//! stable matching; larger ones are checked for the structural invariants
//! only.

mod common;

use std::collections::BTreeSet;

use common::{all_stable_matchings, assignment_of, blocking_pairs, random_market, Ranks};
use deferred_acceptance::{verify_stability, MatchingEngine, ProviderSpec};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Seeds for exhaustive checks on small markets
const SMALL_SEEDS: u64 = 300;

/// Seeds for invariant checks on larger markets
const LARGE_SEEDS: u64 = 40;

// ============================================================================
// INVARIANTS
// ============================================================================

#[test]
fn capacity_and_acceptability_hold() {
    for seed in 0..LARGE_SEEDS {
        let (providers, clients) = random_market(seed, 12, 40, 4, 0.6);
        let ranks = Ranks::new(&providers, &clients);
        let (market, result) = MatchingEngine::new().solve(providers, clients).unwrap();

        for (provider, held) in result.matching.by_provider() {
            assert!(
                held.len() <= ranks.capacity[provider] as usize,
                "seed {seed}: {provider} over capacity"
            );
        }
        for (client, provider) in result.matching.pairs() {
            assert!(
                ranks.mutually_acceptable(client, provider),
                "seed {seed}: {client}-{provider} not mutually acceptable"
            );
        }
        assert!(verify_stability(&market).violations.is_empty(), "seed {seed}");
    }
}

#[test]
fn output_has_no_blocking_pair() {
    for seed in 0..LARGE_SEEDS {
        let (providers, clients) = random_market(seed, 10, 30, 3, 0.5);
        let ranks = Ranks::new(&providers, &clients);
        let (market, result) = MatchingEngine::new().solve(providers, clients).unwrap();

        let independent = blocking_pairs(&ranks, &assignment_of(&result.matching));
        assert!(independent.is_empty(), "seed {seed}: {independent:?}");

        let report = verify_stability(&market);
        assert!(report.is_stable(), "seed {seed}: {report:?}");
    }
}

#[test]
fn stability_checker_agrees_with_reference() {
    // Before the engine runs, everyone is unmatched.
    for seed in 0..LARGE_SEEDS {
        let (providers, clients) = random_market(seed, 4, 6, 2, 0.5);
        let ranks = Ranks::new(&providers, &clients);
        let market = deferred_acceptance::Market::new(providers, clients).unwrap();

        let mut reported: Vec<(String, String)> = verify_stability(&market)
            .blocking_pairs
            .into_iter()
            .map(|pair| (pair.client, pair.provider))
            .collect();
        reported.sort();

        let reference = blocking_pairs(&ranks, &assignment_of(&market.matching()));
        assert_eq!(reported, reference, "seed {seed}");
    }
}

#[test]
fn rounds_and_proposals_within_budget() {
    for seed in 0..LARGE_SEEDS {
        let (providers, clients) = random_market(seed, 8, 50, 3, 0.7);
        let (market, result) = MatchingEngine::new().solve(providers, clients).unwrap();

        let budget = market.proposal_budget();
        assert!(result.proposals <= budget, "seed {seed}");
        assert!(result.rounds <= budget, "seed {seed}");
        assert_eq!(result.receipt.proposals, result.proposals as u64);
    }
}

// ============================================================================
// OPTIMALITY (EXHAUSTIVE)
// ============================================================================

#[test]
fn client_optimal_among_all_stable_matchings() {
    for seed in 0..SMALL_SEEDS {
        let (providers, clients) = random_market(seed, 3, 5, 2, 0.7);
        let ranks = Ranks::new(&providers, &clients);
        let stable = all_stable_matchings(&ranks, &clients);
        let (_, result) = MatchingEngine::new()
            .solve(providers, clients.clone())
            .unwrap();
        let ours = assignment_of(&result.matching);

        assert!(stable.contains(&ours), "seed {seed}: output not in stable set");

        for other in &stable {
            for client in &clients {
                let mine = ranks.outcome_rank(&client.id, ours[&client.id].as_deref());
                let theirs = ranks.outcome_rank(&client.id, other[&client.id].as_deref());
                assert!(
                    mine <= theirs,
                    "seed {seed}: {} does better elsewhere",
                    client.id
                );
            }
        }
    }
}

#[test]
fn rural_hospitals_theorem() {
    for seed in 0..SMALL_SEEDS {
        let (providers, clients) = random_market(seed, 3, 5, 2, 0.8);
        let ranks = Ranks::new(&providers, &clients);
        let stable = all_stable_matchings(&ranks, &clients);
        let (_, result) = MatchingEngine::new()
            .solve(providers.clone(), clients)
            .unwrap();
        let matching = &result.matching;

        let matched: BTreeSet<&str> = matching.pairs().map(|(c, _)| c).collect();

        for other in &stable {
            let other_matched: BTreeSet<&str> = other
                .iter()
                .filter(|(_, p)| p.is_some())
                .map(|(c, _)| c.as_str())
                .collect();
            assert_eq!(matched, other_matched, "seed {seed}: matched set differs");

            for provider in &providers {
                let ours: BTreeSet<&str> = matching
                    .clients_of(&provider.id)
                    .unwrap()
                    .iter()
                    .map(String::as_str)
                    .collect();
                let theirs: BTreeSet<&str> = other
                    .iter()
                    .filter(|(_, p)| p.as_deref() == Some(provider.id.as_str()))
                    .map(|(c, _)| c.as_str())
                    .collect();

                assert_eq!(ours.len(), theirs.len(), "seed {seed}: {} load", provider.id);
                if matching.is_under_subscribed(&provider.id) {
                    assert_eq!(ours, theirs, "seed {seed}: {} set", provider.id);
                }
            }
        }
    }
}

#[test]
fn capacity_bump_on_undersubscribed_provider_is_inert() {
    for seed in 0..LARGE_SEEDS {
        let (providers, clients) = random_market(seed, 6, 20, 4, 0.5);
        let (_, before) = MatchingEngine::new()
            .solve(providers.clone(), clients.clone())
            .unwrap();

        let Some(target) = providers
            .iter()
            .find(|p| before.matching.is_under_subscribed(&p.id))
            .map(|p| p.id.clone())
        else {
            continue;
        };

        let raised: Vec<ProviderSpec> = providers
            .into_iter()
            .map(|p| {
                if p.id == target {
                    let capacity = p.capacity + 5;
                    p.with_capacity(capacity)
                } else {
                    p
                }
            })
            .collect();
        let (_, after) = MatchingEngine::new().solve(raised, clients).unwrap();

        assert_eq!(
            before.matching.clients_of(&target),
            after.matching.clients_of(&target),
            "seed {seed}"
        );
        assert_eq!(before.matching.by_client(), after.matching.by_client(), "seed {seed}");
    }
}

// ============================================================================
// DETERMINISM
// ============================================================================

#[test]
fn same_input_same_state_root() {
    for seed in 0..LARGE_SEEDS {
        let (providers, clients) = random_market(seed, 10, 40, 3, 0.6);
        let engine = MatchingEngine::new();
        let (_, a) = engine.solve(providers.clone(), clients.clone()).unwrap();
        let (mut market, b) = engine.solve(providers, clients).unwrap();
        let c = engine.run(&mut market);

        assert_eq!(a.matching, b.matching, "seed {seed}");
        assert_eq!(a.receipt, b.receipt, "seed {seed}");
        assert_eq!(b.receipt, c.receipt, "seed {seed}");
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_resolution_matches_sequential() {
    use deferred_acceptance::MatchConfig;

    let sequential = MatchingEngine::new();
    let parallel = MatchingEngine::with_config(MatchConfig::default().with_parallel(true)).unwrap();

    for seed in 0..LARGE_SEEDS {
        let (providers, clients) = random_market(seed, 30, 200, 5, 0.4);
        let (_, a) = sequential.solve(providers.clone(), clients.clone()).unwrap();
        let (_, b) = parallel.solve(providers, clients).unwrap();

        assert_eq!(a.matching, b.matching, "seed {seed}");
        assert_eq!(a.rounds, b.rounds, "seed {seed}");
        assert_eq!(a.receipt.state_root, b.receipt.state_root, "seed {seed}");
    }
}
