//! Shared helpers for integration tests.
//!
//! Markets are generated from a seeded ChaCha RNG so every failure can be
//! reproduced from its seed. The stability and enumeration helpers work
//! directly on the input records, independently of the engine's arena.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};

use deferred_acceptance::{ClientSpec, Matching, ProviderSpec};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Client → provider-or-unmatched.
pub type Assignment = BTreeMap<String, Option<String>>;

/// Generate a random market with strict lists.
///
/// Capacities are drawn from `0..=max_capacity`. Each agent lists each
/// partner with probability `density`, in shuffled order.
pub fn random_market(
    seed: u64,
    providers: usize,
    clients: usize,
    max_capacity: u32,
    density: f64,
) -> (Vec<ProviderSpec>, Vec<ClientSpec>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let provider_ids: Vec<String> = (0..providers).map(|i| format!("P{i}")).collect();
    let client_ids: Vec<String> = (0..clients).map(|i| format!("C{i}")).collect();

    let provider_specs = provider_ids
        .iter()
        .map(|id| {
            let capacity = rng.gen_range(0..=max_capacity);
            let prefs = random_list(&mut rng, &client_ids, density);
            ProviderSpec::new(id.clone(), capacity, prefs)
        })
        .collect();

    let client_specs = client_ids
        .iter()
        .map(|id| {
            let prefs = random_list(&mut rng, &provider_ids, density);
            ClientSpec::new(id.clone(), prefs)
        })
        .collect();

    (provider_specs, client_specs)
}

fn random_list(rng: &mut ChaCha8Rng, partners: &[String], density: f64) -> Vec<String> {
    let mut list: Vec<String> = partners
        .iter()
        .filter(|_| rng.gen_bool(density))
        .cloned()
        .collect();
    list.shuffle(rng);
    list
}

/// Rank tables built from the input records.
pub struct Ranks {
    pub provider: HashMap<String, HashMap<String, usize>>,
    pub client: HashMap<String, HashMap<String, usize>>,
    pub capacity: HashMap<String, u32>,
}

impl Ranks {
    pub fn new(providers: &[ProviderSpec], clients: &[ClientSpec]) -> Self {
        let provider = providers
            .iter()
            .map(|p| (p.id.clone(), rank_table(p.preferences.partners())))
            .collect();
        let client = clients
            .iter()
            .map(|c| (c.id.clone(), rank_table(c.preferences.partners())))
            .collect();
        let capacity = providers.iter().map(|p| (p.id.clone(), p.capacity)).collect();
        Self {
            provider,
            client,
            capacity,
        }
    }

    pub fn provider_rank(&self, provider: &str, client: &str) -> Option<usize> {
        self.provider.get(provider)?.get(client).copied()
    }

    pub fn client_rank(&self, client: &str, provider: &str) -> Option<usize> {
        self.client.get(client)?.get(provider).copied()
    }

    /// Client's rank of its outcome; unmatched ranks below every provider.
    pub fn outcome_rank(&self, client: &str, provider: Option<&str>) -> usize {
        provider
            .and_then(|p| self.client_rank(client, p))
            .unwrap_or(usize::MAX)
    }

    pub fn mutually_acceptable(&self, client: &str, provider: &str) -> bool {
        self.client_rank(client, provider).is_some()
            && self.provider_rank(provider, client).is_some()
    }
}

fn rank_table<'a>(partners: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    partners
        .enumerate()
        .map(|(rank, id)| (id.to_string(), rank))
        .collect()
}

pub fn assignment_of(matching: &Matching) -> Assignment {
    matching.by_client().clone()
}

/// Blocking pairs of an assignment, computed from the input records only.
pub fn blocking_pairs(ranks: &Ranks, assignment: &Assignment) -> Vec<(String, String)> {
    let mut held: HashMap<&str, Vec<&str>> = HashMap::new();
    for (client, provider) in assignment {
        if let Some(provider) = provider {
            held.entry(provider.as_str()).or_default().push(client.as_str());
        }
    }

    let mut pairs = Vec::new();
    for (client, current) in assignment {
        let current_rank = ranks.outcome_rank(client, current.as_deref());
        for (provider, &rank) in &ranks.client[client] {
            if rank >= current_rank {
                continue;
            }
            let Some(my_rank) = ranks.provider_rank(provider, client) else {
                continue;
            };
            let holding = held.get(provider.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            let capacity = ranks.capacity[provider] as usize;
            let blocks = holding.len() < capacity
                || holding
                    .iter()
                    .any(|other| ranks.provider_rank(provider, other).is_some_and(|r| my_rank < r));
            if blocks {
                pairs.push((client.clone(), provider.clone()));
            }
        }
    }
    pairs.sort();
    pairs
}

/// Every stable matching of a small market, by exhaustive search.
///
/// Each client is tried unmatched and with every mutually acceptable
/// provider; assignments over capacity or with a blocking pair are dropped.
pub fn all_stable_matchings(ranks: &Ranks, clients: &[ClientSpec]) -> Vec<Assignment> {
    let options: Vec<(String, Vec<Option<String>>)> = clients
        .iter()
        .map(|c| {
            let mut opts = vec![None];
            opts.extend(
                c.preferences
                    .partners()
                    .filter(|p| ranks.mutually_acceptable(&c.id, p))
                    .map(|p| Some(p.to_string())),
            );
            (c.id.clone(), opts)
        })
        .collect();

    let mut found = Vec::new();
    let mut current = Assignment::new();
    let mut load: HashMap<String, u32> = HashMap::new();
    search(ranks, &options, 0, &mut current, &mut load, &mut found);
    found
}

fn search(
    ranks: &Ranks,
    options: &[(String, Vec<Option<String>>)],
    index: usize,
    current: &mut Assignment,
    load: &mut HashMap<String, u32>,
    found: &mut Vec<Assignment>,
) {
    let Some((client, choices)) = options.get(index) else {
        if blocking_pairs(ranks, current).is_empty() {
            found.push(current.clone());
        }
        return;
    };

    for choice in choices {
        if let Some(provider) = choice {
            let used = load.get(provider).copied().unwrap_or(0);
            if used >= ranks.capacity[provider] {
                continue;
            }
            load.insert(provider.clone(), used + 1);
        }
        current.insert(client.clone(), choice.clone());

        search(ranks, options, index + 1, current, load, found);

        current.remove(client);
        if let Some(provider) = choice {
            if let Some(used) = load.get_mut(provider) {
                *used -= 1;
            }
        }
    }
}
