//! The frozen matching handed back to callers.
//!
//! A [`Matching`] is an owned, identity-keyed copy of the final relation. It
//! exposes both directions of the mapping: provider → held clients and
//! client → provider-or-unmatched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Final assignment of clients to providers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Matching {
    /// Provider → held clients, in the provider's preference order
    by_provider: BTreeMap<String, Vec<String>>,

    /// Client → provider, `None` when unmatched
    by_client: BTreeMap<String, Option<String>>,

    /// Provider → capacity
    capacities: BTreeMap<String, u32>,

    /// Unmatched clients in input order
    unmatched: Vec<String>,
}

impl Matching {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a provider's final holding set.
    pub(crate) fn insert_provider(&mut self, id: String, capacity: u32, clients: Vec<String>) {
        self.capacities.insert(id.clone(), capacity);
        self.by_provider.insert(id, clients);
    }

    /// Record a client's final outcome.
    pub(crate) fn insert_client(&mut self, id: String, provider: Option<String>) {
        if provider.is_none() {
            self.unmatched.push(id.clone());
        }
        self.by_client.insert(id, provider);
    }

    /// Clients held by `provider`, most preferred first.
    pub fn clients_of(&self, provider: &str) -> Option<&[String]> {
        self.by_provider.get(provider).map(Vec::as_slice)
    }

    /// Provider holding `client`, or `None` if unmatched or unknown.
    pub fn provider_of(&self, client: &str) -> Option<&str> {
        self.by_client.get(client)?.as_deref()
    }

    /// Whether `client` and `provider` are matched to each other.
    pub fn is_matched(&self, client: &str, provider: &str) -> bool {
        self.provider_of(client) == Some(provider)
    }

    /// Clients left unmatched, in input order.
    pub fn unmatched_clients(&self) -> &[String] {
        &self.unmatched
    }

    /// Number of matched clients.
    pub fn matched_count(&self) -> usize {
        self.by_client.len() - self.unmatched.len()
    }

    /// Open seats per under-subscribed provider.
    ///
    /// Full providers are omitted.
    pub fn open_seats(&self) -> BTreeMap<&str, u32> {
        self.by_provider
            .iter()
            .filter_map(|(id, clients)| {
                let capacity = self.capacities.get(id).copied().unwrap_or(0);
                let held = clients.len() as u32;
                (held < capacity).then(|| (id.as_str(), capacity - held))
            })
            .collect()
    }

    /// Total unused capacity across all providers.
    pub fn total_open_seats(&self) -> u64 {
        self.open_seats().values().map(|&n| u64::from(n)).sum()
    }

    /// Whether `provider` holds fewer clients than its capacity.
    pub fn is_under_subscribed(&self, provider: &str) -> bool {
        match (self.by_provider.get(provider), self.capacities.get(provider)) {
            (Some(clients), Some(&capacity)) => (clients.len() as u32) < capacity,
            _ => false,
        }
    }

    /// Provider → held clients.
    pub fn by_provider(&self) -> &BTreeMap<String, Vec<String>> {
        &self.by_provider
    }

    /// Client → provider-or-unmatched.
    pub fn by_client(&self) -> &BTreeMap<String, Option<String>> {
        &self.by_client
    }

    /// Matched (client, provider) pairs in client identity order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_client
            .iter()
            .filter_map(|(c, p)| p.as_deref().map(|p| (c.as_str(), p)))
    }
}
