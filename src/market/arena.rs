//! Two-sided market: validated, arena-indexed agent storage.
//!
//! ## Architecture
//!
//! - **Slab** per side: providers and clients live in pre-allocated arenas and
//!   reference each other by slab key
//! - **HashMap** per side: identity → slab key, used at construction and for
//!   identity-based lookups
//! - **PreferenceList** per agent: rank table over partner keys, built once
//!
//! Construction validates every record and fails closed: nothing is dropped
//! or deduplicated.
//!
//! ## Example
//!
//! ```
//! use deferred_acceptance::{ClientSpec, Market, ProviderSpec};
//!
//! let market = Market::new(
//!     vec![ProviderSpec::new("P1", 1, ["C1"])],
//!     vec![ClientSpec::new("C1", ["P1"])],
//! )
//! .unwrap();
//!
//! assert_eq!(market.provider_count(), 1);
//! assert_eq!(market.provider_rank("P1", "C1"), Some(0));
//! assert_eq!(market.client_prefers("C1", "P1", "P1"), Some(false));
//! ```

use std::collections::HashMap;

use slab::Slab;
use tracing::warn;

use crate::config::MatchConfig;
use crate::error::ConfigError;
use crate::market::node::{ClientNode, ProviderNode};
use crate::types::{ClientSpec, MatchReceipt, Matching, PreferenceList, ProviderSpec};

/// Validated market ready to be run by the engine.
///
/// The market owns every agent record for its lifetime. The engine mutates
/// only holding sets and client cursors; preference data is immutable.
#[derive(Debug, Clone)]
pub struct Market {
    /// Provider arena
    providers: Slab<ProviderNode>,

    /// Client arena
    clients: Slab<ClientNode>,

    /// Provider identity to slab key
    provider_index: HashMap<String, usize>,

    /// Client identity to slab key
    client_index: HashMap<String, usize>,
}

impl Market {
    /// Build a market that rejects tied preferences.
    pub fn new(providers: Vec<ProviderSpec>, clients: Vec<ClientSpec>) -> Result<Self, ConfigError> {
        Self::build(providers, clients, &MatchConfig::default())
    }

    /// Build a market, resolving ties with `config.tie_break`.
    pub fn build(
        providers: Vec<ProviderSpec>,
        clients: Vec<ClientSpec>,
        config: &MatchConfig,
    ) -> Result<Self, ConfigError> {
        let provider_count = providers.len();
        let client_count = clients.len();
        Self::build_inner(providers, clients, config).map_err(|err| {
            warn!(
                error = %err,
                providers = provider_count,
                clients = client_count,
                "market_rejected"
            );
            err
        })
    }

    fn build_inner(
        providers: Vec<ProviderSpec>,
        clients: Vec<ClientSpec>,
        config: &MatchConfig,
    ) -> Result<Self, ConfigError> {
        let mut provider_arena = Slab::with_capacity(providers.len());
        let mut client_arena = Slab::with_capacity(clients.len());
        let mut provider_index = HashMap::with_capacity(providers.len());
        let mut client_index = HashMap::with_capacity(clients.len());

        // First pass: allocate slots so both sides can resolve identities.
        for spec in &providers {
            if provider_index.contains_key(&spec.id) {
                return Err(ConfigError::DuplicateProvider(spec.id.clone()));
            }
            let key = provider_arena.insert(ProviderNode::new(
                spec.id.clone(),
                spec.capacity,
                PreferenceList::empty(),
            ));
            provider_index.insert(spec.id.clone(), key);
        }
        for spec in &clients {
            if client_index.contains_key(&spec.id) {
                return Err(ConfigError::DuplicateClient(spec.id.clone()));
            }
            let key = client_arena.insert(ClientNode::new(spec.id.clone(), PreferenceList::empty()));
            client_index.insert(spec.id.clone(), key);
        }

        // Second pass: rankings over partner keys.
        for spec in &providers {
            let order = spec.preferences.resolve(&spec.id, config.tie_break)?;
            let keys = order
                .into_iter()
                .map(|client| {
                    client_index
                        .get(&client)
                        .copied()
                        .ok_or_else(|| ConfigError::UnknownClient {
                            provider: spec.id.clone(),
                            client,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let list = PreferenceList::new(keys).map_err(|dup| ConfigError::DuplicatePreference {
                agent: spec.id.clone(),
                partner: client_arena[dup].id.clone(),
            })?;
            provider_arena[provider_index[&spec.id]].preferences = list;
        }
        for spec in &clients {
            let order = spec.preferences.resolve(&spec.id, config.tie_break)?;
            let keys = order
                .into_iter()
                .map(|provider| {
                    provider_index
                        .get(&provider)
                        .copied()
                        .ok_or_else(|| ConfigError::UnknownProvider {
                            client: spec.id.clone(),
                            provider,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let list = PreferenceList::new(keys).map_err(|dup| ConfigError::DuplicatePreference {
                agent: spec.id.clone(),
                partner: provider_arena[dup].id.clone(),
            })?;
            client_arena[client_index[&spec.id]].preferences = list;
        }

        Ok(Self {
            providers: provider_arena,
            clients: client_arena,
            provider_index,
            client_index,
        })
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    #[inline]
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Sum of all provider capacities.
    pub fn total_capacity(&self) -> u64 {
        self.providers.iter().map(|(_, p)| u64::from(p.capacity)).sum()
    }

    /// Sum of all client preference-list lengths; bounds proposals and rounds.
    pub fn proposal_budget(&self) -> usize {
        self.clients.iter().map(|(_, c)| c.preferences.len()).sum()
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn provider(&self, id: &str) -> Option<&ProviderNode> {
        self.provider_index.get(id).map(|&key| &self.providers[key])
    }

    pub fn client(&self, id: &str) -> Option<&ClientNode> {
        self.client_index.get(id).map(|&key| &self.clients[key])
    }

    #[inline]
    pub fn provider_key(&self, id: &str) -> Option<usize> {
        self.provider_index.get(id).copied()
    }

    #[inline]
    pub fn client_key(&self, id: &str) -> Option<usize> {
        self.client_index.get(id).copied()
    }

    /// Provider's rank of a client, `None` if either is unknown or the
    /// client is unacceptable.
    pub fn provider_rank(&self, provider: &str, client: &str) -> Option<usize> {
        let client = self.client_key(client)?;
        self.provider(provider)?.rank_of(client)
    }

    /// Client's rank of a provider.
    pub fn client_rank(&self, client: &str, provider: &str) -> Option<usize> {
        let provider = self.provider_key(provider)?;
        self.client(client)?.rank_of(provider)
    }

    /// Whether `provider` strictly prefers client `a` to client `b`.
    ///
    /// `None` if either client is unacceptable to the provider.
    pub fn provider_prefers(&self, provider: &str, a: &str, b: &str) -> Option<bool> {
        let node = self.provider(provider)?;
        node.preferences
            .prefers(&self.client_key(a)?, &self.client_key(b)?)
    }

    /// Whether `client` strictly prefers provider `a` to provider `b`.
    pub fn client_prefers(&self, client: &str, a: &str, b: &str) -> Option<bool> {
        let node = self.client(client)?;
        node.preferences
            .prefers(&self.provider_key(a)?, &self.provider_key(b)?)
    }

    // ========================================================================
    // Arena Access (for the matching engine)
    // ========================================================================

    #[inline]
    pub fn providers(&self) -> &Slab<ProviderNode> {
        &self.providers
    }

    #[inline]
    pub fn clients(&self) -> &Slab<ClientNode> {
        &self.clients
    }

    /// Both arenas at once, for the engine's proposal and apply phases.
    #[inline]
    pub(crate) fn arenas_mut(&mut self) -> (&mut Slab<ProviderNode>, &mut Slab<ClientNode>) {
        (&mut self.providers, &mut self.clients)
    }

    /// Clear every holding set and client cursor.
    pub fn reset(&mut self) {
        for (_, provider) in self.providers.iter_mut() {
            provider.held.clear();
        }
        for (_, client) in self.clients.iter_mut() {
            client.reset();
        }
    }

    // ========================================================================
    // Result Extraction
    // ========================================================================

    /// Copy the current relation out as an identity-keyed [`Matching`].
    pub fn matching(&self) -> Matching {
        let mut matching = Matching::new();
        for (_, provider) in &self.providers {
            let held = provider
                .held_clients()
                .map(|c| self.clients[c].id.clone())
                .collect();
            matching.insert_provider(provider.id.clone(), provider.capacity, held);
        }
        for (_, client) in &self.clients {
            let holder = client.held_by().map(|p| self.providers[p].id.clone());
            matching.insert_client(client.id.clone(), holder);
        }
        matching
    }

    /// SHA-256 over the current relation in canonical order.
    ///
    /// Providers are encoded in ascending identity order, each followed by
    /// its held clients in ascending identity order. Strings are length
    /// prefixed (u64 little-endian) so distinct relations never collide on
    /// concatenation.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut providers: Vec<&ProviderNode> = self.providers.iter().map(|(_, p)| p).collect();
        providers.sort_by(|a, b| a.id.cmp(&b.id));

        let mut buf = Vec::new();
        for provider in providers {
            push_str(&mut buf, &provider.id);
            let mut held: Vec<&str> = provider
                .held_clients()
                .map(|c| self.clients[c].id.as_str())
                .collect();
            held.sort_unstable();
            buf.extend_from_slice(&(held.len() as u64).to_le_bytes());
            for id in held {
                push_str(&mut buf, id);
            }
        }
        MatchReceipt::compute_hash(&buf)
    }
}

fn push_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

// ============================================================================
// Unit Tests
// ============================================================================
