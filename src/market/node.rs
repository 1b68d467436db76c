//! Arena records for providers and clients.
//!
//! ## Slab Integration
//!
//! Both node types live in a [`slab::Slab`] owned by the
//! [`Market`](crate::Market). Partners are referenced by slab key
//! (`usize`), never by reference, so preference lists, holding sets and
//! client cursors are plain integers the engine can copy freely.
//!
//! Preference data is fixed at construction. The only fields the engine
//! mutates are a provider's [`HoldingSet`] and a client's cursor and holder.

use crate::market::holding::{Held, HoldingSet};
use crate::types::PreferenceList;

// ============================================================================
// ProviderNode
// ============================================================================

/// A provider's record: identity, capacity, ranking over client keys, and
/// its provisional holding set.
#[derive(Debug, Clone)]
pub struct ProviderNode {
    /// Provider identity
    pub id: String,

    /// Fixed capacity for the run
    pub capacity: u32,

    /// Ranking over client slab keys
    pub preferences: PreferenceList<usize>,

    /// Clients currently held
    pub(crate) held: HoldingSet,
}

/// A provider's answer to one round of proposals.
///
/// Computed from a shared borrow of the node, so a round can resolve every
/// provider before any of them is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Slab key of the responding provider
    pub provider: usize,

    /// New holding set, best first
    pub kept: Vec<Held>,

    /// Clients released, both new proposers and bumped holders
    pub rejected: Vec<usize>,
}

impl ProviderNode {
    /// Create a provider node with an empty holding set.
    pub fn new(id: String, capacity: u32, preferences: PreferenceList<usize>) -> Self {
        Self {
            id,
            capacity,
            preferences,
            held: HoldingSet::new(capacity),
        }
    }

    /// Whether the provider lists `client` at all.
    #[inline]
    pub fn accepts(&self, client: usize) -> bool {
        self.preferences.accepts(&client)
    }

    /// Provider's rank of `client`.
    #[inline]
    pub fn rank_of(&self, client: usize) -> Option<usize> {
        self.preferences.rank(&client)
    }

    #[inline]
    pub fn has_vacancy(&self) -> bool {
        self.held.has_vacancy()
    }

    #[inline]
    pub fn open_seats(&self) -> usize {
        self.held.open_seats()
    }

    /// Least preferred client currently held.
    pub fn worst_held(&self) -> Option<usize> {
        self.held.worst().map(|(_, c)| c)
    }

    /// Held client keys, best first.
    pub fn held_clients(&self) -> impl Iterator<Item = usize> + '_ {
        self.held.clients()
    }

    pub fn holding(&self) -> &HoldingSet {
        &self.held
    }

    /// Weigh `proposers` against the current holding set.
    ///
    /// Proposers the provider does not list are rejected outright; the engine
    /// normally filters those before they get here.
    pub fn resolve(&self, key: usize, proposers: &[usize]) -> Resolution {
        let mut candidates = Vec::with_capacity(proposers.len());
        let mut rejected = Vec::new();
        for &client in proposers {
            match self.rank_of(client) {
                Some(rank) => candidates.push((rank, client)),
                None => rejected.push(client),
            }
        }
        let (kept, bumped) = self.held.merge(&candidates);
        rejected.extend(bumped);
        Resolution {
            provider: key,
            kept,
            rejected,
        }
    }
}

// ============================================================================
// ClientNode
// ============================================================================

/// Where a client stands in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientState {
    /// Not held, and at least one provider left to propose to.
    Free,
    /// Provisionally held by the provider with this slab key.
    Held(usize),
    /// Rejected by every listed provider; unmatched at termination.
    Exhausted,
}

/// A client's record: identity, ranking over provider keys, the proposal
/// cursor, and the provider currently holding it.
#[derive(Debug, Clone)]
pub struct ClientNode {
    /// Client identity
    pub id: String,

    /// Ranking over provider slab keys
    pub preferences: PreferenceList<usize>,

    /// Index of the next provider to propose to
    cursor: usize,

    /// Provider currently holding this client
    held_by: Option<usize>,
}

impl ClientNode {
    pub fn new(id: String, preferences: PreferenceList<usize>) -> Self {
        Self {
            id,
            preferences,
            cursor: 0,
            held_by: None,
        }
    }

    /// Take the next provider to propose to and advance past it.
    ///
    /// A proposal is never repeated, whatever its outcome.
    pub fn next_candidate(&mut self) -> Option<usize> {
        let provider = *self.preferences.at(self.cursor)?;
        self.cursor += 1;
        Some(provider)
    }

    /// Whether any provider is left to propose to.
    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.cursor < self.preferences.len()
    }

    /// Number of proposals made so far this run.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn held_by(&self) -> Option<usize> {
        self.held_by
    }

    pub fn state(&self) -> ClientState {
        match self.held_by {
            Some(provider) => ClientState::Held(provider),
            None if self.has_remaining() => ClientState::Free,
            None => ClientState::Exhausted,
        }
    }

    /// Client's rank of `provider`.
    #[inline]
    pub fn rank_of(&self, provider: usize) -> Option<usize> {
        self.preferences.rank(&provider)
    }

    pub(crate) fn hold(&mut self, provider: usize) {
        self.held_by = Some(provider);
    }

    pub(crate) fn release(&mut self) {
        self.held_by = None;
    }

    pub(crate) fn reset(&mut self) {
        self.cursor = 0;
        self.held_by = None;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
