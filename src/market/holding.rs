//! Provisional holding set of a single provider.
//!
//! ## Design
//!
//! A `HoldingSet` keeps the clients a provider currently holds as
//! `(rank, client_key)` entries sorted by the provider's rank, best first.
//! The worst held client is therefore always the last entry.
//!
//! ```text
//! entries: [(0, c7), (2, c1), (5, c4)]   capacity = 3
//!            best             worst
//! ```
//!
//! Merging new proposals is split from applying the result: [`HoldingSet::merge`]
//! is a pure read returning what to keep and what to reject, and
//! [`HoldingSet::replace`] installs the kept entries. This lets a round
//! compute every provider's response before mutating anything.

/// Entry in a holding set: provider's rank of the client, then the client key.
pub type Held = (usize, usize);

/// Clients currently held by one provider, bounded by capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoldingSet {
    capacity: usize,
    entries: Vec<Held>,
}

impl HoldingSet {
    /// Create an empty set for a provider with `capacity` seats.
    pub fn new(capacity: u32) -> Self {
        let capacity = capacity as usize;
        Self {
            capacity,
            entries: Vec::with_capacity(capacity.min(64)),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether at least one seat is free.
    #[inline]
    pub fn has_vacancy(&self) -> bool {
        self.entries.len() < self.capacity
    }

    /// Number of free seats.
    #[inline]
    pub fn open_seats(&self) -> usize {
        self.capacity - self.entries.len()
    }

    pub fn contains(&self, client: usize) -> bool {
        self.entries.iter().any(|&(_, c)| c == client)
    }

    /// Held entries, best first.
    pub fn entries(&self) -> &[Held] {
        &self.entries
    }

    /// Held client keys, best first.
    pub fn clients(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|&(_, c)| c)
    }

    /// The least preferred held entry.
    pub fn worst(&self) -> Option<Held> {
        self.entries.last().copied()
    }

    /// Union the held entries with `candidates`, keep the top `capacity` by
    /// rank and return `(kept, rejected_clients)`.
    ///
    /// Ranks are unique within one provider's list, so the order is total.
    /// A zero-capacity set rejects everything.
    pub fn merge(&self, candidates: &[Held]) -> (Vec<Held>, Vec<usize>) {
        let mut union = Vec::with_capacity(self.entries.len() + candidates.len());
        union.extend_from_slice(&self.entries);
        union.extend_from_slice(candidates);
        union.sort_unstable();

        if union.len() <= self.capacity {
            return (union, Vec::new());
        }
        let rejected = union.split_off(self.capacity);
        (union, rejected.into_iter().map(|(_, c)| c).collect())
    }

    /// Install entries produced by [`merge`](Self::merge).
    ///
    /// # Panics
    ///
    /// Debug builds assert the entries fit the capacity and are sorted.
    pub fn replace(&mut self, kept: Vec<Held>) {
        debug_assert!(kept.len() <= self.capacity, "holding set over capacity");
        debug_assert!(kept.windows(2).all(|w| w[0] < w[1]), "holding set unsorted");
        self.entries = kept;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
