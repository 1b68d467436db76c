//! Preference lists and the ranked input form they are built from.
//!
//! ## Representation
//!
//! A [`PreferenceList`] is a strict total order over acceptable partners,
//! most-preferred first. Rank is the position index; a partner absent from
//! the list is unacceptable. A rank table is built once at construction so
//! `rank` and `prefers` are O(1) during the round loop.
//!
//! A [`Ranking`] is what callers supply: a sequence of [`Tier`]s, where a tier
//! is either a single partner or a group of equal-rank partners. Resolving a
//! ranking under a [`TieBreak`] policy flattens it into a strict order.
//!
//! ```
//! use deferred_acceptance::types::{Ranking, Tier};
//! use deferred_acceptance::TieBreak;
//!
//! let ranking = Ranking::from(vec![
//!     Tier::Single("P2".into()),
//!     Tier::Tied(vec!["P3".into(), "P1".into()]),
//! ]);
//!
//! assert!(ranking.resolve("C1", TieBreak::Reject).is_err());
//! assert_eq!(
//!     ranking.resolve("C1", TieBreak::ByIdentity).unwrap(),
//!     vec!["P2", "P1", "P3"],
//! );
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::config::TieBreak;
use crate::error::ConfigError;

// ============================================================================
// PreferenceList
// ============================================================================

/// Strict preference order with a precomputed rank table.
///
/// `K` is the partner key: identity strings at the API boundary, arena keys
/// inside a [`Market`](crate::Market).
#[derive(Debug, Clone)]
pub struct PreferenceList<K> {
    order: Vec<K>,
    ranks: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> PreferenceList<K> {
    /// Build a list from partners in preference order.
    ///
    /// Returns the first repeated partner as the error.
    pub fn new(order: Vec<K>) -> Result<Self, K> {
        let mut ranks = HashMap::with_capacity(order.len());
        for (rank, partner) in order.iter().enumerate() {
            if ranks.insert(partner.clone(), rank).is_some() {
                return Err(partner.clone());
            }
        }
        Ok(Self { order, ranks })
    }

    /// A list that accepts nobody.
    pub fn empty() -> Self {
        Self {
            order: Vec::new(),
            ranks: HashMap::new(),
        }
    }

    /// Position of `partner` (0 = most preferred), or `None` if unacceptable.
    #[inline]
    pub fn rank(&self, partner: &K) -> Option<usize> {
        self.ranks.get(partner).copied()
    }

    /// Whether `partner` appears in the list.
    #[inline]
    pub fn accepts(&self, partner: &K) -> bool {
        self.ranks.contains_key(partner)
    }

    /// Whether `a` is strictly preferred to `b`.
    ///
    /// `None` if either partner is unacceptable.
    pub fn prefers(&self, a: &K, b: &K) -> Option<bool> {
        Some(self.rank(a)? < self.rank(b)?)
    }

    /// Partner at `rank`.
    #[inline]
    pub fn at(&self, rank: usize) -> Option<&K> {
        self.order.get(rank)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[K] {
        &self.order
    }
}

impl<K: PartialEq> PartialEq for PreferenceList<K> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl<K: Eq> Eq for PreferenceList<K> {}

impl<K: Eq + Hash + Clone> Default for PreferenceList<K> {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Ranking (caller input)
// ============================================================================

/// One position in a caller-supplied ranking.
///
/// In JSON a tier is either a string or an array of strings:
/// `["P1", ["P2", "P3"], "P4"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tier {
    /// A single partner at this rank.
    Single(String),
    /// Several partners the agent considers equal.
    Tied(Vec<String>),
}

impl Tier {
    pub fn members(&self) -> &[String] {
        match self {
            Tier::Single(id) => std::slice::from_ref(id),
            Tier::Tied(ids) => ids,
        }
    }
}

/// Preference input as supplied by a caller, possibly containing ties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    tiers: Vec<Tier>,
}

impl Ranking {
    /// A strict ranking: every partner is its own tier.
    pub fn strict<I, S>(partners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tiers: partners
                .into_iter()
                .map(|id| Tier::Single(id.into()))
                .collect(),
        }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// All listed partners in the order given, ties flattened as written.
    pub fn partners(&self) -> impl Iterator<Item = &str> {
        self.tiers
            .iter()
            .flat_map(|tier| tier.members().iter().map(String::as_str))
    }

    /// Whether no tier groups more than one partner.
    pub fn is_strict(&self) -> bool {
        self.tiers.iter().all(|tier| tier.members().len() <= 1)
    }

    /// Flatten into a strict order under `tie_break`.
    ///
    /// Duplicate detection is left to [`PreferenceList::new`]; this only
    /// decides how tied groups are laid out. Empty groups are skipped.
    pub fn resolve(&self, agent: &str, tie_break: TieBreak) -> Result<Vec<String>, ConfigError> {
        let mut order = Vec::with_capacity(self.tiers.len());
        for (tier, group) in self.tiers.iter().enumerate() {
            let members = group.members();
            if members.len() <= 1 {
                order.extend(members.iter().cloned());
                continue;
            }
            match tie_break {
                TieBreak::Reject => {
                    return Err(ConfigError::TiedPreference {
                        agent: agent.to_string(),
                        tier,
                    });
                }
                TieBreak::ByIdentity => {
                    let mut sorted = members.to_vec();
                    sorted.sort();
                    order.extend(sorted);
                }
                TieBreak::ByListOrder => order.extend(members.iter().cloned()),
            }
        }
        Ok(order)
    }
}

impl From<Vec<Tier>> for Ranking {
    fn from(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }
}

impl From<Vec<String>> for Ranking {
    fn from(partners: Vec<String>) -> Self {
        Self::strict(partners)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
