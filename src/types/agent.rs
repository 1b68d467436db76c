//! Input records for the two sides of the market.
//!
//! These are the caller-facing shapes: identities are strings, preferences
//! are [`Ranking`]s. A [`Market`](crate::Market) validates them and moves them
//! into arena storage.
//!
//! ## Example
//!
//! ```
//! use deferred_acceptance::types::{ClientSpec, ProviderSpec};
//!
//! let hospital = ProviderSpec::new("H1", 2, ["R1", "R2", "R3"]);
//! let resident = ClientSpec::new("R1", ["H1"]);
//!
//! assert_eq!(hospital.capacity, 2);
//! assert_eq!(resident.preferences.partners().count(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::preference::{Ranking, Tier};

/// A capacity-bearing agent (a hospital, a service provider).
///
/// Capacity is unsigned, so a negative capacity cannot be expressed. Zero is
/// allowed and means the provider rejects every proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Unique provider identity
    pub id: String,

    /// Maximum number of clients held at once
    pub capacity: u32,

    /// Ranking over client identities, most preferred first
    pub preferences: Ranking,
}

impl ProviderSpec {
    /// Create a provider with a strict ranking.
    pub fn new<I, S>(id: impl Into<String>, capacity: u32, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            capacity,
            preferences: Ranking::strict(preferences),
        }
    }

    /// Create a provider whose ranking may contain tied groups.
    pub fn tiered(id: impl Into<String>, capacity: u32, tiers: Vec<Tier>) -> Self {
        Self {
            id: id.into(),
            capacity,
            preferences: Ranking::from(tiers),
        }
    }

    /// Same provider with a different capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }
}

/// A unit-demand agent (a resident, a customer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSpec {
    /// Unique client identity
    pub id: String,

    /// Ranking over provider identities, most preferred first
    pub preferences: Ranking,
}

impl ClientSpec {
    /// Create a client with a strict ranking.
    pub fn new<I, S>(id: impl Into<String>, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            preferences: Ranking::strict(preferences),
        }
    }

    /// Create a client whose ranking may contain tied groups.
    pub fn tiered(id: impl Into<String>, tiers: Vec<Tier>) -> Self {
        Self {
            id: id.into(),
            preferences: Ranking::from(tiers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_spec_new() {
        let p = ProviderSpec::new("E1", 2, ["C2", "C1"]);
        assert_eq!(p.id, "E1");
        assert_eq!(p.capacity, 2);
        assert!(p.preferences.is_strict());
        assert_eq!(p.preferences.partners().collect::<Vec<_>>(), vec!["C2", "C1"]);

        let bigger = p.clone().with_capacity(5);
        assert_eq!(bigger.capacity, 5);
        assert_eq!(bigger.preferences, p.preferences);
    }

    #[test]
    fn test_empty_preferences() {
        let c = ClientSpec::new("C1", Vec::<String>::new());
        assert_eq!(c.preferences.partners().count(), 0);
    }

    #[test]
    fn test_spec_from_json() {
        let p: ProviderSpec = serde_json::from_str(
            r#"{ "id": "H1", "capacity": 3, "preferences": ["R1", ["R2", "R3"]] }"#,
        )
        .unwrap();
        assert_eq!(p.capacity, 3);
        assert!(!p.preferences.is_strict());

        // Negative capacities cannot be deserialized.
        let bad = serde_json::from_str::<ProviderSpec>(
            r#"{ "id": "H1", "capacity": -1, "preferences": [] }"#,
        );
        assert!(bad.is_err());
    }
}
