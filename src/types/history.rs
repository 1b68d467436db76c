//! Per-round history records.
//!
//! Only produced when [`MatchConfig::record_history`](crate::MatchConfig) is
//! set. Identities are copied out of the arena so records outlive the market.

use serde::{Deserialize, Serialize};

/// What happened to a proposal when it reached the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalOutcome {
    /// The provider lists the client and weighed it against its holding set.
    Considered,
    /// The provider does not list the client; rejected on arrival.
    Unacceptable,
}

/// A single client-to-provider proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub client: String,
    pub provider: String,
    pub outcome: ProposalOutcome,
}

/// A client released by a provider over capacity.
///
/// Covers both new proposers and clients the provider was already holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub client: String,
    pub provider: String,
}

/// Everything dispatched and resolved in one round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number, starting at 1
    pub round: usize,
    pub proposals: Vec<Proposal>,
    pub rejections: Vec<Rejection>,
}

impl RoundRecord {
    pub fn new(round: usize) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }

    /// Proposals the provider did not list at all.
    pub fn unacceptable(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals
            .iter()
            .filter(|p| p.outcome == ProposalOutcome::Unacceptable)
    }
}
