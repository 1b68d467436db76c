//! Match receipt summarizing a completed run.
//!
//! The receipt is a fixed-size SSZ container so two runs can be compared
//! byte-for-byte, and carries a state root over the final matching.

use ssz_rs::prelude::*;
use sha2::{Digest, Sha256};

/// Summary of one engine run.
///
/// ## State Root
///
/// The 32-byte state root is a SHA-256 hash of the final matching in
/// canonical order (see [`Market::compute_state_root`](crate::Market::compute_state_root)).
/// Identical inputs always yield identical roots.
///
/// ## Example
///
/// ```
/// use deferred_acceptance::types::MatchReceipt;
///
/// let receipt = MatchReceipt::new(
///     3,          // rounds
///     7,          // proposals
///     5,          // matched clients
///     0,          // unmatched clients
///     0,          // open seats
///     [0u8; 32],  // state root
/// );
/// assert_eq!(receipt.match_rate(), Some(1.0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct MatchReceipt {
    /// Number of proposal/rejection rounds executed
    pub rounds: u64,

    /// Total proposals sent, including ones to providers not listing the client
    pub proposals: u64,

    /// Clients held by a provider at termination
    pub matched_clients: u64,

    /// Clients left unmatched at termination
    pub unmatched_clients: u64,

    /// Capacity left unused across all providers
    pub open_seats: u64,

    /// SHA-256 of the final matching
    pub state_root: [u8; 32],
}

impl MatchReceipt {
    pub fn new(
        rounds: u64,
        proposals: u64,
        matched_clients: u64,
        unmatched_clients: u64,
        open_seats: u64,
        state_root: [u8; 32],
    ) -> Self {
        Self {
            rounds,
            proposals,
            matched_clients,
            unmatched_clients,
            open_seats,
            state_root,
        }
    }

    /// Compute SHA-256 hash of the given data
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// Total clients in the run
    pub fn client_count(&self) -> u64 {
        self.matched_clients + self.unmatched_clients
    }

    /// Fraction of clients that ended up matched.
    ///
    /// Returns None if the market had no clients.
    pub fn match_rate(&self) -> Option<f64> {
        match self.client_count() {
            0 => None,
            n => Some(self.matched_clients as f64 / n as f64),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
