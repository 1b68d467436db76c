//! # Deferred Acceptance
//!
//! Deterministic many-to-one stable matching (Hospital–Residents) using the
//! client-proposing Gale–Shapley algorithm.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Types**: Input records, preference lists, the final Matching, receipts
//! - **Market**: Validated two-sided market with slab-based agent storage
//! - **Engine**: Round-based Deferred Acceptance and stability verification
//! - **Config**: Tie-break policy, history recording, parallel resolution
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Identical markets produce identical matchings and state roots
//! 2. **Fail Closed**: Malformed input is rejected, never silently repaired
//! 3. **Pre-allocated Memory**: Slab allocation, partners referenced by key
//! 4. **Synchronous Execution**: No async in the round loop
//!
//! ## Example
//!
//! ```
//! use deferred_acceptance::{ClientSpec, MatchingEngine, ProviderSpec};
//!
//! let (_, result) = MatchingEngine::new()
//!     .solve(
//!         vec![
//!             ProviderSpec::new("H1", 1, ["R2", "R1"]),
//!             ProviderSpec::new("H2", 1, ["R1", "R2"]),
//!         ],
//!         vec![
//!             ClientSpec::new("R1", ["H1", "H2"]),
//!             ClientSpec::new("R2", ["H1", "H2"]),
//!         ],
//!     )
//!     .unwrap();
//!
//! assert_eq!(result.matching.provider_of("R2"), Some("H1"));
//! assert_eq!(result.matching.provider_of("R1"), Some("H2"));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: specs, preference lists, Matching, MatchReceipt
pub mod types;

/// Two-sided market: slab arenas and identity indexes
pub mod market;

/// Matching engine: Deferred Acceptance and stability checks
pub mod engine;

/// Engine configuration
pub mod config;

/// Construction errors
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{MatchConfig, TieBreak};
pub use engine::{verify_stability, BlockingPair, MatchResult, MatchingEngine, StabilityReport};
pub use error::ConfigError;
pub use market::Market;
pub use types::{
    ClientSpec, MatchReceipt, Matching, Proposal, ProposalOutcome, ProviderSpec, Ranking,
    Rejection, RoundRecord, Tier,
};
