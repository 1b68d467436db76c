//! Matching engine module.
//!
//! ## Design Principles
//!
//! The matching engine is designed for:
//!
//! 1. **Determinism**: Same market always produces the same matching
//! 2. **Client Optimality**: Clients propose, so each gets its best stable partner
//! 3. **Bounded Work**: No proposal is ever repeated
//! 4. **Synchronous Execution**: No async/await in the round loop
//!
//! ## Matching Rules
//!
//! - **Clients** propose down their list, one provider per round
//! - **Providers** hold their best `capacity` proposers so far
//! - **Bumped clients** resume proposing from where they left off
//! - **Unlisted proposals** are rejected immediately
//!
//! ## Example
//!
//! ```
//! use deferred_acceptance::engine::{verify_stability, MatchingEngine};
//! use deferred_acceptance::{ClientSpec, Market, ProviderSpec};
//!
//! let mut market = Market::new(
//!     vec![ProviderSpec::new("P", 2, ["C1", "C2", "C3"])],
//!     vec![
//!         ClientSpec::new("C1", ["P"]),
//!         ClientSpec::new("C2", ["P"]),
//!         ClientSpec::new("C3", ["P"]),
//!     ],
//! )
//! .unwrap();
//!
//! let result = MatchingEngine::new().run(&mut market);
//!
//! assert_eq!(result.matching.clients_of("P").unwrap(), ["C1", "C2"]);
//! assert_eq!(result.matching.unmatched_clients(), ["C3"]);
//! assert!(verify_stability(&market).is_stable());
//! ```

pub mod matcher;
pub mod stability;

pub use matcher::{MatchResult, MatchingEngine};
pub use stability::{verify_stability, BlockingPair, StabilityReport, Violation};
