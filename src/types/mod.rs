//! Core value types for the matching engine.
//!
//! ## Types
//!
//! - [`PreferenceList`]: Strict order with O(1) rank lookup
//! - [`Ranking`] / [`Tier`]: Caller-supplied rankings, possibly with ties
//! - [`ProviderSpec`] / [`ClientSpec`]: Input records for each side
//! - [`Matching`]: The frozen final assignment
//! - [`RoundRecord`]: Per-round proposals and rejections
//! - [`MatchReceipt`]: Run summary with a state root

mod agent;
mod history;
mod matching;
mod preference;
mod receipt;

pub use agent::{ClientSpec, ProviderSpec};
pub use history::{Proposal, ProposalOutcome, Rejection, RoundRecord};
pub use matching::Matching;
pub use preference::{PreferenceList, Ranking, Tier};
pub use receipt::MatchReceipt;
