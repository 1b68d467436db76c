//! Run configuration: tie handling, round history, parallel resolution.
//!
//! ```
//! use deferred_acceptance::{MatchConfig, TieBreak};
//!
//! let config = MatchConfig::default()
//!     .with_tie_break(TieBreak::ByIdentity)
//!     .with_history(true);
//!
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Policy for equal-rank partners inside one preference list.
///
/// Preference lists are strict total orders. A caller that supplies a tied
/// group must pick how it is flattened; the default refuses ties outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Tied groups are a configuration error.
    #[default]
    Reject,

    /// Tied partners are ordered by ascending identity.
    ByIdentity,

    /// Tied partners keep the order in which the caller listed them.
    ByListOrder,
}

/// Configuration shared by market construction and the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// How tied groups in preference lists are resolved at construction.
    pub tie_break: TieBreak,

    /// Record every proposal and rejection per round in the result.
    pub record_history: bool,

    /// Resolve provider responses of a round on the rayon pool.
    ///
    /// Output is identical to the sequential path.
    pub parallel: bool,
}

impl MatchConfig {
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration against the features this build has.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel && !cfg!(feature = "parallel") {
            return Err(ConfigError::ParallelUnavailable);
        }
        Ok(())
    }
}
