//! Configuration errors raised while building a [`Market`](crate::Market).
//!
//! Every error here is detected before the first round runs. The engine never
//! drops or dedupes malformed input; construction fails closed and the caller
//! gets the first offending agent back.
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | [`DuplicateProvider`](ConfigError::DuplicateProvider) | two provider records share an identity |
//! | [`DuplicateClient`](ConfigError::DuplicateClient) | two client records share an identity |
//! | [`UnknownProvider`](ConfigError::UnknownProvider) | a client ranks a provider that was not supplied |
//! | [`UnknownClient`](ConfigError::UnknownClient) | a provider ranks a client that was not supplied |
//! | [`DuplicatePreference`](ConfigError::DuplicatePreference) | a partner appears twice in one list |
//! | [`TiedPreference`](ConfigError::TiedPreference) | a list has equal-rank partners under [`TieBreak::Reject`](crate::TieBreak::Reject) |
//! | [`ParallelUnavailable`](ConfigError::ParallelUnavailable) | parallel resolution requested without the `parallel` feature |

use thiserror::Error;

/// Errors that reject a market or engine configuration.
///
/// The enum is `#[non_exhaustive]`; match with a catch-all arm.
///
/// ```
/// use deferred_acceptance::ConfigError;
///
/// let err = ConfigError::UnknownProvider {
///     client: "C1".into(),
///     provider: "P9".into(),
/// };
/// assert_eq!(err.to_string(), "client `C1` ranks unknown provider `P9`");
/// assert_eq!(err.agent(), Some("C1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// Two provider records share the same identity.
    #[error("duplicate provider identity `{0}`")]
    DuplicateProvider(String),

    /// Two client records share the same identity.
    #[error("duplicate client identity `{0}`")]
    DuplicateClient(String),

    /// A client's preference list names a provider that does not exist.
    #[error("client `{client}` ranks unknown provider `{provider}`")]
    UnknownProvider { client: String, provider: String },

    /// A provider's preference list names a client that does not exist.
    #[error("provider `{provider}` ranks unknown client `{client}`")]
    UnknownClient { provider: String, client: String },

    /// The same partner appears more than once in a single preference list.
    #[error("`{agent}` lists `{partner}` more than once")]
    DuplicatePreference { agent: String, partner: String },

    /// Equal-rank partners with no tie-break policy to order them.
    ///
    /// `tier` is the zero-based position of the tied group in the list.
    #[error("`{agent}` has tied partners at tier {tier} and ties are rejected")]
    TiedPreference { agent: String, tier: usize },

    /// Parallel provider resolution was requested but the crate was built
    /// without the `parallel` feature.
    #[error("parallel resolution requires the `parallel` feature")]
    ParallelUnavailable,
}

impl ConfigError {
    /// Identity of the agent whose record caused the error, if any.
    pub fn agent(&self) -> Option<&str> {
        match self {
            ConfigError::DuplicateProvider(id) | ConfigError::DuplicateClient(id) => Some(id),
            ConfigError::UnknownProvider { client, .. } => Some(client),
            ConfigError::UnknownClient { provider, .. } => Some(provider),
            ConfigError::DuplicatePreference { agent, .. }
            | ConfigError::TiedPreference { agent, .. } => Some(agent),
            ConfigError::ParallelUnavailable => None,
        }
    }
}
