//! Market module: arena storage for both sides of the matching.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: providers and clients live in arenas and refer to
//!   each other by slab key
//! - **Rank tables**: every agent's preference list is a keyed lookup built
//!   once at construction
//! - **Holding sets**: each provider keeps its held clients sorted by rank
//!
//! ## Components
//!
//! - [`ProviderNode`] / [`ClientNode`]: per-agent records with provisional state
//! - [`HoldingSet`]: capacity-bounded, rank-sorted set of held clients
//! - [`Market`]: validated construction, lookups, result extraction
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Rank lookup | O(1) |
//! | Identity lookup | O(1) |
//! | Resolve k proposals at a provider holding h | O((h + k) log(h + k)) |
//! | Extract matching | O(providers + clients) |

pub mod arena;
pub mod holding;
pub mod node;

pub use arena::Market;
pub use holding::HoldingSet;
pub use node::{ClientNode, ClientState, ProviderNode, Resolution};
