//! Stable matching between two groups.
//!
//! Provides a deferred-acceptance (Gale–Shapley) engine for one-to-one and
//! many-to-one matching with tied preferences:
//!
//! - **Preferences**: `(rank, opponent)` pairs are validated and grouped
//!   into tiers of equally ranked opponents, then indexed by rank.
//!   Opponents a member did not rank are still acceptable, but worse than
//!   every ranked one.
//! - **Deferred acceptance**: proposers make offers in tier order; partners
//!   hold their best offers up to capacity. Ties favor the incumbent.
//! - **Audit**: blocking-pair detection for any assignment over the same
//!   instance.
//!
//! # Architecture
//!
//! The engine is a pure in-memory function of its inputs. All validation
//! happens when a [`DeferredAcceptance`] is built; running it cannot fail
//! and can be repeated with identical results.
//!
//! # Features
//!
//! - `serde`: serialization for inputs and results.
//! - `parallel`: `DeferredAcceptance::run_parallel` matches independent
//!   components on rayon.

pub mod da;
pub mod error;
pub mod preferences;

pub use da::{DeferredAcceptance, MatchConfig, MatchMode, Matching};
pub use error::{ConfigError, MatchError, Side, ValidationError};
pub use preferences::{Group, IndexBase, Rank};
