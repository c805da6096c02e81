//! Deferred acceptance (Gale–Shapley) with capacities and ties.
//!
//! Group 1 proposes; group 2 tentatively accepts, evicting its worst match
//! when a strictly better offer arrives. A challenger tied with the worst
//! incumbent is rejected, so the result is weakly stable: no pair in which
//! both sides strictly prefer each other remains.
//!
//! # Key Types
//!
//! - [`MatchConfig`]: capacity mode, strictness, per-partner overrides
//! - [`DeferredAcceptance`]: validated instance; [`run`](DeferredAcceptance::run)
//!   produces a [`Matching`]
//! - [`ProposalRun`]: step-by-step execution yielding [`StepEvent`]s
//! - [`Matching`]: proposer → partners and partner → proposers views
//!
//! # References
//!
//! - Gale & Shapley (1962), "College Admissions and the Stability of Marriage"
//! - Roth & Sotomayor (1990), *Two-Sided Matching*
//! - Irving (1994), "Stable marriage and indifference"

mod capacity;
mod components;
mod config;
mod matching;
mod runner;
mod stability;
mod state;
mod types;

pub use capacity::Capacities;
pub use components::Component;
pub use config::{MatchConfig, MatchMode};
pub use matching::Matching;
pub use runner::{DeferredAcceptance, ProposalRun};
pub use stability::BlockingPair;
pub use state::{Cursor, MatchState, ProposalQueue};
pub use types::{MatchStats, StepEvent};
