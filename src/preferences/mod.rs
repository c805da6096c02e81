//! Preference input and normalization.
//!
//! Raw preferences arrive as `(rank, opponent)` pairs per member, collected
//! in a [`Group`]. They flow forward through three stages:
//!
//! 1. [`Roster`]: resolves member names to dense indices.
//! 2. [`PreferenceTiers`]: groups entries of equal rank into tiers, ordered
//!    best first, validating ranks and opponent names.
//! 3. [`RankIndex`]: maps each opponent to the 1-based position of its tier.
//!
//! Positional input (one row of opponent indices per member) is converted
//! into an ordinary [`Group`] by [`Group::from_positional`], so both input
//! shapes go through the same normalizer.

mod group;
mod positional;
mod rank;
mod roster;
mod tiers;

pub use group::{Group, MemberPreferences};
pub use positional::IndexBase;
pub use rank::{Rank, RankIndex};
pub use roster::Roster;
pub use tiers::PreferenceTiers;
