//! Error types.
//!
//! Every failure is detected while an instance is being constructed. Once a
//! [`DeferredAcceptance`](crate::da::DeferredAcceptance) exists, running it
//! cannot fail.

use std::fmt;
use thiserror::Error;

/// Which of the two groups a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    /// Group 1, the side that makes offers.
    Proposers,
    /// Group 2, the side that accepts or rejects offers.
    Partners,
}

impl Side {
    /// The opposite group.
    pub fn other(self) -> Side {
        match self {
            Side::Proposers => Side::Partners,
            Side::Partners => Side::Proposers,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Proposers => f.write_str("proposers"),
            Side::Partners => f.write_str("partners"),
        }
    }
}

/// Invalid preference data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("prefs for {owner:?}: rank must be a positive integer, got {rank}")]
    NonPositiveRank { owner: String, rank: i64 },

    #[error("prefs for {owner:?}: unknown name {name:?}")]
    UnknownOpponent { owner: String, name: String },

    #[error("prefs for {owner:?}: duplicate entry for {name:?}")]
    DuplicateOpponent { owner: String, name: String },

    #[error(
        "prefs for {owner:?}: strict mode requires ranking all opponents exactly once{}",
        describe_difference(.missing, .extra)
    )]
    IncompleteRanking {
        owner: String,
        /// Allowed opponents that were not ranked, sorted.
        missing: Vec<String>,
        /// Ranked names outside the allowed set, sorted.
        extra: Vec<String>,
    },

    #[error("{side}: member {name:?} is listed more than once")]
    DuplicateMember { side: Side, name: String },

    #[error("{side}: no member named {name:?}")]
    UnknownMember { side: Side, name: String },

    #[error("prefs for {owner:?}: index {index} is outside {base} range for {len} opponents")]
    IndexOutOfRange {
        owner: String,
        index: usize,
        base: crate::preferences::IndexBase,
        len: usize,
    },

    #[error("expected {expected} preference rows, got {found}")]
    RowCountMismatch { expected: usize, found: usize },

    #[error("{side}: {name:?} would exceed its capacity of {capacity}")]
    CapacityExceeded {
        side: Side,
        name: String,
        capacity: usize,
    },
}

/// Invalid matching configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("mode must be 'one_to_one' or 'many_to_one', got {0:?}")]
    UnknownMode(String),

    #[error("capacity override for {0:?}, which is not a partner")]
    UnknownPartnerCapacity(String),

    #[error("capacity for {0:?} must be at least 1")]
    ZeroCapacity(String),

    #[error("capacity overrides are only accepted in many_to_one mode")]
    OverrideRequiresManyToOne,
}

/// Any error raised while building a matching instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

fn describe_difference(missing: &[String], extra: &[String]) -> String {
    let mut msg = String::new();
    if !missing.is_empty() {
        msg.push_str(&format!("; missing={missing:?}"));
    }
    if !extra.is_empty() {
        msg.push_str(&format!("; extras={extra:?}"));
    }
    msg
}
