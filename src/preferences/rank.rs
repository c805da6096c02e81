//! Rank lookup built from tiers.

use super::PreferenceTiers;
use std::collections::HashMap;
use std::fmt;

/// Position of an opponent in a member's preference order. Lower is better.
///
/// Opponents absent from a member's list are [`Rank::Unranked`], which
/// compares worse than every ranked opponent but is still acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Rank {
    /// 1-based tier position. Tied opponents share a value.
    Ranked(u32),
    /// Not listed by the member.
    Unranked,
}

impl Rank {
    pub fn is_ranked(self) -> bool {
        matches!(self, Rank::Ranked(_))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Ranked(r) => write!(f, "{r}"),
            Rank::Unranked => f.write_str("unranked"),
        }
    }
}

/// Opponent index → rank for one member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankIndex {
    ranks: HashMap<usize, u32>,
}

impl RankIndex {
    /// Assigns every opponent the 1-based position of its tier.
    pub fn from_tiers(tiers: &PreferenceTiers) -> Self {
        let mut ranks = HashMap::with_capacity(tiers.entry_count());
        for (position, tier) in tiers.iter().enumerate() {
            let rank = position as u32 + 1;
            for &opponent in tier {
                ranks.insert(opponent, rank);
            }
        }
        Self { ranks }
    }

    /// Rank of `opponent`, or [`Rank::Unranked`] if it is not listed.
    #[inline]
    pub fn rank_of(&self, opponent: usize) -> Rank {
        self.ranks
            .get(&opponent)
            .map_or(Rank::Unranked, |&r| Rank::Ranked(r))
    }

    /// Number of ranked opponents.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
