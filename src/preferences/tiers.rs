//! Preference normalization: raw `(rank, opponent)` pairs into ordered tiers.

use super::{MemberPreferences, Roster};
use crate::error::ValidationError;
use std::collections::{BTreeMap, HashSet};

/// One member's preferences as tiers of tied opponents, best tier first.
///
/// Opponents are stored as indices into the opposing [`Roster`]. Within a
/// tier they keep the order in which they were supplied, which is the
/// order they will be proposed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceTiers {
    tiers: Vec<Vec<usize>>,
}

impl PreferenceTiers {
    /// Normalizes one member's raw preferences against the opposing roster.
    ///
    /// Rank values only determine tier order; gaps between them are not
    /// preserved (ranks `1, 5` produce tiers at positions 1 and 2).
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonPositiveRank`] for a rank below 1.
    /// - [`ValidationError::UnknownOpponent`] for a name outside `allowed`.
    /// - [`ValidationError::DuplicateOpponent`] for a repeated opponent.
    /// - [`ValidationError::IncompleteRanking`] when `strict` is set and the
    ///   ranked set differs from `allowed`.
    pub fn normalize(
        prefs: &MemberPreferences,
        allowed: &Roster,
        strict: bool,
    ) -> Result<Self, ValidationError> {
        let owner = &prefs.name;
        let mut by_rank: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        let mut seen: HashSet<usize> = HashSet::with_capacity(prefs.ranked.len());

        for (rank, name) in &prefs.ranked {
            if *rank < 1 {
                return Err(ValidationError::NonPositiveRank {
                    owner: owner.clone(),
                    rank: *rank,
                });
            }
            let Some(opponent) = allowed.index_of(name) else {
                return Err(ValidationError::UnknownOpponent {
                    owner: owner.clone(),
                    name: name.clone(),
                });
            };
            if !seen.insert(opponent) {
                return Err(ValidationError::DuplicateOpponent {
                    owner: owner.clone(),
                    name: name.clone(),
                });
            }
            by_rank.entry(*rank).or_default().push(opponent);
        }

        if strict && seen.len() != allowed.len() {
            let mut missing: Vec<String> = allowed
                .names()
                .iter()
                .enumerate()
                .filter(|(i, _)| !seen.contains(i))
                .map(|(_, n)| n.clone())
                .collect();
            missing.sort();
            // Unknown names were rejected above, so nothing can be extra.
            return Err(ValidationError::IncompleteRanking {
                owner: owner.clone(),
                missing,
                extra: Vec::new(),
            });
        }

        Ok(Self {
            tiers: by_rank.into_values().collect(),
        })
    }

    /// Builds tiers directly from opponent indices, best tier first.
    pub fn from_tiers(tiers: Vec<Vec<usize>>) -> Self {
        Self { tiers }
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Total number of ranked opponents across all tiers.
    pub fn entry_count(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    /// The tier at position `index` (0-based), if any.
    pub fn tier(&self, index: usize) -> Option<&[usize]> {
        self.tiers.get(index).map(Vec::as_slice)
    }

    /// Tiers best first.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.tiers.iter().map(Vec::as_slice)
    }

    /// All ranked opponents in proposal order.
    pub fn opponents(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiers.iter().flatten().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Side;
    use crate::preferences::Group;

    fn partners() -> Roster {
        let group = Group::new()
            .with_member("beth", Vec::<(i64, &str)>::new())
            .with_member("cindy", Vec::<(i64, &str)>::new())
            .with_member("anna", Vec::<(i64, &str)>::new());
        Roster::from_group(&group, Side::Partners).unwrap()
    }

    #[test]
    fn test_groups_ties_in_input_order() {
        let prefs = MemberPreferences::new("john", [(2, "cindy"), (1, "beth"), (2, "anna")]);
        let tiers = PreferenceTiers::normalize(&prefs, &partners(), false).unwrap();

        // beth = 0, cindy = 1, anna = 2
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers.tier(0), Some(&[0][..]));
        assert_eq!(tiers.tier(1), Some(&[1, 2][..]));
        assert_eq!(tiers.entry_count(), 3);
        assert_eq!(tiers.opponents().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_rank_gaps_collapse() {
        let prefs = MemberPreferences::new("john", [(7, "anna"), (3, "beth")]);
        let tiers = PreferenceTiers::normalize(&prefs, &partners(), false).unwrap();

        assert_eq!(tiers.iter().collect::<Vec<_>>(), vec![&[0][..], &[2][..]]);
    }

    #[test]
    fn test_zero_rank_rejected() {
        let prefs = MemberPreferences::new("john", [(0, "beth")]);
        let err = PreferenceTiers::normalize(&prefs, &partners(), false).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositiveRank {
                owner: "john".into(),
                rank: 0
            }
        );
    }

    #[test]
    fn test_negative_rank_rejected() {
        let prefs = MemberPreferences::new("john", [(1, "beth"), (-2, "anna")]);
        assert!(matches!(
            PreferenceTiers::normalize(&prefs, &partners(), false),
            Err(ValidationError::NonPositiveRank { rank: -2, .. })
        ));
    }

    #[test]
    fn test_unknown_opponent_rejected() {
        let prefs = MemberPreferences::new("john", [(1, "zoe")]);
        assert!(matches!(
            PreferenceTiers::normalize(&prefs, &partners(), false),
            Err(ValidationError::UnknownOpponent { name, .. }) if name == "zoe"
        ));
    }

    #[test]
    fn test_duplicate_opponent_rejected() {
        let prefs = MemberPreferences::new("john", [(1, "beth"), (2, "beth")]);
        assert!(matches!(
            PreferenceTiers::normalize(&prefs, &partners(), false),
            Err(ValidationError::DuplicateOpponent { name, .. }) if name == "beth"
        ));
    }

    #[test]
    fn test_strict_reports_missing_sorted() {
        let prefs = MemberPreferences::new("john", [(1, "beth")]);
        let err = PreferenceTiers::normalize(&prefs, &partners(), true).unwrap_err();

        match &err {
            ValidationError::IncompleteRanking { missing, extra, .. } => {
                assert_eq!(missing, &vec!["anna".to_string(), "cindy".to_string()]);
                assert!(extra.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("missing=[\"anna\", \"cindy\"]"));
    }

    #[test]
    fn test_strict_accepts_complete_ranking() {
        let prefs = MemberPreferences::new("john", [(1, "beth"), (1, "anna"), (2, "cindy")]);
        let tiers = PreferenceTiers::normalize(&prefs, &partners(), true).unwrap();
        assert_eq!(tiers.entry_count(), 3);
    }

    #[test]
    fn test_empty_preferences() {
        let prefs = MemberPreferences::new("john", Vec::<(i64, &str)>::new());
        let tiers = PreferenceTiers::normalize(&prefs, &partners(), false).unwrap();
        assert!(tiers.is_empty());
        assert_eq!(tiers.tier(0), None);
    }
}
