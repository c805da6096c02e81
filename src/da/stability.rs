//! Blocking-pair audit under the tie-favors-incumbent rule.
//!
//! A pair `(p, b)` blocks when `p` lists `b` and would rather have it than
//! a current match (or has a free slot), and `b` has a free slot or ranks
//! `p` strictly better than its worst current match. Equal ranks never
//! block. Partners a proposer did not list are never considered, since the
//! proposer never offers to them.

use super::matching::Matching;
use super::runner::DeferredAcceptance;
use super::types::MatchStats;
use crate::error::{MatchError, Side, ValidationError};
use crate::preferences::{Rank, RankIndex};
use std::sync::Arc;

/// A `(proposer, partner)` pair witnessing instability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BlockingPair {
    pub proposer: String,
    pub partner: String,
}

impl DeferredAcceptance {
    /// Every blocking pair of `matching` against this instance.
    ///
    /// Names in `matching` that this instance does not know are ignored.
    pub fn blocking_pairs(&self, matching: &Matching) -> Vec<BlockingPair> {
        let (by_proposer, by_partner) = self.translate(matching);
        let mut blocking = Vec::new();

        for (p, tiers) in self.proposer_tiers.iter().enumerate() {
            let own_ranks = &self.proposer_ranks[p];
            let current = worst_rank(&by_proposer[p], own_ranks);
            let proposer_full = by_proposer[p].len() >= self.capacities.proposer(p);

            for b in tiers.opponents() {
                if by_proposer[p].contains(&b) {
                    continue;
                }
                let proposer_wants = !proposer_full || own_ranks.rank_of(b) < current;
                if !proposer_wants {
                    continue;
                }

                let partner_ranks = &self.partner_ranks[b];
                let partner_wants = by_partner[b].len() < self.capacities.partner(b)
                    || partner_ranks.rank_of(p) < worst_rank(&by_partner[b], partner_ranks);
                if partner_wants {
                    blocking.push(BlockingPair {
                        proposer: self.proposer_name(p).to_string(),
                        partner: self.partner_name(b).to_string(),
                    });
                }
            }
        }
        blocking
    }

    /// Whether `matching` has no blocking pair.
    pub fn is_stable(&self, matching: &Matching) -> bool {
        self.blocking_pairs(matching).is_empty()
    }

    /// Builds a [`Matching`] from explicit `(proposer, partner)` pairs.
    ///
    /// Useful for auditing an alternative assignment against this
    /// instance. The result carries empty statistics.
    ///
    /// # Errors
    ///
    /// Fails with [`ValidationError::UnknownMember`] for an unknown name and
    /// [`ValidationError::CapacityExceeded`] when a member would hold more
    /// matches than its capacity.
    pub fn assignment_from_pairs<I, A, B>(&self, pairs: I) -> Result<Matching, MatchError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut by_proposer = vec![Vec::new(); self.proposer_count()];
        let mut by_partner = vec![Vec::new(); self.partner_count()];

        for (proposer, partner) in pairs {
            let p = self.rosters.proposers.require(proposer.as_ref())?;
            let b = self.rosters.partners.require(partner.as_ref())?;
            if by_proposer[p].len() >= self.capacities.proposer(p) {
                return Err(ValidationError::CapacityExceeded {
                    side: Side::Proposers,
                    name: proposer.as_ref().to_string(),
                    capacity: self.capacities.proposer(p),
                }
                .into());
            }
            if by_partner[b].len() >= self.capacities.partner(b) {
                return Err(ValidationError::CapacityExceeded {
                    side: Side::Partners,
                    name: partner.as_ref().to_string(),
                    capacity: self.capacities.partner(b),
                }
                .into());
            }
            by_proposer[p].push(b);
            by_partner[b].push(p);
        }

        Ok(Matching::from_parts(
            Arc::clone(&self.rosters),
            by_proposer,
            by_partner,
            MatchStats::default(),
        ))
    }

    /// Re-expresses `matching` in this instance's indices.
    fn translate(&self, matching: &Matching) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
        let mut by_proposer = vec![Vec::new(); self.proposer_count()];
        let mut by_partner = vec![Vec::new(); self.partner_count()];
        for (proposer, partner) in matching.pairs() {
            if let (Some(p), Some(b)) = (self.proposer_index(proposer), self.partner_index(partner)) {
                by_proposer[p].push(b);
                by_partner[b].push(p);
            }
        }
        (by_proposer, by_partner)
    }
}

/// Worst rank among `matches`; ranked best-possible when there are none.
fn worst_rank(matches: &[usize], ranks: &RankIndex) -> Rank {
    matches
        .iter()
        .map(|&m| ranks.rank_of(m))
        .max()
        .unwrap_or(Rank::Ranked(0))
}
