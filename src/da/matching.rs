//! Read-only views of a finished matching.

use super::state::MatchState;
use super::types::MatchStats;
use crate::preferences::Roster;
use std::collections::HashMap;
use std::sync::Arc;

/// Both groups' rosters, shared between an engine and its results.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Rosters {
    pub(crate) proposers: Roster,
    pub(crate) partners: Roster,
}

/// The final assignment: proposer → partners and partner → proposers.
///
/// Both directions always agree. Every member of both groups is present,
/// possibly with an empty list. Lists are in acceptance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    rosters: Arc<Rosters>,
    proposer_matches: Vec<Vec<usize>>,
    partner_matches: Vec<Vec<usize>>,
    stats: MatchStats,
}

impl Matching {
    pub(crate) fn from_state(rosters: Arc<Rosters>, state: MatchState) -> Self {
        Self {
            rosters,
            proposer_matches: state.proposer_matches,
            partner_matches: state.partner_matches,
            stats: state.stats,
        }
    }

    pub(crate) fn from_parts(
        rosters: Arc<Rosters>,
        proposer_matches: Vec<Vec<usize>>,
        partner_matches: Vec<Vec<usize>>,
        stats: MatchStats,
    ) -> Self {
        Self {
            rosters,
            proposer_matches,
            partner_matches,
            stats,
        }
    }

    /// Proposer names in input order.
    pub fn proposers(&self) -> &[String] {
        self.rosters.proposers.names()
    }

    /// Partner names in input order.
    pub fn partners(&self) -> &[String] {
        self.rosters.partners.names()
    }

    /// Partners matched to `proposer`, or `None` if no such proposer.
    pub fn partners_of(&self, proposer: &str) -> Option<Vec<&str>> {
        let p = self.rosters.proposers.index_of(proposer)?;
        Some(self.partner_names(p))
    }

    /// Proposers matched to `partner`, or `None` if no such partner.
    pub fn proposers_of(&self, partner: &str) -> Option<Vec<&str>> {
        let b = self.rosters.partners.index_of(partner)?;
        Some(self.proposer_names(b))
    }

    /// Partner indices matched to proposer index `p`.
    pub fn partner_indices(&self, p: usize) -> &[usize] {
        &self.proposer_matches[p]
    }

    /// Proposer indices matched to partner index `b`.
    pub fn proposer_indices(&self, b: usize) -> &[usize] {
        &self.partner_matches[b]
    }

    /// `(proposer, partners)` for every proposer, in input order.
    pub fn proposer_assignments(&self) -> impl Iterator<Item = (&str, Vec<&str>)> + '_ {
        (0..self.proposer_matches.len())
            .map(move |p| (self.rosters.proposers.name(p), self.partner_names(p)))
    }

    /// `(partner, proposers)` for every partner, in input order.
    pub fn partner_assignments(&self) -> impl Iterator<Item = (&str, Vec<&str>)> + '_ {
        (0..self.partner_matches.len())
            .map(move |b| (self.rosters.partners.name(b), self.proposer_names(b)))
    }

    /// Every matched `(proposer, partner)` pair, in proposer order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.proposer_matches
            .iter()
            .enumerate()
            .flat_map(|(p, bs)| {
                bs.iter().map(move |&b| {
                    (
                        self.rosters.proposers.name(p),
                        self.rosters.partners.name(b),
                    )
                })
            })
            .collect()
    }

    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.proposer_matches.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Proposers left without a partner, in input order.
    pub fn unmatched_proposers(&self) -> Vec<&str> {
        self.proposer_matches
            .iter()
            .enumerate()
            .filter(|(_, bs)| bs.is_empty())
            .map(|(p, _)| self.rosters.proposers.name(p))
            .collect()
    }

    /// Counters from the run that produced this matching.
    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    /// Owned name maps for both directions.
    pub fn to_maps(&self) -> (HashMap<String, Vec<String>>, HashMap<String, Vec<String>>) {
        let owned = |(name, list): (&str, Vec<&str>)| {
            (
                name.to_string(),
                list.into_iter().map(str::to_string).collect(),
            )
        };
        (
            self.proposer_assignments().map(owned).collect(),
            self.partner_assignments().map(owned).collect(),
        )
    }

    fn partner_names(&self, p: usize) -> Vec<&str> {
        self.proposer_matches[p]
            .iter()
            .map(|&b| self.rosters.partners.name(b))
            .collect()
    }

    fn proposer_names(&self, b: usize) -> Vec<&str> {
        self.partner_matches[b]
            .iter()
            .map(|&p| self.rosters.proposers.name(p))
            .collect()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Matching {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        struct AsMap<'a>(Vec<(&'a str, Vec<&'a str>)>);

        impl serde::Serialize for AsMap<'_> {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.collect_map(self.0.iter().map(|(k, v)| (k, v)))
            }
        }

        let mut st = serializer.serialize_struct("Matching", 3)?;
        st.serialize_field("proposers", &AsMap(self.proposer_assignments().collect()))?;
        st.serialize_field("partners", &AsMap(self.partner_assignments().collect()))?;
        st.serialize_field("stats", &self.stats)?;
        st.end()
    }
}
