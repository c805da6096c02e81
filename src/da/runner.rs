//! Deferred-acceptance execution loop.
//!
//! [`DeferredAcceptance`] holds the validated, immutable instance: tiers,
//! rank indices and capacities. Each run builds a fresh [`MatchState`] and
//! [`ProposalQueue`], so running the same instance twice gives the same
//! [`Matching`].

use super::capacity::Capacities;
use super::config::{MatchConfig, MatchMode};
use super::matching::{Matching, Rosters};
use super::state::{MatchState, ProposalQueue};
use super::types::StepEvent;
use crate::error::{MatchError, Side, ValidationError};
use crate::preferences::{Group, PreferenceTiers, Rank, RankIndex, Roster};
use std::cmp::Ordering;
use std::sync::Arc;

/// A validated stable-matching instance where group 1 proposes.
///
/// # Usage
///
/// ```
/// use u_matching::da::{DeferredAcceptance, MatchConfig};
/// use u_matching::preferences::Group;
///
/// let proposers = Group::new()
///     .with_member("john", [(1, "beth"), (2, "anna")])
///     .with_member("joe", [(1, "anna"), (2, "beth")]);
/// let partners = Group::new()
///     .with_member("beth", [(1, "john"), (2, "joe")])
///     .with_member("anna", [(1, "joe"), (2, "john")]);
///
/// let da = DeferredAcceptance::new(&proposers, &partners, &MatchConfig::default()).unwrap();
/// let matching = da.run();
/// assert_eq!(matching.partners_of("john"), Some(vec!["beth"]));
/// assert_eq!(matching.proposers_of("anna"), Some(vec!["joe"]));
/// ```
#[derive(Debug, Clone)]
pub struct DeferredAcceptance {
    pub(crate) rosters: Arc<Rosters>,
    pub(crate) mode: MatchMode,
    pub(crate) proposer_tiers: Vec<PreferenceTiers>,
    pub(crate) partner_tiers: Vec<PreferenceTiers>,
    pub(crate) proposer_ranks: Vec<RankIndex>,
    pub(crate) partner_ranks: Vec<RankIndex>,
    pub(crate) capacities: Capacities,
}

impl DeferredAcceptance {
    /// Validates and indexes both groups' preferences.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Validation`] for malformed preferences and
    /// [`MatchError::Configuration`] for an invalid capacity setup. Nothing
    /// is built unless every check passes.
    pub fn new(
        proposers: &Group,
        partners: &Group,
        config: &MatchConfig,
    ) -> Result<Self, MatchError> {
        let proposer_roster = Roster::from_group(proposers, Side::Proposers)?;
        let partner_roster = Roster::from_group(partners, Side::Partners)?;

        let proposer_tiers = normalize_all(proposers, &partner_roster, config.strict)?;
        let partner_tiers = normalize_all(partners, &proposer_roster, config.strict)?;
        let capacities = Capacities::resolve(config, &proposer_roster, &partner_roster)?;

        tracing::debug!(
            proposers = proposer_roster.len(),
            partners = partner_roster.len(),
            mode = %config.mode,
            strict = config.strict,
            partner_slots = capacities.total_partner_slots(),
            "built deferred acceptance instance"
        );

        Ok(Self {
            proposer_ranks: proposer_tiers.iter().map(RankIndex::from_tiers).collect(),
            partner_ranks: partner_tiers.iter().map(RankIndex::from_tiers).collect(),
            rosters: Arc::new(Rosters {
                proposers: proposer_roster,
                partners: partner_roster,
            }),
            mode: config.mode,
            proposer_tiers,
            partner_tiers,
            capacities,
        })
    }

    /// Runs the proposal loop to completion.
    pub fn run(&self) -> Matching {
        let matching = self.proposals().into_matching();
        let stats = matching.stats();
        tracing::debug!(
            steps = stats.steps,
            proposals = stats.proposals,
            evictions = stats.evictions,
            rejections = stats.rejections,
            exhausted = stats.exhausted,
            matched = matching.len(),
            "deferred acceptance finished"
        );
        matching
    }

    /// Starts a step-by-step run.
    ///
    /// Every proposer with capacity is queued in input order.
    pub fn proposals(&self) -> ProposalRun<'_> {
        let n = self.proposer_count();
        let queue = ProposalQueue::seeded(n, (0..n).filter(|&p| self.capacities.proposer(p) > 0));
        ProposalRun {
            engine: self,
            state: MatchState::new(n, self.partner_count()),
            queue,
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn proposer_count(&self) -> usize {
        self.rosters.proposers.len()
    }

    pub fn partner_count(&self) -> usize {
        self.rosters.partners.len()
    }

    /// Proposer names in input order.
    pub fn proposer_names(&self) -> &[String] {
        self.rosters.proposers.names()
    }

    /// Partner names in input order.
    pub fn partner_names(&self) -> &[String] {
        self.rosters.partners.names()
    }

    /// # Panics
    /// Panics if `index` is out of range.
    pub fn proposer_name(&self, index: usize) -> &str {
        self.rosters.proposers.name(index)
    }

    /// # Panics
    /// Panics if `index` is out of range.
    pub fn partner_name(&self, index: usize) -> &str {
        self.rosters.partners.name(index)
    }

    pub fn proposer_index(&self, name: &str) -> Option<usize> {
        self.rosters.proposers.index_of(name)
    }

    pub fn partner_index(&self, name: &str) -> Option<usize> {
        self.rosters.partners.index_of(name)
    }

    /// A proposer's tiers as partner names, best first.
    pub fn proposer_tiers(&self, proposer: &str) -> Option<Vec<Vec<&str>>> {
        let p = self.proposer_index(proposer)?;
        Some(tier_names(&self.proposer_tiers[p], &self.rosters.partners))
    }

    /// A partner's tiers as proposer names, best first.
    pub fn partner_tiers(&self, partner: &str) -> Option<Vec<Vec<&str>>> {
        let b = self.partner_index(partner)?;
        Some(tier_names(&self.partner_tiers[b], &self.rosters.proposers))
    }

    /// How `proposer` ranks `partner`. `None` if either name is unknown.
    pub fn proposer_rank_of(&self, proposer: &str, partner: &str) -> Option<Rank> {
        let p = self.proposer_index(proposer)?;
        let b = self.partner_index(partner)?;
        Some(self.proposer_ranks[p].rank_of(b))
    }

    /// How `partner` ranks `proposer`. `None` if either name is unknown.
    pub fn partner_rank_of(&self, partner: &str, proposer: &str) -> Option<Rank> {
        let b = self.partner_index(partner)?;
        let p = self.proposer_index(proposer)?;
        Some(self.partner_ranks[b].rank_of(p))
    }

    /// Resolved capacity of a partner.
    pub fn partner_capacity(&self, partner: &str) -> Option<usize> {
        self.partner_index(partner).map(|b| self.capacities.partner(b))
    }

    /// Resolved capacity of a proposer.
    pub fn proposer_capacity(&self, proposer: &str) -> Option<usize> {
        self.proposer_index(proposer).map(|p| self.capacities.proposer(p))
    }

    /// Pops proposers until the queue is empty.
    pub(crate) fn drive(&self, state: &mut MatchState, queue: &mut ProposalQueue) {
        while let Some(p) = queue.pop() {
            self.transition(state, queue, p);
        }
    }

    /// Handles one dequeued proposer.
    pub(crate) fn transition(
        &self,
        state: &mut MatchState,
        queue: &mut ProposalQueue,
        p: usize,
    ) -> StepEvent {
        let event = self.decide(state, queue, p);
        state.stats.record(&event);
        tracing::trace!(?event, "proposal step");
        event
    }

    fn decide(&self, state: &mut MatchState, queue: &mut ProposalQueue, p: usize) -> StepEvent {
        if !self.proposer_has_room(state, p) {
            return StepEvent::Skipped { proposer: p };
        }

        let tiers = &self.proposer_tiers[p];
        let Some(b) = state.cursors[p].advance(tiers) else {
            return StepEvent::Exhausted { proposer: p };
        };

        if state.partner_matches[b].len() < self.capacities.partner(b) {
            state.link(p, b);
            if self.proposer_has_room(state, p) {
                queue.push(p);
            }
            return StepEvent::Accepted {
                proposer: p,
                partner: b,
            };
        }

        let ranks = &self.partner_ranks[b];
        let (worst, worst_rank) = worst_incumbent(&state.partner_matches[b], ranks);
        match ranks.rank_of(p).cmp(&worst_rank) {
            Ordering::Less => {
                state.unlink(worst, b);
                state.link(p, b);
                if self.proposer_has_room(state, worst)
                    && state.cursors[worst].has_remaining(&self.proposer_tiers[worst])
                {
                    queue.push(worst);
                }
                if self.proposer_has_room(state, p) {
                    queue.push(p);
                }
                StepEvent::Displaced {
                    proposer: p,
                    partner: b,
                    evicted: worst,
                }
            }
            // Equal rank keeps the incumbent.
            tie => {
                queue.push(p);
                StepEvent::Rejected {
                    proposer: p,
                    partner: b,
                    tie: tie == Ordering::Equal,
                }
            }
        }
    }

    #[inline]
    fn proposer_has_room(&self, state: &MatchState, p: usize) -> bool {
        state.proposer_matches[p].len() < self.capacities.proposer(p)
    }

    /// Matching built directly from a finished state.
    pub(crate) fn finish(&self, state: MatchState) -> Matching {
        Matching::from_state(Arc::clone(&self.rosters), state)
    }
}

/// An in-progress run that can be advanced one transition at a time.
///
/// Also an [`Iterator`] over [`StepEvent`]s.
#[derive(Debug)]
pub struct ProposalRun<'a> {
    engine: &'a DeferredAcceptance,
    state: MatchState,
    queue: ProposalQueue,
}

impl<'a> ProposalRun<'a> {
    /// Performs one transition, or returns `None` once the queue is empty.
    pub fn step(&mut self) -> Option<StepEvent> {
        let p = self.queue.pop()?;
        Some(self.engine.transition(&mut self.state, &mut self.queue, p))
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn queue(&self) -> &ProposalQueue {
        &self.queue
    }

    pub fn engine(&self) -> &'a DeferredAcceptance {
        self.engine
    }

    /// Runs the remaining transitions and returns the result.
    pub fn into_matching(mut self) -> Matching {
        self.engine.drive(&mut self.state, &mut self.queue);
        self.engine.finish(self.state)
    }
}

impl Iterator for ProposalRun<'_> {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        self.step()
    }
}

/// The first incumbent with the worst rank, and that rank.
///
/// `incumbents` is non-empty whenever the partner is full, since every
/// capacity is at least 1.
fn worst_incumbent(incumbents: &[usize], ranks: &RankIndex) -> (usize, Rank) {
    let mut worst = incumbents[0];
    let mut worst_rank = ranks.rank_of(worst);
    for &q in &incumbents[1..] {
        let r = ranks.rank_of(q);
        if r > worst_rank {
            worst = q;
            worst_rank = r;
        }
    }
    (worst, worst_rank)
}

fn normalize_all(
    group: &Group,
    allowed: &Roster,
    strict: bool,
) -> Result<Vec<PreferenceTiers>, ValidationError> {
    group
        .members()
        .iter()
        .map(|m| PreferenceTiers::normalize(m, allowed, strict))
        .collect()
}

fn tier_names<'a>(tiers: &PreferenceTiers, opponents: &'a Roster) -> Vec<Vec<&'a str>> {
    tiers
        .iter()
        .map(|tier| tier.iter().map(|&i| opponents.name(i)).collect())
        .collect()
}
