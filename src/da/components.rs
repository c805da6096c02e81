//! Independent sub-problems of an instance.
//!
//! Proposers only interact through partners they list, so the graph with
//! an edge from each proposer to every partner it ranks splits into
//! components that can be matched separately. Restricted to one component,
//! the FIFO proposal order is the same as in a full run, so merging the
//! per-component results reproduces [`DeferredAcceptance::run`] exactly.

use super::matching::Matching;
use super::runner::DeferredAcceptance;
use super::state::{MatchState, ProposalQueue};
use super::types::MatchStats;
use std::sync::Arc;

/// Members of one connected component, each list in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    pub proposers: Vec<usize>,
    pub partners: Vec<usize>,
}

/// What one component run contributes to the merged result.
struct ComponentOutcome {
    proposers: Vec<(usize, Vec<usize>)>,
    partners: Vec<(usize, Vec<usize>)>,
    stats: MatchStats,
}

impl DeferredAcceptance {
    /// Connected components, ordered by their first member.
    ///
    /// Proposers come before partners when ordering, so a partner nobody
    /// lists ends up in a trailing component of its own.
    pub fn components(&self) -> Vec<Component> {
        let n = self.proposer_count();
        let mut sets = DisjointSets::new(n + self.partner_count());
        for (p, tiers) in self.proposer_tiers.iter().enumerate() {
            for b in tiers.opponents() {
                sets.union(p, n + b);
            }
        }

        let mut slot_of_root = vec![usize::MAX; sets.len()];
        let mut components: Vec<Component> = Vec::new();
        for node in 0..sets.len() {
            let root = sets.find(node);
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = components.len();
                components.push(Component::default());
            }
            let component = &mut components[slot_of_root[root]];
            if node < n {
                component.proposers.push(node);
            } else {
                component.partners.push(node - n);
            }
        }
        components
    }

    /// Runs each component separately, one after another, and merges.
    pub fn run_partitioned(&self) -> Matching {
        let components = self.components();
        let mut state = MatchState::new(self.proposer_count(), self.partner_count());
        let outcomes = components
            .iter()
            .map(|c| self.run_component(&mut state, c))
            .collect();
        self.merge(outcomes)
    }

    /// Runs components in parallel on the rayon thread pool and merges.
    ///
    /// Each worker thread reuses one [`MatchState`] across the components
    /// it handles.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(&self) -> Matching {
        use rayon::prelude::*;

        let components = self.components();
        tracing::debug!(components = components.len(), "running components in parallel");
        let (n, m) = (self.proposer_count(), self.partner_count());
        let outcomes = components
            .par_iter()
            .map_init(
                || MatchState::new(n, m),
                |state, c| self.run_component(state, c),
            )
            .collect();
        self.merge(outcomes)
    }

    fn run_component(&self, state: &mut MatchState, component: &Component) -> ComponentOutcome {
        state.reset(&component.proposers, &component.partners);
        let mut queue = ProposalQueue::seeded(
            component.proposers.len(),
            component
                .proposers
                .iter()
                .copied()
                .filter(|&p| self.capacities.proposer(p) > 0),
        );
        self.drive(state, &mut queue);

        ComponentOutcome {
            proposers: component
                .proposers
                .iter()
                .map(|&p| (p, state.partners_of(p).to_vec()))
                .collect(),
            partners: component
                .partners
                .iter()
                .map(|&b| (b, state.proposers_of(b).to_vec()))
                .collect(),
            stats: *state.stats(),
        }
    }

    fn merge(&self, outcomes: Vec<ComponentOutcome>) -> Matching {
        let mut by_proposer = vec![Vec::new(); self.proposer_count()];
        let mut by_partner = vec![Vec::new(); self.partner_count()];
        let mut stats = MatchStats::default();
        for outcome in outcomes {
            for (p, list) in outcome.proposers {
                by_proposer[p] = list;
            }
            for (b, list) in outcome.partners {
                by_partner[b] = list;
            }
            stats.merge(&outcome.stats);
        }
        Matching::from_parts(Arc::clone(&self.rosters), by_proposer, by_partner, stats)
    }
}

/// Union-find with path halving and union by size.
struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn len(&self) -> usize {
        self.parent.len()
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}
