//! Transition events and run statistics.

/// Outcome of one proposal-loop transition.
///
/// Indices refer to the engine's rosters; resolve them with
/// [`DeferredAcceptance::proposer_name`](super::DeferredAcceptance::proposer_name)
/// and [`DeferredAcceptance::partner_name`](super::DeferredAcceptance::partner_name).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum StepEvent {
    /// The proposer had no remaining capacity and was dropped from the queue.
    Skipped { proposer: usize },

    /// The proposer ran out of candidates and is permanently done.
    Exhausted { proposer: usize },

    /// The partner had a free slot and accepted.
    Accepted { proposer: usize, partner: usize },

    /// The partner was full and replaced its worst match with the proposer.
    Displaced {
        proposer: usize,
        partner: usize,
        evicted: usize,
    },

    /// The partner was full and kept its matches. `tie` is set when the
    /// proposer ranked equal to the worst incumbent.
    Rejected {
        proposer: usize,
        partner: usize,
        tie: bool,
    },
}

impl StepEvent {
    /// The proposer dequeued for this step.
    pub fn proposer(&self) -> usize {
        match *self {
            StepEvent::Skipped { proposer }
            | StepEvent::Exhausted { proposer }
            | StepEvent::Accepted { proposer, .. }
            | StepEvent::Displaced { proposer, .. }
            | StepEvent::Rejected { proposer, .. } => proposer,
        }
    }

    /// The partner proposed to, if a proposal was made.
    pub fn partner(&self) -> Option<usize> {
        match *self {
            StepEvent::Accepted { partner, .. }
            | StepEvent::Displaced { partner, .. }
            | StepEvent::Rejected { partner, .. } => Some(partner),
            StepEvent::Skipped { .. } | StepEvent::Exhausted { .. } => None,
        }
    }
}

/// Counters collected over one matching run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MatchStats {
    /// Queue pops.
    pub steps: usize,
    /// Offers made to a partner.
    pub proposals: usize,
    /// Offers accepted into a free slot.
    pub acceptances: usize,
    /// Offers accepted by evicting an incumbent.
    pub evictions: usize,
    /// Offers turned down, ties included.
    pub rejections: usize,
    /// Offers turned down because the challenger tied the worst incumbent.
    pub tie_rejections: usize,
    /// Proposers that ran out of candidates.
    pub exhausted: usize,
}

impl MatchStats {
    pub(crate) fn record(&mut self, event: &StepEvent) {
        self.steps += 1;
        match event {
            StepEvent::Skipped { .. } => {}
            StepEvent::Exhausted { .. } => self.exhausted += 1,
            StepEvent::Accepted { .. } => {
                self.proposals += 1;
                self.acceptances += 1;
            }
            StepEvent::Displaced { .. } => {
                self.proposals += 1;
                self.evictions += 1;
            }
            StepEvent::Rejected { tie, .. } => {
                self.proposals += 1;
                self.rejections += 1;
                if *tie {
                    self.tie_rejections += 1;
                }
            }
        }
    }

    /// Component-wise sum.
    pub fn merge(&mut self, other: &MatchStats) {
        self.steps += other.steps;
        self.proposals += other.proposals;
        self.acceptances += other.acceptances;
        self.evictions += other.evictions;
        self.rejections += other.rejections;
        self.tie_rejections += other.tie_rejections;
        self.exhausted += other.exhausted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_proposals() {
        let mut stats = MatchStats::default();
        for event in [
            StepEvent::Accepted { proposer: 0, partner: 0 },
            StepEvent::Rejected { proposer: 1, partner: 0, tie: true },
            StepEvent::Displaced { proposer: 1, partner: 1, evicted: 2 },
            StepEvent::Exhausted { proposer: 2 },
            StepEvent::Skipped { proposer: 0 },
        ] {
            stats.record(&event);
        }

        assert_eq!(stats.steps, 5);
        assert_eq!(stats.proposals, 3);
        assert_eq!(stats.acceptances, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.rejections, 1);
        assert_eq!(stats.tie_rejections, 1);
        assert_eq!(stats.exhausted, 1);
    }

    #[test]
    fn test_event_accessors() {
        let e = StepEvent::Displaced { proposer: 3, partner: 1, evicted: 0 };
        assert_eq!(e.proposer(), 3);
        assert_eq!(e.partner(), Some(1));
        assert_eq!(StepEvent::Exhausted { proposer: 4 }.partner(), None);
    }

    #[test]
    fn test_merge() {
        let mut a = MatchStats { steps: 2, proposals: 1, ..Default::default() };
        let b = MatchStats { steps: 3, exhausted: 1, ..Default::default() };
        a.merge(&b);
        assert_eq!(a.steps, 5);
        assert_eq!(a.proposals, 1);
        assert_eq!(a.exhausted, 1);
    }
}
