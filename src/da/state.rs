//! Mutable per-run state: cursors, the proposal queue, and match lists.

use super::types::MatchStats;
use crate::preferences::PreferenceTiers;
use std::collections::VecDeque;

/// A proposer's position in its own tiers.
///
/// `tier` is the current tier, `pos` the next entry within it. The cursor
/// only moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub tier: usize,
    pub pos: usize,
}

impl Cursor {
    /// Returns the next candidate and moves past it, skipping spent tiers.
    pub fn advance(&mut self, tiers: &PreferenceTiers) -> Option<usize> {
        while let Some(tier) = tiers.tier(self.tier) {
            if let Some(&candidate) = tier.get(self.pos) {
                self.pos += 1;
                return Some(candidate);
            }
            self.tier += 1;
            self.pos = 0;
        }
        None
    }

    /// Whether any candidate remains after the cursor.
    pub fn has_remaining(&self, tiers: &PreferenceTiers) -> bool {
        match tiers.tier(self.tier) {
            None => false,
            Some(tier) if self.pos < tier.len() => true,
            Some(_) => tiers.iter().skip(self.tier + 1).any(|t| !t.is_empty()),
        }
    }
}

/// FIFO of proposers waiting to make their next offer.
///
/// A proposer is queued at most once at a time: it is pushed back only
/// after being popped, or after losing its match, which it can only hold
/// while not queued. The queue therefore never holds more entries than
/// there are proposers.
#[derive(Debug, Clone)]
pub struct ProposalQueue {
    items: VecDeque<usize>,
    bound: usize,
}

impl ProposalQueue {
    /// Creates an empty queue for up to `bound` proposers.
    pub fn new(bound: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(bound),
            bound,
        }
    }

    /// Creates a queue holding `proposers` in order.
    pub fn seeded(bound: usize, proposers: impl IntoIterator<Item = usize>) -> Self {
        let mut queue = Self::new(bound);
        for p in proposers {
            queue.push(p);
        }
        queue
    }

    pub fn push(&mut self, proposer: usize) {
        debug_assert!(self.items.len() < self.bound, "proposal queue overflow");
        debug_assert!(!self.items.contains(&proposer), "proposer {proposer} queued twice");
        self.items.push_back(proposer);
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Queued proposers, front first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().copied()
    }
}

/// Both sides' match lists plus proposer cursors.
///
/// `p` appears in `partner_matches[b]` exactly when `b` appears in
/// `proposer_matches[p]`. Lists keep acceptance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub(crate) proposer_matches: Vec<Vec<usize>>,
    pub(crate) partner_matches: Vec<Vec<usize>>,
    pub(crate) cursors: Vec<Cursor>,
    pub(crate) stats: MatchStats,
}

impl MatchState {
    /// Fresh state with every list empty and every cursor at the start.
    pub fn new(proposers: usize, partners: usize) -> Self {
        Self {
            proposer_matches: vec![Vec::new(); proposers],
            partner_matches: vec![Vec::new(); partners],
            cursors: vec![Cursor::default(); proposers],
            stats: MatchStats::default(),
        }
    }

    pub fn partners_of(&self, proposer: usize) -> &[usize] {
        &self.proposer_matches[proposer]
    }

    pub fn proposers_of(&self, partner: usize) -> &[usize] {
        &self.partner_matches[partner]
    }

    pub fn cursor(&self, proposer: usize) -> Cursor {
        self.cursors[proposer]
    }

    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    pub(crate) fn link(&mut self, proposer: usize, partner: usize) {
        self.proposer_matches[proposer].push(partner);
        self.partner_matches[partner].push(proposer);
    }

    pub(crate) fn unlink(&mut self, proposer: usize, partner: usize) {
        remove_first(&mut self.proposer_matches[proposer], partner);
        remove_first(&mut self.partner_matches[partner], proposer);
    }

    /// Clears the given members back to their initial state.
    pub(crate) fn reset(&mut self, proposers: &[usize], partners: &[usize]) {
        for &p in proposers {
            self.proposer_matches[p].clear();
            self.cursors[p] = Cursor::default();
        }
        for &b in partners {
            self.partner_matches[b].clear();
        }
        self.stats = MatchStats::default();
    }
}

fn remove_first(list: &mut Vec<usize>, value: usize) {
    if let Some(at) = list.iter().position(|&v| v == value) {
        list.remove(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_walks_tiers_in_order() {
        let tiers = PreferenceTiers::from_tiers(vec![vec![2], vec![0, 1]]);
        let mut cursor = Cursor::default();

        assert_eq!(cursor.advance(&tiers), Some(2));
        assert!(cursor.has_remaining(&tiers));
        assert_eq!(cursor.advance(&tiers), Some(0));
        assert_eq!(cursor.advance(&tiers), Some(1));
        assert!(!cursor.has_remaining(&tiers));
        assert_eq!(cursor.advance(&tiers), None);
        assert_eq!(cursor.advance(&tiers), None);
        assert_eq!(cursor, Cursor { tier: 2, pos: 0 });
    }

    #[test]
    fn test_cursor_skips_empty_tiers() {
        let tiers = PreferenceTiers::from_tiers(vec![vec![], vec![3], vec![]]);
        let mut cursor = Cursor::default();

        assert!(cursor.has_remaining(&tiers));
        assert_eq!(cursor.advance(&tiers), Some(3));
        assert!(!cursor.has_remaining(&tiers));
    }

    #[test]
    fn test_cursor_on_empty_preferences() {
        let tiers = PreferenceTiers::default();
        let mut cursor = Cursor::default();
        assert!(!cursor.has_remaining(&tiers));
        assert_eq!(cursor.advance(&tiers), None);
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = ProposalQueue::seeded(3, [2, 0]);
        queue.push(1);

        assert_eq!(queue.iter().collect::<Vec<_>>(), vec![2, 0, 1]);
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(0));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some(1));
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_link_unlink_keeps_both_sides_consistent() {
        let mut state = MatchState::new(3, 1);
        state.link(0, 0);
        state.link(1, 0);
        state.link(2, 0);
        state.unlink(1, 0);

        assert_eq!(state.proposers_of(0), &[0, 2]);
        assert!(state.partners_of(1).is_empty());
        assert_eq!(state.partners_of(2), &[0]);
    }

    #[test]
    fn test_reset_only_touches_given_members() {
        let mut state = MatchState::new(2, 2);
        state.link(0, 0);
        state.link(1, 1);
        state.cursors[0] = Cursor { tier: 1, pos: 0 };
        state.reset(&[0], &[0]);

        assert!(state.partners_of(0).is_empty());
        assert_eq!(state.cursor(0), Cursor::default());
        assert_eq!(state.partners_of(1), &[1]);
    }
}
