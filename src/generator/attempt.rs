//! Per-attempt state: the roster and its counters.

use std::collections::HashMap;

use super::member::{Member, MemberIndex};
use crate::models::Participant;

/// State owned by a single grouping attempt.
///
/// Holds a fresh copy of the roster (so ledgers never leak between
/// attempts) and the counters the fill algorithm consults. The repairing
/// budget is handed in by the generator and stays fixed for the attempt.
#[derive(Debug, Clone)]
pub struct Attempt {
    members: Vec<Member>,
    index: HashMap<String, MemberIndex>,
    /// Pairs currently grouped together more than once.
    pub net_repairings: usize,
    /// Forced reshuffles performed so far.
    pub reshuffle_count: usize,
    /// Repeat pairings tolerated by this attempt.
    pub desired_repairings: usize,
}

impl Attempt {
    /// Builds attempt state from the roster.
    pub fn new(roster: &[Participant], desired_repairings: usize) -> Self {
        let members: Vec<Member> = roster.iter().cloned().map(Member::new).collect();
        let index = roster
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self {
            members,
            index,
            net_repairings: 0,
            reshuffle_count: 0,
            desired_repairings,
        }
    }

    /// Number of roster members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// All roster members, in roster order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Member at the given index.
    pub fn member(&self, index: MemberIndex) -> &Member {
        &self.members[index]
    }

    /// Looks up a member by external ID.
    pub fn index_of(&self, id: &str) -> Option<MemberIndex> {
        self.index.get(id).copied()
    }

    /// Whether the repairing budget still has room.
    pub fn has_repairing_budget(&self) -> bool {
        self.net_repairings < self.desired_repairings
    }

    /// Whether the attempt finished within its budget.
    pub fn within_budget(&self) -> bool {
        self.net_repairings <= self.desired_repairings
    }

    /// Zeroes both counters.
    pub fn reset_counters(&mut self) {
        self.net_repairings = 0;
        self.reshuffle_count = 0;
    }

    /// Records that `a` and `b` share a group.
    ///
    /// A count above one after the increment is a repairing.
    pub fn collaborate(&mut self, a: MemberIndex, b: MemberIndex) {
        debug_assert_ne!(a, b, "a member cannot collaborate with themselves");
        let count = self.members[a].record(b);
        self.members[b].record(a);
        if count > 1 {
            self.net_repairings += 1;
        }
    }

    /// Undoes one [`collaborate`](Self::collaborate) for `a` and `b`.
    ///
    /// No-op when the pair has no history.
    pub fn uncollaborate(&mut self, a: MemberIndex, b: MemberIndex) {
        let before = self.members[a].forget(b);
        if before == 0 {
            return;
        }
        self.members[b].forget(a);
        if before > 1 {
            self.net_repairings = self.net_repairings.saturating_sub(1);
        }
    }

    /// Whether `a` and `b` have ever shared a group.
    pub fn has_collaborated(&self, a: MemberIndex, b: MemberIndex) -> bool {
        self.members[a].has_collaborated_with(b)
    }

    /// Participant records for the given members.
    pub fn participants(&self, indices: &[MemberIndex]) -> Vec<Participant> {
        indices
            .iter()
            .map(|&i| self.members[i].participant().clone())
            .collect()
    }
}
