//! Roster member with collaboration history.

use std::collections::HashMap;

use crate::models::Participant;

/// Position of a member in the attempt's roster.
///
/// Stable for the lifetime of one attempt; used as the member's identity in
/// every other member's ledger.
pub type MemberIndex = usize;

/// A participant plus their collaboration ledger.
///
/// The ledger maps another member's index to the number of groups the two
/// have shared. Entries at zero are removed, so `collaborators.len()` is the
/// number of distinct past partners.
///
/// Ledger entries are only changed through
/// [`Attempt::collaborate`](super::Attempt::collaborate) and
/// [`Attempt::uncollaborate`](super::Attempt::uncollaborate), which keep
/// both sides of a pair in step.
#[derive(Debug, Clone)]
pub struct Member {
    participant: Participant,
    collaborators: HashMap<MemberIndex, u32>,
}

impl Member {
    /// Creates a member with an empty ledger.
    pub fn new(participant: Participant) -> Self {
        Self {
            participant,
            collaborators: HashMap::new(),
        }
    }

    /// The underlying roster entry.
    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    /// External identifier.
    pub fn id(&self) -> &str {
        &self.participant.id
    }

    /// Number of groups shared with `other`.
    pub fn collaborations_with(&self, other: MemberIndex) -> u32 {
        self.collaborators.get(&other).copied().unwrap_or(0)
    }

    /// Whether this member has ever shared a group with `other`.
    pub fn has_collaborated_with(&self, other: MemberIndex) -> bool {
        self.collaborations_with(other) > 0
    }

    /// Number of distinct past partners.
    pub fn partner_count(&self) -> usize {
        self.collaborators.len()
    }

    /// Increments the count for `other`, returning the new count.
    pub(super) fn record(&mut self, other: MemberIndex) -> u32 {
        let count = self.collaborators.entry(other).or_insert(0);
        *count += 1;
        *count
    }

    /// Decrements the count for `other`, dropping the entry at zero.
    /// Returns the count before the decrement.
    pub(super) fn forget(&mut self, other: MemberIndex) -> u32 {
        let Some(count) = self.collaborators.get_mut(&other) else {
            return 0;
        };
        let before = *count;
        *count -= 1;
        if *count == 0 {
            self.collaborators.remove(&other);
        }
        before
    }
}
