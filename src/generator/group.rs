//! Fixed-size group under construction.

use tracing::warn;

use super::attempt::Attempt;
use super::member::MemberIndex;
use crate::models::GroupAssignment;

/// A group with a target size.
///
/// Adding or removing a member updates the collaboration ledger of every
/// other member, so the ledger always reflects current memberships plus
/// replayed history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    members: Vec<MemberIndex>,
    target_size: usize,
}

impl Group {
    /// Creates an empty group.
    pub fn new(target_size: usize) -> Self {
        Self {
            members: Vec::with_capacity(target_size),
            target_size,
        }
    }

    /// Current members.
    pub fn members(&self) -> &[MemberIndex] {
        &self.members
    }

    /// Number of members once complete.
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Current member count.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the group has reached its target size.
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.target_size
    }

    /// Whether `member` is in this group.
    pub fn contains(&self, member: MemberIndex) -> bool {
        self.members.contains(&member)
    }

    /// Whether any current member has collaborated with `candidate`.
    pub fn contains_collaborators_of(&self, candidate: MemberIndex, attempt: &Attempt) -> bool {
        self.members
            .iter()
            .any(|&m| attempt.has_collaborated(m, candidate))
    }

    /// Adds `member`, pairing them with everyone already in the group.
    ///
    /// Returns `false` without changing anything if the group is full or
    /// already holds the member.
    pub fn add_member(&mut self, member: MemberIndex, attempt: &mut Attempt) -> bool {
        if self.is_full() {
            warn!(member = attempt.member(member).id(), "refusing to add member to a full group");
            return false;
        }
        if self.contains(member) {
            warn!(member = attempt.member(member).id(), "member already in group");
            return false;
        }

        for &current in &self.members {
            attempt.collaborate(current, member);
        }
        self.members.push(member);
        true
    }

    /// Removes `member`, undoing their pairing with everyone left behind.
    ///
    /// Returns `false` if the member was not in the group.
    pub fn remove_member(&mut self, member: MemberIndex, attempt: &mut Attempt) -> bool {
        let Some(position) = self.members.iter().position(|&m| m == member) else {
            return false;
        };
        self.members.swap_remove(position);

        for &remaining in &self.members {
            attempt.uncollaborate(remaining, member);
        }
        true
    }

    /// Converts to the serializable representation.
    pub fn to_assignment(&self, attempt: &Attempt) -> GroupAssignment {
        GroupAssignment::new(attempt.participants(&self.members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;

    fn attempt(n: usize) -> Attempt {
        let roster: Vec<Participant> = (0..n)
            .map(|i| Participant::new(format!("s{i}")).with_name(format!("Student {i}")))
            .collect();
        Attempt::new(&roster, 0)
    }

    #[test]
    fn test_add_pairs_with_everyone() {
        let mut att = attempt(4);
        let mut g = Group::new(3);
        assert!(g.add_member(0, &mut att));
        assert!(g.add_member(1, &mut att));
        assert!(g.add_member(2, &mut att));

        assert!(g.is_full());
        assert!(att.has_collaborated(0, 1));
        assert!(att.has_collaborated(0, 2));
        assert!(att.has_collaborated(1, 2));
        assert!(!att.has_collaborated(0, 3));
        assert_eq!(att.net_repairings, 0);
    }

    #[test]
    fn test_add_refused_when_full_or_duplicate() {
        let mut att = attempt(3);
        let mut g = Group::new(2);
        assert!(g.add_member(0, &mut att));
        assert!(!g.add_member(0, &mut att));
        assert!(g.add_member(1, &mut att));
        assert!(!g.add_member(2, &mut att));
        assert_eq!(g.len(), 2);
        assert!(!att.has_collaborated(0, 2));
    }

    #[test]
    fn test_remove_undoes_pairings() {
        let mut att = attempt(3);
        let mut g = Group::new(3);
        for m in 0..3 {
            g.add_member(m, &mut att);
        }

        assert!(g.remove_member(1, &mut att));
        assert!(!g.contains(1));
        assert!(!att.has_collaborated(0, 1));
        assert!(!att.has_collaborated(2, 1));
        assert!(att.has_collaborated(0, 2));
        assert!(!g.remove_member(1, &mut att));
    }

    #[test]
    fn test_contains_collaborators_of() {
        let mut att = attempt(4);
        att.collaborate(1, 3);

        let mut g = Group::new(2);
        g.add_member(0, &mut att);
        assert!(!g.contains_collaborators_of(3, &att));
        g.add_member(1, &mut att);
        assert!(g.contains_collaborators_of(3, &att));
    }

    #[test]
    fn test_repairing_counted_across_groups() {
        let mut att = attempt(2);
        let mut first = Group::new(2);
        first.add_member(0, &mut att);
        first.add_member(1, &mut att);

        let mut second = Group::new(2);
        second.add_member(1, &mut att);
        second.add_member(0, &mut att);
        assert_eq!(att.net_repairings, 1);

        second.remove_member(0, &mut att);
        assert_eq!(att.net_repairings, 0);
        assert!(att.has_collaborated(0, 1));
    }

    #[test]
    fn test_to_assignment() {
        let mut att = attempt(2);
        let mut g = Group::new(2);
        g.add_member(1, &mut att);
        g.add_member(0, &mut att);

        let assignment = g.to_assignment(&att);
        assert_eq!(assignment.size(), 2);
        assert!(assignment.contains("s0"));
        assert_eq!(assignment.members[0].name, "Student 1");
    }
}
