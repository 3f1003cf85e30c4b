//! One project's groups during filling.

use tracing::trace;

use super::attempt::Attempt;
use super::group::Group;
use super::member::MemberIndex;
use super::queue::FillQueue;
use crate::models::ProjectGrouping;
use crate::sizing::group_sizes;

/// Index of a group within its project.
pub type GroupIndex = usize;

/// A project's groups plus the members not yet placed in any of them.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    groups: Vec<Group>,
    ungrouped: Vec<MemberIndex>,
}

impl Project {
    /// Creates a project whose group sizes partition `member_count` members.
    ///
    /// Every member starts ungrouped.
    pub fn new(
        name: impl Into<String>,
        member_count: usize,
        optimal_group_size: usize,
        prefer_smaller_groups: bool,
    ) -> Self {
        let groups = group_sizes(member_count, optimal_group_size, prefer_smaller_groups)
            .into_iter()
            .map(Group::new)
            .collect();
        Self {
            name: name.into(),
            groups,
            ungrouped: (0..member_count).collect(),
        }
    }

    /// Project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All groups.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// A single group.
    pub fn group(&self, index: GroupIndex) -> &Group {
        &self.groups[index]
    }

    /// Members not in any group of this project.
    pub fn ungrouped(&self) -> &[MemberIndex] {
        &self.ungrouped
    }

    /// Whether every group is full.
    pub fn is_complete(&self) -> bool {
        self.groups.iter().all(Group::is_full)
    }

    /// A queue holding every group that still needs members.
    pub fn fill_queue(&self) -> FillQueue<GroupIndex> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, g)| !g.is_full())
            .map(|(i, _)| i)
            .collect()
    }

    /// The group currently holding `member`, if any.
    pub fn group_of(&self, member: MemberIndex) -> Option<GroupIndex> {
        self.groups.iter().position(|g| g.contains(member))
    }

    /// Ungrouped members with no history with anyone in `group`.
    pub fn fresh_candidates(&self, group: GroupIndex, attempt: &Attempt) -> Vec<MemberIndex> {
        let target = &self.groups[group];
        self.ungrouped
            .iter()
            .copied()
            .filter(|&m| !target.contains_collaborators_of(m, attempt))
            .collect()
    }

    /// Roster members outside `group`, placed or not, with no history with
    /// anyone in it.
    pub fn poachable_candidates(&self, group: GroupIndex, attempt: &Attempt) -> Vec<MemberIndex> {
        let target = &self.groups[group];
        (0..attempt.member_count())
            .filter(|&m| !target.contains(m) && !target.contains_collaborators_of(m, attempt))
            .collect()
    }

    /// Places an ungrouped member into `group`.
    pub fn assign(&mut self, group: GroupIndex, member: MemberIndex, attempt: &mut Attempt) {
        if self.groups[group].add_member(member, attempt) {
            self.mark_grouped(member);
        }
    }

    /// Takes `member` out of `group` and returns them to the ungrouped pool.
    pub fn evict(&mut self, group: GroupIndex, member: MemberIndex, attempt: &mut Attempt) {
        if self.groups[group].remove_member(member, attempt) {
            trace!(
                project = %self.name,
                member = attempt.member(member).id(),
                "evicted member"
            );
            self.mark_ungrouped(member);
        }
    }

    /// Moves `member` into `target`, wherever they currently are.
    ///
    /// A source group that was full becomes pending again; a source group
    /// that was not full is already pending. `target` is enqueued if it is
    /// still short and not already pending.
    pub fn poach(
        &mut self,
        member: MemberIndex,
        target: GroupIndex,
        queue: &mut FillQueue<GroupIndex>,
        attempt: &mut Attempt,
    ) {
        match self.group_of(member) {
            Some(source) => {
                let was_full = self.groups[source].is_full();
                self.groups[source].remove_member(member, attempt);
                if was_full && !queue.contains(&source) {
                    queue.enqueue(source);
                }
                trace!(
                    project = %self.name,
                    member = attempt.member(member).id(),
                    from = source,
                    to = target,
                    "poached member"
                );
            }
            None => self.mark_grouped(member),
        }

        self.groups[target].add_member(member, attempt);
        if !self.groups[target].is_full() && !queue.contains(&target) {
            queue.enqueue(target);
        }
    }

    /// Converts to the serializable representation.
    pub fn to_grouping(&self, attempt: &Attempt) -> ProjectGrouping {
        ProjectGrouping {
            name: self.name.clone(),
            groups: self.groups.iter().map(|g| g.to_assignment(attempt)).collect(),
        }
    }

    fn mark_grouped(&mut self, member: MemberIndex) {
        self.ungrouped.retain(|&m| m != member);
    }

    fn mark_ungrouped(&mut self, member: MemberIndex) {
        if !self.ungrouped.contains(&member) {
            self.ungrouped.push(member);
        }
    }
}
