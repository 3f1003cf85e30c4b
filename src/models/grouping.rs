//! Grouping (solution) model.
//!
//! A class grouping is the complete output of the generator: one project
//! grouping per requested project, each partitioning the whole roster into
//! groups. The same types describe prior groupings fed back in from earlier
//! terms, so a finished grouping can seed the next run unchanged.

use serde::{Deserialize, Serialize};

use super::Participant;

/// All project groupings generated for a class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGrouping {
    /// Project groupings in request order.
    pub projects: Vec<ProjectGrouping>,
}

/// The groups formed for one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectGrouping {
    /// Project name.
    pub name: String,
    /// Groups, each a subset of the roster.
    pub groups: Vec<GroupAssignment>,
}

/// Members placed together in one group. Member order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAssignment {
    /// Group members.
    pub members: Vec<Participant>,
}

impl GroupAssignment {
    /// Creates a group from its members.
    pub fn new(members: Vec<Participant>) -> Self {
        Self { members }
    }

    /// Number of members.
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Whether the participant with the given ID is in this group.
    pub fn contains(&self, participant_id: &str) -> bool {
        self.members.iter().any(|m| m.id == participant_id)
    }
}

impl ProjectGrouping {
    /// Creates an empty project grouping.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    /// Adds a group.
    pub fn with_group(mut self, group: GroupAssignment) -> Self {
        self.groups.push(group);
        self
    }

    /// Group sizes in group order.
    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(|g| g.size()).collect()
    }

    /// Total number of placed members.
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(|g| g.size()).sum()
    }

    /// Finds the group holding the given participant.
    pub fn group_of(&self, participant_id: &str) -> Option<&GroupAssignment> {
        self.groups.iter().find(|g| g.contains(participant_id))
    }
}

impl ClassGrouping {
    /// Creates an empty class grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a project grouping by name.
    pub fn project(&self, name: &str) -> Option<&ProjectGrouping> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Number of project groupings.
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }
}
