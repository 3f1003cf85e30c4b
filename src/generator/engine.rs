//! Grouping engine: per-project filling and the budget escalation loop.
//!
//! # Algorithm
//!
//! One attempt builds a fresh roster, replays prior groupings into the
//! collaboration ledger, then fills each project in order. Filling pulls
//! groups round-robin from a FIFO queue and adds one member per turn:
//!
//! 1. A random *fresh* ungrouped member (no history with the group), else
//! 2. a random *stale* ungrouped member while the repairing budget has room,
//!    else
//! 3. a *reshuffle*: poach a member with no history with the group from
//!    wherever they are, evicting random members of the group first if
//!    nobody qualifies.
//!
//! An attempt fails when it exceeds the reshuffle quota or ends with more
//! repairings than budgeted. Each failure raises the budget by one and the
//! next attempt starts from scratch. The budget only grows, so the loop
//! terminates once it exceeds the repairings any complete grouping needs.

use rand::Rng;
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::SmallRng;
use tracing::{debug, info, trace, warn};

use super::attempt::Attempt;
use super::group::Group;
use super::project::{GroupIndex, Project};
use super::queue::FillQueue;
use crate::config::GroupingConfig;
use crate::error::GroupingError;
use crate::models::{ClassGrouping, Participant, ProjectGrouping};
use crate::validation::validate_input;

/// Input container for grouping.
#[derive(Debug, Clone, Default)]
pub struct GroupingRequest {
    /// Participants to group.
    pub roster: Vec<Participant>,
    /// Projects to generate groupings for, in order.
    pub project_names: Vec<String>,
    /// Groupings from earlier projects, used only to seed history.
    pub priors: Vec<ProjectGrouping>,
}

impl GroupingRequest {
    /// Creates a request without prior groupings.
    pub fn new(roster: Vec<Participant>, project_names: Vec<String>) -> Self {
        Self {
            roster,
            project_names,
            priors: Vec::new(),
        }
    }

    /// Adds a project name.
    pub fn with_project(mut self, name: impl Into<String>) -> Self {
        self.project_names.push(name.into());
        self
    }

    /// Adds a prior grouping.
    pub fn with_prior(mut self, prior: ProjectGrouping) -> Self {
        self.priors.push(prior);
        self
    }

    /// Sets all prior groupings.
    pub fn with_priors(mut self, priors: Vec<ProjectGrouping>) -> Self {
        self.priors = priors;
        self
    }
}

/// How an attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// All projects filled within budget.
    Accepted,
    /// All projects filled, but with more repairings than budgeted.
    OverBudget,
    /// A project ran out of reshuffles.
    ReshuffleQuotaExceeded,
}

/// Record of one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSummary {
    /// Repairing budget the attempt ran with.
    pub desired_repairings: usize,
    /// Repairings when the attempt ended.
    pub net_repairings: usize,
    /// Reshuffles performed.
    pub reshuffles: usize,
    /// How the attempt ended.
    pub outcome: AttemptOutcome,
}

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// The accepted grouping.
    pub grouping: ClassGrouping,
    /// Repairings in the accepted attempt.
    pub net_repairings: usize,
    /// Budget of the accepted attempt.
    pub desired_repairings: usize,
    /// Every attempt made, in order. The last one is accepted.
    pub attempts: Vec<AttemptSummary>,
}

impl GenerationResult {
    /// Number of attempts made.
    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }
}

/// Randomized grouping generator.
///
/// # Example
///
/// ```
/// use u_grouping::config::GroupingConfig;
/// use u_grouping::generator::{GroupingRequest, TeamGenerator};
/// use u_grouping::models::Participant;
///
/// let roster: Vec<Participant> = (0..9)
///     .map(|i| Participant::new(format!("s{i}")))
///     .collect();
/// let request = GroupingRequest::new(roster, vec!["Bridge".into(), "Robot".into()]);
///
/// let generator = TeamGenerator::new(GroupingConfig::new(3).with_seed(42)).unwrap();
/// let result = generator.generate(&request).unwrap();
/// assert_eq!(result.grouping.project_count(), 2);
/// assert!(result.net_repairings <= result.desired_repairings);
/// ```
#[derive(Debug, Clone)]
pub struct TeamGenerator {
    config: GroupingConfig,
}

impl TeamGenerator {
    /// Creates a generator, rejecting an invalid configuration.
    pub fn new(config: GroupingConfig) -> Result<Self, GroupingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    /// Generates a grouping, seeding randomness from the configuration.
    ///
    /// Without a configured seed the generator draws from OS entropy.
    pub fn generate(&self, request: &GroupingRequest) -> Result<GenerationResult, GroupingError> {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.generate_with_rng(request, &mut rng)
    }

    /// Generates a grouping using the given random source.
    ///
    /// Fails fast on invalid input. Otherwise loops until an attempt fits
    /// its repairing budget; reshuffle-quota failures are absorbed here.
    pub fn generate_with_rng<R: Rng>(
        &self,
        request: &GroupingRequest,
        rng: &mut R,
    ) -> Result<GenerationResult, GroupingError> {
        validate_input(&request.roster, &request.project_names, &self.config)?;

        let mut desired_repairings = self.config.initial_repairing_budget;
        let mut attempts = Vec::new();

        loop {
            debug!(
                attempt = attempts.len() + 1,
                desired_repairings, "starting grouping attempt"
            );

            let mut attempt = self.prepare_attempt(request, desired_repairings);
            match self.fill_projects(request, &mut attempt, rng) {
                Ok(projects) if attempt.within_budget() => {
                    attempts.push(summarize(&attempt, AttemptOutcome::Accepted));
                    info!(
                        net_repairings = attempt.net_repairings,
                        attempts = attempts.len(),
                        "grouping succeeded"
                    );
                    let grouping = ClassGrouping {
                        projects: projects.iter().map(|p| p.to_grouping(&attempt)).collect(),
                    };
                    return Ok(GenerationResult {
                        grouping,
                        net_repairings: attempt.net_repairings,
                        desired_repairings,
                        attempts,
                    });
                }
                Ok(_) => {
                    attempts.push(summarize(&attempt, AttemptOutcome::OverBudget));
                    warn!(
                        net_repairings = attempt.net_repairings,
                        desired_repairings = desired_repairings + 1,
                        "grouping finished over budget, raising repairing budget"
                    );
                }
                Err(e) if e.is_recoverable() => {
                    attempts.push(summarize(&attempt, AttemptOutcome::ReshuffleQuotaExceeded));
                    debug!(error = %e, "attempt abandoned");
                    warn!(
                        desired_repairings = desired_repairings + 1,
                        "reshuffle quota reached, raising repairing budget"
                    );
                }
                Err(e) => return Err(e),
            }

            desired_repairings += 1;
        }
    }

    /// Builds a fresh roster and replays prior groupings into it.
    ///
    /// Counters are zeroed after the replay, so history from priors only
    /// shapes candidate choice and never counts against the budget.
    fn prepare_attempt(&self, request: &GroupingRequest, desired_repairings: usize) -> Attempt {
        let mut attempt = Attempt::new(&request.roster, desired_repairings);
        replay_priors(&request.priors, &mut attempt);
        attempt.reset_counters();
        attempt
    }

    fn fill_projects<R: Rng>(
        &self,
        request: &GroupingRequest,
        attempt: &mut Attempt,
        rng: &mut R,
    ) -> Result<Vec<Project>, GroupingError> {
        let mut projects = Vec::with_capacity(request.project_names.len());
        for name in &request.project_names {
            let mut project = Project::new(
                name.as_str(),
                attempt.member_count(),
                self.config.optimal_group_size,
                self.config.prefer_smaller_groups,
            );
            fill_project(&mut project, attempt, self.config.max_reshuffles, rng)?;
            projects.push(project);
        }
        Ok(projects)
    }
}

/// Fills every group of `project`.
///
/// Fails with [`GroupingError::ReshuffleQuotaExceeded`] once the attempt's
/// reshuffle count passes `max_reshuffles`.
pub fn fill_project<R: Rng>(
    project: &mut Project,
    attempt: &mut Attempt,
    max_reshuffles: usize,
    rng: &mut R,
) -> Result<(), GroupingError> {
    let mut queue = project.fill_queue();
    while let Some(group) = queue.dequeue() {
        let placed = place_member(project, group, &mut queue, attempt, max_reshuffles, rng);
        if !project.group(group).is_full() && !queue.contains(&group) {
            queue.enqueue(group);
        }
        placed?;
    }
    Ok(())
}

/// Adds one member to `group`, reshuffling if the budget is spent.
fn place_member<R: Rng>(
    project: &mut Project,
    group: GroupIndex,
    queue: &mut FillQueue<GroupIndex>,
    attempt: &mut Attempt,
    max_reshuffles: usize,
    rng: &mut R,
) -> Result<(), GroupingError> {
    let fresh = project.fresh_candidates(group, attempt);
    if let Some(&member) = fresh.choose(rng) {
        project.assign(group, member, attempt);
        return Ok(());
    }

    if attempt.has_repairing_budget() {
        if let Some(&member) = project.ungrouped().choose(rng) {
            trace!(
                project = project.name(),
                member = attempt.member(member).id(),
                "placing stale member"
            );
            project.assign(group, member, attempt);
            return Ok(());
        }
    }

    attempt.reshuffle_count += 1;
    if attempt.reshuffle_count > max_reshuffles {
        return Err(GroupingError::ReshuffleQuotaExceeded {
            project: project.name().to_string(),
            limit: max_reshuffles,
        });
    }

    let member = loop {
        let poachable = project.poachable_candidates(group, attempt);
        if let Some(&member) = poachable.choose(rng) {
            break member;
        }
        let Some(&victim) = project.group(group).members().choose(rng) else {
            return Err(GroupingError::NoCandidates {
                project: project.name().to_string(),
            });
        };
        project.evict(group, victim, attempt);
    };

    project.poach(member, group, queue, attempt);
    Ok(())
}

/// Seeds the ledger with each prior group's surviving members.
fn replay_priors(priors: &[ProjectGrouping], attempt: &mut Attempt) {
    for prior in priors {
        for prior_group in &prior.groups {
            let mut members = Vec::with_capacity(prior_group.members.len());
            for participant in &prior_group.members {
                let Some(index) = attempt.index_of(&participant.id) else {
                    continue;
                };
                if members.contains(&index) {
                    warn!(
                        project = %prior.name,
                        participant = %participant.id,
                        "participant listed twice in a prior group"
                    );
                    continue;
                }
                members.push(index);
            }

            let mut transient = Group::new(members.len());
            for index in members {
                transient.add_member(index, attempt);
            }
        }
    }
}

fn summarize(attempt: &Attempt, outcome: AttemptOutcome) -> AttemptSummary {
    AttemptSummary {
        desired_repairings: attempt.desired_repairings,
        net_repairings: attempt.net_repairings,
        reshuffles: attempt.reshuffle_count,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupAssignment;
    use crate::validation::ValidationErrorKind;
    use std::collections::HashSet;

    fn roster(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant::new(format!("s{i}")).with_name(format!("Student {i}")))
            .collect()
    }

    fn projects(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn assert_partitions(grouping: &ProjectGrouping, roster: &[Participant]) {
        let mut seen = HashSet::new();
        for group in &grouping.groups {
            for member in &group.members {
                assert!(seen.insert(member.id.clone()), "{} placed twice", member.id);
            }
        }
        let expected: HashSet<String> = roster.iter().map(|p| p.id.clone()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_nine_members_two_projects() {
        let request = GroupingRequest::new(roster(9), projects(&["P1", "P2"]));
        let generator = TeamGenerator::new(GroupingConfig::new(3).with_seed(42)).unwrap();
        let result = generator.generate(&request).unwrap();

        assert_eq!(result.grouping.project_count(), 2);
        for project in &result.grouping.projects {
            assert_eq!(project.group_sizes(), vec![3, 3, 3]);
            assert_partitions(project, &request.roster);
        }
        assert!(result.net_repairings <= result.desired_repairings);
        assert_eq!(
            result.attempts.last().map(|a| a.outcome),
            Some(AttemptOutcome::Accepted)
        );
    }

    #[test]
    fn test_same_seed_same_grouping() {
        let request = GroupingRequest::new(roster(12), projects(&["P1", "P2", "P3"]));
        let generator = TeamGenerator::new(GroupingConfig::new(4).with_seed(7)).unwrap();
        let first = generator.generate(&request).unwrap();
        let second = generator.generate(&request).unwrap();
        assert_eq!(first.grouping, second.grouping);
    }

    #[test]
    fn test_budget_never_decreases() {
        // Four members in pairs over four projects: only three perfect rounds exist.
        let request = GroupingRequest::new(roster(4), projects(&["P1", "P2", "P3", "P4"]));
        let config = GroupingConfig::new(2).with_seed(3).with_max_reshuffles(20);
        let result = TeamGenerator::new(config).unwrap().generate(&request).unwrap();

        assert!(result.attempt_count() >= 2);
        assert!(result
            .attempts
            .windows(2)
            .all(|w| w[0].desired_repairings <= w[1].desired_repairings));
        assert!(result
            .attempts
            .windows(2)
            .all(|w| w[1].desired_repairings == w[0].desired_repairings + 1));
        assert!(result.desired_repairings >= 1);
        assert!(result.net_repairings <= result.desired_repairings);
        for project in &result.grouping.projects {
            assert_partitions(project, &request.roster);
        }
    }

    #[test]
    fn test_initial_budget_is_used() {
        let request = GroupingRequest::new(roster(6), projects(&["P1"]));
        let config = GroupingConfig::new(3).with_seed(1).with_initial_repairing_budget(5);
        let result = TeamGenerator::new(config).unwrap().generate(&request).unwrap();
        assert_eq!(result.attempts[0].desired_repairings, 5);
        assert_eq!(result.attempt_count(), 1);
    }

    #[test]
    fn test_priors_steer_first_project() {
        // Prior pairs {s0,s1} {s2,s3}; with budget 0 they must not reunite.
        let prior = ProjectGrouping::new("Earlier")
            .with_group(GroupAssignment::new(vec![
                Participant::new("s0"),
                Participant::new("s1"),
            ]))
            .with_group(GroupAssignment::new(vec![
                Participant::new("s2"),
                Participant::new("s3"),
            ]));
        let request = GroupingRequest::new(roster(4), projects(&["Next"])).with_prior(prior);
        let generator = TeamGenerator::new(GroupingConfig::new(2).with_seed(11)).unwrap();
        let result = generator.generate(&request).unwrap();

        assert_eq!(result.net_repairings, 0);
        let next = result.grouping.project("Next").unwrap();
        assert!(!next.group_of("s0").unwrap().contains("s1"));
        assert!(!next.group_of("s2").unwrap().contains("s3"));
    }

    #[test]
    fn test_prior_members_not_on_roster_are_ignored() {
        let prior = ProjectGrouping::new("Earlier").with_group(GroupAssignment::new(vec![
            Participant::new("s0"),
            Participant::new("gone"),
            Participant::new("s0"),
        ]));
        let mut attempt = Attempt::new(&roster(2), 0);
        replay_priors(&[prior], &mut attempt);
        assert_eq!(attempt.member(0).partner_count(), 0);
        assert_eq!(attempt.net_repairings, 0);
    }

    #[test]
    fn test_replay_seeds_ledger() {
        let prior = ProjectGrouping::new("Earlier").with_group(GroupAssignment::new(vec![
            Participant::new("s1"),
            Participant::new("s2"),
        ]));
        let generator = TeamGenerator::new(GroupingConfig::new(2)).unwrap();
        let request = GroupingRequest::new(roster(3), projects(&["P"]))
            .with_prior(prior.clone())
            .with_prior(prior);

        let attempt = generator.prepare_attempt(&request, 0);
        assert_eq!(attempt.member(1).collaborations_with(2), 2);
        assert_eq!(attempt.net_repairings, 0);
        assert_eq!(attempt.reshuffle_count, 0);
    }

    #[test]
    fn test_fill_project_without_history_uses_fresh_members() {
        let mut attempt = Attempt::new(&roster(10), 0);
        let mut project = Project::new("P", 10, 3, false);
        let mut rng = SmallRng::seed_from_u64(5);

        fill_project(&mut project, &mut attempt, 1000, &mut rng).unwrap();
        assert!(project.is_complete());
        assert!(project.ungrouped().is_empty());
        assert_eq!(attempt.net_repairings, 0);
        assert_eq!(attempt.reshuffle_count, 0);
    }

    #[test]
    fn test_fill_project_reshuffles_when_budget_spent() {
        // Everyone has met everyone: no fresh or poachable members exist
        // until the group being filled is emptied.
        let mut attempt = Attempt::new(&roster(4), 0);
        for a in 0..4 {
            for b in (a + 1)..4 {
                attempt.collaborate(a, b);
            }
        }
        attempt.reset_counters();
        let mut project = Project::new("P", 4, 2, false);
        let mut rng = SmallRng::seed_from_u64(9);

        let err = fill_project(&mut project, &mut attempt, 25, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GroupingError::ReshuffleQuotaExceeded {
                project: "P".into(),
                limit: 25
            }
        );
        assert_eq!(attempt.reshuffle_count, 26);
    }

    #[test]
    fn test_fill_project_uses_stale_members_within_budget() {
        let mut attempt = Attempt::new(&roster(4), 10);
        for a in 0..4 {
            for b in (a + 1)..4 {
                attempt.collaborate(a, b);
            }
        }
        attempt.reset_counters();
        let mut project = Project::new("P", 4, 2, false);
        let mut rng = SmallRng::seed_from_u64(9);

        fill_project(&mut project, &mut attempt, 25, &mut rng).unwrap();
        assert!(project.is_complete());
        assert_eq!(attempt.net_repairings, 2);
        assert_eq!(attempt.reshuffle_count, 0);
    }

    #[test]
    fn test_invalid_request_fails_fast() {
        let generator = TeamGenerator::new(GroupingConfig::default()).unwrap();
        let err = generator
            .generate(&GroupingRequest::new(Vec::new(), Vec::new()))
            .unwrap_err();
        let GroupingError::Invalid(errors) = err else {
            panic!("expected validation failure");
        };
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyRoster));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NoProjects));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            TeamGenerator::new(GroupingConfig::new(0)),
            Err(GroupingError::Invalid(_))
        ));
    }

    #[test]
    fn test_roster_smaller_than_group_size() {
        let request = GroupingRequest::new(roster(2), projects(&["P1", "P2"]));
        let generator = TeamGenerator::new(GroupingConfig::new(5).with_seed(2)).unwrap();
        let result = generator.generate(&request).unwrap();
        for project in &result.grouping.projects {
            assert_eq!(project.group_sizes(), vec![2]);
        }
        // The same pair in both projects is unavoidable.
        assert_eq!(result.net_repairings, 1);
        assert!(result.desired_repairings >= 1);
    }

    #[test]
    fn test_request_builder() {
        let request = GroupingRequest::new(roster(3), Vec::new())
            .with_project("A")
            .with_project("B")
            .with_priors(vec![ProjectGrouping::new("Old")]);
        assert_eq!(request.project_names, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(request.priors.len(), 1);
    }
}
