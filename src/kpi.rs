//! Grouping quality metrics (KPIs).
//!
//! Computes pairing statistics from a finished class grouping, optionally
//! on top of prior groupings.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Pairings | Sum of C(k, 2) over every group of size k |
//! | Repeat Pairings | Sum of max(0, count - 1) over every pair, priors included |
//! | New Repeat Pairings | Repeat pairings minus those already present in priors |
//! | Max Pair Count | Most groups any single pair has shared |
//! | Group Size Range | Smallest and largest generated group |

use std::collections::{BTreeMap, HashSet};

use crate::models::{ClassGrouping, GroupAssignment, ProjectGrouping};

/// An unordered pair of participant IDs, stored with the smaller ID first.
pub type Pair = (String, String);

/// Grouping performance indicators.
#[derive(Debug, Clone)]
pub struct GroupingKpi {
    /// Pairings formed by the generated projects.
    pub total_pairings: usize,
    /// Repeat pairings across priors and generated projects.
    pub repeat_pairings: usize,
    /// Repeat pairings introduced by the generated projects.
    pub new_repeat_pairings: usize,
    /// Highest number of shared groups for a single pair.
    pub max_pair_count: u32,
    /// Number of generated groups.
    pub group_count: usize,
    /// Smallest generated group (0 when there are none).
    pub min_group_size: usize,
    /// Largest generated group (0 when there are none).
    pub max_group_size: usize,
    /// Pairs that shared more than one group, with their counts.
    pub repeated_pairs: BTreeMap<Pair, u32>,
}

impl GroupingKpi {
    /// Computes KPIs for a grouping.
    ///
    /// # Arguments
    /// * `grouping` - The generated class grouping.
    /// * `priors` - Earlier groupings whose pairings count as history.
    pub fn calculate(grouping: &ClassGrouping, priors: &[ProjectGrouping]) -> Self {
        let mut history: BTreeMap<Pair, u32> = BTreeMap::new();
        for prior in priors {
            for group in &prior.groups {
                count_pairs(group, &mut history);
            }
        }
        let prior_excess = excess(&history);

        let mut counts = history;
        let mut total_pairings = 0;
        let mut group_count = 0;
        let mut min_group_size = usize::MAX;
        let mut max_group_size = 0;

        for project in &grouping.projects {
            for group in &project.groups {
                total_pairings += count_pairs(group, &mut counts);
                group_count += 1;
                min_group_size = min_group_size.min(group.size());
                max_group_size = max_group_size.max(group.size());
            }
        }
        if group_count == 0 {
            min_group_size = 0;
        }

        let repeat_pairings = excess(&counts);
        let max_pair_count = counts.values().copied().max().unwrap_or(0);
        let repeated_pairs = counts.into_iter().filter(|&(_, c)| c > 1).collect();

        Self {
            total_pairings,
            repeat_pairings,
            new_repeat_pairings: repeat_pairings.saturating_sub(prior_excess),
            max_pair_count,
            group_count,
            min_group_size,
            max_group_size,
            repeated_pairs,
        }
    }

    /// Whether no pair shares more than `max_shared` groups.
    pub fn meets_threshold(&self, max_shared: u32) -> bool {
        self.max_pair_count <= max_shared
    }
}

/// Adds every pair in `group` to `counts`, returning how many pairs it had.
/// Participants listed twice in one group are counted once.
fn count_pairs(group: &GroupAssignment, counts: &mut BTreeMap<Pair, u32>) -> usize {
    let mut seen = HashSet::new();
    let ids: Vec<&str> = group
        .members
        .iter()
        .map(|m| m.id.as_str())
        .filter(|id| seen.insert(*id))
        .collect();

    let mut pairs = 0;
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            *counts.entry(pair(a, b)).or_insert(0) += 1;
            pairs += 1;
        }
    }
    pairs
}

fn pair(a: &str, b: &str) -> Pair {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn excess(counts: &BTreeMap<Pair, u32>) -> usize {
    counts.values().map(|&c| c.saturating_sub(1) as usize).sum()
}
