//! Generator configuration.
//!
//! All fields have defaults, so a partial document deserializes cleanly:
//!
//! ```
//! use u_grouping::config::GroupingConfig;
//!
//! let config: GroupingConfig = serde_json::from_str(r#"{ "optimal_group_size": 4 }"#).unwrap();
//! assert_eq!(config.optimal_group_size, 4);
//! assert_eq!(config.max_reshuffles, 1000);
//! ```

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind, ValidationResult};

/// Default optimal group size.
pub const DEFAULT_OPTIMAL_GROUP_SIZE: usize = 3;

/// Default reshuffle quota per attempt.
pub const DEFAULT_MAX_RESHUFFLES: usize = 1000;

/// Tuning knobs for [`TeamGenerator`](crate::generator::TeamGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Preferred number of members per group.
    pub optimal_group_size: usize,
    /// When the roster does not divide evenly, form smaller groups (`true`)
    /// or larger groups (`false`).
    pub prefer_smaller_groups: bool,
    /// Forced evictions allowed in one attempt before it is abandoned.
    pub max_reshuffles: usize,
    /// Repeat pairings tolerated by the first attempt.
    pub initial_repairing_budget: usize,
    /// Seed for reproducible runs. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            optimal_group_size: DEFAULT_OPTIMAL_GROUP_SIZE,
            prefer_smaller_groups: false,
            max_reshuffles: DEFAULT_MAX_RESHUFFLES,
            initial_repairing_budget: 0,
            seed: None,
        }
    }
}

impl GroupingConfig {
    /// Creates a configuration with the given optimal group size.
    pub fn new(optimal_group_size: usize) -> Self {
        Self {
            optimal_group_size,
            ..Default::default()
        }
    }

    /// Sets the remainder preference.
    pub fn with_prefer_smaller_groups(mut self, prefer_smaller: bool) -> Self {
        self.prefer_smaller_groups = prefer_smaller;
        self
    }

    /// Sets the per-attempt reshuffle quota.
    pub fn with_max_reshuffles(mut self, max_reshuffles: usize) -> Self {
        self.max_reshuffles = max_reshuffles;
        self
    }

    /// Sets the repairing budget of the first attempt.
    pub fn with_initial_repairing_budget(mut self, budget: usize) -> Self {
        self.initial_repairing_budget = budget;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration on its own, independent of any roster.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        if self.optimal_group_size == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidGroupSize,
                "Optimal group size must be positive",
            ));
        }

        if self.max_reshuffles == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReshuffleQuota,
                "Reshuffle quota must be positive",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
