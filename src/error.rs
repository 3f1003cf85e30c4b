//! Grouping error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors produced while generating a grouping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroupingError {
    /// The request or configuration failed validation. Never retried.
    #[error("invalid grouping request: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),

    /// One attempt used up its reshuffle quota while filling a project.
    ///
    /// The generator recovers from this by raising the repairing budget and
    /// starting a fresh attempt; callers of [`TeamGenerator`] never see it.
    ///
    /// [`TeamGenerator`]: crate::generator::TeamGenerator
    #[error("reshuffle quota of {limit} exceeded while filling project '{project}'")]
    ReshuffleQuotaExceeded { project: String, limit: usize },

    /// A group needed an eviction but had no members left to evict.
    #[error("no candidate can be placed into a group of project '{project}'")]
    NoCandidates { project: String },
}

impl GroupingError {
    /// Whether the error aborts only the current attempt.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GroupingError::ReshuffleQuotaExceeded { .. })
    }
}

impl From<Vec<ValidationError>> for GroupingError {
    fn from(errors: Vec<ValidationError>) -> Self {
        GroupingError::Invalid(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_display_lists_every_problem() {
        let error = GroupingError::Invalid(vec![
            ValidationError::new(ValidationErrorKind::EmptyRoster, "Roster is empty"),
            ValidationError::new(ValidationErrorKind::NoProjects, "No project names given"),
        ]);
        assert_eq!(
            error.to_string(),
            "invalid grouping request: Roster is empty; No project names given"
        );
    }

    #[test]
    fn test_recoverable_check() {
        let quota = GroupingError::ReshuffleQuotaExceeded {
            project: "P1".into(),
            limit: 1000,
        };
        assert!(quota.is_recoverable());
        assert!(!GroupingError::Invalid(vec![]).is_recoverable());
        assert!(!GroupingError::NoCandidates {
            project: "P1".into()
        }
        .is_recoverable());
    }
}
