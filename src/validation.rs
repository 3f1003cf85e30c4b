//! Input validation for grouping requests.
//!
//! Checks structural integrity of the roster, project names and
//! configuration before any grouping attempt. Detects:
//! - Empty roster or empty project list
//! - Blank or duplicate participant IDs
//! - Blank or duplicate project names
//! - Non-positive group size or reshuffle quota
//!
//! Prior groupings are not validated: participants they mention that are not
//! on the current roster are simply ignored during replay.

use std::collections::HashSet;

use crate::config::GroupingConfig;
use crate::models::Participant;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The roster has no participants.
    EmptyRoster,
    /// Two participants share the same ID.
    DuplicateId,
    /// A participant has a blank ID.
    BlankId,
    /// No project names were requested.
    NoProjects,
    /// Two projects share the same name.
    DuplicateProjectName,
    /// A project name is blank.
    BlankProjectName,
    /// The optimal group size is zero.
    InvalidGroupSize,
    /// The reshuffle quota is zero.
    InvalidReshuffleQuota,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a grouping request.
///
/// Checks:
/// 1. The roster is not empty
/// 2. Every participant ID is non-blank and unique
/// 3. At least one project is requested
/// 4. Every project name is non-blank and unique
/// 5. The configuration itself is valid (see [`GroupingConfig::validate`])
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    roster: &[Participant],
    project_names: &[String],
    config: &GroupingConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    if roster.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "Roster is empty",
        ));
    }

    let mut ids = HashSet::new();
    for participant in roster {
        if participant.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankId,
                format!("Participant '{}' has a blank ID", participant.name),
            ));
        } else if !ids.insert(participant.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate participant ID: {}", participant.id),
            ));
        }
    }

    if project_names.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoProjects,
            "No project names given",
        ));
    }

    let mut names = HashSet::new();
    for name in project_names {
        if name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankProjectName,
                "Project name is blank",
            ));
        } else if !names.insert(name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateProjectName,
                format!("Duplicate project name: {name}"),
            ));
        }
    }

    if let Err(config_errors) = config.validate() {
        errors.extend(config_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
