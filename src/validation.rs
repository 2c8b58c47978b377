//! Input validation for rostering problems.
//!
//! Checks structural integrity of the employee roster before model
//! construction. Detects:
//! - Empty rosters
//! - Blank employee IDs
//! - Duplicate employee IDs
//!
//! Shift-set and horizon integrity is enforced at construction time by
//! [`crate::models::ShiftSet`] and [`crate::models::Horizon`]; rule
//! integrity is checked per rule during compilation, where an invalid
//! rule is skipped rather than fatal.

use crate::models::{Employee, RosterConfig};
use std::collections::HashSet;

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
    /// The roster contains no employees.
    EmptyRoster,
    /// An employee has an empty ID.
    BlankId,
    /// Two employees share the same ID.
    DuplicateId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a rostering problem.
///
/// Checks:
/// 1. At least one employee
/// 2. No blank employee IDs
/// 3. No duplicate employee IDs
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(employees: &[Employee], _config: &RosterConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if employees.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "Roster has no employees",
        ));
    }

    let mut ids = HashSet::new();
    for e in employees {
        if e.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankId,
                format!("Employee '{}' has a blank ID", e.name),
            ));
            continue;
        }
        if !ids.insert(e.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", e.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
