//! Employee roster entities.
//!
//! Employees are constructed once from external roster input and are
//! read-only for the scheduling horizon. Floor and employment category
//! select the cohorts that staffing and balance rules apply to.

use serde::{Deserialize, Serialize};

/// Employment category of an employee.
///
/// Rules such as minimum holidays and assignment balance target one
/// category at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    /// Regular full-time employment.
    FullTime,
    /// Part-time employment.
    PartTime,
}

/// Optional leave status of an employee.
///
/// Employees whose status matches a forced-leave rule are assigned
/// the rest shift on every date of the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    /// Maternity leave (protected).
    MaternityLeave,
    /// Childcare leave (protected).
    ChildcareLeave,
    /// Long-term medical leave.
    MedicalLeave,
}

/// An employee on the roster.
///
/// Identity is the `id` field; it must be unique across the roster
/// (checked by [`crate::validation::validate_input`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Floor or unit assignment.
    pub floor: String,
    /// Employment category.
    pub employment: EmploymentType,
    /// Leave status, if any.
    pub status: Option<EmployeeStatus>,
}

impl Employee {
    /// Creates a full-time employee with no floor and no status.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            floor: String::new(),
            employment: EmploymentType::FullTime,
            status: None,
        }
    }

    /// Sets the floor assignment.
    pub fn with_floor(mut self, floor: impl Into<String>) -> Self {
        self.floor = floor.into();
        self
    }

    /// Sets the employment category.
    pub fn with_employment(mut self, employment: EmploymentType) -> Self {
        self.employment = employment;
        self
    }

    /// Sets the leave status.
    pub fn with_status(mut self, status: EmployeeStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_builder() {
        let e = Employee::new("E01", "Alice")
            .with_floor("1F")
            .with_employment(EmploymentType::PartTime)
            .with_status(EmployeeStatus::ChildcareLeave);

        assert_eq!(e.id, "E01");
        assert_eq!(e.floor, "1F");
        assert_eq!(e.employment, EmploymentType::PartTime);
        assert_eq!(e.status, Some(EmployeeStatus::ChildcareLeave));
    }

    #[test]
    fn test_employee_defaults() {
        let e = Employee::new("E02", "Bob");
        assert_eq!(e.employment, EmploymentType::FullTime);
        assert!(e.status.is_none());
        assert!(e.floor.is_empty());
    }

    #[test]
    fn test_employee_serde_roundtrip() {
        let e = Employee::new("E03", "Carol").with_floor("2F");
        let json = serde_json::to_string(&e).unwrap();
        let back: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, e.id);
        assert_eq!(back.floor, e.floor);
    }
}
