//! Scheduling rule catalogue.
//!
//! A `Rule` is a tagged configuration record; the variant selects which
//! compiler in [`crate::compiler`] handles it. Most families carry a
//! hard/soft mode: hard rules become constraints the solution must satisfy
//! exactly, soft rules become weighted penalty terms in the objective.
//! Weights are non-negative; a zero weight leaves that direction
//! unpenalized.
//!
//! An invalid rule instance (unknown shift/employee/floor reference, empty
//! cohort, non-positive bound) is skipped with a diagnostic during
//! compilation — never a fatal error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::employee::{EmployeeStatus, EmploymentType};

/// Hard/soft duality of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleMode {
    /// The rule must hold exactly; violation makes the model infeasible.
    Hard,
    /// Violations are permitted but penalized in the objective.
    Soft,
}

/// Comparison mode for a total-workdays rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkdayMode {
    /// Exactly `target` working days (hard).
    Exact,
    /// At most `target` working days (hard).
    Max,
    /// At least `target` working days (hard).
    Min,
    /// Two-sided deviation from `target`, penalized.
    SoftExact,
    /// Overshoot beyond `target`, penalized.
    SoftMax,
    /// Undershoot below `target`, penalized.
    SoftMin,
}

/// A scheduling rule.
///
/// Each variant carries only its relevant fields; the compiler pattern
/// matches exhaustively. See the convenience constructors for the common
/// configurations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Rule {
    /// Target headcount for a (floor, shift) cohort on every date.
    ///
    /// Hard: the cohort's count equals `target` exactly. Soft: shortage
    /// and excess are penalized independently by `under_weight` and
    /// `over_weight`.
    StaffingTarget {
        floor: String,
        shift: String,
        target: i64,
        mode: RuleMode,
        under_weight: i64,
        over_weight: i64,
    },

    /// Minimum rest-shift days over the horizon, per employment category.
    MinHolidays {
        employment: EmploymentType,
        min_days: i64,
        mode: RuleMode,
        weight: i64,
    },

    /// At most `max_days` working-shift assignments in any window of
    /// `max_days + 1` consecutive dates, for every employee.
    ///
    /// `working_shifts` names the shift types counted as work.
    MaxConsecutiveWorkdays {
        max_days: i64,
        working_shifts: Vec<String>,
        mode: RuleMode,
        weight: i64,
    },

    /// Assignment to `previous` on a date implies `next` on the following
    /// date (e.g. night → post-night).
    ///
    /// The soft form only discourages violations through the objective;
    /// a zero weight leaves them free.
    SequentialShift {
        previous: String,
        next: String,
        mode: RuleMode,
        weight: i64,
    },

    /// Bound on the min–max spread of per-employee counts of `shift`
    /// across an employment-category cohort.
    ///
    /// Hard: the spread is at most `max_gap`. Soft: the spread itself is
    /// penalized by `weight`. Cohorts of size ≤ 1 are skipped.
    AssignmentBalance {
        employment: EmploymentType,
        shift: String,
        max_gap: i64,
        mode: RuleMode,
        weight: i64,
    },

    /// A single employee's request for a specific shift on a specific date.
    ShiftRequest {
        employee_id: String,
        date: NaiveDate,
        shift: String,
        mode: RuleMode,
        weight: i64,
    },

    /// Two employees may never be co-assigned to any of the listed shifts
    /// on the same date. Hard only.
    AvoidSameShift {
        first: String,
        second: String,
        shifts: Vec<String>,
    },

    /// Bound on one employee's total working days over the horizon.
    TotalWorkdays {
        employee_id: String,
        target: i64,
        mode: WorkdayMode,
        weight: i64,
    },

    /// Rest-shift assignment on weekend and holiday dates.
    ///
    /// Applies to the listed employees, or to everyone when `employee_ids`
    /// is `None`.
    WeekendRest {
        employee_ids: Option<Vec<String>>,
        mode: RuleMode,
        weight: i64,
    },

    /// Employees whose status matches are hard-forced to the rest shift on
    /// every date of the horizon.
    ForcedLeave { statuses: Vec<EmployeeStatus> },
}

impl Rule {
    /// Hard staffing target for a (floor, shift) cohort.
    pub fn staffing_hard(floor: impl Into<String>, shift: impl Into<String>, target: i64) -> Self {
        Self::StaffingTarget {
            floor: floor.into(),
            shift: shift.into(),
            target,
            mode: RuleMode::Hard,
            under_weight: 0,
            over_weight: 0,
        }
    }

    /// Soft staffing target with independent shortage/excess weights.
    pub fn staffing_soft(
        floor: impl Into<String>,
        shift: impl Into<String>,
        target: i64,
        under_weight: i64,
        over_weight: i64,
    ) -> Self {
        Self::StaffingTarget {
            floor: floor.into(),
            shift: shift.into(),
            target,
            mode: RuleMode::Soft,
            under_weight,
            over_weight,
        }
    }

    /// Hard minimum-holidays rule for an employment category.
    pub fn min_holidays_hard(employment: EmploymentType, min_days: i64) -> Self {
        Self::MinHolidays {
            employment,
            min_days,
            mode: RuleMode::Hard,
            weight: 0,
        }
    }

    /// Soft minimum-holidays rule.
    pub fn min_holidays_soft(employment: EmploymentType, min_days: i64, weight: i64) -> Self {
        Self::MinHolidays {
            employment,
            min_days,
            mode: RuleMode::Soft,
            weight,
        }
    }

    /// Hard sliding-window cap on consecutive working days.
    pub fn max_consecutive_hard(max_days: i64, working_shifts: Vec<String>) -> Self {
        Self::MaxConsecutiveWorkdays {
            max_days,
            working_shifts,
            mode: RuleMode::Hard,
            weight: 0,
        }
    }

    /// Soft sliding-window cap on consecutive working days.
    pub fn max_consecutive_soft(max_days: i64, working_shifts: Vec<String>, weight: i64) -> Self {
        Self::MaxConsecutiveWorkdays {
            max_days,
            working_shifts,
            mode: RuleMode::Soft,
            weight,
        }
    }

    /// Hard sequential-shift implication (`previous` on d ⇒ `next` on d+1).
    pub fn sequential_hard(previous: impl Into<String>, next: impl Into<String>) -> Self {
        Self::SequentialShift {
            previous: previous.into(),
            next: next.into(),
            mode: RuleMode::Hard,
            weight: 0,
        }
    }

    /// Soft sequential-shift preference.
    pub fn sequential_soft(
        previous: impl Into<String>,
        next: impl Into<String>,
        weight: i64,
    ) -> Self {
        Self::SequentialShift {
            previous: previous.into(),
            next: next.into(),
            mode: RuleMode::Soft,
            weight,
        }
    }

    /// Hard balance rule: spread at most `max_gap`.
    pub fn balance_hard(employment: EmploymentType, shift: impl Into<String>, max_gap: i64) -> Self {
        Self::AssignmentBalance {
            employment,
            shift: shift.into(),
            max_gap,
            mode: RuleMode::Hard,
            weight: 0,
        }
    }

    /// Soft balance rule: spread penalized by `weight`.
    pub fn balance_soft(employment: EmploymentType, shift: impl Into<String>, weight: i64) -> Self {
        Self::AssignmentBalance {
            employment,
            shift: shift.into(),
            max_gap: 0,
            mode: RuleMode::Soft,
            weight,
        }
    }

    /// Hard shift request: the exact slot is forced.
    pub fn request_hard(
        employee_id: impl Into<String>,
        date: NaiveDate,
        shift: impl Into<String>,
    ) -> Self {
        Self::ShiftRequest {
            employee_id: employee_id.into(),
            date,
            shift: shift.into(),
            mode: RuleMode::Hard,
            weight: 0,
        }
    }

    /// Soft shift request: unmet requests are penalized.
    pub fn request_soft(
        employee_id: impl Into<String>,
        date: NaiveDate,
        shift: impl Into<String>,
        weight: i64,
    ) -> Self {
        Self::ShiftRequest {
            employee_id: employee_id.into(),
            date,
            shift: shift.into(),
            mode: RuleMode::Soft,
            weight,
        }
    }

    /// Avoid-pair rule over the listed shifts. Hard only.
    pub fn avoid_same_shift(
        first: impl Into<String>,
        second: impl Into<String>,
        shifts: Vec<String>,
    ) -> Self {
        Self::AvoidSameShift {
            first: first.into(),
            second: second.into(),
            shifts,
        }
    }

    /// Total-workdays rule for one employee.
    pub fn total_workdays(
        employee_id: impl Into<String>,
        target: i64,
        mode: WorkdayMode,
        weight: i64,
    ) -> Self {
        Self::TotalWorkdays {
            employee_id: employee_id.into(),
            target,
            mode,
            weight,
        }
    }

    /// Hard weekend/holiday rest for all employees.
    pub fn weekend_rest_hard() -> Self {
        Self::WeekendRest {
            employee_ids: None,
            mode: RuleMode::Hard,
            weight: 0,
        }
    }

    /// Soft weekend/holiday rest for the listed employees (or all).
    pub fn weekend_rest_soft(employee_ids: Option<Vec<String>>, weight: i64) -> Self {
        Self::WeekendRest {
            employee_ids,
            mode: RuleMode::Soft,
            weight,
        }
    }

    /// Forced leave for employees whose status matches.
    pub fn forced_leave(statuses: Vec<EmployeeStatus>) -> Self {
        Self::ForcedLeave { statuses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staffing_constructors() {
        match Rule::staffing_hard("1F", "day", 4) {
            Rule::StaffingTarget {
                floor,
                shift,
                target,
                mode,
                ..
            } => {
                assert_eq!(floor, "1F");
                assert_eq!(shift, "day");
                assert_eq!(target, 4);
                assert_eq!(mode, RuleMode::Hard);
            }
            _ => panic!("wrong variant"),
        }

        match Rule::staffing_soft("1F", "post-night", 1, 10, 1) {
            Rule::StaffingTarget {
                mode,
                under_weight,
                over_weight,
                ..
            } => {
                assert_eq!(mode, RuleMode::Soft);
                assert_eq!(under_weight, 10);
                assert_eq!(over_weight, 1);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_request_constructor() {
        let d = NaiveDate::from_ymd_opt(2025, 4, 12).unwrap();
        match Rule::request_hard("E01", d, "rest") {
            Rule::ShiftRequest {
                employee_id,
                date,
                shift,
                mode,
                ..
            } => {
                assert_eq!(employee_id, "E01");
                assert_eq!(date, d);
                assert_eq!(shift, "rest");
                assert_eq!(mode, RuleMode::Hard);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_rule_serde_roundtrip() {
        let rule = Rule::max_consecutive_soft(5, vec!["day".into(), "night".into()], 3);
        let json = serde_json::to_string(&rule).unwrap();
        let back: Rule = serde_json::from_str(&json).unwrap();
        match back {
            Rule::MaxConsecutiveWorkdays {
                max_days,
                working_shifts,
                mode,
                weight,
            } => {
                assert_eq!(max_days, 5);
                assert_eq!(working_shifts.len(), 2);
                assert_eq!(mode, RuleMode::Soft);
                assert_eq!(weight, 3);
            }
            _ => panic!("wrong variant"),
        }
    }
}
