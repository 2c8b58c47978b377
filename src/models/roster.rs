//! Roster (solution) model.
//!
//! A roster is a complete assignment of one shift name to every
//! (employee, date) pair of the horizon, together with the objective
//! value reached by the solver. It is the sole artifact handed to the
//! downstream reporting collaborator.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A solved shift assignment table.
///
/// Rows are employees, columns are dates, cells are shift names. The
/// base coverage constraint guarantees exactly one shift per cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    assignments: BTreeMap<String, BTreeMap<NaiveDate, String>>,
    /// Objective value of the solution, if an objective was set.
    pub objective: Option<i64>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an assignment.
    pub fn assign(
        &mut self,
        employee_id: impl Into<String>,
        date: NaiveDate,
        shift: impl Into<String>,
    ) {
        self.assignments
            .entry(employee_id.into())
            .or_default()
            .insert(date, shift.into());
    }

    /// Shift assigned to an employee on a date, if any.
    pub fn shift_for(&self, employee_id: &str, date: NaiveDate) -> Option<&str> {
        self.assignments
            .get(employee_id)
            .and_then(|row| row.get(&date))
            .map(|s| s.as_str())
    }

    /// Number of dates on which the employee is assigned `shift`.
    pub fn count_shift(&self, employee_id: &str, shift: &str) -> usize {
        self.assignments
            .get(employee_id)
            .map(|row| row.values().filter(|s| s.as_str() == shift).count())
            .unwrap_or(0)
    }

    /// All `(employee id, shift)` assignments on a date, in employee-id order.
    pub fn assignments_on(&self, date: NaiveDate) -> Vec<(&str, &str)> {
        self.assignments
            .iter()
            .filter_map(|(id, row)| row.get(&date).map(|s| (id.as_str(), s.as_str())))
            .collect()
    }

    /// Number of employees assigned `shift` on a date.
    pub fn headcount(&self, date: NaiveDate, shift: &str) -> usize {
        self.assignments_on(date)
            .iter()
            .filter(|(_, s)| *s == shift)
            .count()
    }

    /// Number of employees with at least one assignment.
    pub fn employee_count(&self) -> usize {
        self.assignments.len()
    }

    /// Total number of recorded assignments.
    pub fn len(&self) -> usize {
        self.assignments.values().map(|row| row.len()).sum()
    }

    /// Whether the roster has no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterates all assignments in `(employee id, date)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NaiveDate, &str)> {
        self.assignments.iter().flat_map(|(id, row)| {
            row.iter().map(move |(d, s)| (id.as_str(), *d, s.as_str()))
        })
    }
}
