//! Shift type enumeration.
//!
//! A `ShiftSet` is the fixed, ordered list of shift names a roster uses,
//! with exactly one distinguished rest shift — the non-working default.
//! All other shifts count as working shifts.

use serde::{Deserialize, Serialize};

/// Error constructing a [`ShiftSet`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShiftSetError {
    /// The shift list is empty.
    #[error("shift set is empty")]
    Empty,
    /// A shift name appears more than once.
    #[error("duplicate shift name: {0}")]
    DuplicateName(String),
    /// The designated rest shift is not in the list.
    #[error("rest shift '{0}' is not in the shift list")]
    UnknownRest(String),
}

/// The fixed, ordered set of shift types for a roster.
///
/// # Example
/// ```
/// use shift_roster::models::ShiftSet;
///
/// let shifts = ShiftSet::new(
///     vec!["day".into(), "early".into(), "night".into(), "rest".into()],
///     "rest",
/// ).unwrap();
/// assert_eq!(shifts.len(), 4);
/// assert_eq!(shifts.rest_index(), 3);
/// assert_eq!(shifts.working_indices(), vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSet {
    shifts: Vec<String>,
    rest_index: usize,
}

impl ShiftSet {
    /// Creates a shift set from an ordered name list and the rest shift name.
    pub fn new(shifts: Vec<String>, rest: &str) -> Result<Self, ShiftSetError> {
        if shifts.is_empty() {
            return Err(ShiftSetError::Empty);
        }
        for (i, name) in shifts.iter().enumerate() {
            if shifts[..i].contains(name) {
                return Err(ShiftSetError::DuplicateName(name.clone()));
            }
        }
        let rest_index = shifts
            .iter()
            .position(|s| s == rest)
            .ok_or_else(|| ShiftSetError::UnknownRest(rest.to_string()))?;

        Ok(Self { shifts, rest_index })
    }

    /// Number of shift types.
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// Whether the set is empty. Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Index of a shift by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.shifts.iter().position(|s| s == name)
    }

    /// Shift name at an index.
    pub fn name(&self, index: usize) -> &str {
        &self.shifts[index]
    }

    /// Index of the rest shift.
    pub fn rest_index(&self) -> usize {
        self.rest_index
    }

    /// Name of the rest shift.
    pub fn rest_name(&self) -> &str {
        &self.shifts[self.rest_index]
    }

    /// Indices of all working (non-rest) shifts, in declaration order.
    pub fn working_indices(&self) -> Vec<usize> {
        (0..self.shifts.len())
            .filter(|&i| i != self.rest_index)
            .collect()
    }

    /// All shift names, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.shifts
    }
}
