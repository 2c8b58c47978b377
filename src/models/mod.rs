//! Rostering domain models.
//!
//! Provides the core data types for representing shift rostering
//! problems and solutions: the employee roster, the shift enumeration,
//! the date horizon, the rule catalogue, and the solved assignment table.
//!
//! Employees, the horizon, and the configuration are constructed once
//! from external input and stay read-only through model assembly.

mod employee;
mod horizon;
mod roster;
mod rule;
mod shift;

pub use employee::{Employee, EmployeeStatus, EmploymentType};
pub use horizon::{Horizon, HorizonError, RosterConfig};
pub use roster::Roster;
pub use rule::{Rule, RuleMode, WorkdayMode};
pub use shift::{ShiftSet, ShiftSetError};
