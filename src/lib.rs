//! Shift rostering framework.
//!
//! Assigns one shift per employee per calendar day over a fixed horizon,
//! reconciling hard staffing requirements with weighted soft preferences.
//! Scheduling rules are compiled into a constraint-programming model
//! (boolean assignment variables, linear/logical constraints, one linear
//! minimization objective), solved through the `CpSolver` capability, and
//! decoded back into a per-employee/day roster.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Employee`, `ShiftSet`, `Horizon`,
//!   `RosterConfig`, `Rule`, `Roster`
//! - **`cp`**: The solver capability — `CpModel`, `CpSolver`, `CpSolution`,
//!   and a reference `BranchBoundSolver`
//! - **`compiler`**: Rule-to-constraint compilation — `ShiftModelBuilder`
//! - **`scheduler`**: The solve/decode pipeline — `RosterScheduler`
//! - **`validation`**: Input integrity checks (duplicate IDs, empty roster)
//!
//! # Architecture
//!
//! Model assembly is strictly sequential: every rule compiler extends the
//! same mutable model and variable registry. Invalid rule instances are
//! skipped with a diagnostic, never fatal. Only the solve step is long
//! running, and only infeasibility or solver failure ends a run without a
//! roster.
//!
//! # References
//!
//! - Rossi et al. (2006), "Handbook of Constraint Programming"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

pub mod compiler;
pub mod cp;
pub mod models;
pub mod scheduler;
pub mod validation;
