//! The constraint-programming capability.
//!
//! Defines the model vocabulary the rule compiler targets — boolean and
//! bounded-integer variables, linear and clausal constraints, a linear
//! minimization objective — and the `CpSolver` trait any conforming
//! solver implements. `BranchBoundSolver` is the crate's reference
//! implementation; external solvers can be substituted through the
//! trait without touching the compiler.
//!
//! # Reference
//! - Rossi et al. (2006), "Handbook of Constraint Programming"

mod model;
mod solver;
mod variables;

pub use model::{CmpOp, Constraint, CpModel, Literal, ModelError, Objective};
pub use solver::{BranchBoundSolver, CpSolution, CpSolver, SolverConfig, SolverStatus};
pub use variables::{BoolVar, IntVar};
