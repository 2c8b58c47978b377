//! Roster scheduling pipeline.
//!
//! `RosterScheduler` drives the full pipeline: validate the employee
//! roster, compile the rule collection into a CP model, hand the model
//! to a [`CpSolver`], and decode the solver's variable assignments back
//! into a date-by-employee [`Roster`].
//!
//! The solver is a type parameter; the bundled
//! [`BranchBoundSolver`] is the default, and any implementation of
//! [`CpSolver`] over the same model vocabulary can be substituted.
//!
//! # References
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"

use tracing::{debug, info};

use crate::compiler::{assignment_var, ShiftModelBuilder};
use crate::cp::{BranchBoundSolver, CpSolution, CpSolver, SolverConfig, SolverStatus};
use crate::models::{Employee, Roster, RosterConfig, Rule};
use crate::validation::{validate_input, ValidationError};

/// Input container for a rostering run.
#[derive(Debug, Clone)]
pub struct RosterRequest {
    /// Employees to roster.
    pub employees: Vec<Employee>,
    /// Shift set, horizon, and designated-off calendar.
    pub config: RosterConfig,
    /// Ordered rule collection.
    pub rules: Vec<Rule>,
}

impl RosterRequest {
    /// Creates a request with no rules.
    pub fn new(employees: Vec<Employee>, config: RosterConfig) -> Self {
        Self {
            employees,
            config,
            rules: Vec::new(),
        }
    }

    /// Sets the rule collection.
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }
}

/// Error from a rostering run.
///
/// Solver-side conditions (infeasible, timeout) are not errors; they
/// are reported through [`RosterOutcome::status`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum SolveError {
    /// The employee roster failed structural validation.
    #[error("invalid input: {} validation error(s)", .0.len())]
    InvalidInput(Vec<ValidationError>),
}

/// Result of a rostering run.
#[derive(Debug, Clone)]
pub struct RosterOutcome {
    /// Final solver status.
    pub status: SolverStatus,
    /// Decoded roster, present when a feasible solution was found.
    pub roster: Option<Roster>,
    /// Total penalty of the roster, when an objective was set.
    pub objective: Option<i64>,
    /// Solve time in milliseconds.
    pub solve_time_ms: i64,
    /// Number of rules compiled into the model.
    pub rules_applied: usize,
    /// Number of rules skipped as invalid.
    pub rules_skipped: usize,
}

impl RosterOutcome {
    /// Whether a feasible roster was produced.
    pub fn is_solved(&self) -> bool {
        self.roster.is_some()
    }
}

/// End-to-end roster scheduler.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shift_roster::models::{Employee, Horizon, Rule, RosterConfig, ShiftSet};
/// use shift_roster::scheduler::{RosterRequest, RosterScheduler};
///
/// let employees = vec![
///     Employee::new("E01", "Alice").with_floor("1F"),
///     Employee::new("E02", "Bob").with_floor("1F"),
/// ];
/// let shift_set = ShiftSet::new(vec!["day".into(), "rest".into()], "rest").unwrap();
/// let horizon = Horizon::new(
///     NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 4, 3).unwrap(),
/// ).unwrap();
/// let config = RosterConfig::new(shift_set, horizon);
///
/// let request = RosterRequest::new(employees, config)
///     .with_rules(vec![Rule::staffing_hard("1F", "day", 1)]);
/// let outcome = RosterScheduler::new().solve(&request).unwrap();
/// assert!(outcome.is_solved());
/// ```
#[derive(Debug, Clone)]
pub struct RosterScheduler<S: CpSolver = BranchBoundSolver> {
    solver: S,
    config: SolverConfig,
}

impl RosterScheduler<BranchBoundSolver> {
    /// Creates a scheduler with the bundled branch-and-bound solver.
    pub fn new() -> Self {
        Self {
            solver: BranchBoundSolver::new(),
            config: SolverConfig::default(),
        }
    }
}

impl Default for RosterScheduler<BranchBoundSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CpSolver> RosterScheduler<S> {
    /// Creates a scheduler with a custom solver.
    pub fn with_solver(solver: S) -> Self {
        Self {
            solver,
            config: SolverConfig::default(),
        }
    }

    /// Sets the solver configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the full pipeline: validate, compile, solve, decode.
    ///
    /// Returns `Err` only for structurally invalid input. An infeasible
    /// or timed-out model is a successful run with the corresponding
    /// [`SolverStatus`] and no roster.
    pub fn solve(&self, request: &RosterRequest) -> Result<RosterOutcome, SolveError> {
        validate_input(&request.employees, &request.config).map_err(SolveError::InvalidInput)?;

        let mut builder = ShiftModelBuilder::new(&request.employees, &request.config);
        builder.apply_rules(&request.rules);
        let rules_applied = builder.applied_count();
        let rules_skipped = builder.skipped_count();
        let model = builder.build();
        info!(
            employees = request.employees.len(),
            days = request.config.horizon.len(),
            shifts = request.config.shift_set.len(),
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            rules_applied,
            rules_skipped,
            "model compiled"
        );

        let solution = self.solver.solve(&model, &self.config);
        debug!(status = ?solution.status, objective = ?solution.objective_value, "solver finished");

        let roster = if solution.is_solution_found() {
            Some(decode_roster(
                &solution,
                &request.employees,
                &request.config,
            ))
        } else {
            None
        };

        Ok(RosterOutcome {
            status: solution.status,
            objective: solution.objective_value,
            solve_time_ms: solution.solve_time_ms,
            roster,
            rules_applied,
            rules_skipped,
        })
    }
}

/// Decodes a solver solution into a roster.
///
/// Reads the assignment variable of every (employee, date, shift)
/// triple; base coverage guarantees exactly one true shift per
/// (employee, date) in any feasible solution.
fn decode_roster(solution: &CpSolution, employees: &[Employee], config: &RosterConfig) -> Roster {
    let mut roster = Roster::new();
    for (e, employee) in employees.iter().enumerate() {
        for d in 0..config.horizon.len() {
            let date = config.horizon.date_at(d);
            for s in 0..config.shift_set.len() {
                if solution.bool_value(&assignment_var(e, d, s)) == Some(true) {
                    roster.assign(&employee.id, date, config.shift_set.name(s));
                    break;
                }
            }
        }
    }
    roster.objective = solution.objective_value;
    roster
}
