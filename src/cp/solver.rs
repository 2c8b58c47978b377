//! CP solver interface and reference implementation.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::model::{CmpOp, Constraint, CpModel, Objective};

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible (but not necessarily optimal) solution found.
    Feasible,
    /// No feasible solution exists.
    Infeasible,
    /// Model is invalid or malformed.
    ModelInvalid,
    /// No decision reached (time limit without an incumbent, or
    /// unexpected termination).
    Unknown,
}

/// Solution from a CP solver.
#[derive(Debug, Clone)]
pub struct CpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Objective function value (if an objective was set).
    pub objective_value: Option<i64>,
    /// Boolean variable assignments.
    pub bool_vars: HashMap<String, bool>,
    /// Integer variable assignments.
    pub int_vars: HashMap<String, i64>,
    /// Solve time in milliseconds.
    pub solve_time_ms: i64,
}

impl CpSolution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: None,
            bool_vars: HashMap::new(),
            int_vars: HashMap::new(),
            solve_time_ms: 0,
        }
    }

    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// Value of a boolean variable, if assigned.
    pub fn bool_value(&self, name: &str) -> Option<bool> {
        self.bool_vars.get(name).copied()
    }

    /// Value of an integer variable, if assigned.
    pub fn int_value(&self, name: &str) -> Option<i64> {
        self.int_vars.get(name).copied()
    }
}

/// Solver configuration.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum solve time in milliseconds.
    pub time_limit_ms: i64,
    /// Stop after finding the first feasible solution.
    pub stop_after_first: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 60_000,
            stop_after_first: false,
        }
    }
}

/// Trait for CP solver implementations.
///
/// Implementors provide the actual search/propagation logic. This can
/// wrap an external CP/ILP solver or provide a custom algorithm; any
/// implementation accepting the [`CpModel`] vocabulary conforms.
pub trait CpSolver {
    /// Solves the model and returns a solution.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution;
}

/// Depth-first branch-and-bound solver.
///
/// Branches on variables in sorted-name order (booleans before
/// integers), values low to high, with bound-consistency propagation of
/// linear constraints and unit propagation of clauses at every node.
/// The incumbent objective prunes subtrees whose objective lower bound
/// (weighted sum of domain minima; weights are non-negative) cannot
/// improve on it.
///
/// Exhausting the search proves `Optimal` or `Infeasible`. Hitting the
/// time limit downgrades to `Feasible` (incumbent exists) or `Unknown`.
#[derive(Debug, Clone, Default)]
pub struct BranchBoundSolver;

impl BranchBoundSolver {
    /// Creates a new solver.
    pub fn new() -> Self {
        Self
    }
}

impl CpSolver for BranchBoundSolver {
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution {
        if model.validate().is_err() {
            return CpSolution::empty(SolverStatus::ModelInvalid);
        }

        let started = Instant::now();
        let space = SearchSpace::compile(model);
        let mut search = Search {
            space: &space,
            config,
            deadline: started + Duration::from_millis(config.time_limit_ms.max(0) as u64),
            best: None,
            timed_out: false,
            stopped_early: false,
            stop: false,
        };

        let root: Vec<(i64, i64)> = space.domains.clone();
        search.dfs(root);

        let solve_time_ms = started.elapsed().as_millis() as i64;
        let status = match (&search.best, search.timed_out, search.stopped_early) {
            (Some(_), true, _) | (Some(_), _, true) => SolverStatus::Feasible,
            (Some(_), false, false) => SolverStatus::Optimal,
            (None, true, _) => SolverStatus::Unknown,
            (None, false, _) => SolverStatus::Infeasible,
        };

        let mut solution = CpSolution::empty(status);
        solution.solve_time_ms = solve_time_ms;

        if let Some((value, assignment)) = search.best {
            for (i, name) in space.names.iter().enumerate() {
                if space.is_bool[i] {
                    solution.bool_vars.insert(name.clone(), assignment[i] == 1);
                } else {
                    solution.int_vars.insert(name.clone(), assignment[i]);
                }
            }
            if !space.objective.is_empty() {
                solution.objective_value = Some(value);
            }
        }

        solution
    }
}

/// Index-compiled model: names resolved once, constraints normalized.
struct SearchSpace {
    names: Vec<String>,
    is_bool: Vec<bool>,
    domains: Vec<(i64, i64)>,
    linears: Vec<(Vec<(usize, i64)>, CmpOp, i64)>,
    clauses: Vec<Vec<(usize, bool)>>,
    objective: Vec<(usize, i64)>,
}

impl SearchSpace {
    fn compile(model: &CpModel) -> Self {
        // Booleans first (branch priority), each group in sorted-name
        // order for determinism.
        let mut bool_names: Vec<&String> = model.bool_vars.keys().collect();
        bool_names.sort();
        let mut int_names: Vec<&String> = model.int_vars.keys().collect();
        int_names.sort();

        let mut names = Vec::with_capacity(bool_names.len() + int_names.len());
        let mut is_bool = Vec::with_capacity(names.capacity());
        let mut domains = Vec::with_capacity(names.capacity());
        let mut index: HashMap<&str, usize> = HashMap::new();

        for name in bool_names {
            let var = &model.bool_vars[name];
            let dom = match var.fixed {
                Some(true) => (1, 1),
                Some(false) => (0, 0),
                None => (0, 1),
            };
            index.insert(name.as_str(), names.len());
            names.push(name.clone());
            is_bool.push(true);
            domains.push(dom);
        }
        for name in int_names {
            let var = &model.int_vars[name];
            let dom = match var.fixed {
                Some(v) => (v, v),
                None => (var.min, var.max),
            };
            index.insert(name.as_str(), names.len());
            names.push(name.clone());
            is_bool.push(false);
            domains.push(dom);
        }

        let mut linears = Vec::new();
        let mut clauses = Vec::new();
        for constraint in &model.constraints {
            match constraint {
                Constraint::Linear { terms, op, rhs } => {
                    // Merge duplicate variables and drop zero coefficients.
                    let mut merged: HashMap<usize, i64> = HashMap::new();
                    for (name, coef) in terms {
                        *merged.entry(index[name.as_str()]).or_insert(0) += coef;
                    }
                    let mut compiled: Vec<(usize, i64)> =
                        merged.into_iter().filter(|(_, c)| *c != 0).collect();
                    compiled.sort_unstable();
                    linears.push((compiled, *op, *rhs));
                }
                Constraint::Clause { literals } => {
                    clauses.push(
                        literals
                            .iter()
                            .map(|l| (index[l.var.as_str()], l.positive))
                            .collect(),
                    );
                }
                Constraint::Implication {
                    antecedent,
                    consequent,
                } => {
                    clauses.push(vec![
                        (index[antecedent.as_str()], false),
                        (index[consequent.as_str()], true),
                    ]);
                }
            }
        }

        let objective = match &model.objective {
            Some(Objective::Minimize { terms }) => terms
                .iter()
                .map(|(name, weight)| (index[name.as_str()], *weight))
                .collect(),
            None => Vec::new(),
        };

        Self {
            names,
            is_bool,
            domains,
            linears,
            clauses,
            objective,
        }
    }

    /// Tightens domains to a propagation fixpoint.
    ///
    /// Returns `false` on a proven conflict.
    fn propagate(&self, doms: &mut [(i64, i64)]) -> bool {
        loop {
            let mut changed = false;

            for (terms, op, rhs) in &self.linears {
                let mut lhs_min = 0i64;
                let mut lhs_max = 0i64;
                for &(vi, coef) in terms {
                    let (lo, hi) = doms[vi];
                    if coef >= 0 {
                        lhs_min += coef * lo;
                        lhs_max += coef * hi;
                    } else {
                        lhs_min += coef * hi;
                        lhs_max += coef * lo;
                    }
                }

                let feasible = match op {
                    CmpOp::Eq => lhs_min <= *rhs && *rhs <= lhs_max,
                    CmpOp::Le => lhs_min <= *rhs,
                    CmpOp::Ge => lhs_max >= *rhs,
                };
                if !feasible {
                    return false;
                }

                for &(vi, coef) in terms {
                    let (lo, hi) = doms[vi];
                    let (term_min, term_max) = if coef >= 0 {
                        (coef * lo, coef * hi)
                    } else {
                        (coef * hi, coef * lo)
                    };
                    let rest_min = lhs_min - term_min;
                    let rest_max = lhs_max - term_max;

                    let (mut new_lo, mut new_hi) = (lo, hi);
                    // coef * x <= rhs - rest_min (from Le / Eq)
                    if matches!(op, CmpOp::Le | CmpOp::Eq) {
                        let bound = rhs - rest_min;
                        if coef > 0 {
                            new_hi = new_hi.min(div_floor(bound, coef));
                        } else {
                            new_lo = new_lo.max(div_ceil(bound, coef));
                        }
                    }
                    // coef * x >= rhs - rest_max (from Ge / Eq)
                    if matches!(op, CmpOp::Ge | CmpOp::Eq) {
                        let bound = rhs - rest_max;
                        if coef > 0 {
                            new_lo = new_lo.max(div_ceil(bound, coef));
                        } else {
                            new_hi = new_hi.min(div_floor(bound, coef));
                        }
                    }

                    if new_lo > new_hi {
                        return false;
                    }
                    if (new_lo, new_hi) != (lo, hi) {
                        doms[vi] = (new_lo, new_hi);
                        changed = true;
                    }
                }
            }

            for clause in &self.clauses {
                let mut satisfied = false;
                let mut open: Option<(usize, bool)> = None;
                let mut open_count = 0;
                for &(vi, positive) in clause {
                    let (lo, hi) = doms[vi];
                    let lit_true = if positive { lo == 1 } else { hi == 0 };
                    let lit_false = if positive { hi == 0 } else { lo == 1 };
                    if lit_true {
                        satisfied = true;
                        break;
                    }
                    if !lit_false {
                        open = Some((vi, positive));
                        open_count += 1;
                    }
                }
                if satisfied {
                    continue;
                }
                match (open, open_count) {
                    (None, _) => return false,
                    (Some((vi, positive)), 1) => {
                        doms[vi] = if positive { (1, 1) } else { (0, 0) };
                        changed = true;
                    }
                    _ => {}
                }
            }

            if !changed {
                return true;
            }
        }
    }
}

struct Search<'a> {
    space: &'a SearchSpace,
    config: &'a SolverConfig,
    deadline: Instant,
    /// Best complete assignment found: (objective value, values).
    best: Option<(i64, Vec<i64>)>,
    timed_out: bool,
    stopped_early: bool,
    stop: bool,
}

impl Search<'_> {
    fn dfs(&mut self, mut doms: Vec<(i64, i64)>) {
        if self.stop || self.timed_out {
            return;
        }
        if Instant::now() >= self.deadline {
            self.timed_out = true;
            return;
        }
        if !self.space.propagate(&mut doms) {
            return;
        }

        if !self.space.objective.is_empty() {
            let lower_bound: i64 = self
                .space
                .objective
                .iter()
                .map(|&(vi, w)| w * doms[vi].0)
                .sum();
            if let Some((incumbent, _)) = &self.best {
                if lower_bound >= *incumbent {
                    return;
                }
            }
        }

        let branch = doms.iter().position(|&(lo, hi)| lo < hi);
        let Some(vi) = branch else {
            self.record_leaf(&doms);
            return;
        };

        let (lo, hi) = doms[vi];
        for value in lo..=hi {
            let mut child = doms.clone();
            child[vi] = (value, value);
            self.dfs(child);
            if self.stop || self.timed_out {
                return;
            }
        }
    }

    fn record_leaf(&mut self, doms: &[(i64, i64)]) {
        let values: Vec<i64> = doms.iter().map(|&(lo, _)| lo).collect();

        if self.space.objective.is_empty() {
            // Without an objective any feasible assignment is optimal.
            self.best = Some((0, values));
            self.stop = true;
            return;
        }

        let value: i64 = self
            .space
            .objective
            .iter()
            .map(|&(vi, w)| w * values[vi])
            .sum();
        let improved = match &self.best {
            Some((incumbent, _)) => value < *incumbent,
            None => true,
        };
        if improved {
            self.best = Some((value, values));
            if value == 0 {
                // Weights are non-negative: zero is a global minimum.
                self.stop = true;
            } else if self.config.stop_after_first {
                self.stopped_early = true;
                self.stop = true;
            }
        }
    }
}

fn div_floor(a: i64, b: i64) -> i64 {
    let quot = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        quot - 1
    } else {
        quot
    }
}

fn div_ceil(a: i64, b: i64) -> i64 {
    let quot = a / b;
    if a % b != 0 && ((a < 0) == (b < 0)) {
        quot + 1
    } else {
        quot
    }
}
