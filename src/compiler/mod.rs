//! Rule-to-constraint compilation.
//!
//! `ShiftModelBuilder` turns the employee roster, the roster
//! configuration, and an ordered rule collection into one [`CpModel`]:
//!
//! 1. Allocate one boolean assignment variable per
//!    (employee, date, shift) triple — the variable space.
//! 2. Post the base coverage constraint: exactly one shift per
//!    employee per date. Always hard, never disabled.
//! 3. Fold the rule collection: each rule instance adds constraints
//!    and returns penalty terms; invalid instances are skipped with a
//!    diagnostic and never abort assembly.
//! 4. Aggregate all penalty terms into a single minimization
//!    objective, or none when no soft rule contributed.
//!
//! Assembly is strictly sequential — every compiler extends the same
//! mutable model and variable registry.

mod rules;

use crate::cp::{CpModel, Objective};
use crate::models::{Employee, RosterConfig, Rule};

/// A weighted penalty contribution to the objective.
///
/// The variable is an auxiliary shortage/excess/deviation/violation
/// variable; the weight is a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenaltyTerm {
    /// Name of the penalized variable.
    pub var: String,
    /// Non-negative weight.
    pub weight: i64,
}

impl PenaltyTerm {
    /// Creates a penalty term.
    pub fn new(var: impl Into<String>, weight: i64) -> Self {
        Self {
            var: var.into(),
            weight,
        }
    }
}

/// Compiles roster rules into a CP model.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use shift_roster::compiler::ShiftModelBuilder;
/// use shift_roster::models::{Employee, Horizon, Rule, RosterConfig, ShiftSet};
///
/// let employees = vec![Employee::new("E01", "Alice").with_floor("1F")];
/// let shift_set = ShiftSet::new(vec!["day".into(), "rest".into()], "rest").unwrap();
/// let horizon = Horizon::new(
///     NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
/// ).unwrap();
/// let config = RosterConfig::new(shift_set, horizon);
///
/// let mut builder = ShiftModelBuilder::new(&employees, &config);
/// builder.apply_rules(&[Rule::staffing_hard("1F", "day", 1)]);
/// let model = builder.build();
/// assert!(model.validate().is_ok());
/// ```
pub struct ShiftModelBuilder<'a> {
    employees: &'a [Employee],
    config: &'a RosterConfig,
    model: CpModel,
    penalties: Vec<PenaltyTerm>,
    /// Ordinal of the rule being compiled; keeps auxiliary variable
    /// names unique across repeated rule instances.
    rule_seq: usize,
    applied: usize,
    skipped: usize,
}

impl<'a> ShiftModelBuilder<'a> {
    /// Creates a builder with the variable space allocated and the
    /// base coverage constraint posted.
    pub fn new(employees: &'a [Employee], config: &'a RosterConfig) -> Self {
        let mut model = CpModel::new("shift-roster");

        let days = config.horizon.len();
        let shifts = config.shift_set.len();
        for e in 0..employees.len() {
            for d in 0..days {
                for s in 0..shifts {
                    model.new_bool(assignment_var(e, d, s));
                }
            }
        }

        // Base coverage: each employee takes exactly one shift per day.
        for e in 0..employees.len() {
            for d in 0..days {
                let vars = (0..shifts).map(|s| assignment_var(e, d, s)).collect();
                model.add_exactly_one(vars);
            }
        }

        Self {
            employees,
            config,
            model,
            penalties: Vec::new(),
            rule_seq: 0,
            applied: 0,
            skipped: 0,
        }
    }

    /// Applies an ordered rule collection.
    ///
    /// Each rule compiles independently; penalty terms are concatenated
    /// in rule order. Invalid instances are skipped with a diagnostic.
    pub fn apply_rules(&mut self, rules: &[Rule]) {
        for rule in rules {
            self.apply_rule(rule);
        }
    }

    /// Applies a single rule.
    ///
    /// Returns `true` if the rule was compiled, `false` if skipped.
    pub fn apply_rule(&mut self, rule: &Rule) -> bool {
        self.rule_seq += 1;
        match self.compile_rule(rule) {
            Some(terms) => {
                tracing::debug!(rule = ?rule, penalties = terms.len(), "rule applied");
                self.penalties.extend(terms);
                self.applied += 1;
                true
            }
            None => {
                self.skipped += 1;
                false
            }
        }
    }

    /// Finalizes the model.
    ///
    /// Sets the minimization objective over all collected penalty
    /// terms; when no soft rule contributed, no objective is set and
    /// the model seeks any feasible assignment.
    pub fn build(mut self) -> CpModel {
        if !self.penalties.is_empty() {
            let terms = self
                .penalties
                .iter()
                .map(|p| (p.var.clone(), p.weight))
                .collect();
            self.model.set_objective(Objective::Minimize { terms });
        }
        self.model
    }

    /// Number of rules compiled so far.
    pub fn applied_count(&self) -> usize {
        self.applied
    }

    /// Number of rules skipped so far.
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Penalty terms collected so far.
    pub fn penalties(&self) -> &[PenaltyTerm] {
        &self.penalties
    }
}

/// Name of the assignment variable for an
/// (employee index, day index, shift index) triple.
///
/// This is the variable's identity; only the builder creates these.
pub fn assignment_var(employee: usize, day: usize, shift: usize) -> String {
    format!("x_e{employee}_d{day}_s{shift}")
}
