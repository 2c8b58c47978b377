//! CP model definition.

use std::collections::HashMap;

use super::variables::{BoolVar, IntVar};

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// Left side equals the right side.
    Eq,
    /// Left side is at most the right side.
    Le,
    /// Left side is at least the right side.
    Ge,
}

/// A literal over a boolean variable: the variable or its negation.
#[derive(Debug, Clone)]
pub struct Literal {
    /// Name of the boolean variable.
    pub var: String,
    /// `true` for the variable itself, `false` for its negation.
    pub positive: bool,
}

impl Literal {
    /// Positive literal.
    pub fn pos(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            positive: true,
        }
    }

    /// Negated literal.
    pub fn neg(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            positive: false,
        }
    }
}

/// A constraint in the CP model.
///
/// The vocabulary is deliberately small: weighted-boolean rostering
/// models need linear relations over 0/1 and bounded-integer variables,
/// plus clause/implication logic for violation indicators.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// `sum(coefficient * variable) op rhs`.
    ///
    /// Terms may reference boolean variables (contributing 0 or 1) and
    /// integer variables.
    Linear {
        /// `(variable name, coefficient)` pairs.
        terms: Vec<(String, i64)>,
        /// Comparison operator.
        op: CmpOp,
        /// Right-hand side.
        rhs: i64,
    },

    /// At least one literal holds.
    Clause {
        /// Disjuncts; boolean variables only.
        literals: Vec<Literal>,
    },

    /// `antecedent == true` implies `consequent == true`.
    ///
    /// Semantically `¬antecedent ∨ consequent`.
    Implication {
        /// The implying boolean variable.
        antecedent: String,
        /// The implied boolean variable.
        consequent: String,
    },
}

/// Objective function for the CP model.
#[derive(Debug, Clone)]
pub enum Objective {
    /// Minimize a weighted sum of variables. Weights are non-negative.
    Minimize {
        /// `(variable name, weight)` pairs.
        terms: Vec<(String, i64)>,
    },
}

/// Error detected by [`CpModel::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A constraint or the objective references an unknown variable.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),
    /// A name is used for both a boolean and an integer variable.
    #[error("duplicate variable name: {0}")]
    DuplicateName(String),
    /// A clause literal references an integer variable.
    #[error("clause literal '{0}' is not a boolean variable")]
    NonBooleanLiteral(String),
    /// A clause has no literals.
    #[error("empty clause")]
    EmptyClause,
    /// An integer variable has min > max.
    #[error("empty domain for variable '{0}'")]
    EmptyDomain(String),
    /// An objective weight is negative.
    #[error("negative objective weight for variable '{0}'")]
    NegativeWeight(String),
}

/// A constraint programming model over boolean and bounded-integer
/// variables.
///
/// # Examples
///
/// ```
/// use shift_roster::cp::CpModel;
///
/// let mut model = CpModel::new("example");
/// model.new_bool("a");
/// model.new_bool("b");
/// model.add_exactly_one(vec!["a".into(), "b".into()]);
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CpModel {
    /// Model name.
    pub name: String,
    /// Boolean variables by name.
    pub bool_vars: HashMap<String, BoolVar>,
    /// Integer variables by name.
    pub int_vars: HashMap<String, IntVar>,
    /// Constraints.
    pub constraints: Vec<Constraint>,
    /// Objective function.
    pub objective: Option<Objective>,
}

impl CpModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declares a boolean variable and returns its name.
    pub fn new_bool(&mut self, name: impl Into<String>) -> String {
        let name = name.into();
        self.bool_vars.insert(name.clone(), BoolVar::new(&name));
        name
    }

    /// Declares an integer variable with domain [min, max] and returns
    /// its name.
    pub fn new_int(&mut self, name: impl Into<String>, min: i64, max: i64) -> String {
        let name = name.into();
        self.int_vars
            .insert(name.clone(), IntVar::new(&name, min, max));
        name
    }

    /// Fixes a boolean variable to a value.
    ///
    /// No effect if the variable does not exist; `validate` will not
    /// flag this, so callers resolve names first.
    pub fn fix_bool(&mut self, name: &str, value: bool) {
        if let Some(var) = self.bool_vars.get_mut(name) {
            var.fixed = Some(value);
        }
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: `sum(vars) == 1` over boolean variables.
    pub fn add_exactly_one(&mut self, vars: Vec<String>) {
        let terms = vars.into_iter().map(|v| (v, 1)).collect();
        self.constraints.push(Constraint::Linear {
            terms,
            op: CmpOp::Eq,
            rhs: 1,
        });
    }

    /// Convenience: linear equality.
    pub fn add_linear_eq(&mut self, terms: Vec<(String, i64)>, rhs: i64) {
        self.constraints.push(Constraint::Linear {
            terms,
            op: CmpOp::Eq,
            rhs,
        });
    }

    /// Convenience: linear at-most.
    pub fn add_linear_le(&mut self, terms: Vec<(String, i64)>, rhs: i64) {
        self.constraints.push(Constraint::Linear {
            terms,
            op: CmpOp::Le,
            rhs,
        });
    }

    /// Convenience: linear at-least.
    pub fn add_linear_ge(&mut self, terms: Vec<(String, i64)>, rhs: i64) {
        self.constraints.push(Constraint::Linear {
            terms,
            op: CmpOp::Ge,
            rhs,
        });
    }

    /// Convenience: disjunction of literals.
    pub fn add_clause(&mut self, literals: Vec<Literal>) {
        self.constraints.push(Constraint::Clause { literals });
    }

    /// Convenience: boolean implication.
    pub fn add_implication(&mut self, antecedent: impl Into<String>, consequent: impl Into<String>) {
        self.constraints.push(Constraint::Implication {
            antecedent: antecedent.into(),
            consequent: consequent.into(),
        });
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    /// Whether a variable of either kind exists.
    fn has_var(&self, name: &str) -> bool {
        self.bool_vars.contains_key(name) || self.int_vars.contains_key(name)
    }

    /// Validates the model for consistency.
    ///
    /// Checks that every referenced variable exists, names are unique
    /// across the boolean and integer spaces, clause literals are
    /// boolean, integer domains are non-empty, and objective weights
    /// are non-negative.
    pub fn validate(&self) -> Result<(), ModelError> {
        for name in self.bool_vars.keys() {
            if self.int_vars.contains_key(name) {
                return Err(ModelError::DuplicateName(name.clone()));
            }
        }
        for var in self.int_vars.values() {
            if var.min > var.max {
                return Err(ModelError::EmptyDomain(var.name.clone()));
            }
        }

        for constraint in &self.constraints {
            match constraint {
                Constraint::Linear { terms, .. } => {
                    for (name, _) in terms {
                        if !self.has_var(name) {
                            return Err(ModelError::UndefinedVariable(name.clone()));
                        }
                    }
                }
                Constraint::Clause { literals } => {
                    if literals.is_empty() {
                        return Err(ModelError::EmptyClause);
                    }
                    for lit in literals {
                        if self.int_vars.contains_key(&lit.var) {
                            return Err(ModelError::NonBooleanLiteral(lit.var.clone()));
                        }
                        if !self.bool_vars.contains_key(&lit.var) {
                            return Err(ModelError::UndefinedVariable(lit.var.clone()));
                        }
                    }
                }
                Constraint::Implication {
                    antecedent,
                    consequent,
                } => {
                    for name in [antecedent, consequent] {
                        if self.int_vars.contains_key(name) {
                            return Err(ModelError::NonBooleanLiteral(name.clone()));
                        }
                        if !self.bool_vars.contains_key(name) {
                            return Err(ModelError::UndefinedVariable(name.clone()));
                        }
                    }
                }
            }
        }

        if let Some(Objective::Minimize { terms }) = &self.objective {
            for (name, weight) in terms {
                if !self.has_var(name) {
                    return Err(ModelError::UndefinedVariable(name.clone()));
                }
                if *weight < 0 {
                    return Err(ModelError::NegativeWeight(name.clone()));
                }
            }
        }

        Ok(())
    }

    /// Returns the number of variables (boolean + integer).
    pub fn variable_count(&self) -> usize {
        self.bool_vars.len() + self.int_vars.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
