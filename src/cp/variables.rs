//! CP variable types.

/// An integer variable with a domain [min, max].
///
/// Represents an auxiliary decision variable (shortage, excess,
/// deviation, spread) that takes integer values within the bounds.
#[derive(Debug, Clone)]
pub struct IntVar {
    /// Variable name (unique identifier within a model).
    pub name: String,
    /// Minimum value.
    pub min: i64,
    /// Maximum value.
    pub max: i64,
    /// Fixed value, if any.
    pub fixed: Option<i64>,
}

impl IntVar {
    /// Creates a new integer variable with the given bounds.
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            fixed: None,
        }
    }

    /// Creates a fixed integer variable.
    pub fn fixed(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            min: value,
            max: value,
            fixed: Some(value),
        }
    }

    /// Whether this variable is fixed to a single value.
    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }

    /// Domain size (max - min + 1).
    pub fn domain_size(&self) -> i64 {
        self.max - self.min + 1
    }
}

/// A boolean variable (true/false decision).
///
/// Assignment variables (one per employee/date/shift triple) and
/// violation indicators are booleans.
#[derive(Debug, Clone)]
pub struct BoolVar {
    /// Variable name.
    pub name: String,
    /// Fixed value, if any.
    pub fixed: Option<bool>,
}

impl BoolVar {
    /// Creates a new boolean variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed: None,
        }
    }

    /// Creates a fixed boolean variable.
    pub fn fixed(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            fixed: Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_var() {
        let v = IntVar::new("x", 0, 10);
        assert_eq!(v.domain_size(), 11);
        assert!(!v.is_fixed());

        let f = IntVar::fixed("y", 5);
        assert!(f.is_fixed());
        assert_eq!(f.domain_size(), 1);
    }

    #[test]
    fn test_bool_var() {
        let b = BoolVar::new("flag");
        assert!(b.fixed.is_none());

        let f = BoolVar::fixed("flag2", true);
        assert_eq!(f.fixed, Some(true));
    }
}
