//! Constraints and the validation engine seam.
//!
//! A [`Constraint`] checks a single rule against an already-converted value.
//! The [`ValidationEngine`] trait is the capability the binder programs
//! against: given a value and a constraint set, produce zero or more
//! violations. [`ConstraintEngine`] is the default engine; any conforming
//! engine can be substituted without changing the binder or the report.

use std::fmt;

use formbind_core::{BindError, BindResult, Value};
use regex::Regex;

/// A successfully converted value failing a declared constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The name of the violated constraint.
    pub constraint: String,
    /// A human-readable message.
    pub message: String,
    /// The invalid value.
    pub value: Value,
}

impl Violation {
    /// Creates a violation for the given constraint and value.
    pub fn new(constraint: impl Into<String>, message: impl Into<String>, value: Value) -> Self {
        Self {
            constraint: constraint.into(),
            message: message.into(),
            value,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A single declarative rule checked against a converted value.
///
/// Constraints are type-tolerant: a constraint that does not apply to the
/// value's type (e.g. a numeric bound on a string) passes rather than
/// failing, mirroring how validator chains compose.
pub trait Constraint: Send + Sync + fmt::Debug {
    /// Checks the value, returning a violation if the rule is broken.
    fn check(&self, value: &Value) -> Result<(), Violation>;

    /// Returns a human-readable name for this constraint.
    fn name(&self) -> &str;
}

/// The pluggable validation capability consumed by the binder.
///
/// Implementations must be stateless across calls and report violations in
/// constraint-declaration order.
pub trait ValidationEngine: Send + Sync {
    /// Runs the constraint set against a value, collecting every violation.
    fn validate(&self, value: &Value, constraints: &[Box<dyn Constraint>]) -> Vec<Violation>;
}

/// The default validation engine: runs each constraint in declaration order
/// and accumulates failures without short-circuiting.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstraintEngine;

impl ValidationEngine for ConstraintEngine {
    fn validate(&self, value: &Value, constraints: &[Box<dyn Constraint>]) -> Vec<Violation> {
        constraints
            .iter()
            .filter_map(|c| c.check(value).err())
            .collect()
    }
}

// ── Built-in constraints ───────────────────────────────────────────────

/// Validates that a numeric value meets a minimum requirement.
#[derive(Debug, Clone)]
pub struct MinValue {
    /// The minimum required value.
    pub min: f64,
}

impl MinValue {
    /// Creates a new `MinValue` constraint.
    pub const fn new(min: f64) -> Self {
        Self { min }
    }
}

impl Constraint for MinValue {
    fn check(&self, value: &Value) -> Result<(), Violation> {
        if let Some(n) = value.as_f64() {
            if n < self.min {
                return Err(Violation::new(
                    self.name(),
                    format!("Ensure this value is greater than or equal to {}.", self.min),
                    value.clone(),
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MinValue"
    }
}

/// Validates that a numeric value does not exceed a maximum.
#[derive(Debug, Clone)]
pub struct MaxValue {
    /// The maximum allowed value.
    pub max: f64,
}

impl MaxValue {
    /// Creates a new `MaxValue` constraint.
    pub const fn new(max: f64) -> Self {
        Self { max }
    }
}

impl Constraint for MaxValue {
    fn check(&self, value: &Value) -> Result<(), Violation> {
        if let Some(n) = value.as_f64() {
            if n > self.max {
                return Err(Violation::new(
                    self.name(),
                    format!("Ensure this value is less than or equal to {}.", self.max),
                    value.clone(),
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MaxValue"
    }
}

/// Validates a minimum length for strings and collections.
#[derive(Debug, Clone)]
pub struct MinLength {
    /// The minimum required length.
    pub min: usize,
}

impl MinLength {
    /// Creates a new `MinLength` constraint.
    pub const fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Constraint for MinLength {
    fn check(&self, value: &Value) -> Result<(), Violation> {
        let len = match value {
            Value::Str(s) => s.chars().count(),
            Value::List(items) => items.len(),
            _ => return Ok(()),
        };
        if len < self.min {
            return Err(Violation::new(
                self.name(),
                format!(
                    "Ensure this value has at least {} items or characters (it has {len}).",
                    self.min
                ),
                value.clone(),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MinLength"
    }
}

/// Validates a maximum length for strings and collections.
#[derive(Debug, Clone)]
pub struct MaxLength {
    /// The maximum allowed length.
    pub max: usize,
}

impl MaxLength {
    /// Creates a new `MaxLength` constraint.
    pub const fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Constraint for MaxLength {
    fn check(&self, value: &Value) -> Result<(), Violation> {
        let len = match value {
            Value::Str(s) => s.chars().count(),
            Value::List(items) => items.len(),
            _ => return Ok(()),
        };
        if len > self.max {
            return Err(Violation::new(
                self.name(),
                format!(
                    "Ensure this value has at most {} items or characters (it has {len}).",
                    self.max
                ),
                value.clone(),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MaxLength"
    }
}

/// Validates a string value against a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles the pattern.
    ///
    /// An invalid pattern is a configuration problem, not request data.
    pub fn new(pattern: &str) -> BindResult<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| BindError::ConfigurationError(format!("invalid pattern: {e}")))?;
        Ok(Self { regex })
    }
}

impl Constraint for Pattern {
    fn check(&self, value: &Value) -> Result<(), Violation> {
        if let Value::Str(s) = value {
            if !self.regex.is_match(s) {
                return Err(Violation::new(
                    self.name(),
                    "Enter a valid value.".to_string(),
                    value.clone(),
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Pattern"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_value() {
        let c = MinValue::new(18.0);
        assert!(c.check(&Value::Int(18)).is_ok());
        assert!(c.check(&Value::Int(16)).is_err());
        assert!(c.check(&Value::Float(17.9)).is_err());
        // Non-numeric values pass.
        assert!(c.check(&Value::Str("x".into())).is_ok());
        assert!(c.check(&Value::Null).is_ok());
    }

    #[test]
    fn test_max_value() {
        let c = MaxValue::new(100.0);
        assert!(c.check(&Value::Int(100)).is_ok());
        assert!(c.check(&Value::Int(101)).is_err());
    }

    #[test]
    fn test_min_length() {
        let c = MinLength::new(3);
        assert!(c.check(&Value::Str("abc".into())).is_ok());
        assert!(c.check(&Value::Str("ab".into())).is_err());
        assert!(c
            .check(&Value::List(vec![Value::Int(1), Value::Int(2)]))
            .is_err());
        assert!(c.check(&Value::Int(1)).is_ok());
    }

    #[test]
    fn test_max_length() {
        let c = MaxLength::new(3);
        assert!(c.check(&Value::Str("abc".into())).is_ok());
        assert!(c.check(&Value::Str("abcd".into())).is_err());
    }

    #[test]
    fn test_pattern() {
        let c = Pattern::new(r"^[A-Z]{3}\d{3}$").unwrap();
        assert!(c.check(&Value::Str("ABC123".into())).is_ok());
        assert!(c.check(&Value::Str("abc".into())).is_err());
        assert!(c.check(&Value::Int(5)).is_ok());
    }

    #[test]
    fn test_pattern_invalid_is_config_error() {
        assert!(matches!(
            Pattern::new("["),
            Err(BindError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_engine_runs_in_declaration_order() {
        let constraints: Vec<Box<dyn Constraint>> = vec![
            Box::new(MinValue::new(10.0)),
            Box::new(MaxValue::new(5.0)),
        ];
        let engine = ConstraintEngine;
        let violations = engine.validate(&Value::Int(7), &constraints);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].constraint, "MinValue");
        assert_eq!(violations[1].constraint, "MaxValue");
    }

    #[test]
    fn test_engine_no_violations() {
        let constraints: Vec<Box<dyn Constraint>> =
            vec![Box::new(MinValue::new(0.0)), Box::new(MaxValue::new(10.0))];
        let engine = ConstraintEngine;
        assert!(engine.validate(&Value::Int(5), &constraints).is_empty());
    }
}
