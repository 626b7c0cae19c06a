//! Binding descriptors.
//!
//! A [`BindingDescriptor`] is the plain-data declaration of one binding:
//! which target it populates, the raw strings submitted for it, how its
//! failures are treated, and which constraints apply after conversion. The
//! surrounding framework builds the descriptor set per request (however it
//! discovers its declarations); the pipeline only consumes it.

use std::fmt;

use crate::constraints::Constraint;

/// The declared target type of a binding.
///
/// The built-in kinds cover the conversions every form/query submission
/// needs; `Other` is an open key into the converter registry for
/// application-registered strategies (dates, JSON documents, domain types).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetType {
    /// A 64-bit signed integer.
    Integer,
    /// A 64-bit floating-point number.
    Float,
    /// An exact decimal number.
    Decimal,
    /// A boolean.
    Boolean,
    /// An application-registered type, keyed by name.
    Other(String),
}

impl TargetType {
    /// A registry key for an application-registered type.
    pub fn other(name: impl Into<String>) -> Self {
        Self::Other(name.into())
    }

    /// The human-readable type name used in error messages.
    pub fn name(&self) -> &str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Declares one binding for the current request.
///
/// Immutable once constructed. `deferred` controls the failure mode: a
/// deferred binding records its conversion and validation failures into the
/// binding report so the handler can react; a non-deferred binding fails the
/// request immediately. Bindings are non-deferred unless explicitly marked.
///
/// # Examples
///
/// ```
/// use formbind::descriptor::{BindingDescriptor, TargetType};
/// use formbind::constraints::MinValue;
///
/// let age = BindingDescriptor::new("age", TargetType::Integer)
///     .value("16")
///     .deferred(true)
///     .constraint(Box::new(MinValue::new(18.0)));
/// assert_eq!(age.name, "age");
/// assert!(age.deferred);
/// ```
#[derive(Debug)]
pub struct BindingDescriptor {
    /// Stable identity of the bound target (field or parameter name).
    pub name: String,
    /// The declared target type.
    pub target: TargetType,
    /// Raw submitted value(s). Multi-valued for collection targets.
    pub values: Vec<String>,
    /// Whether empty input binds to null instead of the type's zero value.
    pub nullable: bool,
    /// Whether the target is a collection, converted element-wise.
    pub collection: bool,
    /// Whether failures are collected instead of aborting the request.
    pub deferred: bool,
    /// Constraints checked against the converted value, in declaration order.
    pub constraints: Vec<Box<dyn Constraint>>,
}

impl BindingDescriptor {
    /// Creates a descriptor with no raw values and no constraints.
    pub fn new(name: impl Into<String>, target: TargetType) -> Self {
        Self {
            name: name.into(),
            target,
            values: Vec::new(),
            nullable: false,
            collection: false,
            deferred: false,
            constraints: Vec::new(),
        }
    }

    /// Appends a raw value.
    #[must_use]
    pub fn value(mut self, raw: impl Into<String>) -> Self {
        self.values.push(raw.into());
        self
    }

    /// Replaces the raw values.
    #[must_use]
    pub fn values(mut self, raw: Vec<String>) -> Self {
        self.values = raw;
        self
    }

    /// Sets whether empty input binds to null.
    #[must_use]
    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Marks the target as a collection.
    #[must_use]
    pub const fn collection(mut self, collection: bool) -> Self {
        self.collection = collection;
        self
    }

    /// Sets the failure mode.
    #[must_use]
    pub const fn deferred(mut self, deferred: bool) -> Self {
        self.deferred = deferred;
        self
    }

    /// Appends a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: Box<dyn Constraint>) -> Self {
        self.constraints.push(constraint);
        self
    }
}
