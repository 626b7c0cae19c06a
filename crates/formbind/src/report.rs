//! The binding report.
//!
//! [`BindingReport`] is the request-scoped aggregate of every conversion and
//! validation failure detected during binding. The handler queries it to
//! decide how to react (re-render the form, ignore, ...); the binder is the
//! only writer. Entries keep insertion order: bindings in detection order,
//! and each binding's errors in the order they were recorded.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use formbind_core::Value;

use crate::constraints::Violation;

/// A raw value that could not be converted to its declared target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    /// Identity of the binding that failed.
    pub binding: String,
    /// The offending raw value.
    pub raw: String,
    /// The declared target type name.
    pub target: String,
    /// The underlying cause (e.g. "misplaced grouping separator").
    pub cause: String,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" is not a valid {} value: {}",
            self.raw, self.target, self.cause
        )
    }
}

/// One recorded failure for a binding.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingError {
    /// The raw value could not be converted to the declared type.
    Conversion(ConversionError),
    /// The converted value violated a declared constraint.
    Validation(Violation),
}

impl BindingError {
    /// The human-readable message for this error.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The invalid value, where one exists (violations carry the converted
    /// value; conversion failures only have the raw string).
    pub const fn invalid_value(&self) -> Option<&Value> {
        match self {
            Self::Conversion(_) => None,
            Self::Validation(v) => Some(&v.value),
        }
    }
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conversion(e) => write!(f, "{e}"),
            Self::Validation(v) => write!(f, "{v}"),
        }
    }
}

/// Request-scoped aggregate of binding failures, queryable by the handler.
///
/// Created empty when binding starts and never mutated once dispatch begins.
/// Every query method marks the report as accessed; the dispatcher uses that
/// flag to warn about handlers that ignore a failed report.
#[derive(Debug, Default)]
pub struct BindingReport {
    entries: Vec<(String, Vec<BindingError>)>,
    accessed: AtomicBool,
}

impl BindingReport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns `true` iff at least one binding has at least one error.
    pub fn is_failed(&self) -> bool {
        self.mark_accessed();
        self.has_errors()
    }

    /// Returns every error message, flattened in binding-then-detection
    /// order.
    pub fn all_messages(&self) -> Vec<String> {
        self.mark_accessed();
        self.entries
            .iter()
            .flat_map(|(_, errors)| errors.iter().map(BindingError::message))
            .collect()
    }

    /// Returns the errors recorded for one binding identity.
    ///
    /// A binding with no recorded errors yields an empty slice, never a
    /// failure.
    pub fn errors(&self, binding: &str) -> &[BindingError] {
        self.mark_accessed();
        self.entries
            .iter()
            .find(|(name, _)| name == binding)
            .map_or(&[], |(_, errors)| errors.as_slice())
    }

    /// Returns the binding identities with recorded errors, in detection
    /// order.
    pub fn failed_bindings(&self) -> Vec<&str> {
        self.mark_accessed();
        self.entries
            .iter()
            .filter(|(_, errors)| !errors.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Returns `true` once any query method has been called.
    pub fn was_accessed(&self) -> bool {
        self.accessed.load(Ordering::Relaxed)
    }

    // Non-marking probe for the dispatcher's unobserved-failure diagnostic.
    pub(crate) fn has_errors(&self) -> bool {
        self.entries.iter().any(|(_, errors)| !errors.is_empty())
    }

    pub(crate) fn record_conversion_error(&mut self, error: ConversionError) {
        let binding = error.binding.clone();
        self.entry_mut(&binding).push(BindingError::Conversion(error));
    }

    pub(crate) fn record_violations(&mut self, binding: &str, violations: Vec<Violation>) {
        if violations.is_empty() {
            return;
        }
        self.entry_mut(binding)
            .extend(violations.into_iter().map(BindingError::Validation));
    }

    // Each identity appears at most once; find-or-append keeps detection
    // order across bindings.
    fn entry_mut(&mut self, binding: &str) -> &mut Vec<BindingError> {
        if let Some(idx) = self.entries.iter().position(|(name, _)| name == binding) {
            &mut self.entries[idx].1
        } else {
            self.entries.push((binding.to_string(), Vec::new()));
            let idx = self.entries.len() - 1;
            &mut self.entries[idx].1
        }
    }

    fn mark_accessed(&self) {
        self.accessed.store(true, Ordering::Relaxed);
    }
}
