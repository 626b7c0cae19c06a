//! The binder: conversion and validation orchestration.
//!
//! For each descriptor the binder looks up the converter, converts the raw
//! value(s) under the request locale, and runs the constraint set against
//! successfully converted values. Deferred descriptors record every failure
//! into the [`BindingReport`]; non-deferred descriptors abort the request on
//! the first failure. The returned value set is structurally complete: a
//! deferred binding that failed conversion still binds its type's default
//! (or null) value, so the handler always receives every declared target.

use std::collections::HashMap;

use formbind_core::{BindError, BindResult, Value};
use formbind_locale::Locale;

use crate::constraints::ValidationEngine;
use crate::descriptor::BindingDescriptor;
use crate::registry::{Converter, ConverterRegistry};
use crate::report::{BindingReport, ConversionError};

/// The best-effort bound values handed to the handler, keyed by binding
/// identity.
pub type BoundValues = HashMap<String, Value>;

/// Orchestrates conversion and validation for one request.
///
/// Descriptors are processed in declaration order, which keeps the report's
/// detection order deterministic for a given descriptor set.
pub struct Binder<'a> {
    registry: &'a ConverterRegistry,
    engine: &'a dyn ValidationEngine,
}

impl<'a> Binder<'a> {
    /// Creates a binder over a shared registry and validation engine.
    pub fn new(registry: &'a ConverterRegistry, engine: &'a dyn ValidationEngine) -> Self {
        Self { registry, engine }
    }

    /// Binds the descriptor set under the resolved request locale.
    ///
    /// # Errors
    ///
    /// - [`BindError::ImproperlyConfigured`] when a descriptor declares a
    ///   type with no registered converter.
    /// - [`BindError::BadRequest`] when a *non-deferred* descriptor fails
    ///   conversion or validation. Deferred failures never produce `Err`;
    ///   they are recorded in the returned report.
    pub fn bind(
        &self,
        descriptors: &[BindingDescriptor],
        locale: &Locale,
    ) -> BindResult<(BoundValues, BindingReport)> {
        let mut values = BoundValues::new();
        let mut report = BindingReport::new();

        for descriptor in descriptors {
            let converter = self.registry.lookup(&descriptor.target)?;
            if descriptor.deferred {
                self.bind_deferred(descriptor, converter, locale, &mut values, &mut report);
            } else {
                self.bind_immediate(descriptor, converter, locale, &mut values)?;
            }
        }

        Ok((values, report))
    }

    fn bind_deferred(
        &self,
        descriptor: &BindingDescriptor,
        converter: &dyn Converter,
        locale: &Locale,
        values: &mut BoundValues,
        report: &mut BindingReport,
    ) {
        if descriptor.collection {
            let mut items = Vec::with_capacity(descriptor.values.len());
            let mut conversion_failed = false;
            for raw in &descriptor.values {
                match convert_one(descriptor, converter, locale, raw) {
                    Ok(value) => items.push(value),
                    Err(error) => {
                        conversion_failed = true;
                        tracing::debug!(binding = %descriptor.name, %error, "conversion failed");
                        report.record_conversion_error(error);
                    }
                }
            }
            let value = Value::List(items);
            // No converted value to validate when any element failed.
            if !conversion_failed {
                let violations = self.engine.validate(&value, &descriptor.constraints);
                report.record_violations(&descriptor.name, violations);
            }
            values.insert(descriptor.name.clone(), value);
        } else {
            match convert_one(descriptor, converter, locale, scalar_raw(descriptor)) {
                Ok(value) => {
                    let violations = self.engine.validate(&value, &descriptor.constraints);
                    report.record_violations(&descriptor.name, violations);
                    values.insert(descriptor.name.clone(), value);
                }
                Err(error) => {
                    tracing::debug!(binding = %descriptor.name, %error, "conversion failed");
                    report.record_conversion_error(error);
                    let fallback = if descriptor.nullable {
                        Value::Null
                    } else {
                        converter.default_value()
                    };
                    values.insert(descriptor.name.clone(), fallback);
                }
            }
        }
    }

    // Immediate-mode bindings fail the request on the spot; the report is
    // never touched for them.
    fn bind_immediate(
        &self,
        descriptor: &BindingDescriptor,
        converter: &dyn Converter,
        locale: &Locale,
        values: &mut BoundValues,
    ) -> BindResult<()> {
        let value = if descriptor.collection {
            let mut items = Vec::with_capacity(descriptor.values.len());
            for raw in &descriptor.values {
                let item = convert_one(descriptor, converter, locale, raw)
                    .map_err(|e| BindError::BadRequest(format!("{}: {e}", descriptor.name)))?;
                items.push(item);
            }
            Value::List(items)
        } else {
            convert_one(descriptor, converter, locale, scalar_raw(descriptor))
                .map_err(|e| BindError::BadRequest(format!("{}: {e}", descriptor.name)))?
        };

        let violations = self.engine.validate(&value, &descriptor.constraints);
        if let Some(first) = violations.first() {
            return Err(BindError::BadRequest(format!(
                "{}: {first}",
                descriptor.name
            )));
        }

        values.insert(descriptor.name.clone(), value);
        Ok(())
    }
}

/// The raw value for a scalar binding: the last submitted value wins, the
/// same rule query dictionaries use for repeated parameters.
fn scalar_raw(descriptor: &BindingDescriptor) -> &str {
    descriptor.values.last().map_or("", String::as_str)
}

/// Converts one raw string, applying the empty-input rule before the
/// converter runs: empty input binds null for nullable targets and the
/// type's zero value otherwise.
fn convert_one(
    descriptor: &BindingDescriptor,
    converter: &dyn Converter,
    locale: &Locale,
    raw: &str,
) -> Result<Value, ConversionError> {
    if raw.is_empty() {
        return Ok(if descriptor.nullable {
            Value::Null
        } else {
            converter.default_value()
        });
    }
    converter
        .convert(raw, locale)
        .map_err(|cause| ConversionError {
            binding: descriptor.name.clone(),
            raw: raw.to_string(),
            target: descriptor.target.name().to_string(),
            cause,
        })
}
