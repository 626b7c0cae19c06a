//! The converter registry.
//!
//! Maps a declared [`TargetType`] to the [`Converter`] strategy that turns
//! raw request strings into typed [`Value`]s. The registry is populated at
//! configuration time and shared read-only across requests; a lookup miss is
//! a configuration error, never a per-value conversion failure.

use std::collections::HashMap;
use std::fmt;

use formbind_core::{BindError, BindResult, Value};
use formbind_locale::Locale;

use crate::converters;
use crate::descriptor::TargetType;

/// A conversion strategy for one target type.
///
/// `convert` is only called with non-empty raw input; empty input takes the
/// nullable/default path in the binder, using [`Converter::default_value`]
/// for non-nullable targets. The `Err` string is the underlying cause
/// carried into the recorded conversion error.
pub trait Converter: Send + Sync + fmt::Debug {
    /// Converts a non-empty raw string using the request locale.
    fn convert(&self, raw: &str, locale: &Locale) -> Result<Value, String>;

    /// The type's zero value, bound when non-nullable input is empty and as
    /// the best-effort value after a conversion failure.
    fn default_value(&self) -> Value;

    /// Returns a human-readable name for this converter.
    fn name(&self) -> &str;
}

/// Process-wide mapping from target type to conversion strategy.
///
/// Registration happens before request traffic; afterwards the registry is
/// only read, so it can sit behind an `Arc` shared by all requests.
///
/// # Examples
///
/// ```
/// use formbind::registry::ConverterRegistry;
/// use formbind::descriptor::TargetType;
///
/// let registry = ConverterRegistry::with_builtins();
/// assert!(registry.lookup(&TargetType::Integer).is_ok());
/// assert!(registry.lookup(&TargetType::other("money")).is_err());
/// ```
#[derive(Debug, Default)]
pub struct ConverterRegistry {
    converters: HashMap<TargetType, Box<dyn Converter>>,
}

impl ConverterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in strategies registered: the
    /// numeric and boolean converters plus the `date` and `json` extension
    /// types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(TargetType::Integer, Box::new(converters::IntegerConverter));
        registry.register(TargetType::Float, Box::new(converters::FloatConverter));
        registry.register(TargetType::Decimal, Box::new(converters::DecimalConverter));
        registry.register(TargetType::Boolean, Box::new(converters::BooleanConverter));
        registry.register(TargetType::other("date"), Box::new(converters::DateConverter));
        registry.register(TargetType::other("json"), Box::new(converters::JsonConverter));
        registry
    }

    /// Registers a converter for a target type, replacing any existing one.
    pub fn register(&mut self, target: TargetType, converter: Box<dyn Converter>) {
        self.converters.insert(target, converter);
    }

    /// Looks up the converter for a target type.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::ImproperlyConfigured`] when no converter is
    /// registered for the type: declaring a type the registry cannot handle
    /// is a wiring mistake, independent of request data.
    pub fn lookup(&self, target: &TargetType) -> BindResult<&dyn Converter> {
        self.converters
            .get(target)
            .map(Box::as_ref)
            .ok_or_else(|| {
                BindError::ImproperlyConfigured(format!(
                    "no converter registered for target type '{target}'"
                ))
            })
    }

    /// Returns `true` if a converter is registered for the target type.
    pub fn contains(&self, target: &TargetType) -> bool {
        self.converters.contains_key(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct UpperConverter;

    impl Converter for UpperConverter {
        fn convert(&self, raw: &str, _locale: &Locale) -> Result<Value, String> {
            Ok(Value::Str(raw.to_uppercase()))
        }

        fn default_value(&self) -> Value {
            Value::Str(String::new())
        }

        fn name(&self) -> &str {
            "UpperConverter"
        }
    }

    #[test]
    fn test_builtins_registered() {
        let registry = ConverterRegistry::with_builtins();
        assert!(registry.contains(&TargetType::Integer));
        assert!(registry.contains(&TargetType::Float));
        assert!(registry.contains(&TargetType::Decimal));
        assert!(registry.contains(&TargetType::Boolean));
        assert!(registry.contains(&TargetType::other("date")));
        assert!(registry.contains(&TargetType::other("json")));
    }

    #[test]
    fn test_lookup_miss_is_configuration_error() {
        let registry = ConverterRegistry::with_builtins();
        let err = registry.lookup(&TargetType::other("money")).unwrap_err();
        assert!(matches!(err, BindError::ImproperlyConfigured(_)));
        assert!(err.to_string().contains("money"));
    }

    #[test]
    fn test_register_extension() {
        let mut registry = ConverterRegistry::new();
        registry.register(TargetType::other("upper"), Box::new(UpperConverter));
        let converter = registry.lookup(&TargetType::other("upper")).unwrap();
        let locale = Locale::parse("en-US").unwrap();
        assert_eq!(
            converter.convert("abc", &locale).unwrap(),
            Value::Str("ABC".into())
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ConverterRegistry::with_builtins();
        registry.register(TargetType::Integer, Box::new(UpperConverter));
        let converter = registry.lookup(&TargetType::Integer).unwrap();
        assert_eq!(converter.name(), "UpperConverter");
    }
}
