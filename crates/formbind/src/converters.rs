//! Built-in conversion strategies.
//!
//! The numeric converters parse through the request locale's
//! [`NumberFormat`], so `"19,99"` is 19.99 for a German request and a
//! conversion failure for an American one. The boolean converter never
//! fails. The date and JSON converters are the shipped examples of the open
//! `Other` registry category.

use formbind_core::Value;
use formbind_locale::{Locale, NumberFormat};
use rust_decimal::Decimal;

use crate::registry::Converter;

/// Converts localized integer numerals to [`Value::Int`].
#[derive(Debug, Clone, Copy)]
pub struct IntegerConverter;

impl Converter for IntegerConverter {
    fn convert(&self, raw: &str, locale: &Locale) -> Result<Value, String> {
        let canonical = NumberFormat::for_locale(locale)
            .normalize(raw)
            .map_err(|e| e.to_string())?;
        if canonical.contains('.') {
            return Err("whole number expected".to_string());
        }
        canonical
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| "value out of range".to_string())
    }

    fn default_value(&self) -> Value {
        Value::Int(0)
    }

    fn name(&self) -> &str {
        "IntegerConverter"
    }
}

/// Converts localized numerals to [`Value::Float`].
#[derive(Debug, Clone, Copy)]
pub struct FloatConverter;

impl Converter for FloatConverter {
    fn convert(&self, raw: &str, locale: &Locale) -> Result<Value, String> {
        let canonical = NumberFormat::for_locale(locale)
            .normalize(raw)
            .map_err(|e| e.to_string())?;
        canonical
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| e.to_string())
    }

    fn default_value(&self) -> Value {
        Value::Float(0.0)
    }

    fn name(&self) -> &str {
        "FloatConverter"
    }
}

/// Converts localized numerals to exact [`Value::Decimal`] values.
#[derive(Debug, Clone, Copy)]
pub struct DecimalConverter;

impl Converter for DecimalConverter {
    fn convert(&self, raw: &str, locale: &Locale) -> Result<Value, String> {
        let canonical = NumberFormat::for_locale(locale)
            .normalize(raw)
            .map_err(|e| e.to_string())?;
        canonical
            .parse::<Decimal>()
            .map(Value::Decimal)
            .map_err(|e| e.to_string())
    }

    fn default_value(&self) -> Value {
        Value::Decimal(Decimal::ZERO)
    }

    fn name(&self) -> &str {
        "DecimalConverter"
    }
}

/// Converts checkbox-style input to [`Value::Bool`].
///
/// Policy: input is trimmed of ASCII whitespace and compared
/// case-insensitively; the literals `true` and `on` map to `true`, every
/// other non-empty string maps to `false`. This conversion never fails.
#[derive(Debug, Clone, Copy)]
pub struct BooleanConverter;

impl Converter for BooleanConverter {
    fn convert(&self, raw: &str, _locale: &Locale) -> Result<Value, String> {
        let trimmed = raw.trim();
        let truthy =
            trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("on");
        Ok(Value::Bool(truthy))
    }

    fn default_value(&self) -> Value {
        Value::Bool(false)
    }

    fn name(&self) -> &str {
        "BooleanConverter"
    }
}

/// Converts ISO `YYYY-MM-DD` dates to [`Value::Date`].
///
/// Registered under the `date` extension key.
#[derive(Debug, Clone, Copy)]
pub struct DateConverter;

impl Converter for DateConverter {
    fn convert(&self, raw: &str, _locale: &Locale) -> Result<Value, String> {
        chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| "expected a date in YYYY-MM-DD format".to_string())
    }

    fn default_value(&self) -> Value {
        Value::Null
    }

    fn name(&self) -> &str {
        "DateConverter"
    }
}

/// Converts raw JSON documents to [`Value::Json`].
///
/// Registered under the `json` extension key.
#[derive(Debug, Clone, Copy)]
pub struct JsonConverter;

impl Converter for JsonConverter {
    fn convert(&self, raw: &str, _locale: &Locale) -> Result<Value, String> {
        serde_json::from_str::<serde_json::Value>(raw)
            .map(Value::Json)
            .map_err(|e| e.to_string())
    }

    fn default_value(&self) -> Value {
        Value::Null
    }

    fn name(&self) -> &str {
        "JsonConverter"
    }
}
