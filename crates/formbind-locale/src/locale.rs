//! The locale tag type.
//!
//! [`Locale`] is a deliberately small model: a lowercase primary language
//! subtag plus an optional uppercase region subtag (`en`, `en-US`, `pt-BR`).
//! That is all the pipeline needs to pick numeric formatting rules and to
//! match `Accept-Language` candidates against the supported set.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<lang>[A-Za-z]{2,3})(?:[-_](?P<region>[A-Za-z]{2}))?$").expect("valid regex")
});

/// A resolved locale for one request.
///
/// Parsing is case-normalizing and accepts `-` or `_` as the subtag
/// separator.
///
/// # Examples
///
/// ```
/// use formbind_locale::Locale;
///
/// let locale = Locale::parse("DE_de").unwrap();
/// assert_eq!(locale.language(), "de");
/// assert_eq!(locale.region(), Some("DE"));
/// assert_eq!(locale.to_string(), "de-DE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Parses a locale tag like `en`, `en-US`, or `de_DE`.
    ///
    /// Returns `None` for tags that do not fit the language[-region] shape.
    pub fn parse(tag: &str) -> Option<Self> {
        let caps = TAG_RE.captures(tag.trim())?;
        Some(Self {
            language: caps["lang"].to_lowercase(),
            region: caps.name("region").map(|r| r.as_str().to_uppercase()),
        })
    }

    /// Creates a locale from a language subtag alone.
    pub fn from_language(language: &str) -> Self {
        Self {
            language: language.to_lowercase(),
            region: None,
        }
    }

    /// The lowercase primary language subtag.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The uppercase region subtag, if present.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Returns `true` if both locales share the primary language subtag.
    pub fn matches_language(&self, other: &Self) -> bool {
        self.language == other.language
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_only() {
        let locale = Locale::parse("en").unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.region(), None);
        assert_eq!(locale.to_string(), "en");
    }

    #[test]
    fn test_parse_language_region() {
        let locale = Locale::parse("en-US").unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.region(), Some("US"));
        assert_eq!(locale.to_string(), "en-US");
    }

    #[test]
    fn test_parse_normalizes_case_and_separator() {
        assert_eq!(Locale::parse("PT_br").unwrap().to_string(), "pt-BR");
        assert_eq!(Locale::parse("FR-fr").unwrap().to_string(), "fr-FR");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Locale::parse("").is_none());
        assert!(Locale::parse("e").is_none());
        assert!(Locale::parse("en-USA").is_none());
        assert!(Locale::parse("123").is_none());
        assert!(Locale::parse("en US").is_none());
    }

    #[test]
    fn test_matches_language() {
        let a = Locale::parse("en-US").unwrap();
        let b = Locale::parse("en-GB").unwrap();
        let c = Locale::parse("de").unwrap();
        assert!(a.matches_language(&b));
        assert!(!a.matches_language(&c));
    }
}
