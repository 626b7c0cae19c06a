//! Per-locale numeric formatting rules.
//!
//! [`NumberFormat`] knows a locale's decimal and grouping separators and can
//! rewrite a localized numeral into the canonical `-?digits[.digits]` form
//! understood by the standard numeric parsers. Normalization is strict: a
//! string whose grouping is malformed under the locale's rules is rejected
//! rather than mis-parsed, so `"19,99"` fails under `en-US` instead of
//! silently becoming `1999`.

use thiserror::Error;

use crate::locale::Locale;

/// A failure to read a numeral under a locale's formatting rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NumberParseError {
    /// The input was empty or contained only a sign.
    #[error("empty numeric value")]
    Empty,
    /// A character that is neither a digit nor a separator valid in its
    /// position.
    #[error("unexpected character {0:?} in numeric value")]
    UnexpectedChar(char),
    /// Grouping separators present but the digit groups are not shaped
    /// `1-3 digits, then groups of exactly 3`.
    #[error("misplaced grouping separator")]
    Grouping,
    /// More than one decimal separator, or a decimal separator with no
    /// fraction digits after it.
    #[error("misplaced decimal separator")]
    DecimalSeparator,
}

/// Decimal and grouping separators for one locale.
///
/// # Examples
///
/// ```
/// use formbind_locale::{Locale, NumberFormat};
///
/// let de = NumberFormat::for_locale(&Locale::parse("de-DE").unwrap());
/// assert_eq!(de.normalize("1.234,56").unwrap(), "1234.56");
///
/// let en = NumberFormat::for_locale(&Locale::parse("en-US").unwrap());
/// assert_eq!(en.normalize("1,234.56").unwrap(), "1234.56");
/// assert!(en.normalize("19,99").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// The character separating integer and fraction digits.
    pub decimal_separator: char,
    /// The character separating digit groups in the integer part.
    pub grouping_separator: char,
}

/// Languages that write decimals with a comma and group with a period.
const COMMA_DECIMAL_DOT_GROUPING: &[&str] = &[
    "de", "es", "it", "pt", "nl", "da", "tr", "el", "id", "ro", "hr", "sl", "bg", "vi",
];

/// Languages that write decimals with a comma and group with a space.
const COMMA_DECIMAL_SPACE_GROUPING: &[&str] = &[
    "fr", "ru", "pl", "cs", "sk", "sv", "fi", "uk", "nb", "nn", "no", "hu",
];

impl NumberFormat {
    /// Returns the numeric format for the given locale.
    ///
    /// Swiss locales use the apostrophe for grouping; otherwise the rule is
    /// keyed by the primary language subtag, defaulting to period-decimal /
    /// comma-grouping.
    pub fn for_locale(locale: &Locale) -> Self {
        if locale.region() == Some("CH") {
            return Self {
                decimal_separator: '.',
                grouping_separator: '\'',
            };
        }
        let lang = locale.language();
        if COMMA_DECIMAL_DOT_GROUPING.contains(&lang) {
            Self {
                decimal_separator: ',',
                grouping_separator: '.',
            }
        } else if COMMA_DECIMAL_SPACE_GROUPING.contains(&lang) {
            Self {
                decimal_separator: ',',
                grouping_separator: ' ',
            }
        } else {
            Self {
                decimal_separator: '.',
                grouping_separator: ',',
            }
        }
    }

    /// Rewrites a localized numeral into canonical `-?digits[.digits]` form.
    ///
    /// Leading/trailing ASCII whitespace and a single leading sign are
    /// accepted. Grouping separators may only appear in the integer part and
    /// the groups they delimit must be well-formed. When the grouping
    /// separator is a space, the non-breaking variants (U+00A0, U+202F) are
    /// accepted as well.
    pub fn normalize(&self, raw: &str) -> Result<String, NumberParseError> {
        let mut s = raw.trim().to_string();
        if self.grouping_separator == ' ' {
            s = s.replace(['\u{a0}', '\u{202f}'], " ");
        }

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(&s)),
        };
        if body.is_empty() {
            return Err(NumberParseError::Empty);
        }

        let mut split = body.split(self.decimal_separator);
        let int_part = split.next().unwrap_or("");
        let frac_part = split.next();
        if split.next().is_some() {
            return Err(NumberParseError::DecimalSeparator);
        }

        let int_digits = self.collect_integer_digits(int_part)?;

        let frac_digits = match frac_part {
            None => None,
            Some("") => return Err(NumberParseError::DecimalSeparator),
            Some(frac) => {
                if let Some(bad) = frac.chars().find(|c| !c.is_ascii_digit()) {
                    return Err(NumberParseError::UnexpectedChar(bad));
                }
                Some(frac)
            }
        };

        if int_digits.is_empty() && frac_digits.is_none() {
            return Err(NumberParseError::Empty);
        }

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        if int_digits.is_empty() {
            out.push('0');
        } else {
            out.push_str(&int_digits);
        }
        if let Some(frac) = frac_digits {
            out.push('.');
            out.push_str(frac);
        }
        Ok(out)
    }

    /// Validates the integer part and strips its grouping separators.
    fn collect_integer_digits(&self, int_part: &str) -> Result<String, NumberParseError> {
        if int_part.is_empty() {
            return Ok(String::new());
        }
        if int_part.contains(self.grouping_separator) {
            let groups: Vec<&str> = int_part.split(self.grouping_separator).collect();
            for (i, group) in groups.iter().enumerate() {
                let well_sized = if i == 0 {
                    !group.is_empty() && group.len() <= 3
                } else {
                    group.len() == 3
                };
                if !well_sized {
                    return Err(NumberParseError::Grouping);
                }
                if let Some(bad) = group.chars().find(|c| !c.is_ascii_digit()) {
                    return Err(NumberParseError::UnexpectedChar(bad));
                }
            }
            Ok(groups.concat())
        } else {
            if let Some(bad) = int_part.chars().find(|c| !c.is_ascii_digit()) {
                return Err(NumberParseError::UnexpectedChar(bad));
            }
            Ok(int_part.to_string())
        }
    }
}
