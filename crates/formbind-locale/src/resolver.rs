//! Request locale resolution.
//!
//! [`LocaleResolver`] turns an `Accept-Language` header into the single
//! [`Locale`] that governs conversion for the request. Resolution never
//! fails: when negotiation produces nothing usable the configured default
//! locale is returned.

use formbind_core::Settings;

use crate::locale::Locale;

/// Resolves the request locale from negotiation data.
///
/// Candidates from the header are matched against the supported set, first
/// by exact tag, then by primary language; the best match by quality wins.
///
/// # Examples
///
/// ```
/// use formbind_locale::{Locale, LocaleResolver};
///
/// let resolver = LocaleResolver::new(Locale::parse("en-US").unwrap())
///     .with_supported(vec![
///         Locale::parse("en-US").unwrap(),
///         Locale::parse("de-DE").unwrap(),
///     ]);
///
/// let locale = resolver.resolve(Some("de-DE,de;q=0.9,en;q=0.8"));
/// assert_eq!(locale.to_string(), "de-DE");
///
/// let locale = resolver.resolve(None);
/// assert_eq!(locale.to_string(), "en-US");
/// ```
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    default: Locale,
    supported: Vec<Locale>,
}

impl LocaleResolver {
    /// Creates a resolver that supports only the default locale.
    pub fn new(default: Locale) -> Self {
        let supported = vec![default.clone()];
        Self { default, supported }
    }

    /// Sets the supported locales. The default is always supported.
    #[must_use]
    pub fn with_supported(mut self, supported: Vec<Locale>) -> Self {
        self.supported = supported;
        if !self.supported.contains(&self.default) {
            self.supported.push(self.default.clone());
        }
        self
    }

    /// Builds a resolver from the pipeline settings.
    ///
    /// Unparsable tags in the settings are skipped with a warning; an
    /// unparsable default falls back to `en-US`.
    pub fn from_settings(settings: &Settings) -> Self {
        let default = Locale::parse(&settings.default_locale).unwrap_or_else(|| {
            tracing::warn!(
                tag = %settings.default_locale,
                "unparsable default locale, falling back to en-US"
            );
            Locale::parse("en-US").expect("en-US is a valid tag")
        });
        let supported = settings
            .supported_locales
            .iter()
            .filter_map(|tag| {
                let parsed = Locale::parse(tag);
                if parsed.is_none() {
                    tracing::warn!(%tag, "skipping unparsable supported locale");
                }
                parsed
            })
            .collect();
        Self::new(default).with_supported(supported)
    }

    /// The locale used when negotiation yields nothing.
    pub const fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Resolves the request locale from an `Accept-Language` header value.
    ///
    /// Supports quality values (e.g. `de-DE,de;q=0.9,en;q=0.8`). Called at
    /// most once per request, before any conversion runs.
    pub fn resolve(&self, accept_language: Option<&str>) -> Locale {
        let Some(header) = accept_language else {
            return self.default.clone();
        };

        let mut candidates: Vec<(f32, Locale)> = Vec::new();
        for part in header.split(',') {
            let part = part.trim();
            let (tag, quality) = if let Some(idx) = part.find(";q=") {
                let q: f32 = part[idx + 3..].trim().parse().unwrap_or(0.0);
                (part[..idx].trim(), q)
            } else {
                (part, 1.0)
            };
            if quality <= 0.0 {
                continue;
            }
            if let Some(locale) = Locale::parse(tag) {
                candidates.push((quality, locale));
            }
        }

        // Stable sort keeps header order among equal qualities.
        candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        for (_, candidate) in &candidates {
            if let Some(exact) = self.supported.iter().find(|s| *s == candidate) {
                return exact.clone();
            }
        }
        for (_, candidate) in &candidates {
            if let Some(by_lang) = self
                .supported
                .iter()
                .find(|s| s.matches_language(candidate))
            {
                return by_lang.clone();
            }
        }

        self.default.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn resolver() -> LocaleResolver {
        LocaleResolver::new(locale("en-US")).with_supported(vec![
            locale("en-US"),
            locale("de-DE"),
            locale("fr-FR"),
        ])
    }

    #[test]
    fn test_no_header_falls_back_to_default() {
        assert_eq!(resolver().resolve(None), locale("en-US"));
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(resolver().resolve(Some("de-DE")), locale("de-DE"));
    }

    #[test]
    fn test_language_match_picks_supported_region() {
        // "de" alone matches the supported de-DE.
        assert_eq!(resolver().resolve(Some("de")), locale("de-DE"));
    }

    #[test]
    fn test_quality_ordering() {
        let resolved = resolver().resolve(Some("fr;q=0.5,de;q=0.9"));
        assert_eq!(resolved, locale("de-DE"));
    }

    #[test]
    fn test_unsupported_falls_back() {
        assert_eq!(resolver().resolve(Some("ja,zh;q=0.8")), locale("en-US"));
    }

    #[test]
    fn test_zero_quality_is_skipped() {
        assert_eq!(resolver().resolve(Some("de;q=0,fr")), locale("fr-FR"));
    }

    #[test]
    fn test_garbage_header_falls_back() {
        assert_eq!(resolver().resolve(Some(";;;,")), locale("en-US"));
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            default_locale: "de-DE".to_string(),
            supported_locales: vec!["de-DE".to_string(), "bogus!".to_string()],
            ..Settings::default()
        };
        let resolver = LocaleResolver::from_settings(&settings);
        assert_eq!(resolver.default_locale(), &locale("de-DE"));
        assert_eq!(resolver.resolve(Some("nothing-usable")), locale("de-DE"));
    }

    #[test]
    fn test_from_settings_bad_default() {
        let settings = Settings {
            default_locale: "???".to_string(),
            ..Settings::default()
        };
        let resolver = LocaleResolver::from_settings(&settings);
        assert_eq!(resolver.default_locale(), &locale("en-US"));
    }
}
