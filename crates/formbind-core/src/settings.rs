//! Settings for the binding pipeline.
//!
//! [`Settings`] holds the process-wide configuration the pipeline needs:
//! the default and supported locales for request locale resolution, plus
//! the logging knobs. A lazily-initialized global instance is available
//! through [`configure`] and [`current`].

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{BindError, BindResult};

/// Process-wide configuration for the binding pipeline.
///
/// # Examples
///
/// ```
/// use formbind_core::Settings;
///
/// let settings = Settings::from_toml_str(
///     r#"
///     debug = true
///     default_locale = "en-US"
///     supported_locales = ["en-US", "de-DE", "fr-FR"]
///     "#,
/// )
/// .unwrap();
/// assert_eq!(settings.default_locale, "en-US");
/// assert!(settings.debug);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Debug mode. Enables pretty log output instead of JSON.
    pub debug: bool,
    /// Log filter directive (e.g. "info", "formbind=debug").
    pub log_level: String,
    /// Locale tag used when request negotiation produces no usable locale.
    pub default_locale: String,
    /// Locale tags the application is prepared to serve.
    pub supported_locales: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            default_locale: "en-US".to_string(),
            supported_locales: vec!["en-US".to_string()],
        }
    }
}

impl Settings {
    /// Parses settings from a TOML string.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(source: &str) -> BindResult<Self> {
        toml::from_str(source).map_err(|e| BindError::ConfigurationError(e.to_string()))
    }

    /// Reads and parses settings from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> BindResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Installs the global settings instance.
///
/// # Errors
///
/// Returns `ConfigurationError` if settings were already configured.
pub fn configure(settings: Settings) -> BindResult<()> {
    SETTINGS
        .set(settings)
        .map_err(|_| BindError::ConfigurationError("settings already configured".to_string()))
}

/// Returns the global settings, initializing defaults on first access.
pub fn current() -> &'static Settings {
    SETTINGS.get_or_init(Settings::default)
}
