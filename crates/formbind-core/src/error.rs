//! Error types for the formbind pipeline.
//!
//! The pipeline distinguishes two failure classes. Per-value conversion and
//! validation failures for deferred bindings are *data*: they are collected
//! into the binding report and never surface as `Err`. Everything in this
//! module is the other class — failures that abort request processing
//! (immediate-mode binding failures) or that indicate a broken configuration
//! (a declared target type with no registered converter).

use thiserror::Error;

/// The error type for operations that abort the binding pipeline.
///
/// Each variant maps to an HTTP status code via [`BindError::status_code`],
/// so the surrounding request layer can translate directly into a response.
#[derive(Error, Debug)]
pub enum BindError {
    /// A non-deferred binding failed conversion or validation.
    ///
    /// Immediate-mode bindings fail the request on the spot instead of
    /// recording into the binding report.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The pipeline is wired incorrectly, e.g. a descriptor declares a
    /// target type with no registered converter.
    ///
    /// This class is configuration-time and independent of request data.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),

    /// An I/O error occurred (e.g. while reading a settings file).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BindError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// `BadRequest` maps to 400; everything else is a server-side problem
    /// and maps to 500.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::ImproperlyConfigured(_)
            | Self::ConfigurationError(_)
            | Self::Internal(_)
            | Self::IoError(_) => 500,
        }
    }
}

/// A convenience type alias for `Result<T, BindError>`.
pub type BindResult<T> = Result<T, BindError>;
