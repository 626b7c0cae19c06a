//! # formbind-locale
//!
//! Locale handling for the formbind pipeline: a small locale model,
//! per-locale numeric formatting rules, and `Accept-Language` negotiation
//! for resolving the request locale.
//!
//! ## Modules
//!
//! - [`locale`] - The [`Locale`] tag type
//! - [`format`] - Per-locale numeric formats and normalization
//! - [`resolver`] - Request locale resolution with header negotiation

pub mod format;
pub mod locale;
pub mod resolver;

pub use format::{NumberFormat, NumberParseError};
pub use locale::Locale;
pub use resolver::LocaleResolver;
