//! # formbind-core
//!
//! Foundation types for the formbind pipeline: the [`Value`] enum used to
//! carry converted request data, error types, settings, and logging helpers.
//! This crate has no dependency on the other workspace members.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result alias
//! - [`value`] - The typed value representation for bound data
//! - [`settings`] - Pipeline settings and global configuration
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use error::{BindError, BindResult};
pub use settings::Settings;
pub use value::Value;
