//! # formbind
//!
//! A deferred binding and validation pipeline for server-side request
//! handlers. Raw form/query strings are converted to typed values under the
//! request's locale, declared constraints run against converted values, and
//! every failure is collected into a queryable [`BindingReport`] instead of
//! aborting the request — the handler always runs and decides how to react.
//!
//! ## Modules
//!
//! - [`descriptor`] - Binding declarations as plain data
//! - [`registry`] - The converter registry and [`Converter`] trait
//! - [`converters`] - Built-in conversion strategies
//! - [`constraints`] - Constraints and the validation engine seam
//! - [`binder`] - Conversion/validation orchestration
//! - [`report`] - The request-scoped failure aggregate
//! - [`request`] - Minimal request context
//! - [`dispatch`] - The handler dispatch contract
//!
//! ## Example
//!
//! ```
//! use formbind::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> BindResult<()> {
//! struct SignupHandler;
//!
//! #[async_trait::async_trait]
//! impl Handler for SignupHandler {
//!     async fn handle(&self, values: &BoundValues, report: &BindingReport) -> BindResult<()> {
//!         if report.is_failed() {
//!             // Re-render the form with report.all_messages()...
//!             return Ok(());
//!         }
//!         assert_eq!(values.get("age"), Some(&Value::Int(30)));
//!         Ok(())
//!     }
//! }
//!
//! let dispatcher = Dispatcher::from_settings(&Settings::default());
//! let descriptors = vec![
//!     BindingDescriptor::new("age", TargetType::Integer)
//!         .value("30")
//!         .deferred(true)
//!         .constraint(Box::new(MinValue::new(18.0))),
//! ];
//! dispatcher
//!     .dispatch(&RequestContext::new(), &descriptors, &SignupHandler)
//!     .await
//! # }
//! ```

pub mod binder;
pub mod constraints;
pub mod converters;
pub mod descriptor;
pub mod dispatch;
pub mod registry;
pub mod report;
pub mod request;

pub use binder::{Binder, BoundValues};
pub use constraints::{Constraint, ConstraintEngine, ValidationEngine, Violation};
pub use descriptor::{BindingDescriptor, TargetType};
pub use dispatch::{Dispatcher, Handler};
pub use registry::{Converter, ConverterRegistry};
pub use report::{BindingError, BindingReport, ConversionError};
pub use request::RequestContext;

// Re-export the foundation crates' common types.
pub use formbind_core::{BindError, BindResult, Settings, Value};
pub use formbind_locale::{Locale, LocaleResolver, NumberFormat};

/// The usual imports for applications driving the pipeline.
pub mod prelude {
    pub use crate::binder::{Binder, BoundValues};
    pub use crate::constraints::{
        Constraint, ConstraintEngine, MaxLength, MaxValue, MinLength, MinValue, Pattern,
        ValidationEngine, Violation,
    };
    pub use crate::descriptor::{BindingDescriptor, TargetType};
    pub use crate::dispatch::{Dispatcher, Handler};
    pub use crate::registry::{Converter, ConverterRegistry};
    pub use crate::report::{BindingError, BindingReport, ConversionError};
    pub use crate::request::RequestContext;
    pub use formbind_core::{BindError, BindResult, Settings, Value};
    pub use formbind_locale::{Locale, LocaleResolver};
}
