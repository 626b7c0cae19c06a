//! Handler dispatch.
//!
//! [`Dispatcher`] ties the pipeline together for one request: resolve the
//! locale, bind the descriptor set, then invoke the handler exactly once —
//! whether or not binding recorded failures. The handler is the sole
//! arbiter of what a failed report means; the dispatcher only adds a
//! diagnostic warning when a failed report was never looked at.

use std::sync::Arc;

use async_trait::async_trait;
use formbind_core::{BindResult, Settings};
use formbind_locale::LocaleResolver;

use crate::binder::{Binder, BoundValues};
use crate::constraints::{ConstraintEngine, ValidationEngine};
use crate::descriptor::BindingDescriptor;
use crate::registry::ConverterRegistry;
use crate::report::BindingReport;
use crate::request::RequestContext;

/// A request handler.
///
/// Invoked exactly once per dispatched request with the (possibly
/// partially-defaulted) bound values and the binding report. Async because
/// real handlers do I/O.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handles one request.
    async fn handle(&self, values: &BoundValues, report: &BindingReport) -> BindResult<()>;
}

/// Drives the binding pipeline and invokes the handler.
///
/// The registry and resolver are configuration-time objects shared across
/// requests; everything request-scoped (locale, bound values, report) is
/// created fresh per [`dispatch`](Dispatcher::dispatch) call.
pub struct Dispatcher {
    registry: Arc<ConverterRegistry>,
    resolver: LocaleResolver,
    engine: Box<dyn ValidationEngine>,
}

impl Dispatcher {
    /// Creates a dispatcher with the default constraint engine.
    pub fn new(registry: Arc<ConverterRegistry>, resolver: LocaleResolver) -> Self {
        Self {
            registry,
            resolver,
            engine: Box::new(ConstraintEngine),
        }
    }

    /// Wires a dispatcher from settings: built-in converters and the
    /// settings-declared locales.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(ConverterRegistry::with_builtins()),
            LocaleResolver::from_settings(settings),
        )
    }

    /// Substitutes the validation engine.
    #[must_use]
    pub fn with_engine(mut self, engine: Box<dyn ValidationEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Binds the descriptor set and invokes the handler exactly once.
    ///
    /// The handler runs regardless of binding failures. After the handler
    /// returns, a warning is logged iff the report holds failures the
    /// handler never queried — a diagnostic only; it never changes dispatch
    /// behavior.
    ///
    /// # Errors
    ///
    /// Configuration errors and non-deferred binding failures from
    /// [`Binder::bind`], and whatever the handler itself returns.
    pub async fn dispatch(
        &self,
        ctx: &RequestContext,
        descriptors: &[BindingDescriptor],
        handler: &dyn Handler,
    ) -> BindResult<()> {
        let locale = self.resolver.resolve(ctx.accept_language());
        tracing::debug!(%locale, bindings = descriptors.len(), "binding request data");

        let binder = Binder::new(&self.registry, self.engine.as_ref());
        let (values, report) = binder.bind(descriptors, &locale)?;

        let result = handler.handle(&values, &report).await;

        if report.has_errors() && !report.was_accessed() {
            tracing::warn!(
                failures = report.all_messages().len(),
                "binding failures were recorded but the handler never inspected the report"
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TargetType;
    use formbind_core::{BindError, Value};
    use formbind_locale::Locale;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        calls: AtomicUsize,
        inspect: bool,
    }

    impl CountingHandler {
        fn new(inspect: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                inspect,
            }
        }
    }

    #[async_trait]
    impl Handler for CountingHandler {
        async fn handle(&self, _values: &BoundValues, report: &BindingReport) -> BindResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.inspect {
                let _ = report.is_failed();
            }
            Ok(())
        }
    }

    fn dispatcher() -> Dispatcher {
        let settings = Settings {
            supported_locales: vec!["en-US".to_string(), "de-DE".to_string()],
            ..Settings::default()
        };
        Dispatcher::from_settings(&settings)
    }

    #[tokio::test]
    async fn test_handler_invoked_once_on_success() {
        let handler = CountingHandler::new(true);
        let descriptors = vec![BindingDescriptor::new("age", TargetType::Integer)
            .value("30")
            .deferred(true)];
        dispatcher()
            .dispatch(&RequestContext::new(), &descriptors, &handler)
            .await
            .unwrap();
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handler_invoked_once_on_failure() {
        let handler = CountingHandler::new(true);
        let descriptors = vec![BindingDescriptor::new("age", TargetType::Integer)
            .value("foobar")
            .deferred(true)];
        dispatcher()
            .dispatch(&RequestContext::new(), &descriptors, &handler)
            .await
            .unwrap();
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_uninspected_failure_still_dispatches() {
        // The diagnostic warning must not alter behavior.
        let handler = CountingHandler::new(false);
        let descriptors = vec![BindingDescriptor::new("age", TargetType::Integer)
            .value("foobar")
            .deferred(true)];
        dispatcher()
            .dispatch(&RequestContext::new(), &descriptors, &handler)
            .await
            .unwrap();
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_locale_resolved_from_header() {
        struct PriceHandler;

        #[async_trait]
        impl Handler for PriceHandler {
            async fn handle(&self, values: &BoundValues, report: &BindingReport) -> BindResult<()> {
                assert!(!report.is_failed());
                assert_eq!(
                    values.get("price"),
                    Some(&Value::Decimal("19.99".parse().unwrap()))
                );
                Ok(())
            }
        }

        let ctx = RequestContext::new().header("Accept-Language", "de-DE,en;q=0.5");
        let descriptors = vec![BindingDescriptor::new("price", TargetType::Decimal)
            .value("19,99")
            .deferred(true)];
        dispatcher()
            .dispatch(&ctx, &descriptors, &PriceHandler)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_deferred_failure_skips_handler() {
        let handler = CountingHandler::new(true);
        let descriptors = vec![BindingDescriptor::new("id", TargetType::Integer).value("abc")];
        let err = dispatcher()
            .dispatch(&RequestContext::new(), &descriptors, &handler)
            .await
            .unwrap_err();
        assert!(matches!(err, BindError::BadRequest(_)));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_custom_engine_substitution() {
        use crate::constraints::{Constraint, Violation};

        // An engine that rejects everything, regardless of constraints.
        struct RejectAll;

        impl ValidationEngine for RejectAll {
            fn validate(
                &self,
                value: &Value,
                _constraints: &[Box<dyn Constraint>],
            ) -> Vec<Violation> {
                vec![Violation::new("RejectAll", "No.", value.clone())]
            }
        }

        struct AssertFailed;

        #[async_trait]
        impl Handler for AssertFailed {
            async fn handle(&self, _values: &BoundValues, report: &BindingReport) -> BindResult<()> {
                assert!(report.is_failed());
                Ok(())
            }
        }

        let descriptors = vec![BindingDescriptor::new("age", TargetType::Integer)
            .value("30")
            .deferred(true)];
        dispatcher()
            .with_engine(Box::new(RejectAll))
            .dispatch(&RequestContext::new(), &descriptors, &AssertFailed)
            .await
            .unwrap();
    }

    #[test]
    fn test_resolver_default_locale() {
        let settings = Settings::default();
        let dispatcher = Dispatcher::from_settings(&settings);
        let locale = dispatcher.resolver.resolve(None);
        assert_eq!(locale, Locale::parse("en-US").unwrap());
    }
}
