//! Minimal request context.
//!
//! [`RequestContext`] carries the negotiation data the pipeline reads from
//! the surrounding HTTP layer — currently just headers. Header names are
//! stored lowercase, so lookups are case-insensitive.

use std::collections::HashMap;

/// Per-request context supplied by the surrounding request layer.
///
/// # Examples
///
/// ```
/// use formbind::request::RequestContext;
///
/// let ctx = RequestContext::new().header("Accept-Language", "de-DE,en;q=0.8");
/// assert_eq!(ctx.accept_language(), Some("de-DE,en;q=0.8"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    headers: HashMap<String, String>,
}

impl RequestContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_lowercase(), value.into());
        self
    }

    /// Returns a header value by case-insensitive name.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// The `Accept-Language` header, if present.
    pub fn accept_language(&self) -> Option<&str> {
        self.get_header("accept-language")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let ctx = RequestContext::new().header("X-Request-Id", "abc");
        assert_eq!(ctx.get_header("x-request-id"), Some("abc"));
        assert_eq!(ctx.get_header("X-REQUEST-ID"), Some("abc"));
        assert_eq!(ctx.get_header("other"), None);
    }

    #[test]
    fn test_accept_language() {
        assert_eq!(RequestContext::new().accept_language(), None);
        let ctx = RequestContext::new().header("Accept-Language", "fr");
        assert_eq!(ctx.accept_language(), Some("fr"));
    }
}
