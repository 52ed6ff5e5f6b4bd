//! Redirect rule definition.

use axum::http::StatusCode;

/// A single redirect rule.
///
/// Pairs a (scheme, path prefix) predicate with a target template and the
/// way the redirect is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Scheme the connection must use (`"http"` or `"https"`). Empty matches any.
    pub from_scheme: String,

    /// Literal, case-sensitive prefix of the request path.
    pub from_path: String,

    /// Target template, may contain `{uri}`, `{path}` and `{query}`.
    pub to: String,

    /// Status used for header redirects. Ignored when `meta` is set.
    pub code: StatusCode,

    /// Emit an HTML meta-refresh page instead of a `Location` header.
    pub meta: bool,
}

impl Rule {
    /// Create a header redirect rule matching any scheme.
    pub fn new(from_path: impl Into<String>, to: impl Into<String>, code: StatusCode) -> Self {
        Self {
            from_scheme: String::new(),
            from_path: from_path.into(),
            to: to.into(),
            code,
            meta: false,
        }
    }

    /// Create a meta-refresh rule matching any scheme.
    pub fn meta(from_path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            meta: true,
            ..Self::new(from_path, to, StatusCode::OK)
        }
    }

    /// Restrict the rule to connections using `scheme`.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.from_scheme = scheme.into();
        self
    }
}
