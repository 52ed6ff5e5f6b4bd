//! Rule matching logic.
//!
//! # Responsibilities
//! - Derive the request scheme from the connection (TLS marker extension)
//! - Match scheme (exact, empty = wildcard)
//! - Match path prefix (case-sensitive, literal)
//! - Select the first rule satisfying both
//!
//! # Design Decisions
//! - Scheme and path conditions are independent and combined with AND
//! - Unknown `from_scheme` values are kept and never match
//! - No trailing-slash normalization

use axum::http::Request;

use crate::redirect::rule::Rule;

/// Request extension marking a request received over a TLS-terminated connection.
///
/// The hosting server inserts it on its HTTPS listener only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TlsConnection;

/// Scheme of the connection a request arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parts of a request the redirect rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext<'a> {
    pub scheme: Scheme,
    pub path: &'a str,
    /// Raw query string without the leading `?`. Empty when absent.
    pub query: &'a str,
}

impl<'a> RequestContext<'a> {
    pub fn new(scheme: Scheme, path: &'a str, query: &'a str) -> Self {
        Self { scheme, path, query }
    }

    /// Borrow the context from a request.
    pub fn from_request<B>(req: &'a Request<B>) -> Self {
        let scheme = if req.extensions().get::<TlsConnection>().is_some() {
            Scheme::Https
        } else {
            Scheme::Http
        };

        Self {
            scheme,
            path: req.uri().path(),
            query: req.uri().query().unwrap_or_default(),
        }
    }
}

impl Rule {
    /// Returns true if both the scheme and the path conditions hold.
    pub fn matches(&self, ctx: &RequestContext<'_>) -> bool {
        self.matches_scheme(ctx.scheme) && ctx.path.starts_with(&self.from_path)
    }

    fn matches_scheme(&self, scheme: Scheme) -> bool {
        self.from_scheme.is_empty() || self.from_scheme == scheme.as_str()
    }
}

/// Find the first rule matching the request, with its position in `rules`.
pub fn find_match<'r>(rules: &'r [Rule], ctx: &RequestContext<'_>) -> Option<(usize, &'r Rule)> {
    rules.iter().enumerate().find(|(_, rule)| rule.matches(ctx))
}
