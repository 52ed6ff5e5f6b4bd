//! Dry-run evaluation of a URL against the rules.
//!
//! Backs the `check` command: an `https://` URL stands in for a request
//! received over TLS, anything else for a plain connection.

use axum::http::{uri::InvalidUri, Request, Uri};
use serde::Serialize;

use crate::redirect::decision::evaluate;
use crate::redirect::matcher::{RequestContext, TlsConnection};
use crate::redirect::rule::Rule;

/// What the middleware would do with a request for a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckVerdict {
    pub matched: bool,
    pub scheme: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Evaluate `rules` for `url` without running any handler.
pub fn check_url(rules: &[Rule], url: &str) -> Result<CheckVerdict, InvalidUri> {
    let uri: Uri = url.parse()?;
    let tls = uri.scheme_str() == Some("https");

    let mut request = Request::new(());
    *request.uri_mut() = uri;
    if tls {
        request.extensions_mut().insert(TlsConnection);
    }

    let ctx = RequestContext::from_request(&request);
    let verdict = match evaluate(rules, &ctx) {
        Some(redirection) => CheckVerdict {
            matched: true,
            scheme: ctx.scheme.as_str(),
            rule: Some(redirection.index),
            kind: Some(redirection.kind.as_str()),
            status: Some(redirection.status().as_u16()),
            location: Some(redirection.location),
        },
        None => CheckVerdict {
            matched: false,
            scheme: ctx.scheme.as_str(),
            rule: None,
            kind: None,
            status: None,
            location: None,
        },
    };

    Ok(verdict)
}
