//! Redirect response construction.
//!
//! # Responsibilities
//! - Header redirect: rule status + `Location`, empty body
//! - Meta redirect: `200 OK` HTML page with a single meta-refresh tag
//!
//! # Design Decisions
//! - The rule status is used verbatim, redirect class is not enforced here
//! - Building a response never fails; a target that is not a valid header
//!   value is logged and the `Location` header is left out

use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
};

use crate::redirect::rule::Rule;

/// How a redirect is expressed to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// Status code + `Location` header.
    Header,
    /// HTML meta-refresh document.
    Meta,
}

impl RedirectKind {
    pub fn of(rule: &Rule) -> Self {
        if rule.meta {
            RedirectKind::Meta
        } else {
            RedirectKind::Header
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectKind::Header => "header",
            RedirectKind::Meta => "meta",
        }
    }
}

/// Build the terminal response for a matched rule and its expanded target.
pub fn respond(rule: &Rule, target: &str) -> Response<Body> {
    match RedirectKind::of(rule) {
        RedirectKind::Header => header_redirect(rule.code, target),
        RedirectKind::Meta => meta_redirect(target),
    }
}

fn header_redirect(code: StatusCode, target: &str) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = code;

    match HeaderValue::from_str(target) {
        Ok(location) => {
            response.headers_mut().insert(header::LOCATION, location);
        }
        Err(_) => {
            tracing::warn!(target_url = %target, "Redirect target is not a valid header value, omitting Location");
        }
    }

    response
}

fn meta_redirect(target: &str) -> Response<Body> {
    let mut response = Response::new(Body::from(meta_document(target)));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

/// Render the meta-refresh page for `target`.
///
/// The target is copied verbatim unless it contains `'`, `"`, `<` or `>`.
/// Those are entity-escaped, so a target such as `/a?n=o'neil` shows up as
/// `/a?n=o&#39;neil`; the browser decodes it back to the same URL.
pub fn meta_document(target: &str) -> String {
    // Unescaped, a `'` from the request query would close the URL='...' value.
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta http-equiv=\"refresh\" content=\"0; URL='{}'\">\n</head>\n<body>Redirecting...</body>\n</html>\n",
        escape_attribute(target)
    )
}

/// Quotes and angle brackets would end the attribute early. Everything else
/// is written as-is so query strings keep their `&`.
fn escape_attribute(value: &str) -> std::borrow::Cow<'_, str> {
    if !value.contains(['\'', '"', '<', '>']) {
        return std::borrow::Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&#34;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    std::borrow::Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_redirect() {
        let rule = Rule::new("/from", "/to", StatusCode::MOVED_PERMANENTLY);
        let response = respond(&rule, "/to");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/to");
    }

    #[test]
    fn test_header_redirect_uses_code_verbatim() {
        let rule = Rule::new("/", "/elsewhere", StatusCode::IM_A_TEAPOT);
        let response = respond(&rule, "/elsewhere");
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/elsewhere");
    }

    #[test]
    fn test_invalid_location_is_omitted() {
        let rule = Rule::new("/", "/bad", StatusCode::FOUND);
        let response = respond(&rule, "/bad\nheader");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[test]
    fn test_meta_redirect() {
        let rule = Rule::meta("/whatever", "/something").with_scheme("http");
        let response = respond(&rule, "/something");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LOCATION).is_none());
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_meta_document() {
        let page = meta_document("https://example.com/?a=1&b=2");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<head>"));
        assert!(page.contains("<body>"));
        assert!(page.contains(r#"<meta http-equiv="refresh" content="0; URL='https://example.com/?a=1&b=2'">"#));
        assert_eq!(page.matches("http-equiv").count(), 1);
    }

    #[test]
    fn test_meta_document_apostrophe_in_query() {
        let page = meta_document("/x/a?n=o'neil");
        assert!(page.contains("content=\"0; URL='/x/a?n=o&#39;neil'\""));
        assert!(!page.contains("o'neil"));
    }

    #[test]
    fn test_meta_document_escapes_quotes() {
        let page = meta_document("/x'\"><script>");
        assert!(page.contains("URL='/x&#39;&#34;&gt;&lt;script&gt;'"));
        assert!(!page.contains("<script>"));
    }
}
