//! Rule evaluation without side effects.
//!
//! Shared by the middleware and the `check` dry-run: matching, target
//! expansion and status selection happen here, logging and metrics do not.

use axum::{
    body::Body,
    http::{Response, StatusCode},
};

use crate::redirect::matcher::{find_match, RequestContext};
use crate::redirect::responder::{respond, RedirectKind};
use crate::redirect::rule::Rule;
use crate::redirect::template::build_target;

/// The outcome of a matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection<'r> {
    /// Position of the rule in evaluation order.
    pub index: usize,
    pub rule: &'r Rule,
    pub kind: RedirectKind,
    /// Expanded target.
    pub location: String,
}

impl Redirection<'_> {
    /// Status the client will see.
    pub fn status(&self) -> StatusCode {
        match self.kind {
            RedirectKind::Header => self.rule.code,
            RedirectKind::Meta => StatusCode::OK,
        }
    }

    pub fn into_response(self) -> Response<Body> {
        respond(self.rule, &self.location)
    }
}

/// Evaluate `rules` in order against the request context.
pub fn evaluate<'r>(rules: &'r [Rule], ctx: &RequestContext<'_>) -> Option<Redirection<'r>> {
    let (index, rule) = find_match(rules, ctx)?;

    Some(Redirection {
        index,
        rule,
        kind: RedirectKind::of(rule),
        location: build_target(&rule.to, ctx),
    })
}
