//! Redirect middleware.
//!
//! # Responsibilities
//! - Wrap the next handler of the pipeline as a tower `Service`
//! - Answer matching requests without touching the inner service
//! - Forward everything else unchanged and return the inner result verbatim
//!
//! # Design Decisions
//! - The next handler is the wrapped service, injected at construction
//! - The redirect branch is an immediately ready future (no suspension points)
//! - The error type is the inner service's; nothing is wrapped or retried

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{Request, Response},
};
use futures_util::future::{ready, Either, Ready};
use tower::{Layer, Service};

use crate::observability::metrics;
use crate::redirect::decision::evaluate;
use crate::redirect::matcher::RequestContext;
use crate::redirect::rule::Rule;

/// Layer that applies [`Redirector`] to a service.
#[derive(Debug, Clone)]
pub struct RedirectLayer {
    rules: Arc<[Rule]>,
}

impl RedirectLayer {
    /// Create a layer evaluating `rules` in the given order.
    pub fn new(rules: impl Into<Arc<[Rule]>>) -> Self {
        Self { rules: rules.into() }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl<S> Layer<S> for RedirectLayer {
    type Service = Redirector<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Redirector {
            inner,
            rules: Arc::clone(&self.rules),
        }
    }
}

/// Redirecting middleware service.
///
/// Evaluates its rules against each request and either emits the redirect
/// itself or calls `inner` exactly once.
#[derive(Debug, Clone)]
pub struct Redirector<S> {
    inner: S,
    rules: Arc<[Rule]>,
}

impl<S> Redirector<S> {
    pub fn new(inner: S, rules: impl Into<Arc<[Rule]>>) -> Self {
        Self {
            inner,
            rules: rules.into(),
        }
    }

    /// Evaluate the rules without running the pipeline.
    ///
    /// Returns the redirect response for the first matching rule, if any.
    /// Logs nothing and records no metrics; `call` does both.
    pub fn redirect_for<B>(&self, req: &Request<B>) -> Option<Response<Body>> {
        let ctx = RequestContext::from_request(req);
        evaluate(&self.rules, &ctx).map(|redirection| redirection.into_response())
    }
}

impl<S, B> Service<Request<B>> for Redirector<S>
where
    S: Service<Request<B>, Response = Response<Body>>,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = Either<Ready<Result<Response<Body>, S::Error>>, S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let ctx = RequestContext::from_request(&req);

        match evaluate(&self.rules, &ctx) {
            Some(redirection) => {
                let kind = redirection.kind.as_str();
                tracing::debug!(
                    rule = redirection.index,
                    kind,
                    scheme = %ctx.scheme,
                    path = %ctx.path,
                    location = %redirection.location,
                    "Redirecting request"
                );

                let response = redirection.into_response();
                metrics::record_redirect(kind, response.status().as_u16());
                Either::Left(ready(Ok(response)))
            }
            None => {
                tracing::trace!(path = %ctx.path, "No redirect rule matched");
                metrics::record_passthrough();
                Either::Right(self.inner.call(req))
            }
        }
    }
}
