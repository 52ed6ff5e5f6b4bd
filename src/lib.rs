//! HTTP request redirection middleware.
//!
//! Matches requests against an ordered list of rules and answers the first
//! match with a header redirect or an HTML meta-refresh page. Requests no
//! rule matches go to the next handler untouched.
//!
//! ```
//! use axum::{http::StatusCode, Router};
//! use redirector::redirect::{RedirectLayer, Rule};
//!
//! let rules = vec![
//!     Rule::new("/scheme", "https://localhost/scheme", StatusCode::MOVED_PERMANENTLY).with_scheme("http"),
//!     Rule::meta("/legacy", "/new{uri}"),
//!     Rule::new("/", "https://example.com{uri}", StatusCode::PERMANENT_REDIRECT),
//! ];
//!
//! let app: Router = Router::new()
//!     .fallback(|| async { "next handler" })
//!     .layer(RedirectLayer::new(rules));
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod redirect;

pub use config::RedirectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use redirect::{RedirectLayer, Redirector, Rule};
