//! Request redirection subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (TLS marker, path, query)
//!     → matcher.rs (derive scheme, first matching rule)
//!     → template.rs (expand {uri} / {path} / {query} in rule target)
//!     → decision.rs (index, kind, location, status; no side effects)
//!     → responder.rs (Location header or meta-refresh page)
//!     → layer.rs logs and counts, then returns: pipeline stops
//!
//! No rule matched:
//!     → layer.rs forwards the untouched request to the inner service
//!     → inner response and error returned verbatim
//! ```
//!
//! `check.rs` runs the same evaluation for the `check` command.
//!
//! # Design Decisions
//! - Rules are built once and shared read-only (`Arc<[Rule]>`)
//! - Linear scan, first match wins, no specificity ordering
//! - Path matching is a literal prefix check (not segment aware)
//! - Scheme comes from the connection (TLS marker), never from headers
//! - The redirect branch never fails; it cannot produce an error of its own

pub mod check;
pub mod decision;
pub mod layer;
pub mod matcher;
pub mod responder;
pub mod rule;
pub mod template;

pub use check::{check_url, CheckVerdict};
pub use decision::{evaluate, Redirection};
pub use layer::{RedirectLayer, Redirector};
pub use matcher::{find_match, RequestContext, Scheme, TlsConnection};
pub use responder::{respond, RedirectKind};
pub use rule::Rule;
pub use template::build_target;
