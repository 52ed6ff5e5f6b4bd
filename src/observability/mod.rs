//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Redirect middleware and server produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (redirect / passthrough counters)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID set by the server and propagated to responses
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
