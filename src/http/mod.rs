//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → [TLS marker on the HTTPS router only]
//!     → redirect layer (first matching rule answers)
//!     → next handler (static site or 404)
//!     → Send to client
//! ```

pub mod server;

pub use server::{HttpServer, ServerError};
