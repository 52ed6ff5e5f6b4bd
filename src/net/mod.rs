//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → plain listener (tokio TcpListener, axum::serve)
//!     → or tls.rs (rustls handshake via axum-server)
//!     → Hand off to HTTP layer, HTTPS requests carry the TLS marker
//! ```

pub mod tls;
