//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → RedirectorConfig (validated, immutable)
//!     → RuleConfig::to_rule → Arc<[Rule]> shared by the middleware
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; rules never change while serving
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RedirectorConfig;
pub use schema::RuleConfig;
pub use schema::SiteConfig;
pub use schema::TimeoutConfig;
pub use schema::TlsConfig;
pub use validation::{validate_config, ValidationError};
