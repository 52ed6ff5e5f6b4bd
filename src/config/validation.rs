//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check rule targets, path prefixes and redirect codes
//! - Check listener and metrics addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RedirectorConfig → Result<(), Vec<ValidationError>>
//! - `from_path` is compared with the request path as it appears on the wire,
//!   so it must be written percent-encoded (`/%C3%BCber`, not `/über`)
//! - Unknown `from_scheme` values are accepted here; `compile_rules` warns

use std::net::SocketAddr;

use crate::config::schema::{RedirectorConfig, RuleConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("rule {index}: 'to' must not be empty")]
    EmptyTarget { index: usize },

    #[error("rule {index}: 'to' contains control characters")]
    InvalidTarget { index: usize },

    #[error("rule {index}: 'from_path' {path:?} must start with '/'")]
    InvalidFromPath { index: usize, path: String },

    #[error("rule {index}: 'from_path' {path:?} must be percent-encoded and contain no '?' or '#'")]
    UnencodedFromPath { index: usize, path: String },

    #[error("rule {index}: 'from_path' and 'to' cannot be the same")]
    SameSourceAndTarget { index: usize },

    #[error("rule {index}: code {code} is not a redirect code (300-308)")]
    InvalidCode { index: usize, code: u16 },

    #[error("{field}: {value:?} is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &RedirectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address("listener.bind_address", &config.listener.bind_address, &mut errors);
    if let Some(tls) = &config.listener.tls {
        check_address("listener.tls.bind_address", &tls.bind_address, &mut errors);
    }
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    for (index, rule) in config.rules.iter().enumerate() {
        check_rule(index, rule, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_rule(index: usize, rule: &RuleConfig, errors: &mut Vec<ValidationError>) {
    if rule.to.is_empty() {
        errors.push(ValidationError::EmptyTarget { index });
    } else if rule.to.chars().any(char::is_control) {
        errors.push(ValidationError::InvalidTarget { index });
    }

    if !rule.from_path.starts_with('/') {
        errors.push(ValidationError::InvalidFromPath {
            index,
            path: rule.from_path.clone(),
        });
    } else if !is_encoded_path(&rule.from_path) {
        errors.push(ValidationError::UnencodedFromPath {
            index,
            path: rule.from_path.clone(),
        });
    }

    if rule.from_path == rule.to {
        errors.push(ValidationError::SameSourceAndTarget { index });
    }

    if !rule.meta && !(300..=308).contains(&rule.code) {
        errors.push(ValidationError::InvalidCode { index, code: rule.code });
    }
}

/// True if `path` could be a prefix of a request path as received.
///
/// Request paths are never decoded before matching, so anything a client
/// must percent-encode (non-ASCII, spaces, control characters) or that ends
/// the path (`?`, `#`) can never match. A `%` must start a valid escape.
fn is_encoded_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escape = bytes.get(i + 1..i + 3);
                if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                i += 3;
            }
            b'?' | b'#' => return false,
            b if !b.is_ascii_graphic() => return false,
            _ => i += 1,
        }
    }
    true
}
