//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the redirector.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::validation::ValidationError;
use crate::redirect::Rule;

/// Root configuration for the redirector.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedirectorConfig {
    /// Listener configuration (bind addresses, TLS).
    pub listener: ListenerConfig,

    /// Content served when no rule matches.
    pub site: SiteConfig,

    /// Redirect rules, evaluated in order.
    pub rules: Vec<RuleConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RedirectorConfig {
    /// Convert every rule entry into a [`Rule`], keeping their order.
    ///
    /// Rules with an unknown `from_scheme` are kept and logged at warn
    /// level; they never match.
    pub fn compile_rules(&self) -> Result<Vec<Rule>, Vec<ValidationError>> {
        let mut rules = Vec::with_capacity(self.rules.len());
        let mut errors = Vec::new();

        for (index, entry) in self.rules.iter().enumerate() {
            if !matches!(entry.from_scheme.as_str(), "" | "http" | "https") {
                tracing::warn!(
                    rule = index,
                    from_scheme = %entry.from_scheme,
                    "Unknown scheme, rule will never match"
                );
            }

            match entry.to_rule(index) {
                Ok(rule) => rules.push(rule),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(rules)
        } else {
            Err(errors)
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Plain HTTP bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional HTTPS listener.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the HTTPS listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// HTTPS bind address.
    #[serde(default = "default_tls_bind_address")]
    pub bind_address: String,

    /// Path to certificate file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

fn default_tls_bind_address() -> String {
    "0.0.0.0:8443".to_string()
}

/// The next handler behind the redirect rules.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory served for requests no rule matches. Without it those get 404.
    pub root: Option<PathBuf>,
}

/// A redirect rule as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RuleConfig {
    /// "http", "https", or empty for any scheme.
    #[serde(default)]
    pub from_scheme: String,

    /// Path prefix to match.
    #[serde(default = "default_from_path", alias = "from")]
    pub from_path: String,

    /// Target template.
    pub to: String,

    /// Status code for header redirects (default: 301).
    #[serde(default = "default_code")]
    pub code: u16,

    /// Emit a meta-refresh page instead of a header redirect.
    #[serde(default)]
    pub meta: bool,
}

fn default_from_path() -> String {
    "/".to_string()
}

fn default_code() -> u16 {
    301
}

impl RuleConfig {
    /// Convert into a runtime [`Rule`]. `index` is the position used in errors.
    pub fn to_rule(&self, index: usize) -> Result<Rule, ValidationError> {
        let code = if self.meta {
            StatusCode::OK
        } else {
            StatusCode::from_u16(self.code)
                .map_err(|_| ValidationError::InvalidCode { index, code: self.code })?
        };

        Ok(Rule {
            from_scheme: self.from_scheme.clone(),
            from_path: self.from_path.clone(),
            to: self.to.clone(),
            code,
            meta: self.meta,
        })
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("pretty" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_defaults() {
        let config: RedirectorConfig = toml::from_str(
            r#"
            [[rules]]
            to = "https://example.com{uri}"
            "#,
        )
        .unwrap();

        let rule = &config.rules[0];
        assert_eq!(rule.from_scheme, "");
        assert_eq!(rule.from_path, "/");
        assert_eq!(rule.code, 301);
        assert!(!rule.meta);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.listener.tls.is_none());
    }

    #[test]
    fn test_from_alias() {
        let config: RedirectorConfig = toml::from_str(
            r#"
            [[rules]]
            from = "/old"
            to = "/new"
            code = 308
            "#,
        )
        .unwrap();
        assert_eq!(config.rules[0].from_path, "/old");
    }

    #[test]
    fn test_compile_rules_keeps_order() {
        let config: RedirectorConfig = toml::from_str(
            r#"
            [[rules]]
            from_scheme = "http"
            from_path = "/scheme"
            to = "https://localhost/scheme"

            [[rules]]
            from_path = "/whatever"
            to = "/something"
            meta = true
            "#,
        )
        .unwrap();

        let rules = config.compile_rules().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].from_scheme, "http");
        assert_eq!(rules[0].code, StatusCode::MOVED_PERMANENTLY);
        assert!(rules[1].meta);
    }

    #[test]
    fn test_compile_rules_rejects_out_of_range_code() {
        let config = RedirectorConfig {
            rules: vec![RuleConfig {
                from_scheme: String::new(),
                from_path: "/".into(),
                to: "/x".into(),
                code: 1000,
                meta: false,
            }],
            ..Default::default()
        };

        let errors = config.compile_rules().unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidCode { index: 0, code: 1000 }));
    }

    #[test]
    fn test_compile_rules_warns_on_unknown_scheme() {
        use crate::observability::logging::capture_logs;

        let config: RedirectorConfig = toml::from_str(
            r#"
            [[rules]]
            from_scheme = "ftp"
            from_path = "/files"
            to = "/downloads"

            [[rules]]
            from_scheme = "https"
            to = "/secure"
            "#,
        )
        .unwrap();

        let (rules, logs) = capture_logs(|| config.compile_rules());
        assert_eq!(rules.unwrap().len(), 2);
        assert!(logs.contains("WARN"), "missing warning: {logs}");
        assert!(logs.contains("Unknown scheme, rule will never match"), "missing warning: {logs}");
        assert!(logs.contains("from_scheme=ftp"), "missing field: {logs}");
        assert_eq!(logs.matches("Unknown scheme").count(), 1);
    }
}
