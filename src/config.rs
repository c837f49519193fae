//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// How strictly the onboarding wizard treats required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Validation errors are reported but never block advancing.
    #[default]
    Permissive,
    /// A step with invalid or missing required fields cannot be left forward.
    Strict,
}

impl std::str::FromStr for ValidationPolicy {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(ConfigError::InvalidValue {
                key: "DEALFLOW_VALIDATION".to_string(),
                message: format!("expected 'permissive' or 'strict', got '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permissive => write!(f, "permissive"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Onboarding validation policy.
    pub validation: ValidationPolicy,
    /// Simulated latency of the demo backend for uploads and analyses.
    pub demo_latency: Duration,
    /// Default tracing filter when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::default(),
            demo_latency: Duration::from_millis(300),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// - `DEALFLOW_VALIDATION`: `permissive` (default) or `strict`
    /// - `DEALFLOW_DEMO_LATENCY_MS`: demo backend latency (default 300)
    /// - `DEALFLOW_LOG`: default log filter (default `info`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let validation = match std::env::var("DEALFLOW_VALIDATION") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.validation,
        };

        let demo_latency = std::env::var("DEALFLOW_DEMO_LATENCY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.demo_latency);

        let log_filter = std::env::var("DEALFLOW_LOG").unwrap_or(defaults.log_filter);

        Ok(Self {
            validation,
            demo_latency,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_permissive() {
        let config = AppConfig::default();
        assert_eq!(config.validation, ValidationPolicy::Permissive);
        assert_eq!(config.demo_latency, Duration::from_millis(300));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn validation_policy_parses_case_insensitively() {
        assert_eq!(
            "STRICT".parse::<ValidationPolicy>().unwrap(),
            ValidationPolicy::Strict
        );
        assert_eq!(
            " permissive ".parse::<ValidationPolicy>().unwrap(),
            ValidationPolicy::Permissive
        );
    }

    #[test]
    fn unknown_validation_policy_is_rejected() {
        let err = "lenient".parse::<ValidationPolicy>().unwrap_err();
        assert!(err.to_string().contains("DEALFLOW_VALIDATION"));
        assert!(err.to_string().contains("lenient"));
    }

    #[test]
    fn display_matches_parse() {
        for policy in [ValidationPolicy::Permissive, ValidationPolicy::Strict] {
            let parsed: ValidationPolicy = policy.to_string().parse().unwrap();
            assert_eq!(parsed, policy);
        }
    }
}
