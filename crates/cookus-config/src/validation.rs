// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::error::ConfigError;
use crate::model::CookusConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects all violations instead of failing fast.
pub fn validate_config(config: &CookusConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if !config.api.prefix.is_empty() && !config.api.prefix.starts_with('/') {
        errors.push(ConfigError::Validation {
            message: format!("api.prefix `{}` must start with `/`", config.api.prefix),
        });
    }

    if config.api.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.notifications.poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "notifications.poll_interval_secs must be at least 1".to_string(),
        });
    }

    if config.notifications.reconnect_max_backoff_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "notifications.reconnect_max_backoff_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    #[test]
    fn default_config_is_valid() {
        let config = CookusConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_scheme_and_zero_interval_are_both_reported() {
        let config = load_config_from_str(
            r#"
            [api]
            base_url = "ftp://cookus.example.com"

            [notifications]
            poll_interval_secs = 0
            "#,
        )
        .unwrap();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn prefix_must_be_rooted() {
        let config = load_config_from_str(
            r#"
            [api]
            prefix = "api"
            "#,
        )
        .unwrap();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("api.prefix"));
    }
}
