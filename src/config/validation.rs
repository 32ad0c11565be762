//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0, bind address parses)
//! - Check the resource naming can produce a route table
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check `config` for semantic errors.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let resource = &config.resource;
    if resource.mount_point.trim().is_empty() {
        errors.push(ValidationError::new("resource.mount_point", "must not be empty"));
    } else if resource.mount_point.contains("//") {
        errors.push(ValidationError::new(
            "resource.mount_point",
            "must not contain empty segments",
        ));
    }
    for (field, name) in [
        ("resource.singular", &resource.singular),
        ("resource.plural", &resource.plural),
    ] {
        if name.is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        } else if name.contains('/') {
            errors.push(ValidationError::new(field, "must not contain '/'"));
        }
    }
    if !resource.singular.is_empty() && resource.singular == resource.plural {
        errors.push(ValidationError::new(
            "resource.plural",
            "must differ from resource.singular",
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::new("limits.max_body_size", "must be > 0"));
    }
    if config.limits.index_limit == 0 {
        errors.push(ValidationError::new("limits.index_limit", "must be > 0"));
    }
    if config.limits.search_limit == 0 {
        errors.push(ValidationError::new("limits.search_limit", "must be > 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.resource.mount_point = "".into();
        config.resource.plural = "a/b".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "resource.mount_point",
                "resource.plural",
                "timeouts.request_secs",
            ]
        );
    }

    #[test]
    fn test_same_singular_and_plural() {
        let mut config = AppConfig::default();
        config.resource.plural = config.resource.singular.clone();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "resource.plural");
    }
}
