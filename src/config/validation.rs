//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and addresses.
//! Every problem is reported, not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid address for {field}: '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid URL for {field}: '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("listener.request_timeout_secs"));
    }
    if config.listener.upload_limit_bytes == 0 {
        errors.push(ValidationError::Zero("listener.upload_limit_bytes"));
    }

    if config.templates.dir.as_os_str().is_empty() {
        errors.push(ValidationError::Empty("templates.dir"));
    }

    if config.words.paths.is_empty() {
        errors.push(ValidationError::Empty("words.paths"));
    } else if config.words.paths.iter().any(|p| p.as_os_str().is_empty()) {
        errors.push(ValidationError::Empty("words.paths[]"));
    }

    if let Some(endpoint) = &config.exif.endpoint {
        if Url::parse(endpoint).is_err() {
            errors.push(ValidationError::InvalidUrl {
                field: "exif.endpoint",
                value: endpoint.clone(),
            });
        }
    }

    if config.shutdown.drain_timeout_secs == 0 {
        errors.push(ValidationError::Zero("shutdown.drain_timeout_secs"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    for source in &config.download.sources {
        if Url::parse(&source.url).is_err() {
            errors.push(ValidationError::InvalidUrl {
                field: "download.sources[].url",
                value: source.url.clone(),
            });
        }
        if source.destination.as_os_str().is_empty() {
            errors.push(ValidationError::Empty("download.sources[].destination"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
