//! Image-metadata collaborator.
//!
//! Uploads are forwarded as raw bytes; whatever the collaborator answers
//! (status and JSON body) is relayed to the client unchanged.

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;
use thiserror::Error;

use crate::config::ExifConfig;

/// Structured result relayed to the client verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ExifOutcome {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum ExifError {
    #[error("metadata service request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("metadata service returned invalid status {0}")]
    Status(u16),
}

/// Extracts metadata from an uploaded image.
#[async_trait]
pub trait ExifExtractor: Send + Sync {
    async fn extract(&self, image: Bytes) -> Result<ExifOutcome, ExifError>;
}

/// Forwards uploads to an HTTP metadata service.
#[derive(Debug, Clone)]
pub struct HttpExifExtractor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpExifExtractor {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, ExifError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Build from config; `None` when no endpoint is configured.
    pub fn from_config(config: &ExifConfig) -> Result<Option<Self>, ExifError> {
        config
            .endpoint
            .clone()
            .map(|endpoint| Self::new(endpoint, Duration::from_secs(config.timeout_secs)))
            .transpose()
    }
}

#[async_trait]
impl ExifExtractor for HttpExifExtractor {
    async fn extract(&self, image: Bytes) -> Result<ExifOutcome, ExifError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|_| ExifError::Status(response.status().as_u16()))?;
        let body = response.json::<serde_json::Value>().await?;

        Ok(ExifOutcome { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_endpoint_means_no_extractor() {
        let config = ExifConfig::default();
        assert!(HttpExifExtractor::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn endpoint_builds_extractor() {
        let config = ExifConfig {
            endpoint: Some("http://127.0.0.1:9/exif".into()),
            timeout_secs: 1,
        };
        assert!(HttpExifExtractor::from_config(&config).unwrap().is_some());
    }
}
