//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the word-game server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, limits).
    pub listener: ListenerConfig,

    /// Template and static asset locations.
    pub templates: TemplateConfig,

    /// Word list locations and load strategy.
    pub words: WordsConfig,

    /// Image-metadata collaborator used by `/exifUpload`.
    pub exif: ExifConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Sources fetched in download mode.
    pub download: DownloadConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body, uploads included.
    pub upload_limit_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
            upload_limit_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Template directory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory holding `index.html`, `main.css` and `main.js`. Watched for changes.
    pub dir: PathBuf,

    /// Directory served under `/static` and for `/favicon.ico`.
    pub static_dir: PathBuf,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/app/templates"),
            static_dir: PathBuf::from("/app/static"),
        }
    }
}

/// How word lists are loaded.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WordLoadMode {
    /// Load once at startup and share across all requests.
    Cached,
    /// Load from disk on every lookup request.
    #[default]
    PerRequest,
}

impl std::str::FromStr for WordLoadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cached" => Ok(Self::Cached),
            "per_request" | "per-request" => Ok(Self::PerRequest),
            other => Err(format!("unknown word load mode '{}'", other)),
        }
    }
}

/// Word list configuration.
///
/// More than one path selects the multiplexed variant: every lookup is run
/// against each list and the results are combined.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WordsConfig {
    /// Word list files, one word per line.
    pub paths: Vec<PathBuf>,

    /// Load strategy.
    pub mode: WordLoadMode,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from("/app/wordlist.txt")],
            mode: WordLoadMode::PerRequest,
        }
    }
}

/// Image-metadata collaborator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExifConfig {
    /// Endpoint that receives the raw upload bytes. Uploads fail when unset.
    pub endpoint: Option<String>,

    /// Timeout for the collaborator call in seconds.
    pub timeout_secs: u64,
}

impl Default for ExifConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

/// Graceful shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Hard ceiling on draining in-flight requests, in seconds.
    pub drain_timeout_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            drain_timeout_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Address the exporter listens on.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "wordgame_web=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Download mode configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DownloadConfig {
    pub sources: Vec<DownloadSource>,
}

/// A single file fetched in download mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadSource {
    /// Remote location.
    pub url: String,

    /// Local file the body is written to.
    pub destination: PathBuf,
}
