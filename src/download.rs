//! Download mode: fetch auxiliary data files and exit.
//!
//! Each body is written to a sibling temp file first and renamed into place,
//! so a running server never reads a half-written word list.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{DownloadConfig, DownloadSource};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("unable to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fetch every configured source. Returns the number of files written.
pub async fn fetch_all(config: &DownloadConfig) -> Result<usize, DownloadError> {
    if config.sources.is_empty() {
        tracing::warn!("Download mode requested but no sources are configured");
        return Ok(0);
    }

    let client = reqwest::Client::new();
    for source in &config.sources {
        fetch_one(&client, source).await?;
    }
    Ok(config.sources.len())
}

async fn fetch_one(client: &reqwest::Client, source: &DownloadSource) -> Result<(), DownloadError> {
    let request_error = |e| DownloadError::Request {
        url: source.url.clone(),
        source: e,
    };

    let response = client.get(&source.url).send().await.map_err(request_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status {
            url: source.url.clone(),
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await.map_err(request_error)?;

    write_atomically(&source.destination, &body).await?;

    tracing::info!(
        url = %source.url,
        destination = ?source.destination,
        bytes = body.len(),
        "Downloaded"
    );
    Ok(())
}

async fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), DownloadError> {
    let write_error = |source| DownloadError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }

    let mut partial = path.as_os_str().to_owned();
    partial.push(".partial");
    let partial = PathBuf::from(partial);

    tokio::fs::write(&partial, contents).await.map_err(write_error)?;
    tokio::fs::rename(&partial, path).await.map_err(write_error)?;
    Ok(())
}
