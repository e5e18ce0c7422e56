//! Startup orchestration.
//!
//! Ordered: words, templates, metadata client, template watcher, metrics,
//! listener. Any error before the listener is bound aborts startup; the
//! watcher alone may fail without stopping the service.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::exif::{ExifError, ExifExtractor, HttpExifExtractor};
use crate::http::{AppState, HttpServer};
use crate::lifecycle::shutdown::{Lifecycle, ShutdownError};
use crate::observability::metrics;
use crate::templates::{spawn_template_watch, TemplateError, TemplateSet, TemplateStore, WatchHandle};
use crate::words::{source_from_config, WordsError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("unable to load word lists: {0}")]
    Words(#[from] WordsError),

    #[error("unable to load templates: {0}")]
    Templates(#[from] TemplateError),

    #[error("unable to configure metadata client: {0}")]
    Exif(#[from] ExifError),

    #[error("unable to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// A started service: listener bound, templates loaded, watcher running.
pub struct Running {
    server: HttpServer,
    listener: TcpListener,
    lifecycle: Lifecycle,
    watch: Option<WatchHandle>,
}

/// Bring the service up to the point of accepting connections.
pub async fn start(config: ServerConfig) -> Result<Running, StartupError> {
    let lifecycle = Lifecycle::new(Duration::from_secs(config.shutdown.drain_timeout_secs));

    let words = source_from_config(&config.words)?;

    let templates = TemplateSet::load(&config.templates.dir)?;
    let store = TemplateStore::new(templates);
    tracing::info!(path = ?config.templates.dir, "Templates loaded");

    let exif = HttpExifExtractor::from_config(&config.exif)?
        .map(|extractor| Arc::new(extractor) as Arc<dyn ExifExtractor>);

    let watch = spawn_template_watch(
        &config.templates.dir,
        store.clone(),
        lifecycle.shutdown().subscribe(),
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let state = AppState {
        templates: store,
        words,
        exif,
    };
    let server = HttpServer::new(&config, state);

    Ok(Running {
        server,
        listener,
        lifecycle,
        watch,
    })
}

impl Running {
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    pub fn is_watching(&self) -> bool {
        self.watch.is_some()
    }

    /// Serve until `signal`, drain, and stop background tasks.
    pub async fn serve<F>(self, signal: F) -> Result<(), ShutdownError>
    where
        F: Future<Output = ()>,
    {
        let result = self
            .server
            .run(self.listener, self.lifecycle.clone(), signal)
            .await;

        self.lifecycle.shutdown().trigger();
        if let Some(watch) = self.watch {
            watch.stop().await;
        }
        result
    }
}
