//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, request ID, access log, limits)
//! - Serve on a bound listener until the lifecycle says to drain

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    routing::{any, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::handlers::{self, AppState};
use crate::http::inflight::InFlight;
use crate::http::middleware::access_log_middleware;
use crate::http::request::{request_id_header, UuidRequestId};
use crate::lifecycle::shutdown::{wait_for, Lifecycle, ShutdownError};

/// HTTP server for the lookup service.
pub struct HttpServer {
    router: Router,
    inflight: InFlight,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: &ServerConfig, state: AppState) -> Self {
        let inflight = InFlight::new();
        let router = Self::build_router(config, state, inflight.clone());
        Self { router, inflight }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState, inflight: InFlight) -> Router {
        let static_dir = &config.templates.static_dir;

        Router::new()
            .route("/", any(handlers::index))
            .route("/css", get(handlers::stylesheet))
            .route("/js", get(handlers::script))
            .route("/anagram", get(handlers::anagram).post(handlers::anagram))
            .route("/match", get(handlers::pattern_match).post(handlers::pattern_match))
            .route("/exifUpload", post(handlers::exif_upload))
            .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.ico")))
            .nest_service("/static", ServeDir::new(static_dir))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(SetRequestIdLayer::new(request_id_header(), UuidRequestId))
                    .layer(PropagateRequestIdLayer::new(request_id_header()))
                    .layer(middleware::from_fn_with_state(inflight, access_log_middleware))
                    .layer(TimeoutLayer::with_status_code(
                        StatusCode::REQUEST_TIMEOUT,
                        Duration::from_secs(config.listener.request_timeout_secs),
                    ))
                    .layer(DefaultBodyLimit::max(config.listener.upload_limit_bytes)),
            )
    }

    /// The fully layered router, for driving requests without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn inflight(&self) -> InFlight {
        self.inflight.clone()
    }

    /// Serve on `listener` until `signal`, then drain under `lifecycle`'s deadline.
    pub async fn run<F>(
        self,
        listener: TcpListener,
        lifecycle: Lifecycle,
        signal: F,
    ) -> Result<(), ShutdownError>
    where
        F: Future<Output = ()>,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let stop = lifecycle.shutdown().subscribe();
        let inflight = self.inflight.clone();
        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        let server = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                wait_for(stop).await;
                tracing::info!(
                    in_flight = inflight.active(),
                    "Listener closed, waiting for in-flight requests"
                );
            })
            .into_future();

        lifecycle.drive(server, signal).await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
