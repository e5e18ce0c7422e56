//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → middleware/access_log.rs (in-flight tracking, access log)
//!     → handlers.rs (templates, lookups, uploads, static files)
//!     → Send to client
//! ```

pub mod handlers;
pub mod inflight;
pub mod middleware;
pub mod request;
pub mod server;

pub use handlers::AppState;
pub use inflight::InFlight;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
