//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
