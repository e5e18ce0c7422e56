//! Word-game lookup server library.
//!
//! Serves anagram and pattern-match lookups over one or more word lists,
//! renders hot-reloaded templates, and shuts down within a bounded drain.

pub mod config;
pub mod download;
pub mod exif;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod templates;
pub mod words;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::{Lifecycle, Shutdown};
