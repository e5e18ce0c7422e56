//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → cli.rs (flag / environment overrides)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//! ```
//!
//! Config is read once at startup. Only templates are hot-reloaded; see
//! [`crate::templates`].

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{load_config, ConfigError};
pub use schema::{
    DownloadConfig, DownloadSource, ExifConfig, ListenerConfig, ObservabilityConfig,
    ServerConfig, ShutdownConfig, TemplateConfig, WordLoadMode, WordsConfig,
};
pub use validation::{validate_config, ValidationError};
