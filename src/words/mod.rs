//! Word data provider.
//!
//! # Data Flow
//! ```text
//! words.paths (one or more files)
//!     → dictionary.rs (load & index one list)
//!     → multiplex.rs (combine lists behind one query surface)
//!     → source.rs (cached at startup, or loaded per request)
//!     → lookup dispatcher
//! ```
//!
//! Word lists are read-only once loaded. The per-request source builds a
//! fresh set for each call, so requests never share mutable state.

pub mod dictionary;
pub mod multiplex;
pub mod source;

use std::path::PathBuf;

use thiserror::Error;

pub use dictionary::Dictionary;
pub use multiplex::{union, Combinator, Multiplexer};
pub use source::{source_from_config, CachedWords, FileWords, WordSource};

/// A queryable word list.
pub trait WordList: Send + Sync {
    /// Words that use exactly the letters of `input`.
    fn anagrams(&self, input: &str) -> Vec<String>;

    /// Words that fit `pattern` position by position.
    fn matches(&self, pattern: &str) -> Vec<String>;
}

/// Errors raised while loading word data.
#[derive(Debug, Error)]
pub enum WordsError {
    #[error("unable to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
