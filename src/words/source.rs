//! Load strategies for word data.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{WordLoadMode, WordsConfig};
use crate::words::{Dictionary, Multiplexer, WordList, WordsError};

/// Produces the word lists a lookup runs against.
///
/// Implementations are called from blocking context and may touch the disk.
pub trait WordSource: Send + Sync {
    fn load(&self) -> Result<Multiplexer, WordsError>;
}

/// Reads every configured file on each call.
#[derive(Debug, Clone)]
pub struct FileWords {
    paths: Vec<PathBuf>,
}

impl FileWords {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl WordSource for FileWords {
    fn load(&self) -> Result<Multiplexer, WordsError> {
        let lists = self
            .paths
            .iter()
            .map(|path| Dictionary::load(path).map(|d| Arc::new(d) as Arc<dyn WordList>))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Multiplexer::new(lists))
    }
}

/// Word lists loaded once and shared process-wide.
#[derive(Debug, Clone)]
pub struct CachedWords {
    words: Multiplexer,
}

impl CachedWords {
    pub fn new(words: Multiplexer) -> Self {
        Self { words }
    }

    /// Load now from `source`, failing if any list is unreadable.
    pub fn preload(source: &dyn WordSource) -> Result<Self, WordsError> {
        source.load().map(Self::new)
    }
}

impl WordSource for CachedWords {
    fn load(&self) -> Result<Multiplexer, WordsError> {
        Ok(self.words.clone())
    }
}

/// Build the source selected by the words config.
pub fn source_from_config(config: &WordsConfig) -> Result<Arc<dyn WordSource>, WordsError> {
    let files = FileWords::new(config.paths.clone());
    match config.mode {
        WordLoadMode::PerRequest => Ok(Arc::new(files)),
        WordLoadMode::Cached => {
            let cached = CachedWords::preload(&files)?;
            tracing::info!(lists = cached.words.len(), "Word lists cached");
            Ok(Arc::new(cached))
        }
    }
}
