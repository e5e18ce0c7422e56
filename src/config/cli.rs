//! Command-line flags layered over the config file.
//!
//! Every flag can also be supplied through the environment, which is how the
//! container images configure the service.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::{ServerConfig, WordLoadMode};
use crate::config::validation::validate_config;

#[derive(Debug, Parser)]
#[command(name = "wordgame-web")]
#[command(about = "Anagram and pattern-match lookup server", long_about = None)]
pub struct Cli {
    /// Optional TOML config file; flags below override its values.
    #[arg(short, long, env = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Word list file(s). More than one enables multiplexed lookups.
    #[arg(long = "word-list", env = "WORD_LIST", value_delimiter = ',')]
    pub word_lists: Vec<PathBuf>,

    /// Directory containing index.html, main.css and main.js.
    #[arg(long, env = "TEMPLATE_DIR")]
    pub template_dir: Option<PathBuf>,

    /// Directory served under /static.
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Listen address.
    #[arg(long, env = "BIND_ADDRESS")]
    pub bind: Option<String>,

    /// Word list load strategy: cached or per-request.
    #[arg(long, env = "WORD_MODE")]
    pub word_mode: Option<WordLoadMode>,

    /// Image-metadata service receiving /exifUpload bodies.
    #[arg(long, env = "EXIF_ENDPOINT")]
    pub exif_endpoint: Option<String>,

    /// Fetch the configured download sources and exit.
    #[arg(long, env = "DOWNLOAD")]
    pub download: bool,
}

impl Cli {
    /// Resolve the final configuration: file (or defaults), then flag overrides.
    pub fn resolve(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };

        if !self.word_lists.is_empty() {
            config.words.paths = self.word_lists.clone();
        }
        if let Some(dir) = &self.template_dir {
            config.templates.dir = dir.clone();
        }
        if let Some(dir) = &self.static_dir {
            config.templates.static_dir = dir.clone();
        }
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(mode) = self.word_mode {
            config.words.mode = mode;
        }
        if let Some(endpoint) = &self.exif_endpoint {
            config.exif.endpoint = Some(endpoint.clone());
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "wordgame-web",
            "--word-list",
            "/w/one.txt,/w/two.txt",
            "--template-dir",
            "/t",
            "--bind",
            "127.0.0.1:8181",
            "--word-mode",
            "cached",
        ])
        .unwrap();

        let config = cli.resolve().unwrap();
        assert_eq!(
            config.words.paths,
            vec![PathBuf::from("/w/one.txt"), PathBuf::from("/w/two.txt")]
        );
        assert_eq!(config.templates.dir, PathBuf::from("/t"));
        assert_eq!(config.listener.bind_address, "127.0.0.1:8181");
        assert_eq!(config.words.mode, WordLoadMode::Cached);
        assert!(!cli.download);
    }

    #[test]
    fn invalid_override_fails_validation() {
        let cli = Cli::try_parse_from(["wordgame-web", "--bind", "nowhere"]).unwrap();
        assert!(matches!(cli.resolve(), Err(ConfigError::Validation(_))));
    }
}
