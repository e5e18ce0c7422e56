//! Parsed template bundle.

use std::fs;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

pub const INDEX: &str = "index.html";
pub const STYLESHEET: &str = "main.css";
pub const SCRIPT: &str = "main.js";

/// The files every template set is built from.
pub const TEMPLATE_FILES: [&str; 3] = [STYLESHEET, INDEX, SCRIPT];

/// Errors raised while parsing or rendering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unable to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse template {name}: {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("unable to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// An immutable, fully parsed set of templates.
///
/// Built all-or-nothing: if any file fails to read or parse, no set is
/// produced. Never modified after construction.
#[derive(Debug)]
pub struct TemplateSet {
    registry: Handlebars<'static>,
}

impl TemplateSet {
    /// Parse the fixed template files from `dir`.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let mut sources = Vec::with_capacity(TEMPLATE_FILES.len());
        for name in TEMPLATE_FILES {
            let path = dir.join(name);
            let source = fs::read_to_string(&path)
                .map_err(|source| TemplateError::Io { path, source })?;
            sources.push((name, source));
        }
        Self::from_sources(sources)
    }

    /// Parse in-memory sources keyed by template name.
    pub fn from_sources<I, S>(sources: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (&'static str, S)>,
        S: AsRef<str>,
    {
        let mut registry = Handlebars::new();
        for (name, source) in sources {
            registry
                .register_template_string(name, source)
                .map_err(|e| TemplateError::Parse {
                    name,
                    source: Box::new(e),
                })?;
        }
        Ok(Self { registry })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, TemplateError> {
        self.registry
            .render(name, data)
            .map_err(|e| TemplateError::Render {
                name: name.to_string(),
                source: Box::new(e),
            })
    }
}
