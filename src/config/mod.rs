mod document;
mod options;

pub use options::HookOptions;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::HookError;
use document::ConfigDocument;

/// Errors that can occur when loading or parsing a defaults file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("invalid KDL syntax: {0}")]
    ParseError(String),
    #[error("invalid config: {0}")]
    ValidationError(String),
}

/// Typed settings for one hook, read from its merged options.
///
/// Each hook implements this to name its defaults-file section and pull its
/// recognized keys out of [`HookOptions`], applying built-in defaults.
pub trait HookSettings: Sized {
    /// KDL section name (e.g. `"git-tagger"`).
    const SECTION: &'static str;

    fn from_options(options: &HookOptions) -> Result<Self, HookError>;
}

/// Defaults loaded from a KDL file, keyed by hook section.
#[derive(Debug, Default)]
pub struct Defaults {
    sections: HashMap<String, Map<String, Value>>,
}

impl Defaults {
    /// Load defaults for the given sections from a KDL file.
    pub fn load(path: &Path, sections: &[&str]) -> Result<Self, ConfigError> {
        Self::from_document(&ConfigDocument::load(path)?, sections)
    }

    /// Parse defaults for the given sections from a KDL string.
    pub fn parse(content: &str, sections: &[&str]) -> Result<Self, ConfigError> {
        Self::from_document(&ConfigDocument::parse(content)?, sections)
    }

    fn from_document(doc: &ConfigDocument, sections: &[&str]) -> Result<Self, ConfigError> {
        let mut loaded = HashMap::new();
        for name in sections {
            loaded.insert(name.to_string(), doc.section(name)?);
        }
        Ok(Defaults { sections: loaded })
    }

    /// Merge request config over this file's section. Request keys win.
    pub fn merge(&self, section: &str, request: Option<&Map<String, Value>>) -> HookOptions {
        let mut merged = self.sections.get(section).cloned().unwrap_or_default();
        if let Some(request) = request {
            for (key, value) in request {
                merged.insert(key.clone(), value.clone());
            }
        }
        HookOptions::new(merged)
    }
}
