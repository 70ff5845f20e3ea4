use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::HookError;

/// The request received from the release tool on stdin.
///
/// Only `project_root` is required by every hook; the tagger additionally
/// requires `version`. Other host fields (`previous_version`, `bump_type`,
/// `metadata`, `module_dir`, `module_name`) are not read by any hook and are
/// ignored like any unknown field, whatever their JSON type.
#[derive(Debug, Default, Deserialize)]
pub struct HookRequest {
    #[serde(default)]
    pub hook: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub prerelease: Option<String>,
    #[serde(default)]
    pub project_root: Option<String>,
    #[serde(default)]
    pub config: Option<Map<String, Value>>,
}

impl HookRequest {
    /// Parse a request from raw stdin text.
    pub fn parse(raw: &str) -> Result<Self, HookError> {
        serde_json::from_str(raw)
            .map_err(|e| HookError::request(format!("Invalid JSON input: {e}")))
    }

    /// The project root, or a request error naming the field.
    pub fn require_project_root(&self) -> Result<&Path, HookError> {
        require(&self.project_root, "project_root").map(Path::new)
    }

    /// The version being released, or a request error naming the field.
    pub fn require_version(&self) -> Result<&str, HookError> {
        require(&self.version, "version")
    }

    /// Prerelease identifier, treating an empty string as absent.
    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref().filter(|p| !p.is_empty())
    }
}

/// A present-but-empty string counts as missing.
fn require<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, HookError> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(HookError::request(format!("Missing required field: {name}"))),
    }
}
