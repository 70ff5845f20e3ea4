//! Conventional commit validation over the commits since the last release.

mod grammar;

pub use grammar::{parse, validate, CommitError, ConventionalCommit};

use serde::Serialize;
use serde_json::{json, Map};

use crate::config::{HookOptions, HookSettings};
use crate::error::HookError;
use crate::git::Git;
use crate::history;
use crate::protocol::{HookRequest, HookResponse};

/// Types accepted when `allowed_types` is not configured.
pub const DEFAULT_ALLOWED_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

/// Characters of each invalid subject shown in the failure message.
const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Allowed commit types in configured order; empty accepts any type.
    pub allowed_types: Vec<String>,
    pub require_scope: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
            require_scope: false,
        }
    }
}

impl HookSettings for ValidatorConfig {
    const SECTION: &'static str = "commit-validator";

    fn from_options(options: &HookOptions) -> Result<Self, HookError> {
        let defaults = ValidatorConfig::default();
        Ok(ValidatorConfig {
            allowed_types: options
                .string_list("allowed_types")?
                .unwrap_or(defaults.allowed_types),
            require_scope: options.boolean("require_scope", defaults.require_scope)?,
        })
    }
}

/// Validation outcome for one commit subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub message: String,
    #[serde(skip)]
    pub valid: bool,
    /// Empty when valid.
    pub error: String,
}

/// Validate every subject, one record per commit in input order.
pub fn validate_all(commits: &[String], config: &ValidatorConfig) -> Vec<CommitRecord> {
    commits
        .iter()
        .map(
            |commit| match validate(commit, &config.allowed_types, config.require_scope) {
                Ok(_) => CommitRecord {
                    message: commit.clone(),
                    valid: true,
                    error: String::new(),
                },
                Err(e) => CommitRecord {
                    message: commit.clone(),
                    valid: false,
                    error: e.to_string(),
                },
            },
        )
        .collect()
}

/// Run the commit-validator hook against the repository at `project_root`.
pub fn run(
    request: &HookRequest,
    options: &HookOptions,
    git: &dyn Git,
) -> Result<HookResponse, HookError> {
    let root = request.require_project_root()?;
    let config = ValidatorConfig::from_options(options)?;
    let commits = history::commits_since_last_tag(git, root)?;

    if commits.is_empty() {
        let mut data = Map::new();
        data.insert("commits_checked".into(), json!(0));
        return Ok(HookResponse::success("No commits to validate", data));
    }

    let records = validate_all(&commits, &config);
    let invalid: Vec<&CommitRecord> = records.iter().filter(|r| !r.valid).collect();
    tracing::debug!(
        checked = commits.len(),
        invalid = invalid.len(),
        "validated commits"
    );

    let mut data = Map::new();
    data.insert("commits_checked".into(), json!(commits.len()));
    data.insert("invalid_count".into(), json!(invalid.len()));

    if invalid.is_empty() {
        return Ok(HookResponse::success(
            format!(
                "All {} commit(s) follow conventional commit format",
                commits.len()
            ),
            data,
        ));
    }

    data.insert("invalid_commits".into(), json!(invalid));
    Err(HookError::Validation {
        message: failure_message(&invalid),
        data,
    })
}

fn failure_message(invalid: &[&CommitRecord]) -> String {
    let mut message = format!("Found {} invalid commit(s):", invalid.len());
    for record in invalid {
        let preview: String = record.message.chars().take(PREVIEW_CHARS).collect();
        message.push_str(&format!("\n  - {preview}... -> {}", record.error));
    }
    message
}
