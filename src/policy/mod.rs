//! Version policy checks run before a bump is accepted.

use std::path::Path;

use serde_json::Map;

use crate::config::{HookOptions, HookSettings};
use crate::error::HookError;
use crate::git::Git;
use crate::protocol::{HookRequest, HookResponse};

const MAIN_BRANCHES: &[&str] = &["main", "master"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRules {
    pub no_prerelease_on_main: bool,
    pub require_clean_workdir: bool,
    /// Zero or negative disables the check.
    pub max_prerelease_iterations: i64,
    pub require_even_minor_for_stable: bool,
}

impl Default for PolicyRules {
    fn default() -> Self {
        PolicyRules {
            no_prerelease_on_main: false,
            require_clean_workdir: false,
            max_prerelease_iterations: 10,
            require_even_minor_for_stable: false,
        }
    }
}

impl HookSettings for PolicyRules {
    const SECTION: &'static str = "version-policy";

    fn from_options(options: &HookOptions) -> Result<Self, HookError> {
        let d = PolicyRules::default();
        Ok(PolicyRules {
            no_prerelease_on_main: options
                .boolean("no_prerelease_on_main", d.no_prerelease_on_main)?,
            require_clean_workdir: options
                .boolean("require_clean_workdir", d.require_clean_workdir)?,
            max_prerelease_iterations: options
                .integer("max_prerelease_iterations", d.max_prerelease_iterations)?,
            require_even_minor_for_stable: options.boolean(
                "require_even_minor_for_stable",
                d.require_even_minor_for_stable,
            )?,
        })
    }
}

/// Run the version-policy hook. The first violated rule fails the hook.
pub fn run(
    request: &HookRequest,
    options: &HookOptions,
    git: &dyn Git,
) -> Result<HookResponse, HookError> {
    let root = request.require_project_root()?;
    let rules = PolicyRules::from_options(options)?;
    let prerelease = request.prerelease();
    let version = request.version.as_deref().unwrap_or_default();

    check_prerelease_branch(&rules, prerelease, git, root)?;
    check_clean_workdir(&rules, git, root)?;
    check_prerelease_iterations(&rules, prerelease)?;
    check_even_minor(&rules, prerelease, version)?;

    Ok(HookResponse::success("All version policies passed", Map::new()))
}

fn check_prerelease_branch(
    rules: &PolicyRules,
    prerelease: Option<&str>,
    git: &dyn Git,
    root: &Path,
) -> Result<(), HookError> {
    if !rules.no_prerelease_on_main || prerelease.is_none() {
        return Ok(());
    }
    let branch = git
        .run(&["rev-parse", "--abbrev-ref", "HEAD"], root)
        .map_err(|e| HookError::collaborator(format!("failed to get current branch: {e}")))?;
    if MAIN_BRANCHES.contains(&branch.as_str()) {
        return Err(HookError::validation(format!(
            "policy violation: prerelease versions are not allowed on main/master branch (current branch: {branch})"
        )));
    }
    Ok(())
}

fn check_clean_workdir(rules: &PolicyRules, git: &dyn Git, root: &Path) -> Result<(), HookError> {
    if !rules.require_clean_workdir {
        return Ok(());
    }
    let status = git.run(&["status", "--porcelain"], root).map_err(|e| {
        HookError::collaborator(format!("failed to check git working directory: {e}"))
    })?;
    if !status.is_empty() {
        return Err(HookError::validation(
            "policy violation: working directory must be clean (no uncommitted changes)",
        ));
    }
    Ok(())
}

fn check_prerelease_iterations(
    rules: &PolicyRules,
    prerelease: Option<&str>,
) -> Result<(), HookError> {
    let Some(prerelease) = prerelease else {
        return Ok(());
    };
    if rules.max_prerelease_iterations <= 0 {
        return Ok(());
    }
    let iteration = prerelease_iteration(prerelease);
    if iteration > rules.max_prerelease_iterations {
        return Err(HookError::validation(format!(
            "policy violation: prerelease iteration {iteration} exceeds maximum allowed ({})",
            rules.max_prerelease_iterations
        )));
    }
    Ok(())
}

fn check_even_minor(
    rules: &PolicyRules,
    prerelease: Option<&str>,
    version: &str,
) -> Result<(), HookError> {
    if !rules.require_even_minor_for_stable || prerelease.is_some() {
        return Ok(());
    }
    let minor = minor_version(version);
    if minor % 2 != 0 {
        return Err(HookError::validation(format!(
            "policy violation: stable releases must have even minor version (got {version} with minor version {minor})"
        )));
    }
    Ok(())
}

/// Last numeric dot-component of a prerelease identifier: `rc.5` is 5.
fn prerelease_iteration(prerelease: &str) -> i64 {
    prerelease
        .split('.')
        .rev()
        .find_map(|part| part.parse::<i64>().ok())
        .unwrap_or(0)
}

/// Minor component of `major.minor.patch[-pre]`, 0 when absent.
fn minor_version(version: &str) -> i64 {
    let core = version.split('-').next().unwrap_or_default();
    core.split('.')
        .nth(1)
        .and_then(|minor| minor.parse().ok())
        .unwrap_or(0)
}
