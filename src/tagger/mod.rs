//! Tag lifecycle: derive the tag, refuse duplicates, create, optionally push.

mod spec;

pub use spec::{TagSpec, TaggerConfig};

use std::path::Path;

use serde_json::Map;

use crate::config::{HookOptions, HookSettings};
use crate::error::HookError;
use crate::git::Git;
use crate::protocol::{HookRequest, HookResponse};

/// Remote that tags are pushed to.
pub const REMOTE: &str = "origin";

/// Create the tag described by `spec` in the repository at `root`.
///
/// Never overwrites: an existing tag with the same name fails before any
/// mutation. A push failure after creation leaves the local tag in place and
/// is reported as "Tag created but failed to push".
pub fn create_tag(spec: &TagSpec, git: &dyn Git, root: &Path) -> Result<String, HookError> {
    if tag_exists(&spec.name, git, root)? {
        return Err(HookError::validation(format!(
            "Tag {} already exists",
            spec.name
        )));
    }

    let args = spec.create_args();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    git.run(&args, root)
        .map_err(|e| HookError::collaborator(format!("Failed to create tag: {e}")))?;
    tracing::debug!(
        tag = %spec.name,
        annotated = spec.annotated,
        signed = spec.signed,
        "created tag"
    );

    if !spec.push {
        return Ok(format!("Created tag {}", spec.name));
    }

    let refspec = format!("refs/tags/{}", spec.name);
    if let Err(e) = git.run(&["push", REMOTE, &refspec], root) {
        tracing::warn!(tag = %spec.name, "tag created locally but push failed");
        return Err(HookError::collaborator(format!(
            "Tag created but failed to push: {e}"
        )));
    }
    Ok(format!("Created and pushed tag {}", spec.name))
}

/// Exact-name existence check; `tag --list` treats its argument as a glob.
fn tag_exists(name: &str, git: &dyn Git, root: &Path) -> Result<bool, HookError> {
    let listed = git
        .run(&["tag", "--list", name], root)
        .map_err(|e| HookError::collaborator(format!("Failed to check existing tags: {e}")))?;
    Ok(listed.lines().any(|line| line.trim() == name))
}

/// Run the git-tagger hook.
pub fn run(
    request: &HookRequest,
    options: &HookOptions,
    git: &dyn Git,
) -> Result<HookResponse, HookError> {
    let version = request.require_version()?;
    let root = request.require_project_root()?;
    let config = TaggerConfig::from_options(options)?;
    let spec = TagSpec::derive(version, &config);

    let message = create_tag(&spec, git, root)?;
    Ok(HookResponse::success(message, Map::new()))
}
