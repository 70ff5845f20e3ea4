use std::path::Path;

use crate::error::HookError;
use crate::git::{Git, GitError};

const SUBJECT_FORMAT: &str = "--pretty=format:%s";

/// Commit subjects since the nearest reachable tag, newest first.
///
/// Without a tag the whole history is returned. A repository whose HEAD is
/// unborn has no commits and yields an empty list.
pub fn commits_since_last_tag(git: &dyn Git, root: &Path) -> Result<Vec<String>, HookError> {
    // `--quiet` keeps stderr empty when HEAD is merely unborn.
    match git.run(&["rev-parse", "--verify", "--quiet", "HEAD"], root) {
        Ok(_) => {}
        Err(GitError::Failed(stderr)) if stderr.is_empty() => {
            tracing::debug!("HEAD is unborn; no commits to read");
            return Ok(Vec::new());
        }
        Err(e) => return Err(history_error(e)),
    }

    let marker = git
        .run(&["describe", "--tags", "--abbrev=0"], root)
        .ok()
        .filter(|tag| !tag.is_empty());

    let log = match &marker {
        Some(tag) => {
            tracing::debug!(tag = %tag, "reading commits since release marker");
            let range = format!("{tag}..HEAD");
            git.run(&["log", &range, SUBJECT_FORMAT], root)
        }
        None => {
            tracing::debug!("no release marker; reading full history");
            git.run(&["log", SUBJECT_FORMAT], root)
        }
    }
    .map_err(history_error)?;

    Ok(split_subjects(&log))
}

fn history_error(err: GitError) -> HookError {
    HookError::collaborator(format!("Failed to retrieve commit history: {err}"))
}

fn split_subjects(log: &str) -> Vec<String> {
    log.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
