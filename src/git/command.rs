use std::path::Path;
use std::process::Command;

use super::{Git, GitError};

/// [`Git`] implementation that spawns the `git` binary found on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: String,
}

impl GitCommand {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable instead of `git` from `PATH`.
    pub(crate) fn with_program(program: impl Into<String>) -> Self {
        GitCommand {
            program: program.into(),
        }
    }
}

impl Default for GitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Git for GitCommand {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<String, GitError> {
        tracing::debug!(cwd = %cwd.display(), "git {}", args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(status = ?output.status.code(), "git failed: {stderr}");
            Err(GitError::Failed(stderr))
        }
    }
}
