//! Git collaborator boundary.
//!
//! Hooks depend on the [`Git`] trait rather than on process spawning so the
//! workflows can be exercised against [`fake::FakeGit`] in unit tests.

mod command;
#[cfg(test)]
pub(crate) mod fake;

pub use command::GitCommand;

use std::path::Path;

/// Failure of a single git invocation.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// Nonzero exit; carries trimmed stderr.
    #[error("{0}")]
    Failed(String),
    /// The binary could not be started in the working directory.
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Runs one git subcommand in a working directory.
///
/// Zero exit yields trimmed stdout; nonzero exit yields [`GitError::Failed`]
/// with trimmed stderr. Implementations never retry.
pub trait Git {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<String, GitError>;
}
