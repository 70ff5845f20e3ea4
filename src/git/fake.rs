use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::Path;

use super::{Git, GitError};

/// In-memory stand-in for a repository, answering the subset of git
/// commands the hooks issue.
#[derive(Debug, Default)]
pub(crate) struct FakeGit {
    pub(crate) not_a_repo: bool,
    /// Commit subjects, newest first.
    pub(crate) history: Vec<String>,
    /// Nearest tag and the number of commits (from the front of `history`) after it.
    pub(crate) marker: Option<(String, usize)>,
    pub(crate) log_error: Option<String>,
    pub(crate) tags: RefCell<BTreeSet<String>>,
    pub(crate) list_error: Option<String>,
    pub(crate) tag_error: Option<String>,
    pub(crate) push_error: Option<String>,
    pub(crate) pushed: RefCell<Vec<String>>,
    pub(crate) branch: String,
    pub(crate) dirty: bool,
    pub(crate) calls: RefCell<Vec<Vec<String>>>,
}

impl FakeGit {
    pub(crate) fn new() -> Self {
        FakeGit {
            branch: "main".to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn with_history(subjects: &[&str]) -> Self {
        FakeGit {
            history: subjects.iter().map(|s| s.to_string()).collect(),
            ..Self::new()
        }
    }

    pub(crate) fn with_tag(self, name: &str) -> Self {
        self.tags.borrow_mut().insert(name.to_string());
        self
    }

    pub(crate) fn has_tag(&self, name: &str) -> bool {
        self.tags.borrow().contains(name)
    }

    /// Recorded invocations whose first argument is `subcommand`.
    pub(crate) fn calls_to(&self, subcommand: &str) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.first().map(String::as_str) == Some(subcommand))
            .cloned()
            .collect()
    }

    fn log(&self, args: &[&str]) -> Result<String, GitError> {
        if let Some(err) = &self.log_error {
            return Err(GitError::Failed(err.clone()));
        }
        let subjects = match (&self.marker, args.get(1)) {
            (Some((tag, after)), Some(range)) if *range == format!("{tag}..HEAD") => {
                &self.history[..*after]
            }
            _ => &self.history[..],
        };
        Ok(subjects.join("\n"))
    }

    fn tag(&self, args: &[&str]) -> Result<String, GitError> {
        if args.get(1) == Some(&"--list") {
            if let Some(err) = &self.list_error {
                return Err(GitError::Failed(err.clone()));
            }
            let name = args.get(2).copied().unwrap_or_default();
            return Ok(if self.has_tag(name) {
                name.to_string()
            } else {
                String::new()
            });
        }
        if let Some(err) = &self.tag_error {
            return Err(GitError::Failed(err.clone()));
        }
        let name = match args.get(1) {
            Some(&"-a") => args[2],
            Some(name) => *name,
            None => return Err(GitError::Failed("usage: git tag".into())),
        };
        if !self.tags.borrow_mut().insert(name.to_string()) {
            return Err(GitError::Failed(format!(
                "fatal: tag '{name}' already exists"
            )));
        }
        Ok(String::new())
    }
}

impl Git for FakeGit {
    fn run(&self, args: &[&str], _cwd: &Path) -> Result<String, GitError> {
        self.calls
            .borrow_mut()
            .push(args.iter().map(|a| a.to_string()).collect());

        if self.not_a_repo {
            return Err(GitError::Failed(
                "fatal: not a git repository (or any of the parent directories): .git".into(),
            ));
        }

        match args {
            ["rev-parse", "--is-inside-work-tree"] => Ok("true".into()),
            ["rev-parse", "--verify", "--quiet", "HEAD"] => {
                if self.history.is_empty() {
                    Err(GitError::Failed(String::new()))
                } else {
                    Ok("0000000000000000000000000000000000000000".into())
                }
            }
            ["rev-parse", "--abbrev-ref", "HEAD"] => Ok(self.branch.clone()),
            ["describe", "--tags", "--abbrev=0"] => match &self.marker {
                Some((tag, _)) => Ok(tag.clone()),
                None => Err(GitError::Failed(
                    "fatal: No names found, cannot describe anything.".into(),
                )),
            },
            ["log", ..] => self.log(args),
            ["tag", ..] => self.tag(args),
            ["push", "origin", refspec] => {
                if let Some(err) = &self.push_error {
                    return Err(GitError::Failed(err.clone()));
                }
                self.pushed.borrow_mut().push(refspec.to_string());
                Ok(String::new())
            }
            ["status", "--porcelain"] => Ok(if self.dirty {
                " M src/lib.rs".into()
            } else {
                String::new()
            }),
            _ => Err(GitError::Failed(format!(
                "fake git: unsupported command: {}",
                args.join(" ")
            ))),
        }
    }
}
