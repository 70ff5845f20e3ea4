use std::sync::LazyLock;

use regex::Regex;

static SCOPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]+)\(([a-z0-9\-]+)\):\s+.+$").expect("scoped commit pattern is valid")
});

static SCOPE_OPTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]+)(?:\(([a-z0-9\-]+)\))?:\s+.+$")
        .expect("conventional commit pattern is valid")
});

/// Why a commit subject was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("must match format 'type(scope): description'")]
    ScopedShape,
    #[error("must match format 'type: description' or 'type(scope): description'")]
    Shape,
    #[error("type '{commit_type}' not in allowed types: {}", .allowed.join(", "))]
    TypeNotAllowed {
        commit_type: String,
        allowed: Vec<String>,
    },
}

/// The tokens extracted from a well-shaped subject, lower-cased.
#[derive(Debug, PartialEq, Eq)]
pub struct ConventionalCommit {
    pub commit_type: String,
    pub(crate) scope: Option<String>,
}

/// Match a subject against `type(scope): description` (or, when the scope is
/// optional, `type: description`). Matching is case-insensitive.
pub fn parse(subject: &str, require_scope: bool) -> Result<ConventionalCommit, CommitError> {
    let lowered = subject.to_lowercase();
    let (pattern, shape_error) = if require_scope {
        (&*SCOPED, CommitError::ScopedShape)
    } else {
        (&*SCOPE_OPTIONAL, CommitError::Shape)
    };

    let captures = pattern.captures(&lowered).ok_or(shape_error)?;
    Ok(ConventionalCommit {
        commit_type: captures[1].to_string(),
        scope: captures.get(2).map(|m| m.as_str().to_string()),
    })
}

/// Validate one subject. The type check only runs once the shape matched, and
/// an empty `allowed_types` accepts any type.
pub fn validate(
    subject: &str,
    allowed_types: &[String],
    require_scope: bool,
) -> Result<ConventionalCommit, CommitError> {
    let commit = parse(subject, require_scope)?;
    if !allowed_types.is_empty() && !allowed_types.iter().any(|t| *t == commit.commit_type) {
        return Err(CommitError::TypeNotAllowed {
            commit_type: commit.commit_type,
            allowed: allowed_types.to_vec(),
        });
    }
    Ok(commit)
}
