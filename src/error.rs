use serde_json::{Map, Value};

use crate::protocol::HookResponse;

/// Broad classification of a hook failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input or missing required fields, detected before any workflow runs.
    Request,
    /// The git binary failed; the message embeds its stderr verbatim.
    Collaborator,
    /// Expected domain failure: invalid commits, existing tag, policy violation.
    Validation,
    /// Anything else, caught at the adapter boundary.
    Unexpected,
}

/// Failure of a single hook invocation.
///
/// Every variant renders to the same external shape through
/// [`HookError::into_response`]: `success=false` plus the display text.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("{0}")]
    Request(String),
    #[error("{0}")]
    Collaborator(String),
    #[error("{message}")]
    Validation {
        message: String,
        data: Map<String, Value>,
    },
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl HookError {
    pub fn request(msg: impl Into<String>) -> Self {
        HookError::Request(msg.into())
    }

    pub fn collaborator(msg: impl Into<String>) -> Self {
        HookError::Collaborator(msg.into())
    }

    /// Validation failure without auxiliary data.
    pub fn validation(msg: impl Into<String>) -> Self {
        HookError::Validation {
            message: msg.into(),
            data: Map::new(),
        }
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        HookError::Unexpected(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HookError::Request(_) => ErrorKind::Request,
            HookError::Collaborator(_) => ErrorKind::Collaborator,
            HookError::Validation { .. } => ErrorKind::Validation,
            HookError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Convert into the failure response sent back to the host.
    pub fn into_response(self) -> HookResponse {
        let message = self.to_string();
        let data = match self {
            HookError::Validation { data, .. } => data,
            _ => Map::new(),
        };
        HookResponse::failure(message, data)
    }
}
