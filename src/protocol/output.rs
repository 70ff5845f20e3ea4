use serde::Serialize;
use serde_json::{Map, Value};

/// The response written to stdout as a single JSON line.
#[derive(Debug, Serialize, PartialEq)]
pub struct HookResponse {
    pub success: bool,
    pub message: String,
    pub data: Map<String, Value>,
}

impl HookResponse {
    pub fn success(message: impl Into<String>, data: Map<String, Value>) -> Self {
        HookResponse {
            success: true,
            message: message.into(),
            data,
        }
    }

    /// Failure response. An empty message is replaced so a failure always
    /// carries a diagnostic.
    pub fn failure(message: impl Into<String>, data: Map<String, Value>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = "Hook failed without a diagnostic".to_string();
        }
        HookResponse {
            success: false,
            message,
            data,
        }
    }

    /// Process exit code for this response: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.success {
            0
        } else {
            1
        }
    }
}
