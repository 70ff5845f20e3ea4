use serde_json::{Map, Value};

use crate::error::HookError;

/// Merged option map for one invocation with typed accessors.
///
/// Scalar accessors return the built-in default when a key is absent or
/// `null`, and a request error when the value has the wrong JSON type.
#[derive(Debug, Default, Clone)]
pub struct HookOptions {
    values: Map<String, Value>,
}

impl HookOptions {
    pub fn new(values: Map<String, Value>) -> Self {
        HookOptions { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    pub fn boolean(&self, key: &str, default: bool) -> Result<bool, HookError> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => v.as_bool().ok_or_else(|| invalid(key, "a boolean")),
        }
    }

    pub fn string(&self, key: &str, default: &str) -> Result<String, HookError> {
        match self.get(key) {
            None => Ok(default.to_string()),
            Some(v) => v
                .as_str()
                .map(String::from)
                .ok_or_else(|| invalid(key, "a string")),
        }
    }

    /// Integer option; fractional numbers are truncated.
    pub fn integer(&self, key: &str, default: i64) -> Result<i64, HookError> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => v
                .as_i64()
                .or_else(|| v.as_f64().map(|f| f as i64))
                .ok_or_else(|| invalid(key, "a number")),
        }
    }

    /// List of strings in the order given. A lone string is a one-item list
    /// and an explicit `null` is an empty list; only a missing key is `None`.
    pub fn string_list(&self, key: &str) -> Result<Option<Vec<String>>, HookError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(Value::Null) => Ok(Some(Vec::new())),
            Some(Value::String(s)) => Ok(Some(vec![s.clone()])),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(String::from)
                        .ok_or_else(|| invalid(key, "a list of strings"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(_) => Err(invalid(key, "a list of strings")),
        }
    }
}

fn invalid(key: &str, expected: &str) -> HookError {
    HookError::request(format!(
        "Invalid config value for '{key}': expected {expected}"
    ))
}
