//! Config document abstraction layer.
//!
//! `ConfigDocument` wraps the `kdl` crate so the rest of the config module
//! only sees JSON-shaped option maps.

use serde_json::{Map, Number, Value};

use super::ConfigError;

/// Parsed KDL defaults document paired with its source text.
pub(super) struct ConfigDocument {
    doc: kdl::KdlDocument,
    source: String,
}

impl ConfigDocument {
    /// Parse a KDL source string into a document.
    pub(super) fn parse(source: &str) -> Result<Self, ConfigError> {
        let doc: kdl::KdlDocument = source
            .parse()
            .map_err(|e: kdl::KdlError| ConfigError::ParseError(e.to_string()))?;
        Ok(Self {
            doc,
            source: source.to_string(),
        })
    }

    /// Load and parse a KDL defaults file.
    pub(super) fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::ReadError(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Flatten the `name { … }` section into an option map.
    ///
    /// Each child node `key value…` becomes one entry: a single argument is a
    /// scalar, several arguments form an array. Returns an empty map when the
    /// section is absent.
    pub(super) fn section(&self, name: &str) -> Result<Map<String, Value>, ConfigError> {
        let mut options = Map::new();
        let Some(children) = self.doc.get(name).and_then(|n| n.children()) else {
            return Ok(options);
        };

        for node in children.nodes() {
            let key = node.name().value();
            let line = self.line_of(node);
            if node.children().is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "line {line}: '{key}' in '{name}' cannot have a children block"
                )));
            }

            let mut values = Vec::new();
            for entry in node.entries() {
                if entry.name().is_some() {
                    return Err(ConfigError::ValidationError(format!(
                        "line {line}: '{key}' in '{name}' takes arguments, not properties"
                    )));
                }
                values.push(convert_value(entry.value()).ok_or_else(|| {
                    ConfigError::ValidationError(format!(
                        "line {line}: '{key}' in '{name}' has an unsupported value"
                    ))
                })?);
            }

            let value = match values.len() {
                0 => {
                    return Err(ConfigError::ValidationError(format!(
                        "line {line}: '{key}' in '{name}' needs a value"
                    )))
                }
                1 => values.remove(0),
                _ => Value::Array(values),
            };
            options.insert(key.to_string(), value);
        }
        Ok(options)
    }

    /// 1-based line number of a node in the original source.
    fn line_of(&self, node: &kdl::KdlNode) -> usize {
        let offset = node.span().offset();
        self.source[..offset.min(self.source.len())]
            .bytes()
            .filter(|&b| b == b'\n')
            .count()
            + 1
    }
}

fn convert_value(value: &kdl::KdlValue) -> Option<Value> {
    if let Some(s) = value.as_string() {
        Some(Value::String(s.to_string()))
    } else if let Some(b) = value.as_bool() {
        Some(Value::Bool(b))
    } else if let Some(i) = value.as_integer() {
        i64::try_from(i).ok().map(Value::from)
    } else if let Some(f) = value.as_float() {
        Number::from_f64(f).map(Value::Number)
    } else if value.is_null() {
        Some(Value::Null)
    } else {
        None
    }
}
