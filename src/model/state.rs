//! Application state snapshot model.

use crate::error::{DiffError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Scalar mode flags carried by a snapshot.
///
/// A fixed set of named fields compared by simple inequality in the
/// state differ; the field names in `ScalarFieldDiff` come from the
/// serde field names here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeFlags {
    /// Whether the editor accepts input.
    pub edit_enabled: bool,
    /// Whether presentation mode is active.
    pub presenting: bool,
    /// Active theme name.
    pub theme: String,
}

/// A snapshot of the application's in-memory model: selected entities,
/// the ordered step list, and scalar mode flags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    /// Selected entity identifiers.
    pub entities: Vec<String>,
    /// Ordered steps; opaque structured records.
    pub steps: Vec<Value>,
    /// Scalar mode flags.
    pub flags: ModeFlags,
}

impl StateSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a loosely-typed JSON value.
    ///
    /// Entity identifiers may be JSON strings or numbers; numbers are
    /// stringified. Missing sections default to empty. Any shape
    /// violation is a [`DiffError::MalformedInput`] — a caller bug,
    /// reported synchronously rather than degraded.
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| DiffError::malformed("state snapshot must be a JSON object"))?;

        let entities = match obj.get("entities") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(entity_id)
                .collect::<Result<Vec<String>>>()?,
            Some(other) => {
                return Err(DiffError::malformed(format!(
                    "entities must be an array, got {}",
                    json_type_name(other)
                )));
            }
        };

        let steps = match obj.get("steps") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(other) => {
                return Err(DiffError::malformed(format!(
                    "steps must be an array, got {}",
                    json_type_name(other)
                )));
            }
        };

        let flags = match obj.get("flags") {
            None | Some(Value::Null) => ModeFlags::default(),
            Some(v) => serde_json::from_value(v.clone())
                .map_err(|e| DiffError::malformed(format!("flags: {e}")))?,
        };

        Ok(Self {
            entities,
            steps,
            flags,
        })
    }
}

fn entity_id(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(DiffError::malformed(format!(
            "entity identifier must be a string or number, got {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
