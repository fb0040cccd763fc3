//! The webhook delivery envelope.
//!
//! An `Envelope` is an immutable, arbitrarily nested key-value document
//! representing one webhook delivery. Payload fields are addressed by
//! `/`-separated paths (e.g., `"check_run/head_sha"`); a lookup through an
//! absent intermediate key fails with `MissingField`, which is a recoverable
//! condition, not a crash. Call sites pattern-match on the result instead of
//! relying on panics or exception-style control flow.

use serde_json::Value;
use thiserror::Error;

/// A required payload path was absent from the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing field at path `{path}`")]
pub struct MissingField {
    /// The full path that was requested.
    pub path: String,
}

impl MissingField {
    fn new(path: &str) -> Self {
        MissingField {
            path: path.to_string(),
        }
    }
}

/// One inbound webhook delivery.
#[derive(Debug, Clone)]
pub struct Envelope {
    event_type: String,
    payload: Value,
}

impl Envelope {
    /// Creates an envelope from the declared event type and the JSON payload.
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Envelope {
            event_type: event_type.into(),
            payload,
        }
    }

    /// The event type discriminator (e.g., `"check_run"`).
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The optional action discriminator (e.g., `"created"`).
    pub fn action(&self) -> Option<&str> {
        self.payload.get("action").and_then(Value::as_str)
    }

    /// Looks up a value by `/`-separated path.
    pub fn get(&self, path: &str) -> Result<&Value, MissingField> {
        let mut current = &self.payload;
        for key in path.split('/') {
            current = match current {
                Value::Object(map) => map.get(key).ok_or_else(|| MissingField::new(path))?,
                // Allow numeric indices into arrays (e.g., "pull_requests/0/number")
                Value::Array(items) => key
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| items.get(idx))
                    .ok_or_else(|| MissingField::new(path))?,
                _ => return Err(MissingField::new(path)),
            };
        }
        Ok(current)
    }

    /// Looks up a string field by path.
    ///
    /// A present-but-non-string value is reported as missing: the envelope
    /// did not contain the field in the shape the handler requires.
    pub fn get_str(&self, path: &str) -> Result<&str, MissingField> {
        self.get(path)?
            .as_str()
            .ok_or_else(|| MissingField::new(path))
    }

    /// Looks up an unsigned integer field by path.
    pub fn get_u64(&self, path: &str) -> Result<u64, MissingField> {
        self.get(path)?
            .as_u64()
            .ok_or_else(|| MissingField::new(path))
    }

    /// Looks up an array field by path.
    pub fn get_array(&self, path: &str) -> Result<&Vec<Value>, MissingField> {
        self.get(path)?
            .as_array()
            .ok_or_else(|| MissingField::new(path))
    }
}
