//! Response envelopes for tool handlers
//!
//! Every tool responds with the same shape: a JSON object carrying a
//! mandatory boolean `success` field, an `error` string when success is
//! false, and arbitrary named result fields otherwise. The constructors
//! are total; no validation is performed on caller-chosen field names.

use serde::Serialize;
use serde_json::{Map, Value};

/// Uniform success/error response returned by every tool.
///
/// Serializes transparently as the underlying JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    /// Successful response: `{"success": true}`.
    pub fn ok() -> Self {
        let mut fields = Map::new();
        fields.insert("success".to_string(), Value::Bool(true));
        Self(fields)
    }

    /// Error response: `{"success": false, "error": message}`.
    pub fn err(message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("success".to_string(), Value::Bool(false));
        fields.insert("error".to_string(), Value::String(message.into()));
        Self(fields)
    }

    /// Error response for a missing resource.
    pub fn not_found(resource_kind: &str, resource_id: &str) -> Self {
        Self::err(format!("{} not found: {}", resource_kind, resource_id))
    }

    /// Add a named field. Last write wins per key.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.0
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// The `error` field, present on failure envelopes.
    pub fn error_message(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        envelope.into_value()
    }
}
