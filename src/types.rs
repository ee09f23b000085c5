use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Named arguments passed to a tool, keyed by parameter name.
pub type ToolArgs = HashMap<String, Value>;

/// Outcome of a single tool call or dispatch.
///
/// Serializes to the flat shape agent runtimes expect:
/// `{"status": "success", "report": "..."}` or
/// `{"status": "error", "error_message": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResult {
    Success {
        #[serde(flatten)]
        fields: Map<String, Value>,
    },
    Error {
        #[serde(rename = "error_message")]
        message: String,
    },
}

impl ToolResult {
    /// A success result with no fields beyond the status marker.
    pub fn success() -> Self {
        Self::Success { fields: Map::new() }
    }

    /// A success result carrying only a human-readable report.
    pub fn report(report: impl Into<String>) -> Self {
        Self::success().with("report", Value::String(report.into()))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }

    /// Adds a field to a success result. Error results are returned unchanged.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Self::Success { fields } = &mut self {
            fields.insert(key.into(), value.into());
        }
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns a field of a success result.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Success { fields } => fields.get(key),
            Self::Error { .. } => None,
        }
    }

    /// Returns a field only if it is a JSON number.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The error message, if this is an error result.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            Self::Success { .. } => None,
        }
    }
}

/// A single request to the dispatcher. Built per call and consumed immediately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchRequest {
    /// Free text used for keyword routing.
    pub query:     String,
    /// Bypasses routing when set.
    pub tool_name: Option<String>,
    pub arguments: ToolArgs,
}

impl DispatchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn tool(mut self, name: impl Into<String>) -> Self {
        self.tool_name = Some(name.into()); self
    }

    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into()); self
    }

    pub fn args(mut self, arguments: ToolArgs) -> Self {
        self.arguments.extend(arguments); self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_flat_with_status() {
        let result = ToolResult::success().with("rate", 0.93);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({ "status": "success", "rate": 0.93 }));
    }

    #[test]
    fn error_serializes_with_error_message() {
        let result = ToolResult::error("boom");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({ "status": "error", "error_message": "boom" }));
    }

    #[test]
    fn deserializes_tool_payload() {
        let result: ToolResult =
            serde_json::from_value(json!({ "status": "success", "fee_percentage": 0.02 })).unwrap();
        assert_eq!(result.get_f64("fee_percentage"), Some(0.02));
    }

    #[test]
    fn with_ignores_error_results() {
        let result = ToolResult::error("nope").with("rate", 1.0);
        assert_eq!(result, ToolResult::error("nope"));
    }
}
