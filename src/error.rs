use thiserror::Error;
use crate::types::ToolResult;

/// Every failure the dispatcher can report.
///
/// The `Display` text is the user-facing message placed in
/// `ToolResult::Error`, so callers can show it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Tool '{0}' not found in agent tools.")]
    UnknownTool(String),

    #[error("Tool '{0}' is already registered.")]
    DuplicateTool(String),

    #[error("Trigger keyword for tool '{0}' must not be empty.")]
    EmptyTrigger(String),

    #[error("{tool} requires parameters: {}", .missing.join(", "))]
    MissingArguments { tool: String, missing: Vec<String> },

    #[error("Tool '{tool}' raised an exception: {message}")]
    ToolInvocation { tool: String, message: String },

    #[error("cannot infer which tool to use from the query; specify a tool name explicitly")]
    NoRoute,

    #[error("{0}")]
    DerivedCalculation(String),

    #[error("{0}")]
    AgentUnavailable(String),
}

impl From<DispatchError> for ToolResult {
    fn from(err: DispatchError) -> Self {
        ToolResult::error(err.to_string())
    }
}
