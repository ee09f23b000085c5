use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use serde_json::{json, Value};
use crate::error::DispatchError;
use crate::types::{ToolArgs, ToolResult};

/// The body of a tool.
///
/// `Err(message)` means the tool itself blew up; the registry wraps it into a
/// `ToolInvocation` error. Domain failures ("city not found") are returned as
/// `Ok(ToolResult::Error { .. })` instead. A panic inside `call` is caught
/// by the registry and reported the same way as `Err`.
pub trait ToolHandler: Send + Sync {
    fn call(&self, args: &ToolArgs) -> Result<ToolResult, String>;
}

impl<F> ToolHandler for F
where
    F: Fn(&ToolArgs) -> Result<ToolResult, String> + Send + Sync,
{
    fn call(&self, args: &ToolArgs) -> Result<ToolResult, String> {
        self(args)
    }
}

/// Shared, thread-safe tool body.
pub type ToolFn = Arc<dyn ToolHandler>;

/// Wraps a closure as a `ToolFn`.
pub fn tool_fn<F>(f: F) -> ToolFn
where
    F: Fn(&ToolArgs) -> Result<ToolResult, String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Tool schema for handing the same tools to an LLM-backed runtime
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ToolSchema {
    pub name:         String,
    pub description:  String,
    pub input_schema: Value,   // JSON Schema object
}

/// A named unit of computation with its declared parameters.
#[derive(Clone)]
pub struct Tool {
    name:          String,
    description:   String,
    required_args: BTreeSet<String>,
    optional_args: BTreeSet<String>,
    handler:       ToolFn,
}

impl Tool {
    pub fn new<I, S>(
        name:        impl Into<String>,
        description: impl Into<String>,
        required:    I,
        handler:     ToolFn,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name:          name.into(),
            description:   description.into(),
            required_args: required.into_iter().map(Into::into).collect(),
            optional_args: BTreeSet::new(),
            handler,
        }
    }

    /// Declares parameters that are forwarded when present but never required.
    pub fn optional<I, S>(mut self, optional: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional_args.extend(optional.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn required_args(&self) -> &BTreeSet<String> {
        &self.required_args
    }

    pub fn optional_args(&self) -> &BTreeSet<String> {
        &self.optional_args
    }

    /// Required names absent from `args`, sorted ascending.
    pub fn missing_args(&self, args: &ToolArgs) -> Vec<String> {
        self.required_args
            .iter()
            .filter(|name| !args.contains_key(name.as_str()))
            .cloned()
            .collect()
    }

    /// Keeps only the declared parameters; anything else is dropped.
    pub fn filter_args(&self, args: &ToolArgs) -> ToolArgs {
        args.iter()
            .filter(|(key, _)| self.required_args.contains(*key) || self.optional_args.contains(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn schema(&self) -> ToolSchema {
        let properties: serde_json::Map<String, Value> = self.required_args
            .iter()
            .chain(self.optional_args.iter())
            .map(|name| (name.clone(), json!({})))
            .collect();

        ToolSchema {
            name:         self.name.clone(),
            description:  self.description.clone(),
            input_schema: json!({
                "type":       "object",
                "properties": properties,
                "required":   self.required_args.iter().collect::<Vec<_>>(),
            }),
        }
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("required_args", &self.required_args)
            .field("optional_args", &self.optional_args)
            .finish_non_exhaustive()
    }
}

/// Owns the invocable tools. Read-only once construction is done.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Register a tool. Names are unique; a second registration fails.
    pub fn register(&mut self, tool: Tool) -> Result<(), DispatchError> {
        if self.tools.contains_key(tool.name()) {
            return Err(DispatchError::DuplicateTool(tool.name().to_string()));
        }
        tracing::debug!(tool = %tool.name(), required = ?tool.required_args(), "tool registered");
        self.tools.insert(tool.name().to_string(), tool);
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Declared required arguments for `name`.
    pub fn required_args(&self, name: &str) -> Result<&BTreeSet<String>, DispatchError> {
        self.find(name)
            .map(Tool::required_args)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))
    }

    /// Invoke a named tool with the given arguments, as-is.
    /// Missing tools, handler errors and handler panics all come back as `ToolResult::Error`.
    pub fn invoke(&self, name: &str, args: &ToolArgs) -> ToolResult {
        let Some(tool) = self.find(name) else {
            tracing::warn!(tool = %name, "tool not found");
            return DispatchError::UnknownTool(name.to_string()).into();
        };

        tracing::info!(tool = %name, args = ?args, "calling tool");
        let outcome = catch_unwind(AssertUnwindSafe(|| tool.handler.call(args)))
            .unwrap_or_else(|payload| Err(panic_message(payload.as_ref())));
        match outcome {
            Ok(result) => result,
            Err(message) => {
                tracing::error!(tool = %name, error = %message, "tool invocation failed");
                DispatchError::ToolInvocation { tool: name.to_string(), message }.into()
            }
        }
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Schemas for every tool, sorted by name.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(Tool::schema).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "tool panicked".to_string()
    }
}
