use std::sync::Arc;
use uuid::Uuid;
use crate::conversion::ConversionCalculator;
use crate::error::DispatchError;
use crate::router::TriggerRouter;
use crate::tools::{Tool, ToolRegistry};
use crate::types::{DispatchRequest, ToolArgs, ToolResult};

/// Resolves a request to a tool call or to the derived conversion.
///
/// Holds no mutable state: the registry and router are fixed at build time, so
/// one `Dispatcher` can serve concurrent callers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry:   Arc<ToolRegistry>,
    router:     TriggerRouter,
    conversion: Option<ConversionCalculator>,
}

impl Dispatcher {
    pub fn new(
        registry:   Arc<ToolRegistry>,
        router:     TriggerRouter,
        conversion: Option<ConversionCalculator>,
    ) -> Self {
        Self { registry, router, conversion }
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Resolution order: explicit tool name, then the full-conversion
    /// shortcut, then keyword routing.
    pub fn dispatch(&self, request: &DispatchRequest) -> ToolResult {
        let span = tracing::info_span!("dispatch", request_id = %Uuid::new_v4());
        let _enter = span.enter();

        tracing::info!(
            query = %request.query,
            tool_name = ?request.tool_name,
            args = ?request.arguments,
            "dispatch called"
        );

        if let Some(tool_name) = request.tool_name.as_deref() {
            return self.call_validated(tool_name, &request.arguments);
        }

        if let Some(conversion) = &self.conversion {
            if conversion.can_handle(&request.arguments) {
                tracing::debug!("full conversion arguments present, skipping routing");
                return conversion.run(&self.registry, &request.arguments);
            }
        }

        match self.router.route(&request.query) {
            Some(tool_name) => self.call_validated(tool_name, &request.arguments),
            None => {
                tracing::warn!(query = %request.query, "could not infer tool from query");
                DispatchError::NoRoute.into()
            }
        }
    }

    /// Convenience wrapper for a bare query with arguments.
    pub fn run(&self, query: &str, arguments: ToolArgs) -> ToolResult {
        self.dispatch(&DispatchRequest::new(query).args(arguments))
    }

    fn call_validated(&self, tool_name: &str, args: &ToolArgs) -> ToolResult {
        let Some(tool) = self.registry.find(tool_name) else {
            tracing::warn!(tool = %tool_name, "tool not found");
            return DispatchError::UnknownTool(tool_name.to_string()).into();
        };

        let missing = tool.missing_args(args);
        if !missing.is_empty() {
            tracing::warn!(tool = %tool_name, missing = ?missing, "required arguments missing");
            return DispatchError::MissingArguments { tool: tool_name.to_string(), missing }.into();
        }

        self.registry.invoke(tool_name, &tool.filter_args(args))
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn router(&self) -> &TriggerRouter {
        &self.router
    }

    pub fn conversion(&self) -> Option<&ConversionCalculator> {
        self.conversion.as_ref()
    }
}

pub struct DispatcherBuilder {
    tools:      Vec<Tool>,
    triggers:   Vec<(String, String)>,
    conversion: Option<ConversionCalculator>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            tools:      Vec::new(),
            triggers:   Vec::new(),
            conversion: None,
        }
    }

    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool); self
    }

    pub fn tools(mut self, tools: impl IntoIterator<Item = Tool>) -> Self {
        self.tools.extend(tools); self
    }

    /// Appends a trigger; earlier triggers take precedence.
    pub fn trigger(mut self, keyword: impl Into<String>, tool: impl Into<String>) -> Self {
        self.triggers.push((keyword.into(), tool.into())); self
    }

    pub fn triggers<I, K, T>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        self.triggers.extend(pairs.into_iter().map(|(k, t)| (k.into(), t.into())));
        self
    }

    /// Enables the fee + exchange-rate shortcut.
    pub fn conversion(mut self, calculator: ConversionCalculator) -> Self {
        self.conversion = Some(calculator); self
    }

    pub fn build(self) -> Result<Dispatcher, DispatchError> {
        let mut registry = ToolRegistry::new();
        for tool in self.tools {
            registry.register(tool)?;
        }

        let router = TriggerRouter::from_pairs(self.triggers)?;
        for trigger in router.triggers() {
            if registry.find(&trigger.tool).is_none() {
                tracing::warn!(
                    keyword = %trigger.keyword,
                    tool = %trigger.tool,
                    "trigger points at an unregistered tool"
                );
            }
        }

        if let Some(conversion) = &self.conversion {
            for name in [conversion.fee_tool(), conversion.rate_tool()] {
                if registry.find(name).is_none() {
                    tracing::warn!(tool = %name, "conversion tool is not registered");
                }
            }
        }

        Ok(Dispatcher::new(Arc::new(registry), router, self.conversion))
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self { Self::new() }
}
