use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::config::AgentSettings;
use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::types::{DispatchRequest, ToolResult};

/// Static description of an agent, shared by every backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name:        String,
    pub model:       String,
    pub description: String,
    pub instruction: String,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name:  name.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, d: impl Into<String>) -> Self {
        self.description = d.into(); self
    }

    pub fn instruction(mut self, i: impl Into<String>) -> Self {
        self.instruction = i.into(); self
    }
}

/// The capability every agent backend offers to its caller.
///
/// # Contract
/// - Must be Send + Sync (shared behind `Arc<dyn Agent>`)
/// - Never fails across this boundary: every problem is a `ToolResult::Error`
/// - Runtime-backed implementations may suspend on I/O; the fallback never does
#[async_trait]
pub trait Agent: Send + Sync {
    fn profile(&self) -> &AgentProfile;

    async fn run(&self, request: DispatchRequest) -> ToolResult;
}

/// Deterministic agent that answers through a keyword `Dispatcher`.
#[derive(Debug, Clone)]
pub struct FallbackAgent {
    profile:    AgentProfile,
    dispatcher: Arc<Dispatcher>,
}

impl FallbackAgent {
    pub fn new(profile: AgentProfile, dispatcher: Dispatcher) -> Self {
        Self { profile, dispatcher: Arc::new(dispatcher) }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Synchronous entry point; same result as `Agent::run`.
    pub fn dispatch(&self, request: &DispatchRequest) -> ToolResult {
        tracing::info!(agent = %self.profile.name, "fallback agent run");
        self.dispatcher.dispatch(request)
    }
}

#[async_trait]
impl Agent for FallbackAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    async fn run(&self, request: DispatchRequest) -> ToolResult {
        self.dispatch(&request)
    }
}

/// Stand-in for agents whose tools only exist inside the external runtime
/// (MCP tool sets and the like). Every call reports that the runtime is missing.
#[derive(Debug, Clone)]
pub struct UnavailableAgent {
    profile: AgentProfile,
    reason:  String,
}

impl UnavailableAgent {
    pub fn new(profile: AgentProfile, reason: impl Into<String>) -> Self {
        Self { profile, reason: reason.into() }
    }
}

#[async_trait]
impl Agent for UnavailableAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    async fn run(&self, request: DispatchRequest) -> ToolResult {
        tracing::warn!(
            agent = %self.profile.name,
            query = %request.query,
            tool_name = ?request.tool_name,
            "agent runtime unavailable"
        );
        DispatchError::AgentUnavailable(self.reason.clone()).into()
    }
}

/// Picks the backend explicitly from settings.
///
/// The runtime-backed agent is used only when enhanced mode is enabled and one
/// was supplied; otherwise `fallback` is built and returned.
pub fn select_agent<F>(
    settings: &AgentSettings,
    runtime:  Option<Arc<dyn Agent>>,
    fallback: F,
) -> Arc<dyn Agent>
where
    F: FnOnce() -> Arc<dyn Agent>,
{
    if !settings.enhanced_enabled() {
        tracing::info!(
            use_enhanced = settings.use_enhanced,
            force_fallback = settings.force_fallback,
            "enhanced agent disabled via config; using fallback"
        );
        return fallback();
    }

    match runtime {
        Some(agent) => {
            tracing::info!(agent = %agent.profile().name, "runtime agent selected");
            agent
        }
        None => {
            tracing::warn!("agent runtime unavailable; using fallback");
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable(name: &str) -> Arc<dyn Agent> {
        Arc::new(UnavailableAgent::new(AgentProfile::new(name, "m"), "offline"))
    }

    #[test]
    fn disabled_enhanced_mode_uses_fallback() {
        let settings = AgentSettings { force_fallback: true, ..Default::default() };
        let agent = select_agent(&settings, Some(unavailable("runtime")), || unavailable("fallback"));
        assert_eq!(agent.profile().name, "fallback");
    }

    #[test]
    fn runtime_agent_preferred_when_enabled() {
        let agent = select_agent(&AgentSettings::default(), Some(unavailable("runtime")), || {
            unavailable("fallback")
        });
        assert_eq!(agent.profile().name, "runtime");
    }

    #[test]
    fn missing_runtime_falls_back() {
        let agent = select_agent(&AgentSettings::default(), None, || unavailable("fallback"));
        assert_eq!(agent.profile().name, "fallback");
    }

    #[tokio::test]
    async fn unavailable_agent_reports_reason() {
        let agent = UnavailableAgent::new(AgentProfile::new("image_agent", "m"), "runtime missing");
        let result = agent.run(DispatchRequest::new("draw a cat")).await;
        assert_eq!(result.error_message(), Some("runtime missing"));
    }
}
