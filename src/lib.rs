pub mod types;
pub mod error;
pub mod tools;
pub mod router;
pub mod conversion;
pub mod dispatcher;
pub mod agent;
pub mod config;
pub mod builtin;
pub mod presets;

// Convenience re-exports at crate root
pub use types::{ToolArgs, ToolResult, DispatchRequest};
pub use error::DispatchError;
pub use tools::{tool_fn, Tool, ToolFn, ToolHandler, ToolRegistry, ToolSchema};
pub use router::{Trigger, TriggerRouter};
pub use conversion::ConversionCalculator;
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use agent::{select_agent, Agent, AgentProfile, FallbackAgent, UnavailableAgent};
pub use config::AgentSettings;
