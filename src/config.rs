use serde::{Deserialize, Serialize};

pub const MODEL_ENV:          &str = "AGENT_TOOLS_MODEL_NAME";
pub const USE_ENHANCED_ENV:   &str = "AGENT_TOOLS_USE_ENHANCED";
pub const FORCE_FALLBACK_ENV: &str = "AGENT_TOOLS_FORCE_FALLBACK";

/// Selects between the runtime-backed agent and the deterministic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Model name handed to the runtime-backed agent; informational for the fallback.
    pub model: String,

    /// Prefer the runtime-backed agent when one is available.
    pub use_enhanced: bool,

    /// Always use the deterministic fallback, whatever `use_enhanced` says.
    pub force_fallback: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model:          "gemini-1.5-flash".to_string(),
            use_enhanced:   true,
            force_fallback: false,
        }
    }
}

impl AgentSettings {
    /// Reads settings from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            model:          lookup(MODEL_ENV)
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or(defaults.model),
            use_enhanced:   flag(lookup(USE_ENHANCED_ENV), defaults.use_enhanced),
            force_fallback: flag(lookup(FORCE_FALLBACK_ENV), defaults.force_fallback),
        }
    }

    pub fn enhanced_enabled(&self) -> bool {
        self.use_enhanced && !self.force_fallback
    }
}

fn flag(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(value) => matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}
