//! Factory functions for the stock agents.
//!
//! Each call builds a fresh agent; the owning process calls them once at
//! startup and passes the result to whatever needs it.

use crate::agent::{AgentProfile, FallbackAgent, UnavailableAgent};
use crate::builtin;
use crate::config::AgentSettings;
use crate::conversion::ConversionCalculator;
use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;

/// Keyword table for the currency agent, in precedence order.
pub const CURRENCY_TRIGGERS: [(&str, &str); 5] = [
    ("rate",     "get_exchange_rate"),
    ("exchange", "get_exchange_rate"),
    ("convert",  "get_exchange_rate"),
    ("fee",      "get_fee_for_payment_method"),
    ("payment",  "get_fee_for_payment_method"),
];

pub const WEATHER_TIME_TRIGGERS: [(&str, &str); 2] = [
    ("weather", "get_weather"),
    ("time",    "get_current_time"),
];

pub const SHIPPING_TRIGGERS: [(&str, &str); 3] = [
    ("ship",      "place_shipping_order"),
    ("container", "place_shipping_order"),
    ("order",     "place_shipping_order"),
];

const CURRENCY_INSTRUCTION: &str = "You are a smart currency conversion assistant.

For currency conversion requests:
1. Use `get_fee_for_payment_method()` to find transaction fees
2. Use `get_exchange_rate()` to get currency conversion rates
3. Check the \"status\" field in each tool's response for errors
4. Calculate the final amount after fees and provide a clear breakdown.
5. First, state the final converted amount. Then show the fee percentage and its
   value in the original currency, the amount remaining after the fee, and the
   exchange rate used for the final conversion.

If any tool returns status \"error\", explain the issue to the user clearly.";

/// Dispatcher with the fee and exchange-rate tools plus the conversion shortcut.
pub fn currency_dispatcher() -> Result<Dispatcher, DispatchError> {
    Dispatcher::builder()
        .tool(builtin::fee_tool())
        .tool(builtin::rate_tool())
        .triggers(CURRENCY_TRIGGERS)
        .conversion(ConversionCalculator::default())
        .build()
}

pub fn currency_agent(settings: &AgentSettings) -> Result<FallbackAgent, DispatchError> {
    let profile = AgentProfile::new("currency_agent", &settings.model)
        .description("Converts amounts between currencies, including payment-method fees.")
        .instruction(CURRENCY_INSTRUCTION);
    Ok(FallbackAgent::new(profile, currency_dispatcher()?))
}

pub fn weather_time_dispatcher() -> Result<Dispatcher, DispatchError> {
    Dispatcher::builder()
        .tool(builtin::weather_tool())
        .tool(builtin::time_tool())
        .triggers(WEATHER_TIME_TRIGGERS)
        .build()
}

pub fn weather_time_agent(settings: &AgentSettings) -> Result<FallbackAgent, DispatchError> {
    let profile = AgentProfile::new("weather_time_agent", &settings.model)
        .description("Agent to answer questions about the time and weather in a city.")
        .instruction(
            "You are a helpful agent who can answer user questions \
             about the time and weather in a city.",
        );
    Ok(FallbackAgent::new(profile, weather_time_dispatcher()?))
}

pub fn shipping_dispatcher() -> Result<Dispatcher, DispatchError> {
    Dispatcher::builder()
        .tool(builtin::shipping_tool())
        .triggers(SHIPPING_TRIGGERS)
        .build()
}

pub fn shipping_agent(settings: &AgentSettings) -> Result<FallbackAgent, DispatchError> {
    let profile = AgentProfile::new("shipping_agent", &settings.model)
        .description("Shipping coordinator that places container orders.")
        .instruction(
            "You are a shipping coordinator assistant. Place orders with \
             place_shipping_order; if an order is pending, tell the user that \
             approval is required, then summarise status, order id, container \
             count and destination.",
        );
    Ok(FallbackAgent::new(profile, shipping_dispatcher()?))
}

/// The image agent's tools live in an external MCP server, so without the
/// runtime there is nothing deterministic to fall back to.
pub fn image_agent(settings: &AgentSettings) -> UnavailableAgent {
    UnavailableAgent::new(
        AgentProfile::new("image_agent", &settings.model)
            .description("Generates images through MCP tools."),
        "The agent runtime is not available, so MCP tools cannot be invoked. \
         Install the runtime and rerun the image assistant.",
    )
}
