//! Reference tools used by the preset agents.
//!
//! All of them are in-memory lookups so the dispatcher's synchronous contract
//! holds. Domain misses ("city not found") are `ToolResult::Error`; wrongly
//! typed arguments are handler failures.

mod payment;
mod rate;
mod shipping;
mod time;
mod weather;

pub use payment::{fee_tool, get_fee_for_payment_method};
pub use rate::{get_exchange_rate, rate_tool};
pub use shipping::{place_shipping_order, shipping_tool, LARGE_ORDER_THRESHOLD};
pub use time::{get_current_time, get_current_time_at, time_tool};
pub use weather::{get_weather, weather_tool};

use serde_json::Value;
use crate::types::ToolArgs;

/// Reads a string argument, failing if it is present with another JSON type.
pub(crate) fn text_arg<'a>(args: &'a ToolArgs, name: &str) -> Result<&'a str, String> {
    match args.get(name) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(format!("argument '{name}' must be a string, got {other}")),
        None => Err(format!("missing argument '{name}'")),
    }
}

/// Title-cases a lower-case lookup key: "new york" -> "New York".
pub(crate) fn title_case(key: &str) -> String {
    key.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn title_cases_keys() {
        assert_eq!(title_case("san francisco"), "San Francisco");
        assert_eq!(title_case("tokyo"), "Tokyo");
    }

    #[test]
    fn text_arg_rejects_numbers() {
        let mut args = ToolArgs::new();
        args.insert("city".into(), json!(42));
        assert!(text_arg(&args, "city").unwrap_err().contains("must be a string"));
    }
}
