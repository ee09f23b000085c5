use crate::tools::{tool_fn, Tool};
use crate::types::ToolResult;
use super::text_arg;

const RATES: [(&str, &str, f64); 3] = [
    ("usd", "eur", 0.93),
    ("usd", "jpy", 157.50),
    ("usd", "inr", 83.58),
];

/// Looks up the exchange rate between two currency codes.
pub fn get_exchange_rate(base_currency: &str, target_currency: &str) -> ToolResult {
    let base = base_currency.to_lowercase();
    let target = target_currency.to_lowercase();

    match RATES.iter().find(|(b, t, _)| *b == base && *t == target) {
        Some((_, _, rate)) => ToolResult::success().with("rate", *rate),
        None => ToolResult::error(format!(
            "Unsupported currency pair: {}/{}",
            base_currency.to_uppercase(),
            target_currency.to_uppercase()
        )),
    }
}

pub fn rate_tool() -> Tool {
    Tool::new(
        "get_exchange_rate",
        "Looks up the exchange rate from a base currency to a target currency, \
         e.g. USD to EUR.",
        ["base_currency", "target_currency"],
        tool_fn(|args| {
            Ok(get_exchange_rate(
                text_arg(args, "base_currency")?,
                text_arg(args, "target_currency")?,
            ))
        }),
    )
}
