use crate::tools::{tool_fn, Tool};
use crate::types::ToolResult;
use super::text_arg;

// Internal fee structure, as fractions of the transferred amount.
const FEES: [(&str, f64); 3] = [
    ("platinum credit card", 0.02),
    ("gold debit card",      0.035),
    ("bank transfer",        0.01),
];

/// Looks up the transaction fee for a payment method, case-insensitively.
pub fn get_fee_for_payment_method(method: &str) -> ToolResult {
    let key = method.to_lowercase();
    match FEES.iter().find(|(name, _)| *name == key) {
        Some((_, fee)) => ToolResult::success().with("fee_percentage", *fee),
        None => ToolResult::error(format!("Payment method '{method}' not found")),
    }
}

pub fn fee_tool() -> Tool {
    Tool::new(
        "get_fee_for_payment_method",
        "Looks up the transaction fee percentage for a payment method such as \
         'platinum credit card' or 'bank transfer'.",
        ["method"],
        tool_fn(|args| Ok(get_fee_for_payment_method(text_arg(args, "method")?))),
    )
}
