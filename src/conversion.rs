//! Fee-then-rate currency conversion chained over two registered tools.

use serde_json::Value;
use crate::error::DispatchError;
use crate::tools::ToolRegistry;
use crate::types::{ToolArgs, ToolResult};

pub const FEE_TOOL:  &str = "get_fee_for_payment_method";
pub const RATE_TOOL: &str = "get_exchange_rate";

/// Arguments that must all be present for the conversion shortcut to apply.
pub const CONVERSION_ARGS: [&str; 4] = ["amount", "base_currency", "target_currency", "method"];

/// Chains a fee lookup and an exchange-rate lookup into one conversion.
///
/// The fee lookup always runs first; its failure stops the calculation before
/// the rate tool is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionCalculator {
    fee_tool:  String,
    rate_tool: String,
}

impl Default for ConversionCalculator {
    fn default() -> Self {
        Self::new(FEE_TOOL, RATE_TOOL)
    }
}

impl ConversionCalculator {
    pub fn new(fee_tool: impl Into<String>, rate_tool: impl Into<String>) -> Self {
        Self {
            fee_tool:  fee_tool.into(),
            rate_tool: rate_tool.into(),
        }
    }

    pub fn fee_tool(&self) -> &str {
        &self.fee_tool
    }

    pub fn rate_tool(&self) -> &str {
        &self.rate_tool
    }

    /// True when `args` carries every conversion argument.
    pub fn can_handle(&self, args: &ToolArgs) -> bool {
        CONVERSION_ARGS.iter().all(|name| args.contains_key(*name))
    }

    pub fn run(&self, registry: &ToolRegistry, args: &ToolArgs) -> ToolResult {
        match self.convert(registry, args) {
            Ok(result) | Err(result) => result,
        }
    }

    // Err carries the terminal result: a propagated tool error or our own failure.
    fn convert(&self, registry: &ToolRegistry, args: &ToolArgs) -> Result<ToolResult, ToolResult> {
        let amount = parse_amount(args.get("amount")).ok_or_else(|| {
            calc_error("Valid numeric 'amount' is required to calculate conversions.")
        })?;
        let method = required_text(args, "method")?;
        let base_currency = required_text(args, "base_currency")?;
        let target_currency = required_text(args, "target_currency")?;

        let mut fee_args = ToolArgs::new();
        fee_args.insert("method".into(), Value::String(method));
        let fee_response = registry.invoke(&self.fee_tool, &fee_args);
        if fee_response.is_error() {
            return Err(fee_response);
        }
        let fee_percentage = fee_response
            .get_f64("fee_percentage")
            .ok_or_else(|| calc_error("Fee lookup did not return 'fee_percentage'."))?;

        let mut rate_args = ToolArgs::new();
        rate_args.insert("base_currency".into(), Value::String(base_currency.clone()));
        rate_args.insert("target_currency".into(), Value::String(target_currency.clone()));
        let rate_response = registry.invoke(&self.rate_tool, &rate_args);
        if rate_response.is_error() {
            return Err(rate_response);
        }
        let rate = rate_response
            .get_f64("rate")
            .ok_or_else(|| calc_error("Exchange rate lookup did not return 'rate'."))?;

        let breakdown = Breakdown::compute(amount, fee_percentage, rate);
        if !breakdown.converted_amount.is_finite() {
            tracing::warn!(amount, rate, "converted amount overflowed");
            return Err(calc_error("Conversion result is out of range."));
        }
        let report = breakdown.report(&base_currency.to_uppercase(), &target_currency.to_uppercase());
        tracing::info!(
            amount,
            fee_percentage,
            rate,
            converted = breakdown.converted_amount,
            "conversion calculated"
        );

        Ok(ToolResult::report(report)
            .with("rate", rate)
            .with("fee_percentage", fee_percentage))
    }
}

/// Intermediate amounts of a conversion, kept at full precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakdown {
    pub amount:           f64,
    pub fee_percentage:   f64,
    pub rate:             f64,
    pub fee_amount:       f64,
    pub amount_after_fee: f64,
    pub converted_amount: f64,
}

impl Breakdown {
    /// `fee_percentage` is a fraction: 0.02 means 2%.
    pub fn compute(amount: f64, fee_percentage: f64, rate: f64) -> Self {
        let fee_amount = amount * fee_percentage;
        let amount_after_fee = amount - fee_amount;
        Self {
            amount,
            fee_percentage,
            rate,
            fee_amount,
            amount_after_fee,
            converted_amount: amount_after_fee * rate,
        }
    }

    pub fn report(&self, base: &str, target: &str) -> String {
        format!(
            "{} {base} -> {} {target} (fee {:.2}% = {} {base}, amount after fee {} {base}, rate {:.4})",
            group_thousands(self.amount),
            group_thousands(self.converted_amount),
            self.fee_percentage * 100.0,
            group_thousands(self.fee_amount),
            group_thousands(self.amount_after_fee),
            self.rate,
        )
    }
}

/// Formats with two decimals and `,` between thousands: `1234.5` -> `"1,234.50"`.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && value != 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

fn parse_amount(value: Option<&Value>) -> Option<f64> {
    let amount = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}

fn required_text(args: &ToolArgs, name: &str) -> Result<String, ToolResult> {
    let text = match args.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    if text.trim().is_empty() {
        return Err(calc_error(format!("Non-empty '{name}' is required to calculate conversions.")));
    }
    Ok(text)
}

fn calc_error(message: impl Into<String>) -> ToolResult {
    DispatchError::DerivedCalculation(message.into()).into()
}
