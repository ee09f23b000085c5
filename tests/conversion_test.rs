//! Fee + exchange-rate conversion, with mocked lookups where call order matters.

use fallback_dispatch::conversion::{FEE_TOOL, RATE_TOOL};
use fallback_dispatch::presets::currency_dispatcher;
use fallback_dispatch::{
    ConversionCalculator, DispatchRequest, Dispatcher, Tool, ToolArgs, ToolHandler, ToolResult,
};
use mockall::mock;
use serde_json::json;
use std::sync::Arc;

mock! {
    pub Handler {}
    impl ToolHandler for Handler {
        fn call(&self, args: &ToolArgs) -> Result<ToolResult, String>;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test helpers
// ─────────────────────────────────────────────────────────────────────────────

fn mocked_dispatcher(fee: MockHandler, rate: MockHandler) -> Dispatcher {
    Dispatcher::builder()
        .tool(Tool::new(FEE_TOOL, "fee lookup", ["method"], Arc::new(fee)))
        .tool(Tool::new(RATE_TOOL, "rate lookup", ["base_currency", "target_currency"], Arc::new(rate)))
        .conversion(ConversionCalculator::default())
        .build()
        .expect("builder should succeed")
}

fn conversion_request(amount: serde_json::Value) -> DispatchRequest {
    DispatchRequest::new("")
        .arg("amount", amount)
        .arg("method", "platinum credit card")
        .arg("base_currency", "usd")
        .arg("target_currency", "inr")
}

fn fee_returning(result: ToolResult) -> MockHandler {
    let mut fee = MockHandler::new();
    fee.expect_call()
        .withf(|args| args.get("method") == Some(&json!("platinum credit card")))
        .times(1)
        .returning(move |_| Ok(result.clone()));
    fee
}

fn rate_returning(result: ToolResult) -> MockHandler {
    let mut rate = MockHandler::new();
    rate.expect_call()
        .withf(|args| {
            args.get("base_currency") == Some(&json!("usd"))
                && args.get("target_currency") == Some(&json!("inr"))
        })
        .times(1)
        .returning(move |_| Ok(result.clone()));
    rate
}

fn never_called() -> MockHandler {
    let mut handler = MockHandler::new();
    handler.expect_call().never();
    handler
}

// ─────────────────────────────────────────────────────────────────────────────
// Happy path
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_conversion_applies_fee_before_rate() {
    let dispatcher = mocked_dispatcher(
        fee_returning(ToolResult::success().with("fee_percentage", 0.02)),
        rate_returning(ToolResult::success().with("rate", 83.1234)),
    );

    let result = dispatcher.dispatch(&conversion_request(json!(100)));

    assert_eq!(result.get_f64("rate"), Some(83.1234));
    assert_eq!(result.get_f64("fee_percentage"), Some(0.02));
    assert_eq!(
        result.get_str("report"),
        Some("100.00 USD -> 8,146.09 INR (fee 2.00% = 2.00 USD, amount after fee 98.00 USD, rate 83.1234)")
    );
}

#[test]
fn test_conversion_shortcut_bypasses_routing() {
    let dispatcher = currency_dispatcher().unwrap();
    let request = DispatchRequest::new("what's the weather like?")
        .arg("amount", "500")
        .arg("method", "Platinum Credit Card")
        .arg("base_currency", "USD")
        .arg("target_currency", "INR");

    let result = dispatcher.dispatch(&request);
    assert_eq!(
        result.get_str("report"),
        Some("500.00 USD -> 40,954.20 INR (fee 2.00% = 10.00 USD, amount after fee 490.00 USD, rate 83.5800)")
    );
}

#[test]
fn test_large_amounts_are_grouped() {
    let dispatcher = currency_dispatcher().unwrap();
    let request = DispatchRequest::new("convert")
        .arg("amount", 20000)
        .arg("method", "bank transfer")
        .arg("base_currency", "usd")
        .arg("target_currency", "jpy");

    let report = dispatcher.dispatch(&request);
    let report = report.get_str("report").unwrap();
    assert!(report.starts_with("20,000.00 USD -> 3,118,500.00 JPY"), "{report}");
    assert!(report.contains("fee 1.00% = 200.00 USD"), "{report}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Fail-fast behaviour
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_fee_error_short_circuits_rate_lookup() {
    let fee_error = ToolResult::error("Payment method 'platinum credit card' not found");
    let dispatcher = mocked_dispatcher(fee_returning(fee_error.clone()), never_called());

    let result = dispatcher.dispatch(&conversion_request(json!(100)));
    assert_eq!(result, fee_error);
}

#[test]
fn test_fee_without_percentage_is_rejected() {
    let dispatcher = mocked_dispatcher(
        fee_returning(ToolResult::success().with("fee_percentage", "two percent")),
        never_called(),
    );

    let result = dispatcher.dispatch(&conversion_request(json!(100)));
    assert_eq!(result.error_message(), Some("Fee lookup did not return 'fee_percentage'."));
}

#[test]
fn test_rate_error_is_propagated_unchanged() {
    let rate_error = ToolResult::error("Unsupported currency pair: USD/INR");
    let dispatcher = mocked_dispatcher(
        fee_returning(ToolResult::success().with("fee_percentage", 0.02)),
        rate_returning(rate_error.clone()),
    );

    assert_eq!(dispatcher.dispatch(&conversion_request(json!(100))), rate_error);
}

#[test]
fn test_rate_without_value_is_rejected() {
    let dispatcher = mocked_dispatcher(
        fee_returning(ToolResult::success().with("fee_percentage", 0.02)),
        rate_returning(ToolResult::success()),
    );

    let result = dispatcher.dispatch(&conversion_request(json!(100)));
    assert_eq!(result.error_message(), Some("Exchange rate lookup did not return 'rate'."));
}

#[test]
fn test_invalid_amount_calls_no_tools() {
    for amount in [json!("a lot"), json!(null), json!([100]), json!("NaN")] {
        let dispatcher = mocked_dispatcher(never_called(), never_called());
        let result = dispatcher.dispatch(&conversion_request(amount.clone()));
        assert_eq!(
            result.error_message(),
            Some("Valid numeric 'amount' is required to calculate conversions."),
            "amount = {amount}"
        );
    }
}

#[test]
fn test_empty_currency_is_rejected() {
    let dispatcher = mocked_dispatcher(never_called(), never_called());
    let request = conversion_request(json!(10)).arg("target_currency", " ");

    let result = dispatcher.dispatch(&request);
    assert_eq!(
        result.error_message(),
        Some("Non-empty 'target_currency' is required to calculate conversions.")
    );
}

#[test]
fn test_unsupported_pair_from_builtin_tools() {
    let dispatcher = currency_dispatcher().unwrap();
    let request = DispatchRequest::new("")
        .arg("amount", 10)
        .arg("method", "bank transfer")
        .arg("base_currency", "usd")
        .arg("target_currency", "gbp");

    let result = dispatcher.dispatch(&request);
    assert_eq!(result.error_message(), Some("Unsupported currency pair: USD/GBP"));
}

#[test]
fn test_overflowing_conversion_is_rejected() {
    let dispatcher = currency_dispatcher().unwrap();
    let request = DispatchRequest::new("")
        .arg("amount", 1e308)
        .arg("method", "bank transfer")
        .arg("base_currency", "usd")
        .arg("target_currency", "jpy");

    let result = dispatcher.dispatch(&request);
    assert_eq!(result.error_message(), Some("Conversion result is out of range."));
}
