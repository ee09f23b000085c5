//! # Currency Agent Example
//!
//! Runs the currency agent through the deterministic fallback path: a full
//! conversion, a routed rate lookup, and a couple of failures.
//!
//! # Usage
//! ```bash
//! cargo run --example currency_agent
//! RUST_LOG=debug AGENT_TOOLS_FORCE_FALLBACK=1 cargo run --example currency_agent
//! ```

use fallback_dispatch::presets::currency_agent;
use fallback_dispatch::{select_agent, Agent, AgentSettings, DispatchRequest, ToolResult};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging — set RUST_LOG=debug|info|warn
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Currency Agent Example ===\n");

    let settings = AgentSettings::from_env();
    let fallback: Arc<dyn Agent> = Arc::new(currency_agent(&settings)?);

    // No runtime-backed agent is linked into this demo.
    let agent = select_agent(&settings, None, move || fallback);

    let requests = [
        DispatchRequest::new("Convert 1,250 USD to INR using a Bank Transfer.")
            .arg("amount", 1250)
            .arg("method", "Bank Transfer")
            .arg("base_currency", "USD")
            .arg("target_currency", "INR"),
        DispatchRequest::new("What is the exchange rate from USD to JPY?")
            .arg("base_currency", "USD")
            .arg("target_currency", "JPY"),
        DispatchRequest::new("What fee applies to my payment?"),
        DispatchRequest::new("Convert 300 USD to EUR with crypto.")
            .arg("amount", 300)
            .arg("method", "crypto")
            .arg("base_currency", "USD")
            .arg("target_currency", "EUR"),
    ];

    for request in requests {
        println!("User  > {}", request.query);
        print_result(&agent.run(request).await);
    }

    Ok(())
}

fn print_result(result: &ToolResult) {
    match result {
        ToolResult::Success { .. } => match result.get_str("report") {
            Some(report) => println!("Agent > {report}\n"),
            None => println!("Agent > {}\n", serde_json::to_string(result).unwrap_or_default()),
        },
        ToolResult::Error { message } => println!("Agent ! {message}\n"),
    }
}
