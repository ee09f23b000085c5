//! # Shipping Agent Example
//!
//! Places a small order, then a large one that pauses for approval and is
//! resubmitted with the human decision.
//!
//! # Usage
//! ```bash
//! cargo run --example shipping_agent
//! cargo run --example shipping_agent -- reject
//! ```

use fallback_dispatch::presets::shipping_agent;
use fallback_dispatch::{Agent, AgentSettings, DispatchRequest};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let auto_approve = std::env::args().nth(1).as_deref() != Some("reject");
    let agent = shipping_agent(&AgentSettings::from_env())?;

    for (containers, destination) in [(3, "Singapore"), (8, "Los Angeles")] {
        let query = format!("Ship {containers} containers to {destination}");
        println!("{}", "=".repeat(60));
        println!("User  > {query}\n");

        let request = DispatchRequest::new(query.as_str())
            .arg("num_containers", containers)
            .arg("destination", destination);
        let mut result = agent.run(request.clone()).await;

        if result.get_str("order_status") == Some("pending") {
            println!("Pausing for approval...");
            println!("Human decision: {}\n", if auto_approve { "APPROVE" } else { "REJECT" });
            result = agent.run(request.arg("approved", auto_approve)).await;
        }

        match result.error_message() {
            Some(message) => println!("Agent ! {message}"),
            None => println!("Agent > {}", result.get_str("message").unwrap_or("(no message)")),
        }
    }
    println!("{}", "=".repeat(60));

    Ok(())
}
