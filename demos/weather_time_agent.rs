//! # Weather / Time Agent Example
//!
//! # Usage
//! ```bash
//! cargo run --example weather_time_agent
//! ```

use fallback_dispatch::presets::weather_time_agent;
use fallback_dispatch::{Agent, AgentSettings, DispatchRequest, ToolResult};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Weather / Time Agent Example ===\n");

    let agent = weather_time_agent(&AgentSettings::from_env())?;

    for (query, city) in [
        ("What's the weather in New York?", Some("New York")),
        ("What time is it in Tokyo?", Some("Tokyo")),
        ("What's the weather in Paris?", Some("Paris")),
        ("What time is it?", None),
        ("Tell me a joke", None),
    ] {
        let mut request = DispatchRequest::new(query);
        if let Some(city) = city {
            request = request.arg("city", city);
        }

        println!("User  > {query}");
        match agent.run(request).await {
            ToolResult::Error { message } => println!("Agent ! {message}\n"),
            ok => println!("Agent > {}\n", ok.get_str("report").unwrap_or("(no report)")),
        }
    }

    Ok(())
}
