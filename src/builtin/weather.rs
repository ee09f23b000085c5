use crate::tools::{tool_fn, Tool};
use crate::types::ToolResult;
use super::{text_arg, title_case};

const REPORTS: [(&str, &str); 3] = [
    ("new york",      "The weather in New York is sunny with a temperature of 25°C (77°F)."),
    ("san francisco", "San Francisco is foggy with a high of 18°C (65°F)."),
    ("tokyo",         "Tokyo is clear with a temperature of 22°C (72°F)."),
];

pub fn get_weather(city: &str) -> ToolResult {
    let city = city.trim();
    let key = city.to_lowercase();
    tracing::info!(city = %city, "get_weather called");

    if let Some((_, report)) = REPORTS.iter().find(|(name, _)| *name == key) {
        return ToolResult::report(*report);
    }

    let available = available_cities();
    tracing::warn!(city = %city, available = %available, "no weather data for city");
    ToolResult::error(format!(
        "Weather information for '{city}' is not available. Try: {available}"
    ))
}

fn available_cities() -> String {
    let mut names: Vec<&str> = REPORTS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names.into_iter().map(title_case).collect::<Vec<_>>().join(", ")
}

pub fn weather_tool() -> Tool {
    Tool::new(
        "get_weather",
        "Retrieves the current weather report for a specified city.",
        ["city"],
        tool_fn(|args| Ok(get_weather(text_arg(args, "city")?))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_city_is_trimmed_and_case_insensitive() {
        let result = get_weather("  TOKYO ");
        assert_eq!(result.get_str("report"), Some("Tokyo is clear with a temperature of 22°C (72°F)."));
    }

    #[test]
    fn unknown_city_lists_alternatives() {
        let result = get_weather("Paris");
        assert_eq!(
            result.error_message(),
            Some("Weather information for 'Paris' is not available. Try: New York, San Francisco, Tokyo")
        );
    }
}
