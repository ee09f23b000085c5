use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use crate::tools::{tool_fn, Tool};
use crate::types::ToolResult;
use super::{text_arg, title_case};

const ZONES: [(&str, Tz); 3] = [
    ("new york",      chrono_tz::America::New_York),
    ("san francisco", chrono_tz::America::Los_Angeles),
    ("tokyo",         chrono_tz::Asia::Tokyo),
];

pub fn get_current_time(city: &str) -> ToolResult {
    get_current_time_at(city, Utc::now())
}

/// Same as `get_current_time` with an explicit clock reading.
pub fn get_current_time_at(city: &str, now: DateTime<Utc>) -> ToolResult {
    let city = city.trim();
    let key = city.to_lowercase();
    tracing::info!(city = %city, "get_current_time called");

    let Some((_, zone)) = ZONES.iter().find(|(name, _)| *name == key) else {
        let mut names: Vec<&str> = ZONES.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        let available = names.into_iter().map(title_case).collect::<Vec<_>>().join(", ");
        tracing::warn!(city = %city, available = %available, "timezone not found for city");
        return ToolResult::error(format!(
            "Sorry, I don't have timezone information for {city}. Try: {available}"
        ));
    };

    let local = now.with_timezone(zone);
    tracing::debug!(city = %city, zone = %zone.name(), "time resolved");

    ToolResult::report(format!(
        "The current time in {city} is {} ({})",
        local.format("%Y-%m-%d %H:%M:%S %z"),
        zone.name()
    ))
}

pub fn time_tool() -> Tool {
    Tool::new(
        "get_current_time",
        "Returns the current time in a specified city.",
        ["city"],
        tool_fn(|args| Ok(get_current_time(text_arg(args, "city")?))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_local_time_with_offset() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 0).unwrap();
        let result = get_current_time_at("Tokyo", now);
        assert_eq!(
            result.get_str("report"),
            Some("The current time in Tokyo is 2026-01-15 21:30:00 +0900 (Asia/Tokyo)")
        );
    }

    #[test]
    fn daylight_saving_is_applied() {
        let summer = Utc.with_ymd_and_hms(2026, 7, 15, 16, 0, 0).unwrap();
        assert_eq!(
            get_current_time_at("New York", summer).get_str("report"),
            Some("The current time in New York is 2026-07-15 12:00:00 -0400 (America/New_York)")
        );

        let winter = Utc.with_ymd_and_hms(2026, 1, 15, 16, 0, 0).unwrap();
        assert_eq!(
            get_current_time_at("san francisco", winter).get_str("report"),
            Some("The current time in san francisco is 2026-01-15 08:00:00 -0800 (America/Los_Angeles)")
        );
    }

    #[test]
    fn unknown_city() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 0).unwrap();
        let result = get_current_time_at("Berlin", now);
        assert_eq!(
            result.error_message(),
            Some("Sorry, I don't have timezone information for Berlin. Try: New York, San Francisco, Tokyo")
        );
    }
}
