use crate::error::DispatchError;

/// A keyword that, when found in a query, selects a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub keyword: String,
    pub tool:    String,
}

/// Infers a tool name from free text by substring matching.
///
/// Triggers are scanned in registration order and the first keyword found in
/// the lower-cased query wins. A query containing both "convert" and "fee"
/// therefore routes to whichever of the two was registered first.
#[derive(Debug, Clone, Default)]
pub struct TriggerRouter {
    triggers: Vec<Trigger>,
}

impl TriggerRouter {
    pub fn new() -> Self {
        Self { triggers: Vec::new() }
    }

    /// Builds a router from `(keyword, tool)` pairs, keeping their order.
    pub fn from_pairs<I, K, T>(pairs: I) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        let mut router = Self::new();
        for (keyword, tool) in pairs {
            router.add(keyword, tool)?;
        }
        Ok(router)
    }

    /// Appends a trigger after all existing ones. Keywords are stored lower-cased.
    pub fn add(&mut self, keyword: impl Into<String>, tool: impl Into<String>) -> Result<(), DispatchError> {
        let keyword = keyword.into().to_lowercase();
        let tool = tool.into();
        if keyword.trim().is_empty() {
            return Err(DispatchError::EmptyTrigger(tool));
        }
        self.triggers.push(Trigger { keyword, tool });
        Ok(())
    }

    pub fn route(&self, query: &str) -> Option<&str> {
        let lowered = query.to_lowercase();
        let hit = self.triggers.iter().find(|t| lowered.contains(t.keyword.as_str()));

        match hit {
            Some(trigger) => {
                tracing::debug!(keyword = %trigger.keyword, tool = %trigger.tool, "query routed");
                Some(trigger.tool.as_str())
            }
            None => None,
        }
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registered_trigger_wins() {
        let router = TriggerRouter::from_pairs([("rate", "tool_a"), ("convert", "tool_b")]).unwrap();
        assert_eq!(router.route("please convert using current rate"), Some("tool_a"));
    }

    #[test]
    fn order_is_not_position_in_query() {
        let router = TriggerRouter::from_pairs([("convert", "tool_b"), ("rate", "tool_a")]).unwrap();
        assert_eq!(router.route("what rate should I convert at"), Some("tool_b"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let router = TriggerRouter::from_pairs([("Weather", "get_weather")]).unwrap();
        assert_eq!(router.route("WEATHER in Tokyo?"), Some("get_weather"));
    }

    #[test]
    fn no_match_returns_none() {
        let router = TriggerRouter::from_pairs([("fee", "get_fee")]).unwrap();
        assert_eq!(router.route("hello there"), None);
    }

    #[test]
    fn empty_keyword_is_rejected() {
        let mut router = TriggerRouter::new();
        let err = router.add("  ", "anything").unwrap_err();
        assert_eq!(err, DispatchError::EmptyTrigger("anything".into()));
        assert!(router.is_empty());
    }
}
