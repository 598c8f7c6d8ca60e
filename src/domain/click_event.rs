//! Click event model for asynchronous click tracking.

use serde_json::Value;

use crate::domain::entities::ClickMetadata;

/// A click waiting to be folded into a link's statistics.
///
/// Created by the redirect handler and sent over a bounded channel to
/// [`crate::domain::click_worker::run_click_worker`], so redirects never wait
/// on storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub code: String,
    pub metadata: ClickMetadata,
}

impl ClickEvent {
    /// Builds an event carrying the selected variant and request headers.
    ///
    /// Metadata keys are `abVariant` (null when no A/B test ran), `userAgent`
    /// and `referrer`; absent headers are stored as null.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = ClickEvent::new(
    ///     "abc1234".to_string(),
    ///     Some("https://a.com"),
    ///     Some("Mozilla/5.0"),
    ///     None,
    /// );
    /// ```
    pub fn new(
        code: String,
        ab_variant: Option<&str>,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Self {
        let mut metadata = ClickMetadata::new();
        metadata.insert("abVariant".to_string(), optional(ab_variant));
        metadata.insert("userAgent".to_string(), optional(user_agent));
        metadata.insert("referrer".to_string(), optional(referrer));

        Self { code, metadata }
    }
}

fn optional(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_click_event_creation_full() {
        let event = ClickEvent::new(
            "abc1234".to_string(),
            Some("https://a.com"),
            Some("Mozilla/5.0"),
            Some("https://google.com"),
        );

        assert_eq!(event.code, "abc1234");
        assert_eq!(event.metadata["abVariant"], json!("https://a.com"));
        assert_eq!(event.metadata["userAgent"], json!("Mozilla/5.0"));
        assert_eq!(event.metadata["referrer"], json!("https://google.com"));
    }

    #[test]
    fn test_click_event_creation_minimal() {
        let event = ClickEvent::new("xyz".to_string(), None, None, None);

        assert_eq!(event.metadata.len(), 3);
        assert!(event.metadata.values().all(Value::is_null));
    }
}
