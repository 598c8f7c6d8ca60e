//! UTM parameter merging for outgoing redirect URLs.
//!
//! Campaign tags are best-effort decoration: a URL that cannot be parsed is
//! passed through untouched and the failure is reported through [`UtmMerge`]
//! instead of an error.

use crate::domain::entities::UtmParams;
use url::Url;

/// Outcome of [`merge_utm_params`].
///
/// Every variant yields a usable URL via [`UtmMerge::into_url`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtmMerge {
    /// Parameters were applied.
    Merged(String),
    /// Nothing to apply; the URL is returned as given.
    Unchanged(String),
    /// The URL could not be parsed; `url` is the original input.
    ParseFailed { url: String, reason: String },
}

impl UtmMerge {
    /// Returns the URL to redirect to, regardless of outcome.
    pub fn into_url(self) -> String {
        match self {
            UtmMerge::Merged(url) | UtmMerge::Unchanged(url) => url,
            UtmMerge::ParseFailed { url, .. } => url,
        }
    }
}

/// Sets `utm_*` query parameters on `url`.
///
/// Existing parameters with the same names are replaced; all other query
/// parameters are preserved in their original order, followed by the UTM
/// parameters in source, medium, campaign, term, content order.
///
/// # Examples
///
/// ```ignore
/// let utm = UtmParams { utm_source: Some("x".into()), ..Default::default() };
/// let merged = merge_utm_params("https://a.com", Some(&utm)).into_url();
/// assert_eq!(merged, "https://a.com/?utm_source=x");
/// ```
pub fn merge_utm_params(url: &str, utm: Option<&UtmParams>) -> UtmMerge {
    let Some(utm) = utm.filter(|u| !u.is_empty()) else {
        return UtmMerge::Unchanged(url.to_string());
    };

    let mut parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            return UtmMerge::ParseFailed {
                url: url.to_string(),
                reason: e.to_string(),
            };
        }
    };

    let overrides = utm.pairs();

    let retained: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !overrides.iter().any(|(name, _)| key == name))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    parsed.set_query(None);
    {
        let mut query = parsed.query_pairs_mut();
        query.extend_pairs(retained);
        for (name, value) in &overrides {
            query.append_pair(name, value);
        }
    }

    UtmMerge::Merged(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_only(value: &str) -> UtmParams {
        UtmParams {
            utm_source: Some(value.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_none_is_noop() {
        let result = merge_utm_params("https://example.com", None);
        assert_eq!(result, UtmMerge::Unchanged("https://example.com".to_string()));
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let result = merge_utm_params("https://example.com", Some(&UtmParams::default()));
        assert_eq!(result.into_url(), "https://example.com");
    }

    #[test]
    fn test_merge_single_param() {
        let result = merge_utm_params("https://a.com", Some(&source_only("x")));
        assert_eq!(result, UtmMerge::Merged("https://a.com/?utm_source=x".to_string()));
    }

    #[test]
    fn test_merge_all_params_in_order() {
        let utm = UtmParams {
            utm_source: Some("news".to_string()),
            utm_medium: Some("email".to_string()),
            utm_campaign: Some("spring".to_string()),
            utm_term: Some("shoes".to_string()),
            utm_content: Some("banner".to_string()),
        };

        let merged = merge_utm_params("https://shop.example.com/sale", Some(&utm)).into_url();

        assert_eq!(
            merged,
            "https://shop.example.com/sale?utm_source=news&utm_medium=email&utm_campaign=spring&utm_term=shoes&utm_content=banner"
        );
    }

    #[test]
    fn test_merge_overwrites_existing_param() {
        let merged = merge_utm_params(
            "https://example.com/?utm_source=old&page=2",
            Some(&source_only("new")),
        )
        .into_url();

        assert_eq!(merged, "https://example.com/?page=2&utm_source=new");
        assert!(!merged.contains("old"));
    }

    #[test]
    fn test_merge_keeps_unrelated_utm_params() {
        let merged = merge_utm_params(
            "https://example.com/?utm_medium=social",
            Some(&source_only("x")),
        )
        .into_url();

        assert_eq!(merged, "https://example.com/?utm_medium=social&utm_source=x");
    }

    #[test]
    fn test_merge_encodes_values() {
        let merged = merge_utm_params("https://example.com", Some(&source_only("a b&c"))).into_url();
        assert_eq!(merged, "https://example.com/?utm_source=a+b%26c");
    }

    #[test]
    fn test_merge_parse_failure_is_fail_open() {
        let result = merge_utm_params("not a url", Some(&source_only("x")));

        assert!(matches!(result, UtmMerge::ParseFailed { .. }));
        assert_eq!(result.into_url(), "not a url");
    }
}
