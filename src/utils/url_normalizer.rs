//! URL normalization and validation utilities.
//!
//! Destination URLs are accepted with or without a scheme. Bare hosts get
//! `https://` prepended; anything that does not parse as an absolute
//! HTTP(S) URL afterwards is rejected. Purely syntactic, no network access.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL: {0}")]
    Invalid(String),
}

/// Trims whitespace and prefixes `https://` when no HTTP(S) scheme is present.
///
/// The scheme check is case-insensitive. The input is otherwise returned as-is,
/// not re-serialized, so `example.com` becomes `https://example.com` without
/// a trailing slash.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("  example.com "), "https://example.com");
/// assert_eq!(normalize("http://example.com"), "http://example.com");
/// ```
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();

    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Normalizes `raw` and checks that it is a valid absolute HTTP(S) URL.
///
/// # Errors
///
/// Returns [`UrlError::Empty`] for empty or whitespace-only input.
/// Returns [`UrlError::Invalid`] when the normalized string does not parse or
/// uses a scheme other than `http`/`https`.
pub fn validate_and_normalize(raw: &str) -> Result<String, UrlError> {
    if raw.trim().is_empty() {
        return Err(UrlError::Empty);
    }

    let normalized = normalize(raw);
    let parsed = Url::parse(&normalized).map_err(|e| UrlError::Invalid(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(normalized),
        other => Err(UrlError::Invalid(format!("unsupported scheme '{}'", other))),
    }
}

fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
