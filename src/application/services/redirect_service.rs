//! Short code resolution for redirects.

use std::sync::Arc;

use serde_json::json;
use url::Url;

use crate::domain::ab_test::select_variant;
use crate::domain::entities::{Link, Variant};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::utm::{UtmMerge, merge_utm_params};

/// A resolved redirect target.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub link: Link,
    /// The A/B variant the visitor is sent to, if the link has a test.
    pub variant: Option<Variant>,
    pub final_url: String,
}

/// Resolves short codes to their final destination.
///
/// Resolution is read-only; click tracking happens separately through the
/// click queue.
pub struct RedirectService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> RedirectService<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Resolves a short code to the URL the visitor should be sent to.
    ///
    /// Picks one A/B variant (when configured) and merges UTM parameters into
    /// the chosen URL. The result is re-serialized, so non-ASCII paths are
    /// percent-encoded and internationalized hosts use punycode.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Inactive`] if the link is disabled.
    /// Returns [`AppError::InvalidUrl`] if the destination does not parse.
    pub async fn resolve(&self, code: &str) -> Result<Resolution, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        if !link.is_active {
            return Err(AppError::inactive(
                "This link has been disabled",
                json!({ "code": code }),
            ));
        }

        let variant = link.variants().and_then(select_variant).cloned();

        let destination = variant
            .as_ref()
            .map_or(link.original_url.as_str(), |v| v.url.as_str());

        let merged = match merge_utm_params(destination, link.utm_params.as_ref()) {
            UtmMerge::ParseFailed { url, reason } => {
                tracing::warn!(code, url = %url, reason = %reason, "Could not apply UTM parameters");
                url
            }
            merged => merged.into_url(),
        };

        // Serialized form is percent-encoded with an ASCII host, so it is
        // always a valid Location header.
        let final_url = Url::parse(&merged).map(String::from).map_err(|e| {
            AppError::invalid_url(
                "Destination URL is not valid",
                json!({ "code": code, "url": merged, "reason": e.to_string() }),
            )
        })?;

        tracing::debug!(
            code,
            variant = variant.as_ref().map(|v| v.url.as_str()),
            final_url = %final_url,
            "Short code resolved"
        );

        Ok(Resolution {
            link,
            variant,
            final_url,
        })
    }

    /// Returns the raw link for a code without resolving it.
    pub async fn peek(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.link_repository.find_by_code(code).await
    }
}
