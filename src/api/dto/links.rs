//! DTOs for link management endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, LinkPatch, NewLink, UtmParams, Variant};

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Destination URL; a missing scheme defaults to `https://`.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub original_url: String,

    pub custom_code: Option<String>,

    pub utm_params: Option<UtmParams>,

    pub ab_tests: Option<Vec<Variant>>,
}

impl From<CreateLinkRequest> for NewLink {
    fn from(req: CreateLinkRequest) -> Self {
        NewLink {
            original_url: req.original_url,
            custom_code: req.custom_code.filter(|c| !c.is_empty()),
            utm_params: req.utm_params.map(UtmParams::cleaned).filter(|u| !u.is_empty()),
            ab_tests: req.ab_tests.filter(|v| !v.is_empty()),
        }
    }
}

/// Request body for `PATCH /api/links/{id}`.
///
/// Only provided fields are changed. For `utmParams`, `abTests` and
/// `customDomain`:
///
/// - **Absent** → leave existing value unchanged
/// - **`null`** → clear
/// - **Value** → set
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub original_url: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub utm_params: Option<Option<UtmParams>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub ab_tests: Option<Option<Vec<Variant>>>,

    pub is_active: Option<bool>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub custom_domain: Option<Option<String>>,
}

impl From<UpdateLinkRequest> for LinkPatch {
    fn from(req: UpdateLinkRequest) -> Self {
        LinkPatch {
            original_url: req.original_url,
            utm_params: req
                .utm_params
                .map(|u| u.map(UtmParams::cleaned).filter(|u| !u.is_empty())),
            ab_tests: req.ab_tests.map(|v| v.filter(|v| !v.is_empty())),
            is_active: req.is_active,
            custom_domain: req.custom_domain.map(|d| d.filter(|d| !d.trim().is_empty())),
        }
    }
}

/// A link together with its public short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub link: Link,
    pub short_url: String,

    /// Non-blocking A/B remark, e.g. weights that did not sum to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
