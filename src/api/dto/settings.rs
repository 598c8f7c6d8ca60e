//! DTOs for settings endpoints.

use serde::Deserialize;
use validator::Validate;

/// Request body carrying a single domain name.
///
/// Used by `PUT /api/settings/default-domain` and `POST /api/settings/domains`.
#[derive(Debug, Deserialize, Validate)]
pub struct DomainRequest {
    #[validate(length(min = 1, max = 255, message = "Domain must be 1-255 characters"))]
    pub domain: String,
}
